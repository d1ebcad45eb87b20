mod symbol;

#[cfg(test)]
mod reader;

pub use symbol::{Module, Symbol, QUIET_ZONE};

use log::{debug, trace};

use crate::common::{
    codec::encode_tokens,
    ec::{ecc, GaloisField},
    error::{AztecError, AztecResult},
    metadata::*,
    BitStream,
};

/// Encodes `data` with the default error correction percentage and the smallest
/// symbol that holds it.
pub fn encode(data: &[u8]) -> AztecResult<Symbol> {
    AztecBuilder::new(data).build()
}

/// Encodes `data` reserving at least `min_ecc_percent` percent of the data bits,
/// plus a fixed 11 bits, for error correction.
pub fn encode_with_ecc(data: &[u8], min_ecc_percent: i32) -> AztecResult<Symbol> {
    AztecBuilder::new(data).ecc_percent(min_ecc_percent).build()
}

pub struct AztecBuilder<'a> {
    data: &'a [u8],
    ecc_percent: i32,
    layers: Option<Layers>,
}

impl<'a> AztecBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, ecc_percent: DEFAULT_ECC_PERCENT, layers: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn ecc_percent(&mut self, ecc_percent: i32) -> &mut Self {
        self.ecc_percent = ecc_percent;
        self
    }

    /// Forces the symbol form and layer count instead of picking the smallest fit
    pub fn layers(&mut self, layers: Layers) -> &mut Self {
        self.layers = Some(layers);
        self
    }

    pub fn unset_layers(&mut self) -> &mut Self {
        self.layers = None;
        self
    }

    pub fn metadata(&self) -> String {
        match self.layers {
            Some(l) => format!("{{ Layers: {l}, Ecc percent: {} }}", self.ecc_percent),
            None => format!("{{ Layers: Auto, Ecc percent: {} }}", self.ecc_percent),
        }
    }
}


impl AztecBuilder<'_> {
    pub fn build(&self) -> AztecResult<Symbol> {
        if self.ecc_percent < 0 {
            return Err(AztecError::InvalidEccPercent(self.ecc_percent));
        }
        if let Some(l) = self.layers.filter(|l| !l.is_valid()) {
            return Err(AztecError::InvalidLayers(l));
        }

        debug!("Generating Aztec symbol {}...", self.metadata());

        // Encode data optimally
        let bits = encode_tokens(self.data)?.to_bits(self.data);
        debug!("Encoded {} bytes into {} bits", self.data.len(), bits.len());

        let ecc_bits = bits.len() * self.ecc_percent as usize / 100 + ECC_EXTRA_BITS;
        let (layers, data_words) = match self.layers {
            Some(l) => (l, Self::fit_layers(&bits, ecc_bits, l)?),
            None => {
                debug!("Finding smallest symbol...");
                Self::find_layers(&bits, ecc_bits)?
            }
        };

        let word_size = layers.word_size();
        let total_codewords = layers.total_codewords();
        let ecc_count = total_codewords - data_words.len();
        debug!(
            "Layers: {layers}, Word size: {word_size}, Data codewords: {}, Ecc codewords: {ecc_count}",
            data_words.len()
        );

        // Compute error correction codewords
        let gf = GaloisField::for_word_size(word_size);
        let mut codewords = data_words.clone();
        codewords.extend(ecc(&data_words, ecc_count, gf));

        // Leftover bits of the layers lead the payload
        let pad = layers.total_bits() % word_size;
        let payload = BitStream::from_codewords(&codewords, word_size, pad);

        let mut symbol = Symbol::new(layers, data_words.len(), ecc_count);
        symbol.draw_all_function_patterns();
        symbol.draw_mode_message(&Self::mode_message(layers, data_words.len()));
        symbol.draw_data(&payload);

        debug!(
            "Aztec symbol generated: Width {}, Dark modules {}",
            symbol.width(),
            symbol.count_dark_modules()
        );

        Ok(symbol)
    }

    // Smallest candidate symbol that holds the stuffed data and ecc bits
    fn find_layers(bits: &BitStream, ecc_bits: usize) -> AztecResult<(Layers, Vec<u16>)> {
        let mut word_size = 0;
        let mut words = Vec::new();
        for layers in Layers::candidates() {
            if bits.len() + ecc_bits > layers.total_bits() {
                trace!("{layers} too small for {} bits", bits.len() + ecc_bits);
                continue;
            }
            // Stuffing depends only on the word size
            if word_size != layers.word_size() {
                word_size = layers.word_size();
                words = bits.stuff(word_size);
            }
            if Self::fits(layers, &words, ecc_bits) {
                return Ok((layers, words));
            }
            trace!("{layers} too small for {} stuffed codewords", words.len());
        }
        Err(AztecError::DataTooLarge)
    }

    fn fit_layers(bits: &BitStream, ecc_bits: usize, layers: Layers) -> AztecResult<Vec<u16>> {
        let words = bits.stuff(layers.word_size());
        if Self::fits(layers, &words, ecc_bits) {
            Ok(words)
        } else {
            Err(AztecError::DataTooLarge)
        }
    }

    fn fits(layers: Layers, words: &[u16], ecc_bits: usize) -> bool {
        let word_size = layers.word_size();
        let total_bits = layers.total_bits();
        let usable_bits = total_bits - total_bits % word_size;
        words.len() <= layers.max_data_codewords()
            && words.len() * word_size + ecc_bits <= usable_bits
    }

    /// Layer count and data codeword count in 4 bit words, followed by their
    /// error correction words over GF(16).
    pub(crate) fn mode_message(layers: Layers, data_codewords: usize) -> BitStream {
        let (count_bits, data_words, total_words) = if layers.is_compact() {
            (COMPACT_MODE_COUNT_BITS, 2, COMPACT_MODE_WORDS)
        } else {
            (FULL_MODE_COUNT_BITS, 4, FULL_MODE_WORDS)
        };
        // No data codewords writes 0 in the count field instead of wrapping to all ones
        let value = ((*layers - 1) << count_bits) | data_codewords.saturating_sub(1);
        let mut words = (0..data_words)
            .rev()
            .map(|i| ((value >> (i * MODE_WORD_SIZE)) & 0xF) as u16)
            .collect::<Vec<_>>();

        let gf = GaloisField::for_word_size(MODE_WORD_SIZE);
        words.extend(ecc(&words, total_words - data_words, gf));
        BitStream::from_codewords(&words, MODE_WORD_SIZE, 0)
    }
}
