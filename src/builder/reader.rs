use crate::common::{
    codec::decode,
    ec::{rectify, GaloisField},
    metadata::*,
    BitStream,
};

// Reference reader
//------------------------------------------------------------------------------

#[derive(Debug)]
pub struct Decoded {
    pub layers: Layers,
    pub data_codewords: usize,
    // All codewords after error correction
    pub codewords: Vec<u16>,
    pub corrected: usize,
    pub data: Vec<u8>,
}

/// Reads an upright symbol matrix back into bytes. Returns `None` if the mode
/// message or the data can't be corrected.
pub fn read(matrix: &[Vec<bool>]) -> Option<Decoded> {
    let w = matrix.len() as i16;
    let center = w / 2;
    let dark = |r: i16, c: i16| matrix[r as usize][c as usize];
    let ring = |d: i16| {
        (-d..=d).flat_map(move |k| {
            [
                (center - d, center + k),
                (center + d, center + k),
                (center + k, center - d),
                (center + k, center + d),
            ]
        })
    };

    // Full range bullseye has a dark ring at distance 6 inside a light ring at 5,
    // compact symbols have orientation marks at 5
    let compact = !(ring(6).all(|(r, c)| dark(r, c)) && ring(5).all(|(r, c)| !dark(r, c)));
    let (s, side, data_words, count_bits) = if compact {
        (5, 7, 2, COMPACT_MODE_COUNT_BITS)
    } else {
        (7, 10, 4, FULL_MODE_COUNT_BITS)
    };

    // Mode message, clockwise from the top left
    let offsets = (0..side as i16)
        .map(|i| if compact { center - 3 + i } else { center - 5 + i + i / 5 })
        .collect::<Vec<_>>();
    let mut msg = BitStream::new();
    offsets.iter().for_each(|&o| msg.push(dark(center - s, o)));
    offsets.iter().for_each(|&o| msg.push(dark(o, center + s)));
    offsets.iter().rev().for_each(|&o| msg.push(dark(center + s, o)));
    offsets.iter().rev().for_each(|&o| msg.push(dark(o, center - s)));

    let mut mode_words = msg.codewords(MODE_WORD_SIZE);
    let gf16 = GaloisField::for_word_size(MODE_WORD_SIZE);
    let mode_ecc = mode_words.len() - data_words;
    rectify(&mut mode_words, mode_ecc, gf16)?;
    let value = mode_words[..data_words].iter().fold(0usize, |acc, &w| (acc << 4) | w as usize);
    let layer_count = (value >> count_bits) + 1;
    let data_codewords = (value & ((1 << count_bits) - 1)) + 1;
    let layers = if compact { Layers::Compact(layer_count) } else { Layers::Full(layer_count) };

    // Raw layer bits, outermost layer first
    let base = layers.base_width();
    let map = layers.alignment_map();
    let mut raw = BitStream::with_capacity(layers.total_bits());
    for i in 0..layer_count {
        let row_size = (layer_count - i) * 4 + if compact { 9 } else { 12 };
        let low = i * 2;
        let high = base - 1 - low;
        let mut sides = vec![Vec::with_capacity(row_size * 2); 4];
        for j in 0..row_size {
            for k in 0..2 {
                sides[0].push(dark(map[low + j], map[low + k]));
                sides[1].push(dark(map[high - k], map[low + j]));
                sides[2].push(dark(map[high - j], map[high - k]));
                sides[3].push(dark(map[low + k], map[high - j]));
            }
        }
        sides.into_iter().flatten().for_each(|b| raw.push(b));
    }

    // Codewords are aligned to the end of the layers
    let word_size = layers.word_size();
    let pad = raw.len() % word_size;
    let total = raw.len() / word_size;
    let mut codewords =
        (0..total).map(|i| raw.read(pad + i * word_size, word_size, false)).collect::<Vec<_>>();
    let gf = GaloisField::for_word_size(word_size);
    let corrected = rectify(&mut codewords, total - data_codewords, gf)?;

    // Unstuff
    let mask = (1 << word_size) - 1;
    let mut bits = BitStream::new();
    for &w in codewords[..data_codewords].iter() {
        if w == 1 || w == mask - 1 {
            (0..word_size - 1).for_each(|_| bits.push(w > 1));
        } else {
            bits.push_bits(w, word_size);
        }
    }

    Some(Decoded { layers, data_codewords, codewords, corrected, data: decode(&bits) })
}
