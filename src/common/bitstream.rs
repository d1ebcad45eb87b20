use num_traits::{AsPrimitive, PrimInt};

// Bit stream
//------------------------------------------------------------------------------

/// Growable MSB-first bit buffer. Holds the high level encoding, the stuffed
/// codewords and the final payload drawn onto the symbol.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Read position for iteration
    cursor: usize,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bit_capacity: usize) -> Self {
        Self { data: Vec::with_capacity((bit_capacity + 7) >> 3), len: 0, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, i: usize) -> bool {
        debug_assert!(i < self.len, "Index out of bounds: Index {i}, Len {}", self.len);
        self.data[i >> 3] & (0b10000000 >> (i & 7)) != 0
    }

    pub fn push(&mut self, bit: bool) {
        let offset = self.len & 7;
        if offset == 0 {
            self.data.push(0);
        }
        if bit {
            let pos = self.len >> 3;
            self.data[pos] |= 0b10000000 >> offset;
        }
        self.len += 1;
    }

    /// Appends the `size` least significant bits of `bits`, most significant first.
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + AsPrimitive<u32>,
    {
        let bits: u32 = bits.as_();
        debug_assert!(size <= 32, "Size exceeds 32 bits: Size {size}");
        debug_assert!(
            size >= (32 - bits.leading_zeros()) as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );

        let mut rem = size;
        while rem > 0 {
            let offset = self.len & 7;
            if offset == 0 {
                self.data.push(0);
            }
            let chunk = rem.min(8 - offset);
            let val = ((bits >> (rem - chunk)) & ((1 << chunk) - 1)) as u8;
            let pos = self.len >> 3;
            self.data[pos] |= val << (8 - offset - chunk);
            self.len += chunk;
            rem -= chunk;
        }
    }

    /// Reads `size` bits at `pos` as an integer. Bits past the end read as `fill`.
    pub fn read(&self, pos: usize, size: usize, fill: bool) -> u16 {
        debug_assert!(size <= 16, "Size exceeds 16 bits: Size {size}");
        (pos..pos + size).fold(0, |acc, i| {
            let bit = if i < self.len { self.get(i) } else { fill };
            (acc << 1) | bit as u16
        })
    }
}

// Bit stuffing
//------------------------------------------------------------------------------

impl BitStream {
    /// Splits the stream into codewords of `word_size` bits so that no codeword is
    /// all zeros or all ones.
    ///
    /// When the first `word_size - 1` bits of a word are identical, only those are
    /// consumed and the last bit is set to their complement. The final partial word
    /// is padded with ones, and fixed the same way if that makes it all ones.
    pub fn stuff(&self, word_size: usize) -> Vec<u16> {
        let mask = (1u16 << word_size) - 2;
        let mut words = Vec::with_capacity(self.len / (word_size - 1) + 1);
        let mut i = 0;
        while i < self.len {
            let word = self.read(i, word_size, true);
            if word & mask == mask {
                words.push(word & mask);
                i += word_size - 1;
            } else if word & mask == 0 {
                words.push(word | 1);
                i += word_size - 1;
            } else {
                words.push(word);
                i += word_size;
            }
        }
        words
    }

    /// Packs codewords of `word_size` bits, preceded by `pad` zero bits.
    pub fn from_codewords(words: &[u16], word_size: usize, pad: usize) -> Self {
        let mut bs = Self::with_capacity(pad + words.len() * word_size);
        (0..pad).for_each(|_| bs.push(false));
        for &w in words {
            bs.push_bits(w, word_size);
        }
        bs
    }

    /// Splits the stream into whole codewords of `word_size` bits
    #[cfg(test)]
    pub fn codewords(&self, word_size: usize) -> Vec<u16> {
        (0..self.len / word_size).map(|i| self.read(i * word_size, word_size, false)).collect()
    }
}

impl Iterator for BitStream {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }
        let bit = self.get(self.cursor);
        self.cursor += 1;
        Some(bit)
    }
}
