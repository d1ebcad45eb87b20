use std::sync::OnceLock;

// Galois field
//------------------------------------------------------------------------------

/// Log and antilog tables for GF(2^w), generated by the primitive element 2.
#[derive(Debug)]
pub struct GaloisField {
    // Number of elements
    size: usize,
    // Antilog table, doubled to skip the modulo on multiplication
    exp: Vec<u16>,
    log: Vec<u16>,
}

static GF16: OnceLock<GaloisField> = OnceLock::new();
static GF64: OnceLock<GaloisField> = OnceLock::new();
static GF256: OnceLock<GaloisField> = OnceLock::new();
static GF1024: OnceLock<GaloisField> = OnceLock::new();
static GF4096: OnceLock<GaloisField> = OnceLock::new();

impl GaloisField {
    /// Field used for codewords of `word_size` bits. Tables are built once per field
    /// and shared across threads.
    pub fn for_word_size(word_size: usize) -> &'static Self {
        let (cell, poly) = match word_size {
            4 => (&GF16, 0x13),
            6 => (&GF64, 0x43),
            8 => (&GF256, 0x12D),
            10 => (&GF1024, 0x409),
            12 => (&GF4096, 0x1069),
            _ => unreachable!("No field for word size {word_size}"),
        };
        cell.get_or_init(|| Self::new(poly, 1 << word_size))
    }

    fn new(primitive: u32, size: usize) -> Self {
        let mut exp = vec![0u16; size * 2];
        let mut log = vec![0u16; size];
        let mut x = 1u32;
        for e in exp.iter_mut().take(size) {
            *e = x as u16;
            x <<= 1;
            if x as usize >= size {
                x ^= primitive;
                x &= size as u32 - 1;
            }
        }
        for i in 0..size - 1 {
            log[exp[i] as usize] = i as u16;
        }
        for i in size..size * 2 {
            exp[i] = exp[i - (size - 1)];
        }
        Self { size, exp, log }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Generator raised to the power `i`
    pub fn exp(&self, i: usize) -> u16 {
        self.exp[i % (self.size - 1)]
    }

    pub fn log(&self, x: u16) -> usize {
        debug_assert!(x != 0, "Log of zero");
        self.log[x as usize] as usize
    }

    pub fn add(&self, a: u16, b: u16) -> u16 {
        a ^ b
    }

    pub fn mul(&self, a: u16, b: u16) -> u16 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp[self.log[a as usize] as usize + self.log[b as usize] as usize]
    }

    pub fn inv(&self, a: u16) -> u16 {
        debug_assert!(a != 0, "Inverse of zero");
        self.exp[self.size - 1 - self.log[a as usize] as usize]
    }

    pub fn div(&self, a: u16, b: u16) -> u16 {
        self.mul(a, self.inv(b))
    }
}
