use std::fmt::{Display, Formatter};
use std::ops::{Deref, Not};

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub fn select<T>(&self, dark: T, light: T) -> T {
        match self {
            Self::Dark => dark,
            Self::Light => light,
        }
    }
}

impl From<bool> for Color {
    fn from(bit: bool) -> Self {
        if bit {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

// Layers
//------------------------------------------------------------------------------

/// Symbol form and number of data layers.
///
/// Compact symbols carry 1 to 4 layers around a 2-ring bullseye, full range symbols
/// carry 1 to 32 layers around a 3-ring bullseye and a reference grid every 16 modules.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Layers {
    Compact(usize),
    Full(usize),
}

impl Deref for Layers {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        match self {
            Self::Compact(l) => l,
            Self::Full(l) => l,
        }
    }
}

impl Display for Layers {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Compact(l) => write!(f, "Compact {l}"),
            Self::Full(l) => write!(f, "Full {l}"),
        }
    }
}

impl Layers {
    pub const fn is_compact(&self) -> bool {
        matches!(self, Self::Compact(_))
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Self::Compact(l) => (1..=MAX_COMPACT_LAYERS).contains(l),
            Self::Full(l) => (1..=MAX_FULL_LAYERS).contains(l),
        }
    }

    /// Auto sizing order. Full symbols with fewer than 4 layers are skipped since
    /// the compact symbol of the same width holds more data.
    pub(crate) fn candidates() -> impl Iterator<Item = Layers> {
        (1..=MAX_COMPACT_LAYERS).map(Self::Compact).chain((4..=MAX_FULL_LAYERS).map(Self::Full))
    }

    /// Width without the reference grid lines
    pub fn base_width(&self) -> usize {
        match self {
            Self::Compact(l) => 11 + l * 4,
            Self::Full(l) => 14 + l * 4,
        }
    }

    pub fn width(&self) -> usize {
        let base = self.base_width();
        match self {
            Self::Compact(_) => base,
            Self::Full(_) => base + 1 + 2 * ((base / 2 - 1) / 15),
        }
    }

    /// Bits available in all data layers
    pub fn total_bits(&self) -> usize {
        match self {
            Self::Compact(l) => (88 + 16 * l) * l,
            Self::Full(l) => (112 + 16 * l) * l,
        }
    }

    pub fn word_size(&self) -> usize {
        match **self {
            1..=2 => 6,
            3..=8 => 8,
            9..=22 => 10,
            23..=32 => 12,
            l => unreachable!("Invalid layer count {l}"),
        }
    }

    pub fn total_codewords(&self) -> usize {
        self.total_bits() / self.word_size()
    }

    /// Largest data codeword count the mode message can describe
    pub fn max_data_codewords(&self) -> usize {
        match self {
            Self::Compact(_) => 1 << COMPACT_MODE_COUNT_BITS,
            Self::Full(_) => 1 << FULL_MODE_COUNT_BITS,
        }
    }

    /// Chebyshev distance from the center to the ring holding the mode message
    pub fn bullseye_radius(&self) -> i16 {
        match self {
            Self::Compact(_) => 5,
            Self::Full(_) => 7,
        }
    }

    /// Maps coordinates of the grid-free layout to matrix coordinates, skipping the
    /// reference grid lines of full range symbols.
    pub fn alignment_map(&self) -> Vec<i16> {
        let base = self.base_width();
        match self {
            Self::Compact(_) => (0..base as i16).collect(),
            Self::Full(_) => {
                let mut map = vec![0; base];
                let orig_center = base / 2;
                let center = (self.width() / 2) as i16;
                for i in 0..orig_center {
                    let off = (i + i / 15) as i16;
                    map[orig_center - i - 1] = center - off - 1;
                    map[orig_center + i] = center + off + 1;
                }
                map
            }
        }
    }
}


// Global constants
//------------------------------------------------------------------------------

pub const MAX_COMPACT_LAYERS: usize = 4;

pub const MAX_FULL_LAYERS: usize = 32;

pub const COMPACT_MODE_LAYER_BITS: usize = 2;

pub const COMPACT_MODE_COUNT_BITS: usize = 6;

pub const FULL_MODE_LAYER_BITS: usize = 5;

pub const FULL_MODE_COUNT_BITS: usize = 11;

pub const MODE_WORD_SIZE: usize = 4;

// Total mode message words including error correction
pub const COMPACT_MODE_WORDS: usize = 7;

pub const FULL_MODE_WORDS: usize = 10;

pub const DEFAULT_ECC_PERCENT: i32 = 23;

// Fixed error correction bits on top of the percentage
pub const ECC_EXTRA_BITS: usize = 11;
