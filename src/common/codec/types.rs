// Mode
//------------------------------------------------------------------------------

/// Character sets of the high level encoding. Upper is the initial mode and the mode
/// binary shift returns to.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Mode {
    Upper = 0,
    Lower = 1,
    Digit = 2,
    Mixed = 3,
    Punct = 4,
}

pub const MODES: [Mode; 5] = [Mode::Upper, Mode::Lower, Mode::Digit, Mode::Mixed, Mode::Punct];

impl Mode {
    /// Bits per code word in this mode
    pub fn bit_width(&self) -> usize {
        match self {
            Self::Digit => 4,
            _ => 5,
        }
    }

    /// Code of a single byte in this mode
    pub fn code(&self, byte: u8) -> Option<u16> {
        let code = match self {
            Self::Upper => match byte {
                b' ' => 1,
                b'A'..=b'Z' => byte - b'A' + 2,
                _ => return None,
            },
            Self::Lower => match byte {
                b' ' => 1,
                b'a'..=b'z' => byte - b'a' + 2,
                _ => return None,
            },
            Self::Digit => match byte {
                b' ' => 1,
                b'0'..=b'9' => byte - b'0' + 2,
                b',' => 12,
                b'.' => 13,
                _ => return None,
            },
            Self::Mixed => match byte {
                b' ' => 1,
                1..=13 => byte + 1,
                27..=31 => byte - 12,
                b'@' => 20,
                b'\\' => 21,
                b'^' => 22,
                b'_' => 23,
                b'`' => 24,
                b'|' => 25,
                b'~' => 26,
                127 => 27,
                _ => return None,
            },
            Self::Punct => match byte {
                b'\r' => 1,
                33..=47 => byte - 27,
                58..=63 => byte - 37,
                b'[' => 27,
                b']' => 28,
                b'{' => 29,
                b'}' => 30,
                _ => return None,
            },
        };
        Some(code as u16)
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.code(byte).is_some()
    }

    /// Code word sequence switching permanently from this mode to `to`, as
    /// (bits, bit count). Latching to the current mode costs nothing.
    pub fn latch(&self, to: Mode) -> (u16, usize) {
        use Mode::*;
        match (*self, to) {
            (a, b) if a == b => (0, 0),
            (Upper, Lower) => (28, 5),
            (Upper, Digit) => (30, 5),
            (Upper, Mixed) => (29, 5),
            (Upper, Punct) => ((29 << 5) | 30, 10),
            (Lower, Upper) => ((30 << 4) | 14, 9),
            (Lower, Digit) => (30, 5),
            (Lower, Mixed) => (29, 5),
            (Lower, Punct) => ((29 << 5) | 30, 10),
            (Digit, Upper) => (14, 4),
            (Digit, Lower) => ((14 << 5) | 28, 9),
            (Digit, Mixed) => ((14 << 5) | 29, 9),
            (Digit, Punct) => ((14 << 10) | (29 << 5) | 30, 14),
            (Mixed, Upper) => (29, 5),
            (Mixed, Lower) => (28, 5),
            (Mixed, Digit) => ((29 << 5) | 30, 10),
            (Mixed, Punct) => (30, 5),
            (Punct, Upper) => (31, 5),
            (Punct, Lower) => ((31 << 5) | 28, 10),
            (Punct, Digit) => ((31 << 5) | 30, 10),
            (Punct, Mixed) => ((31 << 5) | 29, 10),
            _ => unreachable!(),
        }
    }

    /// Code word shifting to `to` for a single character, if one exists
    pub fn shift(&self, to: Mode) -> Option<u16> {
        use Mode::*;
        match (*self, to) {
            (Upper | Lower | Mixed | Digit, Punct) => Some(0),
            (Lower, Upper) => Some(28),
            (Digit, Upper) => Some(15),
            _ => None,
        }
    }
}

/// Punct code of a two byte sequence encoded as a single character
pub fn pair_code(first: u8, second: u8) -> Option<u16> {
    match (first, second) {
        (b'\r', b'\n') => Some(2),
        (b'.', b' ') => Some(3),
        (b',', b' ') => Some(4),
        (b':', b' ') => Some(5),
        _ => None,
    }
}

/// Code word starting a binary shift run in Upper, Lower and Mixed modes
pub const BINARY_SHIFT: u16 = 31;

/// Longest run a binary shift can hold
pub const MAX_BINARY_RUN: usize = 2047 + 31;
