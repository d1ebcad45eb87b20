use super::Mode;
use crate::common::BitStream;

// Decoder
//------------------------------------------------------------------------------

// Character produced by a code, or the mode switch it requests
enum Code {
    Char(u8),
    Pair(&'static [u8]),
    Latch(Mode),
    Shift(Mode),
    BinaryShift,
    Flag,
}

fn lookup(mode: Mode, code: u16) -> Code {
    use Code::*;
    use Mode::*;
    match (mode, code) {
        (Punct, 0) => Flag,
        (Punct, 2) => Pair(b"\r\n"),
        (Punct, 3) => Pair(b". "),
        (Punct, 4) => Pair(b", "),
        (Punct, 5) => Pair(b": "),
        (Punct, 31) => Latch(Upper),
        (Digit, 14) => Latch(Upper),
        (Digit, 15) => Shift(Upper),
        (_, 0) => Shift(Punct),
        (Upper, 28) | (Mixed, 28) => Latch(Lower),
        (Lower, 28) => Shift(Upper),
        (Upper | Lower, 29) => Latch(Mixed),
        (Upper | Lower, 30) => Latch(Digit),
        (Mixed, 29) => Latch(Upper),
        (Mixed, 30) => Latch(Punct),
        (Upper | Lower | Mixed, 31) => BinaryShift,
        _ => match (0..=255u8).find(|&b| mode.code(b) == Some(code)) {
            Some(b) => Char(b),
            None => unreachable!("Invalid code {code} in {mode:?}"),
        },
    }
}

/// Decodes a high level bit stream back into bytes. Trailing bits too short for a
/// code word are ignored.
pub fn decode(bs: &BitStream) -> Vec<u8> {
    let end = bs.len();
    let mut res = Vec::new();
    let mut latch = Mode::Upper;
    let mut shift = Mode::Upper;
    let mut i = 0;
    while i < end {
        let size = shift.bit_width();
        if end - i < size {
            break;
        }
        let code = bs.read(i, size, false);
        i += size;
        match lookup(shift, code) {
            Code::Char(b) => {
                res.push(b);
                shift = latch;
            }
            Code::Pair(pair) => {
                res.extend_from_slice(pair);
                shift = latch;
            }
            Code::Latch(mode) => {
                latch = mode;
                shift = mode;
            }
            Code::Shift(mode) => {
                latch = shift;
                shift = mode;
            }
            Code::Flag => shift = latch,
            Code::BinaryShift => {
                if end - i < 5 {
                    break;
                }
                let mut len = bs.read(i, 5, false) as usize;
                i += 5;
                if len == 0 {
                    if end - i < 11 {
                        break;
                    }
                    len = bs.read(i, 11, false) as usize + 31;
                    i += 11;
                }
                for _ in 0..len {
                    if end - i < 8 {
                        i = end;
                        break;
                    }
                    res.push(bs.read(i, 8, false) as u8);
                    i += 8;
                }
                shift = latch;
            }
        }
    }
    res
}

#[cfg(test)]
mod decode_tests {
    use test_case::test_case;

    use super::decode;
    use crate::common::codec::encode_tokens;

    #[test_case(b"Hello, World!")]
    #[test_case(b"AB12\x80")]
    #[test_case(b"Code 2D!\r\n: . , ")]
    #[test_case(b"abc\x00\x01\x02~|@\x7f")]
    #[test_case(b"1234.5678, 90")]
    fn test_decode(data: &[u8]) {
        let bs = encode_tokens(data).unwrap().to_bits(data);
        assert_eq!(decode(&bs), data);
    }

    #[test]
    fn test_decode_long_binary() {
        let data = (0..300).map(|i| (i * 7 % 256) as u8 | 0x80).collect::<Vec<_>>();
        let bs = encode_tokens(&data).unwrap().to_bits(&data);
        assert_eq!(decode(&bs), data);
    }
}
