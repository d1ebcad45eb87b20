use super::{Mode, BINARY_SHIFT};
use crate::common::BitStream;

// Token
//------------------------------------------------------------------------------

/// One emitted unit of the high level encoding
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Token {
    /// Code word, latch or shift sequence of `size` bits
    Simple { value: u16, size: usize },
    /// Run of `len` raw bytes starting at `start` in the input
    BinaryShift { start: usize, len: usize },
}

impl Token {
    pub fn bit_len(&self) -> usize {
        match *self {
            Self::Simple { size, .. } => size,
            Self::BinaryShift { len, .. } if len <= 31 => 10 + 8 * len,
            Self::BinaryShift { len, .. } if len <= 62 => 20 + 8 * len,
            Self::BinaryShift { len, .. } => 21 + 8 * len,
        }
    }

    pub fn push_to(&self, data: &[u8], bs: &mut BitStream) {
        match *self {
            Self::Simple { value, size } => bs.push_bits(value, size),
            Self::BinaryShift { start, len } => {
                for (i, &b) in data[start..start + len].iter().enumerate() {
                    // Runs up to 62 bytes are split into two headers of at most 31
                    if i == 0 || (i == 31 && len <= 62) {
                        bs.push_bits(BINARY_SHIFT, Mode::Upper.bit_width());
                        if len > 62 {
                            bs.push_bits((len - 31) as u16, 16);
                        } else if i == 0 {
                            bs.push_bits(len.min(31) as u16, 5);
                        } else {
                            bs.push_bits((len - 31) as u16, 5);
                        }
                    }
                    bs.push_bits(b, 8);
                }
            }
        }
    }
}

// Token arena
//------------------------------------------------------------------------------

#[derive(Debug, Copy, Clone)]
struct Node {
    token: Token,
    prev: Option<usize>,
}

/// Append-only store of backward linked token chains. Competing encoder states
/// share common prefixes by pointing at the same node.
#[derive(Debug, Default)]
pub struct TokenArena {
    nodes: Vec<Node>,
}

impl TokenArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends `token` after `prev` and returns the index of the new chain end
    pub fn push(&mut self, prev: Option<usize>, token: Token) -> usize {
        self.nodes.push(Node { token, prev });
        self.nodes.len() - 1
    }

    /// Tokens of the chain ending at `last`, first token first
    pub fn chain(&self, last: Option<usize>) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut cur = last;
        while let Some(i) = cur {
            tokens.push(self.nodes[i].token);
            cur = self.nodes[i].prev;
        }
        tokens.reverse();
        tokens
    }
}

// Token chain
//------------------------------------------------------------------------------

/// Winning high level encoding of an input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenChain {
    tokens: Vec<Token>,
    bit_len: usize,
}

impl TokenChain {
    pub fn new(tokens: Vec<Token>) -> Self {
        let bit_len = tokens.iter().map(Token::bit_len).sum();
        Self { tokens, bit_len }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Renders the chain into a bit stream. `data` must be the encoded input.
    pub fn to_bits(&self, data: &[u8]) -> BitStream {
        let mut bs = BitStream::with_capacity(self.bit_len);
        for t in self.tokens.iter() {
            t.push_to(data, &mut bs);
        }
        debug_assert!(
            bs.len() == self.bit_len,
            "Rendered length doesn't match: Rendered {}, Expected {}",
            bs.len(),
            self.bit_len
        );
        bs
    }
}
