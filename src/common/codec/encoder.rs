use log::trace;

use super::{pair_code, Mode, Token, TokenArena, TokenChain, MAX_BINARY_RUN, MODES};
use crate::common::error::{AztecError, AztecResult};

// Encoder state
//------------------------------------------------------------------------------

/// Candidate partial encoding after some prefix of the input
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
struct State {
    mode: Mode,
    // End of the token chain in the arena
    token: Option<usize>,
    // Bytes in the open binary shift run, not yet emitted as a token
    binary_len: usize,
    bit_len: usize,
}

impl State {
    fn initial() -> Self {
        Self { mode: Mode::Upper, token: None, binary_len: 0, bit_len: 0 }
    }

    fn append(&self, arena: &mut TokenArena, value: u16, size: usize) -> Option<usize> {
        Some(arena.push(self.token, Token::Simple { value, size }))
    }

    // Latches to `mode` unless already there, then emits `value` in it
    fn latch_and_append(&self, arena: &mut TokenArena, mode: Mode, value: u16) -> Self {
        debug_assert!(self.binary_len == 0, "Binary run must be closed before latching");
        let mut res = *self;
        if mode != self.mode {
            let (bits, size) = self.mode.latch(mode);
            res.token = res.append(arena, bits, size);
            res.bit_len += size;
        }
        let size = mode.bit_width();
        res.token = res.append(arena, value, size);
        Self { mode, token: res.token, binary_len: 0, bit_len: res.bit_len + size }
    }

    // Emits `value` in `mode` for one character and stays in the current mode
    fn shift_and_append(&self, arena: &mut TokenArena, mode: Mode, value: u16) -> Option<Self> {
        debug_assert!(self.binary_len == 0, "Binary run must be closed before shifting");
        let shift = self.mode.shift(mode)?;
        let size = self.mode.bit_width();
        let mut res = *self;
        res.token = res.append(arena, shift, size);
        res.token = res.append(arena, value, mode.bit_width());
        res.bit_len += size + mode.bit_width();
        Some(res)
    }

    // Adds the byte at `index` to the binary run, opening one if needed
    fn add_binary_shift_char(&self, arena: &mut TokenArena, index: usize) -> Self {
        let mut res = *self;
        // Binary shift isn't available in Punct and Digit modes
        if matches!(self.mode, Mode::Punct | Mode::Digit) {
            let (bits, size) = self.mode.latch(Mode::Upper);
            res.token = res.append(arena, bits, size);
            res.bit_len += size;
            res.mode = Mode::Upper;
        }
        res.bit_len += match self.binary_len {
            // B/S with a 5 bit length
            0 | 31 => 18,
            // Switch to the 11 bit extended length
            62 => 9,
            _ => 8,
        };
        res.binary_len += 1;
        if res.binary_len == MAX_BINARY_RUN {
            res = res.end_binary_shift(arena, index + 1);
        }
        res
    }

    // Closes the open binary run, which ends just before `index`
    fn end_binary_shift(&self, arena: &mut TokenArena, index: usize) -> Self {
        if self.binary_len == 0 {
            return *self;
        }
        let token = Token::BinaryShift { start: index - self.binary_len, len: self.binary_len };
        let token = Some(arena.push(self.token, token));
        Self { token, binary_len: 0, ..*self }
    }

    // Header bits paid so far by the open binary run
    fn binary_shift_cost(&self) -> usize {
        match self.binary_len {
            0 => 0,
            1..=31 => 10,
            32..=62 => 20,
            _ => 21,
        }
    }

    /// True if every continuation of `other` costs at least as much as the same
    /// continuation of `self`.
    fn is_better_than_or_equal_to(&self, other: &Self) -> bool {
        let mut bit_len = self.bit_len + self.mode.latch(other.mode).1;
        if self.binary_len < other.binary_len {
            // Headers `other` already paid for that `self` may still have to pay
            bit_len += other.binary_shift_cost() - self.binary_shift_cost();
        } else if self.binary_len > other.binary_len && other.binary_len > 0 {
            // `self` may cross a header boundary that `other` stays under
            bit_len += 10;
        }
        bit_len <= other.bit_len
    }
}

// Encoder
//------------------------------------------------------------------------------

/// Finds the shortest high level encoding of `data`.
///
/// Dynamic programming over input positions. Each live state is extended by every
/// latch, shift, pair code and binary shift option for the next character, then
/// states dominated by another are dropped.
pub fn encode_tokens(data: &[u8]) -> AztecResult<TokenChain> {
    let mut arena = TokenArena::new();
    let mut states = vec![State::initial()];
    let len = data.len();
    let mut i = 0;
    while i < len {
        let byte = data[i];
        let next = data.get(i + 1).copied().unwrap_or(0);
        let (next_states, step) = match pair_code(byte, next) {
            Some(code) => (update_states_for_pair(&mut arena, &states, i, code), 2),
            None => (update_states_for_char(&mut arena, &states, data, i), 1),
        };
        if next_states.is_empty() {
            return Err(AztecError::InvalidInput(byte));
        }
        states = next_states;
        i += step;
        trace!("Position {i}: {} states, arena size {}", states.len(), arena.len());
    }

    // Prefer a closed binary run among equally short encodings
    let best = states
        .iter()
        .min_by_key(|s| (s.bit_len, s.binary_len > 0))
        .map(|s| s.end_binary_shift(&mut arena, len))
        .ok_or(AztecError::InvalidInput(0))?;

    let chain = TokenChain::new(arena.chain(best.token));
    debug_assert!(
        chain.bit_len() == best.bit_len,
        "Token chain length doesn't match state: Chain {}, State {}",
        chain.bit_len(),
        best.bit_len
    );
    Ok(chain)
}

fn update_states_for_char(
    arena: &mut TokenArena,
    states: &[State],
    data: &[u8],
    index: usize,
) -> Vec<State> {
    let ch = data[index];
    let mut res = Vec::with_capacity(states.len() * 3);
    for s in states {
        let in_current = s.mode.contains(ch);
        let mut no_binary = None;
        for mode in MODES {
            let Some(code) = mode.code(ch) else {
                continue;
            };
            let closed = *no_binary.get_or_insert_with(|| s.end_binary_shift(arena, index));

            // Latching to a mode that holds the char only pays off when the current
            // mode doesn't. Digit is always tried since its codes are shorter.
            if !in_current || mode == s.mode || mode == Mode::Digit {
                res.push(closed.latch_and_append(arena, mode, code));
            }
            if !in_current {
                res.extend(closed.shift_and_append(arena, mode, code));
            }
        }
        if s.binary_len > 0 || !in_current {
            res.push(s.add_binary_shift_char(arena, index));
        }
    }
    simplify_states(res)
}

fn update_states_for_pair(
    arena: &mut TokenArena,
    states: &[State],
    index: usize,
    code: u16,
) -> Vec<State> {
    let mut res = Vec::with_capacity(states.len() * 4);
    for s in states {
        let closed = s.end_binary_shift(arena, index);
        res.push(closed.latch_and_append(arena, Mode::Punct, code));
        if s.mode != Mode::Punct {
            res.extend(closed.shift_and_append(arena, Mode::Punct, code));
        }
        // ". " and ", " are also two Digit characters
        if code == 3 || code == 4 {
            let digit = closed.latch_and_append(arena, Mode::Digit, 16 - code);
            res.push(digit.latch_and_append(arena, Mode::Digit, 1));
        }
        if s.binary_len > 0 {
            let binary = s.add_binary_shift_char(arena, index);
            res.push(binary.add_binary_shift_char(arena, index + 1));
        }
    }
    simplify_states(res)
}

// Drops every state dominated by another one
fn simplify_states(states: Vec<State>) -> Vec<State> {
    let mut res: Vec<State> = Vec::with_capacity(states.len());
    for new in states {
        if res.iter().any(|old| old.is_better_than_or_equal_to(&new)) {
            continue;
        }
        res.retain(|old| !new.is_better_than_or_equal_to(old));
        res.push(new);
    }
    res
}
