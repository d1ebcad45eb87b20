use thiserror::Error;

use super::metadata::Layers;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum AztecError {
    /// Payload doesn't fit the largest symbol, or the symbol requested by the user
    #[error("Data too large for an Aztec symbol")]
    DataTooLarge,

    /// Negative error correction percentage
    #[error("Invalid error correction percentage: {0}")]
    InvalidEccPercent(i32),

    /// Layer count outside 1-4 for compact or 1-32 for full range symbols
    #[error("Invalid layer count: {0:?}")]
    InvalidLayers(Layers),

    /// No encoding state survived for the byte. Binary shift accepts every byte,
    /// so this points at a broken character table.
    #[error("No encoding found for byte {0:#04x}")]
    InvalidInput(u8),
}

pub type AztecResult<T> = Result<T, AztecError>;
