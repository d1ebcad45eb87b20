mod encoder;
mod token;
mod types;

#[cfg(test)]
mod decoder;

pub use encoder::*;
pub use token::*;
pub use types::*;

#[cfg(test)]
pub use decoder::*;

// Codec proptesting
//------------------------------------------------------------------------------
