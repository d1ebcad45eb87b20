mod encoder;
mod galois;

#[cfg(test)]
mod decoder;

pub use encoder::*;
pub use galois::*;

#[cfg(test)]
pub use decoder::*;
