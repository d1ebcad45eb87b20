//! # aztism
//!
//! A Rust library for generating Aztec 2D barcodes (ISO/IEC 24778) with Reed-Solomon
//! error correction. Supports compact and full range symbols with automatic or fixed
//! layer sizing.
//!
//! ## Features
//!
//! - **Optimal High Level Encoding**: Shortest path search over the five character modes,
//!   shifts, latches and binary shift runs
//! - **Reed-Solomon Error Correction**: Configurable minimum percentage over GF(2^6) to GF(2^12)
//! - **Automatic Sizing**: Picks the smallest compact or full range symbol that fits
//! - **Image Output**: Render symbols to grayscale images (`render` feature, on by default)
//!   or terminal friendly text
//!
//! ## Quick Start
//!
//! ### Simple Aztec Generation
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Default 23% error correction and the smallest symbol that fits
//! let symbol = aztism::encode(b"Hello, World!")?;
//!
//! assert_eq!(symbol.width(), 19);
//! let matrix = symbol.matrix(); // Rows of modules, dark as `true`
//! assert_eq!(matrix.len(), 19);
//! assert!(matrix[9][9]);
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use aztism::{AztecBuilder, Layers};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbol = AztecBuilder::new(b"Hello, World!")
//!     .ecc_percent(50)            // Minimum error correction - if not provided, defaults to 23%
//!     .layers(Layers::Full(5))    // Symbol size - if not provided, finds smallest symbol to fit data
//!     .build()?;
//!
//! assert_eq!(symbol.width(), 37);
//! assert!(!symbol.is_compact());
//! println!("{}", symbol.to_str(1));
//! # Ok(())
//! # }
//! ```
//!
//! ## Aztec Components
//!
//! ### Layers
//! - **Compact**: 1-4 layers around a 2 ring bullseye, 15x15 to 27x27 modules
//! - **Full range**: 1-32 layers around a 3 ring bullseye with a reference grid every 16
//!   modules, 19x19 to 151x151 modules
//!
//! ### Error Correction
//! The minimum percentage applies to the high level encoded bits, plus a fixed 11 bits.
//! Every codeword the chosen symbol has room for beyond the data becomes an error
//! correction codeword.

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;

pub use builder::{encode, encode_with_ecc, AztecBuilder, Module, Symbol, QUIET_ZONE};
pub use common::error::{AztecError, AztecResult};
pub use common::metadata::{Color, Layers, DEFAULT_ECC_PERCENT, ECC_EXTRA_BITS};
