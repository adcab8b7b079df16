//! Configuration types
//!
//! Board-level driver settings and a parser for the `[pca9685]` section of
//! a board config file.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
