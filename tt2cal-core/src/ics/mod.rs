//! Calendar artifact generation and parsing.

pub mod generate;
pub mod parse;

pub use generate::generate_ics;
pub use parse::{ParsedBlock, parse_blocks};
