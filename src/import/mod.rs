//! Delimited-text import.
//!
//! Turns header-first delimited text into a [`ParsedTable`] that a sheet can be
//! populated with. Quoting follows RFC 4180 via the `csv` crate.

mod parser;

pub use parser::{ParseOptions, ParsedTable, parse, parse_reader};
