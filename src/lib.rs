//! Reader for `UCDNAMES` tables, which map every Unicode codepoint to its
//! class, the Unicode version that introduced it, and its name.
//!
//! A table is a little-endian file with three sections:
//!
//!  * the nametable, a pool of suffix-compressed name fragments
//!  * the ages, a list of Unicode version labels
//!  * the ranges, sorted records that cover `U+0000..=U+10FFFF` with no gaps

pub use crate::{
    ages::AgesTable,
    error::{TableError, UcdResult},
    name::{NameStore, MAX_NAME_LEN},
    parse_binary::{read_var_ascii, read_var_int, BinaryParser, ByteCursor},
    range::{Class, Range, RangeIter, RangeRecord, RangeTable, LAST_CODEPOINT},
    source::{load, load_cached, FetchBytes},
    table::{Table, FORMAT_VERSION, HEADER_LEN, MAGIC},
    visualize::{remove_codepoint, Visualization},
};

mod ages;
mod error;
mod name;
mod parse_binary;
mod range;
mod source;
mod table;

pub mod segment;
pub mod visualize;

#[cfg(test)]
mod testing;
