use crate::{
    error::UcdResult,
    parse_binary::{BinaryParser, ByteCursor},
};

/// Unicode versions referenced by range records, in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgesTable(Vec<String>);

impl AgesTable {
    /// The section is VarAscii strings back to back. A string cut off by the
    /// end of the section is an error.
    pub fn parse(section: &[u8]) -> UcdResult<Self> {
        let mut parser = ByteCursor::new(section);
        let mut ages = Vec::new();

        while !parser.is_eof() {
            ages.push(parser.parse_var_ascii()?);
        }

        Ok(Self(ages))
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
