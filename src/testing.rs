//! Reference encoders for building `UCDNAMES` buffers in tests

use crate::{
    range::Class,
    table::{FORMAT_VERSION, HEADER_LEN, MAGIC},
};

pub(crate) fn encode_var_int(mut value: u32) -> Vec<u8> {
    let mut bytes = Vec::new();

    loop {
        let digit = (value & 0x7F) as u8;
        value >>= 7;

        if value == 0 {
            bytes.push(digit);
            return bytes;
        }

        bytes.push(digit | 0x80);
    }
}

pub(crate) fn encode_var_ascii(string: &str) -> Vec<u8> {
    assert!(!string.is_empty() && string.is_ascii());

    let mut bytes = string.as_bytes().to_vec();
    if let Some(last) = bytes.last_mut() {
        *last |= 0x80;
    }

    bytes
}

#[derive(Debug)]
pub(crate) struct TableBuilder {
    version: u32,
    nametable: Vec<u8>,
    ages: Vec<u8>,
    ranges: Vec<u8>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            version: FORMAT_VERSION,
            // offset 0 means "no name"
            nametable: vec![0],
            ages: Vec::new(),
            ranges: Vec::new(),
        }
    }

    pub fn version(&mut self, version: u32) -> &mut Self {
        self.version = version;
        self
    }

    pub fn age(&mut self, age: &str) -> &mut Self {
        self.ages.extend(encode_var_ascii(age));
        self
    }

    /// A name made of a single fragment
    pub fn root_name(&mut self, suffix: &str) -> u32 {
        let index = self.nametable.len() as u32;
        self.raw_name(index, suffix)
    }

    /// A name made of `parent`'s name followed by `suffix`
    pub fn child_name(&mut self, parent: u32, suffix: &str) -> u32 {
        let index = self.nametable.len() as u32;
        self.raw_name(index - parent, suffix)
    }

    pub fn raw_name(&mut self, prefix_offset: u32, suffix: &str) -> u32 {
        let index = self.nametable.len() as u32;
        self.nametable.extend(encode_var_int(prefix_offset));
        self.nametable.extend(encode_var_ascii(suffix));
        index
    }

    pub fn range(
        &mut self,
        first: u32,
        class: Class,
        age_index: u32,
        name_index: u32,
    ) -> &mut Self {
        let bits = first | ((class as u32) << 24) | (age_index << 26);
        self.ranges.extend(bits.to_le_bytes());
        self.ranges.extend(name_index.to_le_bytes());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let nametable_offset = HEADER_LEN as u32;
        let ages_offset = nametable_offset + self.nametable.len() as u32;
        let ranges_offset = ages_offset + self.ages.len() as u32;

        let mut bytes = Vec::new();
        bytes.extend_from_slice(MAGIC);

        for word in [
            self.version,
            nametable_offset,
            self.nametable.len() as u32,
            ages_offset,
            self.ages.len() as u32,
            ranges_offset,
            self.ranges.len() as u32,
        ] {
            bytes.extend(word.to_le_bytes());
        }

        bytes.extend_from_slice(&self.nametable);
        bytes.extend_from_slice(&self.ages);
        bytes.extend_from_slice(&self.ranges);

        bytes
    }
}
