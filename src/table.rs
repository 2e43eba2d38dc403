use std::fmt;

use crate::{
    ages::AgesTable,
    error::{TableError, UcdResult},
    name::NameStore,
    parse_binary::{BinaryParser, ByteCursor},
    range::{Class, Range, RangeIter, RangeTable},
};

pub const MAGIC: &[u8; 8] = b"UCDNAMES";
pub const FORMAT_VERSION: u32 = 2;

/// Magic, then the version and three `(offset, length)` pairs as u32s
pub const HEADER_LEN: usize = MAGIC.len() + 7 * 4;

/// A byte window into the table's buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Section {
    offset: usize,
    len: usize,
}

impl Section {
    fn parse(
        parser: &mut ByteCursor,
        name: &'static str,
        buffer_len: usize,
    ) -> UcdResult<Self> {
        let offset = parser.parse_u32()?;
        let length = parser.parse_u32()?;

        let end = (offset as usize).checked_add(length as usize);
        if end.map_or(true, |end| end > buffer_len) {
            anyhow::bail!(TableError::SectionOutOfBounds {
                section: name,
                offset,
                length,
            });
        }

        Ok(Self {
            offset: offset as usize,
            len: length as usize,
        })
    }

    fn slice<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        &data[self.offset..self.offset + self.len]
    }
}

#[derive(Debug)]
struct Header {
    nametable: Section,
    ages: Section,
    ranges: Section,
}

impl Header {
    fn parse(data: &[u8]) -> UcdResult<Self> {
        let mut parser = ByteCursor::new(data);

        let magic = match parser.parse_array::<8>() {
            Ok(magic) => magic,
            Err(..) => anyhow::bail!(TableError::HeaderInvalid {
                magic: [0; 8],
                version: None,
            }),
        };

        if &magic != MAGIC {
            anyhow::bail!(TableError::HeaderInvalid {
                magic,
                version: None,
            });
        }

        let version = match parser.parse_u32() {
            Ok(version) => version,
            Err(..) => anyhow::bail!(TableError::HeaderInvalid {
                magic,
                version: None,
            }),
        };

        if version != FORMAT_VERSION {
            anyhow::bail!(TableError::HeaderInvalid {
                magic,
                version: Some(version),
            });
        }

        if data.len() < HEADER_LEN {
            anyhow::bail!(TableError::HeaderInvalid {
                magic,
                version: Some(version),
            });
        }

        let nametable = Section::parse(&mut parser, "nametable", data.len())?;
        let ages = Section::parse(&mut parser, "ages", data.len())?;
        let ranges = Section::parse(&mut parser, "ranges", data.len())?;

        Ok(Self {
            nametable,
            ages,
            ranges,
        })
    }
}

/// A loaded `UCDNAMES` file.
///
/// The table owns its buffer; the nametable and ranges sections are read in
/// place on every lookup. Nothing is mutated after [`Table::load`], so a
/// `&Table` can be shared freely between threads.
pub struct Table {
    data: Vec<u8>,
    nametable: Section,
    ranges: Section,
    ages: AgesTable,
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("data", &format!("[ {} bytes ]", self.data.len()))
            .field("nametable", &self.nametable)
            .field("ranges", &self.ranges)
            .field("ages", &self.ages)
            .finish()
    }
}

impl Table {
    pub fn load(data: Vec<u8>) -> UcdResult<Self> {
        let header = Header::parse(&data)?;

        let ages = AgesTable::parse(header.ages.slice(&data))?;

        let table = Self {
            nametable: header.nametable,
            ranges: header.ranges,
            ages,
            data,
        };

        table.range_table().validate()?;

        log::debug!(
            "loaded table: {} bytes of names, {} ages, {} ranges",
            table.nametable.len,
            table.ages.len(),
            table.range_count(),
        );

        Ok(table)
    }

    pub fn version(&self) -> u32 {
        FORMAT_VERSION
    }

    pub fn ages(&self) -> &AgesTable {
        &self.ages
    }

    pub fn name_store(&self) -> NameStore<'_> {
        NameStore::new(self.nametable.slice(&self.data))
    }

    pub fn range_table(&self) -> RangeTable<'_> {
        RangeTable::new(self.ranges.slice(&self.data), &self.ages)
    }

    pub fn range_count(&self) -> usize {
        self.range_table().len()
    }

    pub fn range_info(&self, index: usize) -> UcdResult<Range<'_>> {
        self.range_table().range_info(index)
    }

    pub fn ranges(&self) -> RangeIter<'_> {
        self.range_table().iter()
    }

    pub fn find_range_containing_codepoint(&self, codepoint: u32) -> UcdResult<Range<'_>> {
        self.range_table().find_range_containing_codepoint(codepoint)
    }

    pub fn read_name(&self, index: u32) -> UcdResult<String> {
        self.name_store().read_name(index)
    }

    /// The name of `codepoint`, or an empty string if it has none
    pub fn name_of(&self, codepoint: u32) -> UcdResult<String> {
        let range = self.find_range_containing_codepoint(codepoint)?;
        self.read_name(range.name_index)
    }

    pub fn class_of(&self, codepoint: u32) -> UcdResult<Class> {
        Ok(self.find_range_containing_codepoint(codepoint)?.class)
    }

    /// The Unicode version that introduced `codepoint`
    pub fn age_of(&self, codepoint: u32) -> UcdResult<&str> {
        Ok(self.find_range_containing_codepoint(codepoint)?.age)
    }
}
