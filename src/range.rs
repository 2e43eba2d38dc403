use std::fmt;

use crate::{
    ages::AgesTable,
    error::{TableError, UcdResult},
    parse_binary::{BinaryParser, ByteCursor},
};

pub const LAST_CODEPOINT: u32 = 0x10_FFFF;

const RECORD_LEN: usize = 8;
const MASK_FIRST: u32 = 0x00FF_FFFF;
const CLASS_SHIFT: u32 = 24;
const MASK_CLASS: u32 = 0x3;
const AGE_SHIFT: u32 = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    Reserved = 0,
    Noncharacter = 1,
    Surrogate = 2,
    Character = 3,
}

impl Class {
    fn from_bits(bits: u32) -> Self {
        match bits & MASK_CLASS {
            0 => Self::Reserved,
            1 => Self::Noncharacter,
            2 => Self::Surrogate,
            _ => Self::Character,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reserved => "reserved",
            Self::Noncharacter => "noncharacter",
            Self::Surrogate => "surrogate",
            Self::Character => "character",
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One 8-byte record of the ranges section
///
/// ```text
/// word0: | age index (6) | class (2) | first codepoint (24) |
/// word1: | name index (32)                                  |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRecord {
    pub first: u32,
    pub class: Class,
    pub age_index: u32,
    pub name_index: u32,
}

impl RangeRecord {
    pub fn from_words(bits: u32, name_index: u32) -> Self {
        Self {
            first: bits & MASK_FIRST,
            class: Class::from_bits(bits >> CLASS_SHIFT),
            age_index: bits >> AGE_SHIFT,
            name_index,
        }
    }
}

/// A decoded range. `last` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range<'a> {
    pub first: u32,
    pub last: u32,
    pub class: Class,
    pub age: &'a str,
    pub name_index: u32,
}

impl Range<'_> {
    pub fn contains(&self, codepoint: u32) -> bool {
        self.first <= codepoint && codepoint <= self.last
    }
}

impl fmt::Display for Range<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "U+{:04X}..U+{:04X} {} {} {}",
            self.first, self.last, self.class, self.age, self.name_index
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RangeTable<'a> {
    records: &'a [u8],
    ages: &'a AgesTable,
}

impl<'a> RangeTable<'a> {
    pub fn new(records: &'a [u8], ages: &'a AgesTable) -> Self {
        Self { records, ages }
    }

    pub fn len(&self) -> usize {
        self.records.len() / RECORD_LEN
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn record(&self, index: usize) -> Option<RangeRecord> {
        let start = index.checked_mul(RECORD_LEN)?;
        let end = start.checked_add(RECORD_LEN)?;
        let bytes = self.records.get(start..end)?;

        let mut parser = ByteCursor::new(bytes);
        let bits = parser.parse_u32().ok()?;
        let name_index = parser.parse_u32().ok()?;

        Some(RangeRecord::from_words(bits, name_index))
    }

    /// Decodes range `index`. Its last codepoint is one before the next
    /// record's first, or U+10FFFF for the final record.
    pub fn range_info(&self, index: usize) -> UcdResult<Range<'a>> {
        let record = match self.record(index) {
            Some(record) => record,
            None => anyhow::bail!(TableError::RangesInvalid {
                index,
                reason: "no such range",
            }),
        };

        let last = match self.record(index + 1) {
            Some(next) => next.first.saturating_sub(1),
            None => LAST_CODEPOINT,
        };

        let age = match self.ages.get(record.age_index as usize) {
            Some(age) => age,
            None => anyhow::bail!(TableError::RangesInvalid {
                index,
                reason: "age index out of bounds",
            }),
        };

        Ok(Range {
            first: record.first,
            last,
            class: record.class,
            age,
            name_index: record.name_index,
        })
    }

    /// Binary search for the range that contains `codepoint`.
    ///
    /// Ranges cover `0..=0x10FFFF` in order with no gaps or overlap, so every
    /// codepoint has exactly one match.
    pub fn find_range_containing_codepoint(&self, codepoint: u32) -> UcdResult<Range<'a>> {
        if codepoint > LAST_CODEPOINT {
            anyhow::bail!(TableError::CodepointOutOfRange(codepoint));
        }

        // the answer is somewhere in `lo..hi`
        let mut lo = 0;
        let mut hi = self.len();

        while lo != hi {
            let mid = lo + (hi - lo) / 2;
            let mid_range = self.range_info(mid)?;

            if codepoint > mid_range.last {
                lo = mid + 1;
            } else if codepoint < mid_range.first {
                hi = mid;
            } else {
                return Ok(mid_range);
            }
        }

        self.range_info(lo)
    }

    /// Checks the ordering and coverage rules once, so lookups can rely on them
    pub fn validate(&self) -> UcdResult<()> {
        let invalid =
            |index: usize, reason: &'static str| TableError::RangesInvalid { index, reason };

        if self.records.len() % RECORD_LEN != 0 {
            anyhow::bail!(invalid(self.len(), "section is not a whole number of records"));
        }

        if self.is_empty() {
            anyhow::bail!(invalid(0, "no ranges"));
        }

        let mut previous: Option<u32> = None;

        for index in 0..self.len() {
            let record = match self.record(index) {
                Some(record) => record,
                None => anyhow::bail!(invalid(index, "no such range")),
            };

            match previous {
                None if record.first != 0 => {
                    anyhow::bail!(invalid(index, "first range does not start at U+0000"))
                }
                Some(prev) if record.first <= prev => {
                    anyhow::bail!(invalid(index, "ranges are not strictly ascending"))
                }
                _ => {}
            }

            if record.first > LAST_CODEPOINT {
                anyhow::bail!(invalid(index, "range starts past U+10FFFF"));
            }

            if record.age_index as usize >= self.ages.len() {
                anyhow::bail!(invalid(index, "age index out of bounds"));
            }

            previous = Some(record.first);
        }

        Ok(())
    }

    pub fn iter(&self) -> RangeIter<'a> {
        RangeIter {
            table: *self,
            cursor: 0,
        }
    }
}

#[derive(Debug)]
pub struct RangeIter<'a> {
    table: RangeTable<'a>,
    cursor: usize,
}

impl<'a> Iterator for RangeIter<'a> {
    type Item = UcdResult<Range<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.table.len() {
            return None;
        }

        let range = self.table.range_info(self.cursor);
        self.cursor += 1;

        Some(range)
    }
}
