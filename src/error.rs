use std::{fmt, io};

#[derive(Debug)]
pub enum TableError {
    /// The buffer does not start with `UCDNAMES` followed by the supported
    /// format version
    HeaderInvalid {
        magic: [u8; 8],
        version: Option<u32>,
    },

    /// A section named by the header does not fit inside the buffer
    SectionOutOfBounds {
        section: &'static str,
        offset: u32,
        length: u32,
    },

    /// The ranges section breaks the ordering or coverage rules
    RangesInvalid {
        index: usize,
        reason: &'static str,
    },

    /// The cursor ran off the end of the buffer (or past 32 bits) before a
    /// terminating byte
    MalformedVarint {
        offset: usize,
    },

    /// The cursor ran off the end of the buffer before a byte with its high
    /// bit set, or the string was empty
    MalformedVarAscii {
        offset: usize,
    },

    /// A nametable entry points at itself or before the start of the pool
    MalformedNameChain {
        index: u32,
        prefix_offset: u32,
    },

    /// A decoded name grew past [`MAX_NAME_LEN`](crate::name::MAX_NAME_LEN)
    NameTooLong {
        index: u32,
    },

    /// Not a Unicode codepoint. This is a caller mistake, the table covers
    /// all of `0..=0x10FFFF`
    CodepointOutOfRange(u32),

    UnexpectedEof,
    IoError(io::Error),
}

impl From<io::Error> for TableError {
    fn from(err: io::Error) -> Self {
        Self::IoError(err)
    }
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#?}", self)
    }
}

impl std::error::Error for TableError {}

pub type UcdResult<T> = anyhow::Result<T>;
