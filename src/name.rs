use crate::{
    error::{TableError, UcdResult},
    parse_binary::{BinaryParser, ByteCursor},
};

/// Codepoint names shouldn't get anywhere near this long. A name that does
/// comes from a corrupt chain.
pub const MAX_NAME_LEN: usize = 200;

/// The nametable: a pool of `(prefix offset, suffix)` entries addressed by
/// byte offset.
///
/// An entry at `index` is a VarInt `prefix_offset` followed by a VarAscii
/// `suffix`. Its name is the name of the entry at `index - prefix_offset`
/// followed by `suffix`. Index 0 is the empty name.
#[derive(Debug, Clone, Copy)]
pub struct NameStore<'a> {
    bytes: &'a [u8],
}

impl<'a> NameStore<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reads one entry, returning `(prefix_offset, suffix)`
    fn read_entry(&self, index: u32) -> UcdResult<(u32, String)> {
        let mut parser = ByteCursor::at(self.bytes, index as usize);

        let prefix_offset = parser.parse_var_int()?;
        let suffix = parser.parse_var_ascii()?;

        // 0 would point back at this entry forever, and anything past `index`
        // would point before the start of the pool
        if prefix_offset < 1 || prefix_offset > index {
            anyhow::bail!(TableError::MalformedNameChain {
                index,
                prefix_offset,
            });
        }

        Ok((prefix_offset, suffix))
    }

    /// Walks the chain from `index` back to the root, then joins the suffixes
    /// root first.
    pub fn read_name(&self, index: u32) -> UcdResult<String> {
        let mut fragments = Vec::new();
        let mut len = 0;
        let mut cursor = index;

        // `prefix_offset >= 1` so `cursor` strictly decreases
        while cursor > 0 {
            let (prefix_offset, suffix) = self.read_entry(cursor)?;

            len += suffix.len();
            if len > MAX_NAME_LEN {
                anyhow::bail!(TableError::NameTooLong { index });
            }

            fragments.push(suffix);
            cursor -= prefix_offset;
        }

        log::trace!("name {} has {} fragments", index, fragments.len());

        Ok(fragments.into_iter().rev().collect())
    }
}
