use crate::error::{TableError, UcdResult};

const CONTINUATION_BIT: u8 = 0x80;
const LOW_SEVEN_BITS: u8 = 0x7F;

/// Generic trait for parsing binary formats
///
/// Everything in a `UCDNAMES` file is little-endian.
pub trait BinaryParser {
    fn buffer(&self) -> &[u8];
    fn cursor(&self) -> usize;
    fn cursor_mut(&mut self) -> &mut usize;

    fn next(&mut self) -> UcdResult<u8> {
        self.next_byte()
            .ok_or_else(|| anyhow::anyhow!(TableError::UnexpectedEof))
    }

    fn next_byte(&mut self) -> Option<u8> {
        let b = self.buffer().get(self.cursor()).copied();
        if b.is_some() {
            *self.cursor_mut() += 1;
        }
        b
    }

    fn peek(&self) -> Option<u8> {
        self.buffer().get(self.cursor()).copied()
    }

    fn is_eof(&self) -> bool {
        self.cursor() >= self.buffer().len()
    }

    fn parse_u32(&mut self) -> UcdResult<u32> {
        let b1 = self.next()?;
        let b2 = self.next()?;
        let b3 = self.next()?;
        let b4 = self.next()?;

        Ok(u32::from_le_bytes([b1, b2, b3, b4]))
    }

    fn parse_array<const LEN: usize>(&mut self) -> UcdResult<[u8; LEN]> {
        let mut array = [0; LEN];

        for b in array.iter_mut() {
            *b = self.next()?;
        }

        Ok(array)
    }

    /// Unsigned base-128 integer, least significant digit first. A clear high
    /// bit marks the final byte.
    fn parse_var_int(&mut self) -> UcdResult<u32> {
        let start = self.cursor();

        let mut value: u32 = 0;
        let mut shift = 0;

        loop {
            let b = match self.next_byte() {
                Some(b) => b,
                None => anyhow::bail!(TableError::MalformedVarint { offset: start }),
            };

            let digit = u32::from(b & LOW_SEVEN_BITS);

            // digits that would be shifted out of a u32
            if shift >= 32 || (shift > 0 && digit >> (32 - shift) != 0) {
                anyhow::bail!(TableError::MalformedVarint { offset: start });
            }

            value |= digit << shift;

            if b & CONTINUATION_BIT == 0 {
                return Ok(value);
            }

            shift += 7;
        }
    }

    /// 7-bit ASCII, one character per byte. The last byte has its high bit set.
    fn parse_var_ascii(&mut self) -> UcdResult<String> {
        let start = self.cursor();

        let mut string = String::new();

        loop {
            let b = match self.next_byte() {
                Some(b) => b,
                None => anyhow::bail!(TableError::MalformedVarAscii { offset: start }),
            };

            string.push(char::from(b & LOW_SEVEN_BITS));

            if b & CONTINUATION_BIT != 0 {
                break;
            }
        }

        if string.is_empty() {
            anyhow::bail!(TableError::MalformedVarAscii { offset: start });
        }

        Ok(string)
    }
}

/// A [`BinaryParser`] over a borrowed slice
#[derive(Debug)]
pub struct ByteCursor<'a> {
    buffer: &'a [u8],
    cursor: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    pub fn at(buffer: &'a [u8], cursor: usize) -> Self {
        Self { buffer, cursor }
    }
}

impl BinaryParser for ByteCursor<'_> {
    fn buffer(&self) -> &[u8] {
        self.buffer
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn cursor_mut(&mut self) -> &mut usize {
        &mut self.cursor
    }
}

/// Decodes a VarInt at the start of `bytes`, returning the value and how many
/// bytes it took up
pub fn read_var_int(bytes: &[u8]) -> UcdResult<(u32, usize)> {
    let mut parser = ByteCursor::new(bytes);
    let value = parser.parse_var_int()?;

    Ok((value, parser.cursor()))
}

/// Decodes a VarAscii string at the start of `bytes`, returning the string and
/// how many bytes it took up
pub fn read_var_ascii(bytes: &[u8]) -> UcdResult<(String, usize)> {
    let mut parser = ByteCursor::new(bytes);
    let string = parser.parse_var_ascii()?;

    Ok((string, parser.cursor()))
}
