//! Breaks text down into graphemes, codepoints and code units, with the name
//! of every codepoint, ready for a renderer to lay out.

use std::fmt;

use crate::{
    segment::{graphemes, utf16_units, utf8_units, Utf16UnitKind, Utf8UnitKind},
    table::Table,
};

pub const TABLE_NOT_LOADED: &str = "(table not loaded)";
pub const NAME_UNAVAILABLE: &str = "(name unavailable)";

/// A code unit and its position among all units of the same encoding in the
/// text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeUnit<T> {
    pub value: T,
    pub index: usize,
}

impl<T> CodeUnit<T> {
    /// Every other unit is shaded differently
    pub fn is_alternate(&self) -> bool {
        self.index % 2 == 1
    }
}

impl CodeUnit<u8> {
    pub fn kind(&self) -> Utf8UnitKind {
        Utf8UnitKind::of(self.value)
    }
}

impl CodeUnit<u16> {
    pub fn kind(&self) -> Utf16UnitKind {
        Utf16UnitKind::of(self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodepointRow {
    pub codepoint: char,
    pub index: usize,
    /// Offset of the first byte of this codepoint in the input
    pub byte_offset: usize,
    /// Offset of the first UTF-16 unit of this codepoint in the input
    pub utf16_offset: usize,
    pub name: String,
    pub utf8: Vec<CodeUnit<u8>>,
    pub utf16: Vec<CodeUnit<u16>>,
}

impl CodepointRow {
    pub fn is_alternate(&self) -> bool {
        self.index % 2 == 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphemeRow {
    pub text: String,
    pub index: usize,
    pub codepoints: Vec<CodepointRow>,
}

impl GraphemeRow {
    pub fn is_alternate(&self) -> bool {
        self.index % 2 == 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visualization {
    pub graphemes: Vec<GraphemeRow>,
}

#[derive(Debug, Default)]
struct Counters {
    codepoint: usize,
    byte_offset: usize,
    utf8: usize,
    utf16: usize,
}

impl Visualization {
    pub fn new(text: &str, table: Option<&Table>) -> Self {
        let mut counters = Counters::default();

        let graphemes = graphemes(text)
            .into_iter()
            .enumerate()
            .map(|(index, grapheme)| GraphemeRow {
                text: grapheme.to_owned(),
                index,
                codepoints: grapheme
                    .chars()
                    .map(|c| codepoint_row(c, table, &mut counters))
                    .collect(),
            })
            .collect();

        Self { graphemes }
    }

    pub fn codepoints(&self) -> impl Iterator<Item = &CodepointRow> {
        self.graphemes
            .iter()
            .flat_map(|grapheme| grapheme.codepoints.iter())
    }
}

fn codepoint_row(c: char, table: Option<&Table>, counters: &mut Counters) -> CodepointRow {
    let utf8 = utf8_units(c)
        .into_iter()
        .map(|value| {
            counters.utf8 += 1;
            CodeUnit {
                value,
                index: counters.utf8 - 1,
            }
        })
        .collect();

    let utf16_offset = counters.utf16;
    let utf16 = utf16_units(c)
        .into_iter()
        .map(|value| {
            counters.utf16 += 1;
            CodeUnit {
                value,
                index: counters.utf16 - 1,
            }
        })
        .collect();

    let row = CodepointRow {
        codepoint: c,
        index: counters.codepoint,
        byte_offset: counters.byte_offset,
        utf16_offset,
        name: codepoint_name(c, table),
        utf8,
        utf16,
    };

    counters.codepoint += 1;
    counters.byte_offset += c.len_utf8();

    row
}

fn codepoint_name(c: char, table: Option<&Table>) -> String {
    let table = match table {
        Some(table) => table,
        None => return TABLE_NOT_LOADED.to_owned(),
    };

    match table.name_of(u32::from(c)) {
        Ok(name) => name,
        Err(err) => {
            log::warn!("unable to read name of U+{:04X}: {}", u32::from(c), err);
            NAME_UNAVAILABLE.to_owned()
        }
    }
}

/// `text` without the codepoint that starts at `byte_offset`, or `None` if no
/// codepoint starts there
pub fn remove_codepoint(text: &str, byte_offset: usize) -> Option<String> {
    let c = text.get(byte_offset..)?.chars().next()?;

    let mut result = String::with_capacity(text.len() - c.len_utf8());
    result.push_str(&text[..byte_offset]);
    result.push_str(&text[byte_offset + c.len_utf8()..]);

    Some(result)
}

const GRAPHEME_WIDTH: usize = 10;
const CODEPOINT_WIDTH: usize = 10;
const UTF16_WIDTH: usize = 11;
const UTF8_WIDTH: usize = 13;

fn printable_grapheme(grapheme: &str) -> String {
    if grapheme.chars().any(char::is_control) {
        grapheme.escape_debug().to_string()
    } else {
        grapheme.to_owned()
    }
}

fn hex_units<T: fmt::UpperHex>(units: &[CodeUnit<T>], width: usize) -> String {
    let mut out = String::new();

    for (i, unit) in units.iter().enumerate() {
        if i != 0 {
            out.push(' ');
        }
        out.push_str(&format!("{:0width$X}", unit.value, width = width));
    }

    out
}

impl fmt::Display for Visualization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<gw$}{:<cw$}{:<u16w$}{:<u8w$}name",
            "grapheme",
            "codepoint",
            "utf-16",
            "utf-8",
            gw = GRAPHEME_WIDTH,
            cw = CODEPOINT_WIDTH,
            u16w = UTF16_WIDTH,
            u8w = UTF8_WIDTH,
        )?;

        for grapheme in &self.graphemes {
            for (i, codepoint) in grapheme.codepoints.iter().enumerate() {
                let text = if i == 0 {
                    printable_grapheme(&grapheme.text)
                } else {
                    String::new()
                };

                writeln!(
                    f,
                    "{:<gw$}{:<cw$}{:<u16w$}{:<u8w$}{}",
                    text,
                    format!("U+{:04X}", u32::from(codepoint.codepoint)),
                    hex_units(&codepoint.utf16, 4),
                    hex_units(&codepoint.utf8, 2),
                    codepoint.name,
                    gw = GRAPHEME_WIDTH,
                    cw = CODEPOINT_WIDTH,
                    u16w = UTF16_WIDTH,
                    u8w = UTF8_WIDTH,
                )?;
            }
        }

        Ok(())
    }
}
