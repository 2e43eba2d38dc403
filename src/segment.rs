use unicode_segmentation::UnicodeSegmentation;

/// Extended grapheme clusters of `text`, in order
pub fn graphemes(text: &str) -> Vec<&str> {
    UnicodeSegmentation::graphemes(text, true).collect::<Vec<&str>>()
}

pub fn utf8_units(c: char) -> Vec<u8> {
    let mut buffer = [0; 4];
    c.encode_utf8(&mut buffer).as_bytes().to_vec()
}

pub fn utf16_units(c: char) -> Vec<u16> {
    let mut buffer = [0; 2];
    c.encode_utf16(&mut buffer).to_vec()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8UnitKind {
    Ascii,
    Continuation,
    Lead2,
    Lead3,
    Lead4,
    Invalid,
}

impl Utf8UnitKind {
    pub fn of(unit: u8) -> Self {
        match unit {
            0x00..=0x7F => Self::Ascii,
            0x80..=0xBF => Self::Continuation,
            0xC0..=0xDF => Self::Lead2,
            0xE0..=0xEF => Self::Lead3,
            0xF0..=0xF7 => Self::Lead4,
            0xF8..=0xFF => Self::Invalid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf16UnitKind {
    Unit,
    HighSurrogate,
    LowSurrogate,
}

impl Utf16UnitKind {
    pub fn of(unit: u16) -> Self {
        match unit {
            0xD800..=0xDBFF => Self::HighSurrogate,
            0xDC00..=0xDFFF => Self::LowSurrogate,
            _ => Self::Unit,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn utf8() {
        assert_eq!(utf8_units('x'), [0x78]);
        assert_eq!(utf8_units('£'), [0xC2, 0xA3]);
        assert_eq!(utf8_units('И'), [0xD0, 0x98]);
        assert_eq!(utf8_units('€'), [0xE2, 0x82, 0xAC]);
        assert_eq!(utf8_units('\u{7FF}'), [0xDF, 0xBF]);
        assert_eq!(utf8_units('\u{FFFF}'), [0xEF, 0xBF, 0xBF]);
        assert_eq!(utf8_units('𐍈'), [0xF0, 0x90, 0x8D, 0x88]);
        assert_eq!(utf8_units('\u{1F3AE}'), [0xF0, 0x9F, 0x8E, 0xAE]);
    }

    #[test]
    fn utf16() {
        assert_eq!(utf16_units('€'), [0x20AC]);
        assert_eq!(utf16_units('𐐷'), [0xD801, 0xDC37]);
        assert_eq!(utf16_units('\u{10FFFF}'), [0xDBFF, 0xDFFF]);
    }

    #[test]
    fn unit_kinds() {
        let kinds = utf8_units('𐍈')
            .into_iter()
            .map(Utf8UnitKind::of)
            .collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                Utf8UnitKind::Lead4,
                Utf8UnitKind::Continuation,
                Utf8UnitKind::Continuation,
                Utf8UnitKind::Continuation,
            ]
        );
        assert_eq!(Utf8UnitKind::of(b'a'), Utf8UnitKind::Ascii);
        assert_eq!(Utf8UnitKind::of(0xC2), Utf8UnitKind::Lead2);
        assert_eq!(Utf8UnitKind::of(0xE2), Utf8UnitKind::Lead3);
        assert_eq!(Utf8UnitKind::of(0xFF), Utf8UnitKind::Invalid);

        assert_eq!(Utf16UnitKind::of(0xD801), Utf16UnitKind::HighSurrogate);
        assert_eq!(Utf16UnitKind::of(0xDFFF), Utf16UnitKind::LowSurrogate);
        assert_eq!(Utf16UnitKind::of(0x20AC), Utf16UnitKind::Unit);
    }

    #[test]
    fn grapheme_clusters() {
        assert_eq!(graphemes("ab"), vec!["a", "b"]);
        assert_eq!(graphemes("e\u{301}x"), vec!["e\u{301}", "x"]);
        assert_eq!(graphemes("🇺🇸🇩🇪"), vec!["🇺🇸", "🇩🇪"]);
        assert_eq!(graphemes("\r\n"), vec!["\r\n"]);
        assert!(graphemes("").is_empty());
    }
}
