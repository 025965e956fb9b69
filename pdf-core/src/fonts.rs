/// Font identifier for the 14 standard PDF fonts.
/// These fonts are guaranteed available in all PDF viewers
/// without embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
    Symbol,
    ZapfDingbats,
}

impl BuiltinFont {
    /// Returns the PDF resource name used in content streams
    /// (e.g. "F1"). Fixed mapping by variant order.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "F1",
            BuiltinFont::HelveticaBold => "F2",
            BuiltinFont::HelveticaOblique => "F3",
            BuiltinFont::HelveticaBoldOblique => "F4",
            BuiltinFont::TimesRoman => "F5",
            BuiltinFont::TimesBold => "F6",
            BuiltinFont::TimesItalic => "F7",
            BuiltinFont::TimesBoldItalic => "F8",
            BuiltinFont::Courier => "F9",
            BuiltinFont::CourierBold => "F10",
            BuiltinFont::CourierOblique => "F11",
            BuiltinFont::CourierBoldOblique => "F12",
            BuiltinFont::Symbol => "F13",
            BuiltinFont::ZapfDingbats => "F14",
        }
    }

    /// Returns the PDF BaseFont name (e.g. "Helvetica",
    /// "Times-Roman").
    pub fn pdf_base_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
            BuiltinFont::HelveticaOblique => "Helvetica-Oblique",
            BuiltinFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            BuiltinFont::TimesRoman => "Times-Roman",
            BuiltinFont::TimesBold => "Times-Bold",
            BuiltinFont::TimesItalic => "Times-Italic",
            BuiltinFont::TimesBoldItalic => "Times-BoldItalic",
            BuiltinFont::Courier => "Courier",
            BuiltinFont::CourierBold => "Courier-Bold",
            BuiltinFont::CourierOblique => "Courier-Oblique",
            BuiltinFont::CourierBoldOblique => "Courier-BoldOblique",
            BuiltinFont::Symbol => "Symbol",
            BuiltinFont::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Look up a BuiltinFont by its exact PDF base name.
    pub fn from_name(name: &str) -> Option<BuiltinFont> {
        ALL_FONTS
            .iter()
            .copied()
            .find(|font| font.pdf_base_name() == name)
    }

    /// Look up a font by the names the PDFlib procedural API
    /// accepts. Matching is case-insensitive and covers the
    /// "-italic"/"-oblique" and "times"/"times-roman" spellings.
    pub fn from_pdflib_name(name: &str) -> Option<BuiltinFont> {
        let font = match name.to_ascii_lowercase().as_str() {
            "courier" => BuiltinFont::Courier,
            "courier-bold" => BuiltinFont::CourierBold,
            "courier-oblique" | "courier-italic" => BuiltinFont::CourierOblique,
            "courier-bold-italic" | "courier-boldoblique" => {
                BuiltinFont::CourierBoldOblique
            }
            "times" | "times-roman" => BuiltinFont::TimesRoman,
            "times-bold" | "times-roman-bold" => BuiltinFont::TimesBold,
            "times-italic" | "times-roman-italic" => BuiltinFont::TimesItalic,
            "times-bold-italic" | "times-bolditalic" | "times-roman-bold-italic" => {
                BuiltinFont::TimesBoldItalic
            }
            "helvetica" => BuiltinFont::Helvetica,
            "helvetica-bold" => BuiltinFont::HelveticaBold,
            "helvetica-italic" | "helvetica-oblique" => BuiltinFont::HelveticaOblique,
            "helvetica-bold-italic" | "helvetica-boldoblique" => {
                BuiltinFont::HelveticaBoldOblique
            }
            "symbol" => BuiltinFont::Symbol,
            "zapfdingbats" => BuiltinFont::ZapfDingbats,
            _ => return None,
        };
        Some(font)
    }

    /// Symbol and ZapfDingbats carry their own glyph sets and
    /// must not be re-encoded.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, BuiltinFont::Symbol | BuiltinFont::ZapfDingbats)
    }
}

const ALL_FONTS: [BuiltinFont; 14] = [
    BuiltinFont::Helvetica,
    BuiltinFont::HelveticaBold,
    BuiltinFont::HelveticaOblique,
    BuiltinFont::HelveticaBoldOblique,
    BuiltinFont::TimesRoman,
    BuiltinFont::TimesBold,
    BuiltinFont::TimesItalic,
    BuiltinFont::TimesBoldItalic,
    BuiltinFont::Courier,
    BuiltinFont::CourierBold,
    BuiltinFont::CourierOblique,
    BuiltinFont::CourierBoldOblique,
    BuiltinFont::Symbol,
    BuiltinFont::ZapfDingbats,
];

/// How text passed to `show_xy`-style calls is turned into
/// string bytes for the content stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// Windows code page 1252, declared as /WinAnsiEncoding.
    #[default]
    WinAnsi,
    /// The font's own encoding; chars up to U+00FF map to one byte.
    Builtin,
}

impl TextEncoding {
    /// Parse a PDFlib encoding name. "host", "auto" and the empty
    /// string select the platform default, which is WinAnsi here.
    pub fn from_name(name: &str) -> Option<TextEncoding> {
        match name.to_ascii_lowercase().as_str() {
            "" | "winansi" | "host" | "auto" | "cp1252" => Some(TextEncoding::WinAnsi),
            "builtin" => Some(TextEncoding::Builtin),
            _ => None,
        }
    }

    /// Encode text to single-byte codes. Unmappable chars become `?`.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        text.chars()
            .map(|ch| {
                let code = match self {
                    TextEncoding::WinAnsi => win_ansi_code(ch),
                    TextEncoding::Builtin => u8::try_from(u32::from(ch)).ok(),
                };
                code.unwrap_or(b'?')
            })
            .collect()
    }
}

/// Map a char to its code in Windows-1252.
fn win_ansi_code(ch: char) -> Option<u8> {
    let code = match ch {
        '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => return Some(ch as u8),
        '\u{20ac}' => 0x80,
        '\u{201a}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02c6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8a,
        '\u{2039}' => 0x8b,
        '\u{0152}' => 0x8c,
        '\u{017d}' => 0x8e,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02dc}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9a,
        '\u{203a}' => 0x9b,
        '\u{0153}' => 0x9c,
        '\u{017e}' => 0x9e,
        '\u{0178}' => 0x9f,
        _ => return None,
    };
    Some(code)
}

// Character widths (ASCII 32..=126) in units of 1/1000 em.
// Source: Adobe AFM data for each face.

const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584,
    278, 333, 278, 278, 556, 556, 556, 556, 556, 556, 556, 556,
    556, 556, 278, 278, 584, 584, 584, 556, 1015, 667, 667, 722,
    722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278,
    278, 278, 469, 556, 333, 556, 556, 500, 556, 556, 278, 556,
    556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584,
    278, 333, 278, 278, 556, 556, 556, 556, 556, 556, 556, 556,
    556, 556, 333, 333, 584, 584, 584, 611, 975, 722, 722, 722,
    722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333,
    278, 333, 584, 556, 333, 556, 611, 556, 611, 556, 333, 611,
    611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389, 556,
    333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564,
    250, 333, 250, 278, 500, 500, 500, 500, 500, 500, 500, 500,
    500, 500, 278, 278, 564, 564, 564, 444, 921, 722, 667, 667,
    722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333,
    278, 333, 469, 500, 333, 444, 500, 444, 500, 444, 333, 500,
    500, 278, 278, 500, 278, 778, 500, 500, 500, 500, 333, 389,
    278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

const TIMES_BOLD_WIDTHS: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570,
    250, 333, 250, 278, 500, 500, 500, 500, 500, 500, 500, 500,
    500, 500, 333, 333, 570, 570, 570, 500, 930, 722, 667, 722,
    722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333,
    278, 333, 581, 500, 333, 500, 556, 444, 556, 444, 333, 500,
    556, 278, 333, 556, 278, 833, 556, 500, 556, 556, 444, 389,
    333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

const TIMES_ITALIC_WIDTHS: [u16; 95] = [
    250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675,
    250, 333, 250, 278, 500, 500, 500, 500, 500, 500, 500, 500,
    500, 500, 333, 333, 675, 675, 675, 500, 920, 611, 611, 667,
    722, 611, 611, 722, 722, 333, 444, 667, 556, 833, 667, 722,
    611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556, 389,
    278, 389, 422, 500, 333, 500, 500, 444, 500, 444, 278, 500,
    500, 278, 278, 444, 278, 722, 500, 500, 500, 500, 389, 389,
    278, 500, 444, 667, 444, 444, 389, 400, 275, 400, 541,
];

const TIMES_BOLD_ITALIC_WIDTHS: [u16; 95] = [
    250, 389, 555, 500, 500, 833, 778, 278, 333, 333, 500, 570,
    250, 333, 250, 278, 500, 500, 500, 500, 500, 500, 500, 500,
    500, 500, 333, 333, 570, 570, 570, 500, 832, 667, 667, 667,
    722, 667, 667, 722, 778, 389, 500, 667, 611, 889, 722, 722,
    611, 722, 667, 556, 611, 722, 667, 889, 667, 611, 611, 333,
    278, 333, 570, 500, 333, 500, 500, 444, 500, 444, 333, 500,
    556, 278, 278, 500, 278, 778, 556, 500, 556, 556, 389, 389,
    278, 556, 444, 667, 500, 444, 389, 348, 220, 348, 570,
];

/// Symbol glyphs at codes 32..=126 of its built-in encoding.
const SYMBOL_WIDTHS: [u16; 95] = [
    250, 333, 713, 500, 549, 833, 778, 439, 333, 333, 500, 549,
    250, 549, 250, 278, 500, 500, 500, 500, 500, 500, 500, 500,
    500, 500, 278, 278, 549, 549, 549, 444, 549, 722, 667, 722,
    612, 611, 763, 603, 722, 333, 631, 722, 686, 889, 722, 722,
    768, 741, 556, 592, 611, 690, 439, 768, 645, 795, 611, 333,
    863, 333, 658, 500, 500, 631, 549, 549, 494, 439, 521, 411,
    603, 329, 603, 549, 549, 576, 521, 549, 549, 521, 549, 603,
    439, 576, 713, 686, 493, 686, 494, 480, 200, 480, 549,
];

/// ZapfDingbats glyphs at codes 32..=126 of its built-in encoding.
const ZAPF_DINGBATS_WIDTHS: [u16; 95] = [
    278, 974, 961, 974, 980, 719, 789, 790, 791, 690, 960, 939,
    549, 855, 911, 933, 911, 945, 974, 755, 846, 762, 761, 571,
    677, 763, 760, 759, 754, 494, 552, 537, 577, 692, 786, 788,
    788, 790, 793, 794, 816, 823, 789, 841, 823, 833, 816, 831,
    923, 744, 723, 749, 790, 792, 695, 776, 768, 792, 759, 707,
    708, 682, 701, 826, 815, 789, 789, 707, 687, 696, 689, 786,
    787, 713, 791, 785, 791, 873, 761, 762, 762, 759, 759, 892,
    892, 788, 784, 438, 138, 277, 415, 392, 392, 668, 668,
];

/// Courier uses a uniform width of 600 for all characters.
const COURIER_WIDTH: u16 = 600;

/// Default width for characters outside the mapped range (1/1000 em).
const DEFAULT_WIDTH: u16 = 278;

/// Font metrics for built-in PDF fonts.
///
/// Widths cover codes 32..=126. Characters outside that range,
/// including the upper halves of Symbol and ZapfDingbats, measure
/// as 278.
pub struct FontMetrics;

impl FontMetrics {
    /// Returns the width of a character in 1/1000 em units.
    pub fn char_width(font: BuiltinFont, ch: char) -> u16 {
        match font {
            BuiltinFont::Courier
            | BuiltinFont::CourierBold
            | BuiltinFont::CourierOblique
            | BuiltinFont::CourierBoldOblique => return COURIER_WIDTH,
            _ => {}
        }

        let code = ch as u32;
        if !(32..=126).contains(&code) {
            return DEFAULT_WIDTH;
        }
        let index = (code - 32) as usize;
        match font {
            BuiltinFont::Helvetica | BuiltinFont::HelveticaOblique => HELVETICA_WIDTHS[index],
            BuiltinFont::HelveticaBold | BuiltinFont::HelveticaBoldOblique => {
                HELVETICA_BOLD_WIDTHS[index]
            }
            BuiltinFont::TimesRoman => TIMES_ROMAN_WIDTHS[index],
            BuiltinFont::TimesBold => TIMES_BOLD_WIDTHS[index],
            BuiltinFont::TimesItalic => TIMES_ITALIC_WIDTHS[index],
            BuiltinFont::TimesBoldItalic => TIMES_BOLD_ITALIC_WIDTHS[index],
            BuiltinFont::Symbol => SYMBOL_WIDTHS[index],
            BuiltinFont::ZapfDingbats => ZAPF_DINGBATS_WIDTHS[index],
            _ => DEFAULT_WIDTH,
        }
    }

    /// Measures the width of a text string in points.
    pub fn measure_text(text: &str, font: BuiltinFont, font_size: f64) -> f64 {
        let total: u32 = text
            .chars()
            .map(|ch| Self::char_width(font, ch) as u32)
            .sum();
        total as f64 * font_size / 1000.0
    }

    /// Returns the line height for a given font size
    /// (1.2x multiplier).
    pub fn line_height(_font: BuiltinFont, font_size: f64) -> f64 {
        font_size * 1.2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_font_round_trips_through_base_name() {
        for font in ALL_FONTS {
            assert_eq!(BuiltinFont::from_name(font.pdf_base_name()), Some(font));
        }
    }

    #[test]
    fn win_ansi_maps_cp1252_specials() {
        let bytes = TextEncoding::WinAnsi.encode("€ – ™");
        assert_eq!(bytes, vec![0x80, b' ', 0x96, b' ', 0x99]);
    }

    #[test]
    fn win_ansi_replaces_unmappable() {
        assert_eq!(TextEncoding::WinAnsi.encode("a\u{4e2d}"), b"a?".to_vec());
    }

    #[test]
    fn builtin_keeps_latin1_bytes() {
        assert_eq!(TextEncoding::Builtin.encode("\u{e9}\u{80}"), vec![0xe9, 0x80]);
        assert_eq!(TextEncoding::Builtin.encode("\u{20ac}"), b"?".to_vec());
    }
}
