use pdf_core::{BuiltinFont, FontMetrics, TextEncoding};

#[test]
fn helvetica_space_width() {
    assert_eq!(FontMetrics::char_width(BuiltinFont::Helvetica, ' '), 278);
}

#[test]
fn helvetica_uppercase_a() {
    assert_eq!(FontMetrics::char_width(BuiltinFont::Helvetica, 'A'), 667);
    assert_eq!(FontMetrics::char_width(BuiltinFont::HelveticaBold, 'A'), 722);
}

#[test]
fn courier_is_monospaced() {
    assert_eq!(FontMetrics::char_width(BuiltinFont::Courier, 'i'), 600);
    assert_eq!(FontMetrics::char_width(BuiltinFont::CourierBoldOblique, 'W'), 600);
}

#[test]
fn symbol_and_dingbats_use_their_own_widths() {
    assert_eq!(FontMetrics::char_width(BuiltinFont::Symbol, 'a'), 631);
    assert_eq!(FontMetrics::char_width(BuiltinFont::Symbol, '|'), 200);
    assert_eq!(FontMetrics::char_width(BuiltinFont::ZapfDingbats, '!'), 974);
    assert_eq!(FontMetrics::char_width(BuiltinFont::ZapfDingbats, 'x'), 138);
    // alpha=631, beta=549, chi=549 => 1729, at 10pt 17.29
    let width = FontMetrics::measure_text("abc", BuiltinFont::Symbol, 10.0);
    assert!((width - 17.29).abs() < 0.001);
}

#[test]
fn unmapped_char_returns_default() {
    assert_eq!(FontMetrics::char_width(BuiltinFont::Helvetica, '\u{00E9}'), 278);
    assert_eq!(FontMetrics::char_width(BuiltinFont::Helvetica, '\n'), 278);
}

#[test]
fn measure_text_hello() {
    // H=722, e=556, l=222, l=222, o=556 => total = 2278
    // At 12pt: 2278 * 12 / 1000 = 27.336
    let width = FontMetrics::measure_text("Hello", BuiltinFont::Helvetica, 12.0);
    assert!((width - 27.336).abs() < 0.001);
}

#[test]
fn measure_text_empty() {
    let width = FontMetrics::measure_text("", BuiltinFont::TimesRoman, 12.0);
    assert!(width.abs() < 0.001);
}

#[test]
fn line_height_at_12pt() {
    let h = FontMetrics::line_height(BuiltinFont::Helvetica, 12.0);
    assert!((h - 14.4).abs() < 0.001);
}

#[test]
fn pdflib_names_are_case_insensitive() {
    assert_eq!(BuiltinFont::from_pdflib_name("Helvetica"), Some(BuiltinFont::Helvetica));
    assert_eq!(BuiltinFont::from_pdflib_name("HELVETICA-BOLD"), Some(BuiltinFont::HelveticaBold));
    assert_eq!(BuiltinFont::from_pdflib_name("ZapfDingbats"), Some(BuiltinFont::ZapfDingbats));
}

#[test]
fn pdflib_italic_and_oblique_aliases() {
    assert_eq!(
        BuiltinFont::from_pdflib_name("courier-italic"),
        BuiltinFont::from_pdflib_name("courier-oblique"),
    );
    assert_eq!(
        BuiltinFont::from_pdflib_name("helvetica-bold-italic"),
        Some(BuiltinFont::HelveticaBoldOblique),
    );
    assert_eq!(
        BuiltinFont::from_pdflib_name("times-roman-bold-italic"),
        Some(BuiltinFont::TimesBoldItalic),
    );
    assert_eq!(BuiltinFont::from_pdflib_name("times"), Some(BuiltinFont::TimesRoman));
}

#[test]
fn unknown_pdflib_name() {
    assert_eq!(BuiltinFont::from_pdflib_name("comic-sans"), None);
    // Exact base names with hyphens in other places are not aliases.
    assert_eq!(BuiltinFont::from_pdflib_name("Times-BoldItalic"), Some(BuiltinFont::TimesBoldItalic));
    assert_eq!(BuiltinFont::from_pdflib_name("Helvetica-BoldItalic"), None);
}

#[test]
fn pdf_names() {
    assert_eq!(BuiltinFont::Helvetica.pdf_name(), "F1");
    assert_eq!(BuiltinFont::ZapfDingbats.pdf_name(), "F14");
    assert_eq!(BuiltinFont::TimesRoman.pdf_base_name(), "Times-Roman");
}

#[test]
fn encoding_names() {
    assert_eq!(TextEncoding::from_name("winansi"), Some(TextEncoding::WinAnsi));
    assert_eq!(TextEncoding::from_name("host"), Some(TextEncoding::WinAnsi));
    assert_eq!(TextEncoding::from_name(""), Some(TextEncoding::WinAnsi));
    assert_eq!(TextEncoding::from_name("Builtin"), Some(TextEncoding::Builtin));
    assert_eq!(TextEncoding::from_name("ebcdic"), None);
}
