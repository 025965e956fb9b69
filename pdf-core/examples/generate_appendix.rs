/// Example: extending a finished PDF.
///
/// Writes a short report, then reopens the bytes and appends two
/// appendix pages as an incremental update. The original revision
/// is left untouched at the start of the file.
///
/// Run with:
///   cargo run --example generate_appendix -p pdf-core
use pdf_core::{BuiltinFont, FontMetrics, PdfDocument, PdfReader, TextEncoding};

const PAGE_WIDTH: f64 = 612.0;
const PAGE_HEIGHT: f64 = 792.0;
const MARGIN: f64 = 72.0;

fn footer(doc: &mut PdfDocument<Vec<u8>>, number: usize) {
    let label = format!("Page {}", number);
    let width = FontMetrics::measure_text(&label, BuiltinFont::Helvetica, 9.0);
    doc.set_font(BuiltinFont::Helvetica, 9.0).unwrap();
    doc.draw_text(&label, (PAGE_WIDTH - width) / 2.0, 28.0, TextEncoding::WinAnsi)
        .unwrap();
}

fn main() {
    env_logger::init();
    std::fs::create_dir_all("output").unwrap();

    let mut doc = PdfDocument::new(Vec::new()).unwrap();
    doc.set_info("Title", "Quarterly Report");
    for i in 1..=3 {
        doc.begin_page(PAGE_WIDTH, PAGE_HEIGHT).unwrap();
        doc.add_outline(&format!("Section {}", i)).unwrap();
        doc.set_font(BuiltinFont::TimesBold, 18.0).unwrap();
        doc.draw_text(&format!("Section {}", i), MARGIN, PAGE_HEIGHT - MARGIN, TextEncoding::WinAnsi)
            .unwrap();
        footer(&mut doc, i);
        doc.end_page().unwrap();
    }
    let report = doc.end_document().unwrap();

    let mut doc = PdfDocument::append(Vec::new(), report).unwrap();
    doc.set_compression(true);
    for letter in ['A', 'B'] {
        let number = doc.page_count() + 1;
        doc.begin_page(PAGE_WIDTH, PAGE_HEIGHT).unwrap();
        doc.set_font(BuiltinFont::TimesItalic, 18.0).unwrap();
        doc.draw_text(&format!("Appendix {}", letter), MARGIN, PAGE_HEIGHT - MARGIN, TextEncoding::WinAnsi)
            .unwrap();
        footer(&mut doc, number);
        doc.end_page().unwrap();
    }
    let updated = doc.end_document().unwrap();

    let path = "output/rust-appendix.pdf";
    std::fs::write(path, &updated).unwrap();
    let reader = PdfReader::from_bytes(updated).unwrap();
    println!("Written {} pages to {}", reader.page_count(), path);
}
