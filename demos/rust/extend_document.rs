/// Append a page to an existing PDF, or create it on first run.
///
/// Run with:
///   cargo run --example extend_document -p pdflib-demos -- [path]
use pdf_core::PdfReader;
use pdflib_compat::Pdf;

fn main() {
    env_logger::init();
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "output/pdflib-journal.pdf".to_string());
    if let Some(dir) = std::path::Path::new(&path).parent() {
        std::fs::create_dir_all(dir).unwrap();
    }

    let mut pdf = Pdf::open_file(&path).unwrap();
    let number = pdf.page_count() + 1;
    pdf.begin_page(595.0, 842.0).unwrap();
    pdf.set_font("courier-bold", 16.0, "host").unwrap();
    pdf.show_xy(&format!("Entry {}", number), 50.0, 780.0).unwrap();
    pdf.close().unwrap();

    let reader = PdfReader::open(&path).unwrap();
    println!("{} now has {} pages", path, reader.page_count());
}
