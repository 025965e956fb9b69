use pdf_core::{BuiltinFont, PdfDocument, TextEncoding};

fn main() {
    env_logger::init();
    let path = "sample_output.pdf";
    let mut doc = PdfDocument::create(path).unwrap();
    doc.set_info("Creator", "pdf-core");
    doc.set_info("Title", "A Test Document");
    doc.begin_page(612.0, 792.0).unwrap();
    doc.set_font(BuiltinFont::Helvetica, 12.0).unwrap();
    doc.draw_text("Hello, PDF!", 72.0, 720.0, TextEncoding::WinAnsi).unwrap();
    doc.draw_text("Créé avec pdf-core.", 72.0, 700.0, TextEncoding::WinAnsi).unwrap();
    doc.end_page().unwrap();
    doc.end_document().unwrap();
    println!("Generated: {}", path);
}
