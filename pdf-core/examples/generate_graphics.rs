use pdf_core::{BuiltinFont, Gray, PdfDocument, ShapeMode, TextEncoding};

fn main() {
    env_logger::init();
    let path = "graphics_output.pdf";
    let mut doc = PdfDocument::create(path).unwrap();
    doc.set_info("Creator", "pdf-core");
    doc.set_info("Title", "Line Graphics Demo");
    doc.begin_page(612.0, 792.0).unwrap();

    // Page border
    doc.draw_rectangle(72.0, 72.0, 540.0, 720.0, ShapeMode::Stroke).unwrap();

    // Light gray background box
    doc.set_fill_color(Gray::new(0.9)).unwrap();
    doc.draw_rectangle(100.0, 600.0, 300.0, 650.0, ShapeMode::Fill).unwrap();

    doc.draw_line(100.0, 500.0, 300.0, 550.0).unwrap();

    // Everything inside the clip box, in a shifted coordinate system.
    doc.save_state().unwrap();
    doc.translate(150.0, 200.0).unwrap();
    doc.clip_rectangle(0.0, 0.0, 300.0, 150.0).unwrap();
    doc.set_fill_color(Gray::new(0.6)).unwrap();
    doc.draw_rectangle(-50.0, -50.0, 150.0, 100.0, ShapeMode::Fill).unwrap();
    doc.draw_line(0.0, 0.0, 400.0, 200.0).unwrap();
    doc.restore_state().unwrap();

    // Outlined label
    doc.set_fill_color(Gray::BLACK).unwrap();
    doc.set_font(BuiltinFont::HelveticaBold, 24.0).unwrap();
    doc.set_text_rendering(1).unwrap();
    doc.draw_text("Line Graphics Demo", 72.0, 740.0, TextEncoding::WinAnsi).unwrap();
    doc.add_outline("Graphics").unwrap();

    doc.end_page().unwrap();
    doc.end_document().unwrap();
    println!("Generated: {}", path);
}
