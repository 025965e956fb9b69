/// Deferred path drawing: describe a shape, then paint it.
///
/// Run with:
///   cargo run --example generate_shapes -p pdflib-demos
use pdflib_compat::{PathOptions, Pdf, PdfOptions, SoftFail};
use pdflib_demos::output_path;

fn main() {
    env_logger::init();
    let path = output_path("pdflib-shapes.pdf").unwrap();

    let mut pdf = Pdf::open_file(&path).unwrap();
    pdf.set_info_title("Shapes").unwrap();
    pdf.begin_page(400.0, 400.0).unwrap();
    pdf.add_outline("Legacy semantics").unwrap();

    // The rectangle stays pending, so each terminal call reuses it.
    pdf.rect(50.0, 250.0, 100.0, 100.0).unwrap();
    pdf.setgray_fill(0.8).unwrap();
    pdf.fill().unwrap();
    pdf.stroke().unwrap();

    // Segments can only be stroked.
    pdf.moveto(50.0, 200.0).unwrap();
    pdf.lineto(350.0, 200.0).unwrap();
    println!("fill on a segment: {}", pdf.fill().succeeded());
    println!("stroke on a segment: {}", pdf.stroke().succeeded());

    pdf.end_page().unwrap();
    pdf.close().unwrap();

    // Same drawing with the pending shape cleared after painting.
    let options = PdfOptions::default().path(PathOptions::default().clear_after_paint(true));
    let mut pdf = Pdf::open_file_with_options(&path, options).unwrap();
    pdf.begin_page(400.0, 400.0).unwrap();
    pdf.rect(50.0, 250.0, 100.0, 100.0).unwrap();
    pdf.stroke().unwrap();
    println!("second stroke after clearing: {}", pdf.stroke().succeeded());
    pdf.end_page().unwrap();
    pdf.close().unwrap();

    println!("Written to {}", path.display());
}
