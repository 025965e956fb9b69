/// Invoice example written against the procedural API.
///
/// Run with:
///   cargo run --example generate_invoice -p pdflib-demos
///
/// Opens output at: output/pdflib-invoice.pdf
use pdflib_compat::{Pdf, PdfError, PdfOptions};
use pdflib_demos::output_path;

const PAGE_W: f64 = 595.0;
const PAGE_H: f64 = 842.0;
const MARGIN: f64 = 50.0;
const RIGHT: f64 = PAGE_W - MARGIN;

struct Line {
    description: &'static str,
    quantity: u32,
    unit_price: f64,
}

const LINES: [Line; 4] = [
    Line { description: "Consulting, March", quantity: 12, unit_price: 95.0 },
    Line { description: "Hosting (annual)", quantity: 1, unit_price: 480.0 },
    Line { description: "Domain renewal", quantity: 2, unit_price: 14.5 },
    Line { description: "Support tickets", quantity: 5, unit_price: 30.0 },
];

/// Right-align `text` so that it ends at `right`.
fn show_right<W: std::io::Write>(pdf: &mut Pdf<W>, text: &str, right: f64, y: f64) -> Result<(), PdfError> {
    let width = pdf.stringwidth(text)?;
    pdf.show_xy(text, right - width, y)
}

fn main() -> Result<(), PdfError> {
    env_logger::init();
    let path = output_path("pdflib-invoice.pdf")?;
    // open_file extends an existing file; start from scratch instead.
    if path.exists() {
        std::fs::remove_file(&path)?;
    }

    let mut pdf = Pdf::open_file_with_options(&path, PdfOptions::default().compress(true))?;
    pdf.set_info_title("Invoice 2024-031")?;
    pdf.set_info_author("Acme Services")?;
    pdf.set_info_creator("pdflib-compat generate_invoice example")?;
    pdf.set_info_keywords("invoice, acme")?;

    pdf.begin_page(PAGE_W, PAGE_H)?;
    pdf.add_outline("Invoice 2024-031")?;

    // Header band
    pdf.setgray_fill(0.2)?;
    pdf.rect(0.0, PAGE_H - 90.0, PAGE_W, 90.0)?;
    pdf.fill()?;
    pdf.setgray_fill(1.0)?;
    pdf.set_font("helvetica-bold", 24.0, "winansi")?;
    pdf.show_xy("INVOICE", MARGIN, PAGE_H - 55.0)?;
    pdf.set_font("helvetica", 10.0, "winansi")?;
    show_right(&mut pdf, "No. 2024-031", RIGHT, PAGE_H - 50.0)?;

    // Column headings
    pdf.setgray_fill(0.0)?;
    let mut y = PAGE_H - 140.0;
    pdf.set_font("helvetica-bold", 10.0, "winansi")?;
    pdf.show_xy("Description", MARGIN, y)?;
    show_right(&mut pdf, "Qty", 360.0, y)?;
    show_right(&mut pdf, "Unit", 450.0, y)?;
    show_right(&mut pdf, "Amount", RIGHT, y)?;
    pdf.moveto(MARGIN, y - 6.0)?;
    pdf.lineto(RIGHT, y - 6.0)?;
    pdf.stroke()?;

    // Line items on alternating shaded rows
    pdf.set_font("helvetica", 10.0, "winansi")?;
    let mut total = 0.0;
    for (i, line) in LINES.iter().enumerate() {
        y -= 22.0;
        if i % 2 == 1 {
            pdf.save()?;
            pdf.setgray_fill(0.93)?;
            pdf.rect(MARGIN, y - 6.0, RIGHT - MARGIN, 20.0)?;
            pdf.fill()?;
            pdf.restore()?;
        }
        let amount = line.quantity as f64 * line.unit_price;
        total += amount;
        pdf.show_xy(line.description, MARGIN, y)?;
        show_right(&mut pdf, &line.quantity.to_string(), 360.0, y)?;
        show_right(&mut pdf, &format!("{:.2}", line.unit_price), 450.0, y)?;
        show_right(&mut pdf, &format!("{:.2}", amount), RIGHT, y)?;
    }

    // Total box
    y -= 40.0;
    pdf.rect(350.0, y - 8.0, RIGHT - 350.0, 26.0)?;
    pdf.stroke()?;
    pdf.set_font("helvetica-bold", 12.0, "winansi")?;
    pdf.show_xy("Total", 360.0, y)?;
    show_right(&mut pdf, &format!("\u{20ac} {:.2}", total), RIGHT - 10.0, y)?;

    // Footer, clipped to the page margins
    pdf.save()?;
    pdf.rect(MARGIN, 20.0, RIGHT - MARGIN, 30.0)?;
    pdf.clip()?;
    pdf.set_font("times-italic", 9.0, "winansi")?;
    pdf.show_xy("Payment due within 30 days. Thank you for your business.", MARGIN, 30.0)?;
    pdf.restore()?;

    pdf.end_page()?;
    pdf.close()?;
    println!("Written to {}", path.display());
    Ok(())
}
