use std::io::Write;

use pdf_core::{BuiltinFont, DocumentError, Gray, PdfDocument, ShapeMode, TextEncoding};

/// Immediate-mode drawing target of a page.
///
/// Rectangles are given by two opposite corners.
pub trait DrawingSurface {
    fn draw_rectangle(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        mode: ShapeMode,
    ) -> Result<(), DocumentError>;

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<(), DocumentError>;

    /// Clip to a rectangle. The path is ended without painting.
    fn clip_rectangle(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<(), DocumentError>;

    fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        encoding: TextEncoding,
    ) -> Result<(), DocumentError>;

    fn set_fill_color(&mut self, gray: Gray) -> Result<(), DocumentError>;

    fn save_graphics_state(&mut self) -> Result<(), DocumentError>;

    fn restore_graphics_state(&mut self) -> Result<(), DocumentError>;

    fn set_font(&mut self, font: BuiltinFont, size: f64) -> Result<(), DocumentError>;

    fn translate(&mut self, tx: f64, ty: f64) -> Result<(), DocumentError>;
}

/// Draws on the document's open page.
impl<W: Write> DrawingSurface for PdfDocument<W> {
    fn draw_rectangle(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        mode: ShapeMode,
    ) -> Result<(), DocumentError> {
        PdfDocument::draw_rectangle(self, x1, y1, x2, y2, mode).map(|_| ())
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<(), DocumentError> {
        PdfDocument::draw_line(self, x1, y1, x2, y2).map(|_| ())
    }

    fn clip_rectangle(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<(), DocumentError> {
        PdfDocument::clip_rectangle(self, x1, y1, x2, y2).map(|_| ())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        encoding: TextEncoding,
    ) -> Result<(), DocumentError> {
        PdfDocument::draw_text(self, text, x, y, encoding).map(|_| ())
    }

    fn set_fill_color(&mut self, gray: Gray) -> Result<(), DocumentError> {
        PdfDocument::set_fill_color(self, gray).map(|_| ())
    }

    fn save_graphics_state(&mut self) -> Result<(), DocumentError> {
        self.save_state().map(|_| ())
    }

    fn restore_graphics_state(&mut self) -> Result<(), DocumentError> {
        self.restore_state().map(|_| ())
    }

    fn set_font(&mut self, font: BuiltinFont, size: f64) -> Result<(), DocumentError> {
        PdfDocument::set_font(self, font, size).map(|_| ())
    }

    fn translate(&mut self, tx: f64, ty: f64) -> Result<(), DocumentError> {
        PdfDocument::translate(self, tx, ty).map(|_| ())
    }
}
