use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use log::{debug, warn};
use pdf_core::{BuiltinFont, FontMetrics, Gray, PdfDocument, PdfReader, TextEncoding};

use crate::error::PdfError;
use crate::options::PdfOptions;
use crate::path::PathState;

/// State that lives exactly as long as one page.
struct PageContext {
    number: usize,
    path: PathState,
}

/// PDFlib-style procedural document.
///
/// Calls address the page opened by `begin_page`. Path geometry is
/// described with `rect`, `moveto` and `lineto` and painted by
/// `fill`, `stroke` or `clip`. After `close` every call fails with
/// [`PdfError::DocumentClosed`].
///
/// ```no_run
/// use pdflib_compat::Pdf;
///
/// let mut pdf = Pdf::open_file("report.pdf")?;
/// pdf.set_info_title("Report")?;
/// pdf.begin_page(595.0, 842.0)?;
/// pdf.set_font("Helvetica-Bold", 14.0, "winansi")?;
/// pdf.show_xy("Summary", 50.0, 780.0)?;
/// pdf.rect(50.0, 760.0, 495.0, 1.0)?;
/// pdf.fill()?;
/// pdf.end_page()?;
/// pdf.close()?;
/// # Ok::<(), pdflib_compat::PdfError>(())
/// ```
pub struct Pdf<W: Write> {
    doc: Option<PdfDocument<W>>,
    page: Option<PageContext>,
    encoding: TextEncoding,
    options: PdfOptions,
}

impl Pdf<BufWriter<File>> {
    /// Open `path` for writing.
    ///
    /// An existing PDF is extended: its pages are kept and new pages
    /// follow them. A file that cannot be read as a PDF is replaced
    /// by a new document.
    pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Self, PdfError> {
        Self::open_file_with_options(path, PdfOptions::default())
    }

    pub fn open_file_with_options<P: AsRef<Path>>(
        path: P,
        options: PdfOptions,
    ) -> Result<Self, PdfError> {
        let path = path.as_ref();
        // Parse before File::create truncates the original.
        let existing = match fs::read(path) {
            Ok(bytes) => match PdfReader::from_bytes(bytes) {
                Ok(reader) => Some(reader),
                Err(e) => {
                    warn!("{} is not a usable PDF ({}), starting a new document", path.display(), e);
                    None
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        let writer = BufWriter::new(File::create(path)?);
        let doc = match existing {
            Some(reader) => {
                debug!("extending {}", path.display());
                PdfDocument::append_reader(writer, reader)?
            }
            None => PdfDocument::new(writer)?,
        };
        Ok(Self::from_document(doc, options))
    }
}

impl<W: Write> Pdf<W> {
    /// Start a new document on any writer.
    pub fn with_writer(writer: W) -> Result<Self, PdfError> {
        Self::with_writer_and_options(writer, PdfOptions::default())
    }

    pub fn with_writer_and_options(writer: W, options: PdfOptions) -> Result<Self, PdfError> {
        Ok(Self::from_document(PdfDocument::new(writer)?, options))
    }

    /// Wrap a document that is already set up, e.g. one created
    /// with [`PdfDocument::append`].
    pub fn from_document(mut doc: PdfDocument<W>, options: PdfOptions) -> Self {
        doc.set_compression(options.compress);
        Pdf {
            doc: Some(doc),
            page: None,
            encoding: TextEncoding::default(),
            options,
        }
    }

    pub fn options(&self) -> PdfOptions {
        self.options
    }

    /// Pages completed so far, including those of an extended file.
    pub fn page_count(&self) -> usize {
        self.doc.as_ref().map_or(0, |doc| doc.page_count())
    }

    /// Path state of the open page.
    pub fn path_state(&self) -> Option<&PathState> {
        self.page.as_ref().map(|page| &page.path)
    }

    pub fn set_info_author(&mut self, author: &str) -> Result<(), PdfError> {
        self.set_info("Author", author)
    }

    pub fn set_info_creator(&mut self, creator: &str) -> Result<(), PdfError> {
        self.set_info("Creator", creator)
    }

    pub fn set_info_subject(&mut self, subject: &str) -> Result<(), PdfError> {
        self.set_info("Subject", subject)
    }

    pub fn set_info_title(&mut self, title: &str) -> Result<(), PdfError> {
        self.set_info("Title", title)
    }

    pub fn set_info_keywords(&mut self, keywords: &str) -> Result<(), PdfError> {
        self.set_info("Keywords", keywords)
    }

    fn set_info(&mut self, key: &str, value: &str) -> Result<(), PdfError> {
        self.doc_mut()?.set_info(key, value);
        Ok(())
    }

    /// Select a base-14 font by PDFlib name and the encoding used by
    /// `show_xy`. The font is applied to the open page, if any; a
    /// page begun later starts without a font.
    pub fn set_font(&mut self, name: &str, size: f64, encoding: &str) -> Result<(), PdfError> {
        let font = BuiltinFont::from_pdflib_name(name)
            .ok_or_else(|| PdfError::UnknownFont(name.to_string()))?;
        let encoding = TextEncoding::from_name(encoding)
            .ok_or_else(|| PdfError::UnknownEncoding(encoding.to_string()))?;
        let doc = self.doc_mut()?;
        if doc.has_open_page() {
            doc.set_font(font, size)?;
        } else {
            debug!("font {} selected with no open page", font.pdf_base_name());
        }
        self.encoding = encoding;
        Ok(())
    }

    /// Draw text at (x, y) in the current font.
    pub fn show_xy(&mut self, text: &str, x: f64, y: f64) -> Result<(), PdfError> {
        let encoding = self.encoding;
        let (doc, _) = self.open_page()?;
        if doc.font().is_none() {
            return Err(PdfError::NoFont);
        }
        doc.draw_text(text, x, y, encoding)?;
        Ok(())
    }

    pub fn setgray_fill(&mut self, gray: f64) -> Result<(), PdfError> {
        let (doc, _) = self.open_page()?;
        doc.set_fill_color(Gray::new(gray))?;
        Ok(())
    }

    /// Width of `text` in points, in the page's current font.
    pub fn stringwidth(&mut self, text: &str) -> Result<f64, PdfError> {
        let (doc, _) = self.open_page()?;
        let (font, size) = doc.font().ok_or(PdfError::NoFont)?;
        Ok(FontMetrics::measure_text(text, font, size))
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<(), PdfError> {
        let (_, page) = self.open_page()?;
        page.path.rect(x, y, width, height);
        Ok(())
    }

    pub fn moveto(&mut self, x: f64, y: f64) -> Result<(), PdfError> {
        let (_, page) = self.open_page()?;
        page.path.move_to(x, y);
        Ok(())
    }

    pub fn lineto(&mut self, x: f64, y: f64) -> Result<(), PdfError> {
        let (_, page) = self.open_page()?;
        page.path.line_to(x, y)?;
        Ok(())
    }

    pub fn fill(&mut self) -> Result<(), PdfError> {
        let (doc, page) = self.open_page()?;
        page.path.fill(Some(doc))?;
        Ok(())
    }

    pub fn stroke(&mut self) -> Result<(), PdfError> {
        let (doc, page) = self.open_page()?;
        page.path.stroke(Some(doc))?;
        Ok(())
    }

    pub fn clip(&mut self) -> Result<(), PdfError> {
        let (doc, page) = self.open_page()?;
        page.path.clip(Some(doc))?;
        Ok(())
    }

    pub fn save(&mut self) -> Result<(), PdfError> {
        let (doc, _) = self.open_page()?;
        doc.save_state()?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<(), PdfError> {
        let (doc, _) = self.open_page()?;
        doc.restore_state()?;
        Ok(())
    }

    pub fn translate(&mut self, tx: f64, ty: f64) -> Result<(), PdfError> {
        let (doc, _) = self.open_page()?;
        doc.translate(tx, ty)?;
        Ok(())
    }

    /// Start a new page. An open page is finished first; the new
    /// page has no pending shape and no current point.
    pub fn begin_page(&mut self, width: f64, height: f64) -> Result<(), PdfError> {
        let path_options = self.options.path;
        let doc = self.doc.as_mut().ok_or(PdfError::DocumentClosed)?;
        doc.begin_page(width, height)?;
        let number = doc.page_count() + 1;
        if let Some(previous) = self.page.take() {
            debug!("page {} closed by begin_page", previous.number);
        }
        self.page = Some(PageContext {
            number,
            path: PathState::new(path_options),
        });
        Ok(())
    }

    pub fn end_page(&mut self) -> Result<(), PdfError> {
        let doc = self.doc.as_mut().ok_or(PdfError::DocumentClosed)?;
        let page = self.page.take().ok_or(PdfError::NoActiveContext)?;
        doc.end_page()?;
        debug!("page {} finished", page.number);
        Ok(())
    }

    /// Bookmark the open page.
    pub fn add_outline(&mut self, text: &str) -> Result<(), PdfError> {
        let (doc, _) = self.open_page()?;
        doc.add_outline(text)?;
        Ok(())
    }

    /// Set the text rendering mode: 0 fill, 1 stroke, 2 fill and
    /// stroke, 3 invisible, 4 to 7 add the glyphs to the clip path.
    pub fn set_text_rendering(&mut self, mode: i32) -> Result<(), PdfError> {
        let (doc, _) = self.open_page()?;
        doc.set_text_rendering(mode)?;
        Ok(())
    }

    /// Finish the document and flush it. An open page is ended.
    pub fn close(&mut self) -> Result<W, PdfError> {
        let doc = self.doc.take().ok_or(PdfError::DocumentClosed)?;
        self.page = None;
        let mut writer = doc.end_document()?;
        writer.flush()?;
        Ok(writer)
    }

    fn doc_mut(&mut self) -> Result<&mut PdfDocument<W>, PdfError> {
        self.doc.as_mut().ok_or(PdfError::DocumentClosed)
    }

    fn open_page(&mut self) -> Result<(&mut PdfDocument<W>, &mut PageContext), PdfError> {
        let doc = self.doc.as_mut().ok_or(PdfError::DocumentClosed)?;
        let page = self.page.as_mut().ok_or(PdfError::NoActiveContext)?;
        Ok((doc, page))
    }
}
