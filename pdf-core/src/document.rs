use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::{debug, warn};
use thiserror::Error;

use crate::fonts::{BuiltinFont, TextEncoding};
use crate::graphics::{Gray, ShapeMode};
use crate::objects::{ObjId, PdfObject};
use crate::outline::{outline_objects, OutlineEntry};
use crate::reader::{PdfReadError, PdfReader};
use crate::writer::{escape_pdf_bytes, PdfWriter, Trailer};

const CATALOG_OBJ: ObjId = ObjId(1, 0);
const PAGES_OBJ: ObjId = ObjId(2, 0);
const FIRST_FREE_OBJ_NUM: u32 = 3;

/// Errors raised while building a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("no page is open")]
    NoOpenPage,
    #[error("no font has been set on the current page")]
    NoFont,
    #[error("graphics state restored without a matching save")]
    UnbalancedRestore,
    #[error("text rendering mode {0} is outside 0..=7")]
    InvalidTextRendering(i32),
    #[error("cannot extend existing PDF: {0}")]
    Read(#[from] PdfReadError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// The font selected on a page, with its size in points.
pub type FontSelection = (BuiltinFont, f64);

/// High-level API for building PDF documents.
///
/// Generic over `Write` so it works with files (`BufWriter<File>`),
/// in-memory buffers (`Vec<u8>`), or any other writer.
///
/// Pages are written incrementally: `end_page()` flushes page data
/// to the writer and frees page content from memory. Drawing calls
/// address the open page and fail with `NoOpenPage` when there is
/// none.
#[derive(Debug)]
pub struct PdfDocument<W: Write> {
    writer: PdfWriter<W>,
    info: Vec<(String, String)>,
    catalog_id: ObjId,
    pages_id: ObjId,
    base: Option<BaseRevision>,
    page_obj_ids: Vec<ObjId>,
    current_page: Option<PageBuilder>,
    font_ids: BTreeMap<BuiltinFont, ObjId>,
    outlines: Vec<OutlineEntry>,
    next_obj_num: u32,
    compress: bool,
}

/// What an incremental update needs to know about the file it extends.
#[derive(Debug)]
struct BaseRevision {
    kids: Vec<ObjId>,
    page_count: usize,
    info: Option<ObjId>,
    startxref: usize,
    size: u32,
    /// Inheritable entries of the old root /Pages node, raw.
    inherited: Vec<(String, Vec<u8>)>,
}

impl BaseRevision {
    fn inherits(&self, key: &str) -> bool {
        self.inherited.iter().any(|(k, _)| k == key)
    }
}

#[derive(Debug)]
struct PageBuilder {
    id: ObjId,
    width: f64,
    height: f64,
    content_ops: Vec<u8>,
    fonts: BTreeSet<BuiltinFont>,
    font: Option<FontSelection>,
    saved_fonts: Vec<Option<FontSelection>>,
}

impl PageBuilder {
    fn push_op(&mut self, op: &str) {
        self.content_ops.extend_from_slice(op.as_bytes());
    }
}

impl PdfDocument<BufWriter<File>> {
    /// Create a new PDF document that writes to a file.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> PdfDocument<W> {
    /// Create a new PDF document that writes to the given writer.
    /// Writes the PDF header immediately.
    pub fn new(writer: W) -> Result<Self, DocumentError> {
        let mut pdf_writer = PdfWriter::new(writer);
        pdf_writer.write_header()?;

        Ok(PdfDocument {
            writer: pdf_writer,
            info: Vec::new(),
            catalog_id: CATALOG_OBJ,
            pages_id: PAGES_OBJ,
            base: None,
            page_obj_ids: Vec::new(),
            current_page: None,
            font_ids: BTreeMap::new(),
            outlines: Vec::new(),
            next_obj_num: FIRST_FREE_OBJ_NUM,
            compress: false,
        })
    }

    /// Extend an existing PDF with an incremental update.
    ///
    /// `existing` is copied to the writer unchanged. New pages are
    /// appended to the root of its page tree and the new xref
    /// section points back at the old one through `/Prev`.
    pub fn append(writer: W, existing: Vec<u8>) -> Result<Self, DocumentError> {
        Self::append_reader(writer, PdfReader::from_bytes(existing)?)
    }

    /// Extend a PDF that has already been parsed. Nothing is written
    /// until the reader's bytes are copied here.
    pub fn append_reader(writer: W, reader: PdfReader) -> Result<Self, DocumentError> {
        let base = BaseRevision {
            kids: reader
                .page_tree_kids()
                .iter()
                .map(|&num| ObjId(num, 0))
                .collect(),
            page_count: reader.page_count(),
            info: reader.info().map(|num| ObjId(num, 0)),
            startxref: reader.startxref(),
            size: reader.size(),
            inherited: reader.inherited_page_attributes().to_vec(),
        };
        let catalog_id = ObjId(reader.root(), 0);
        let pages_id = ObjId(reader.pages_root(), 0);
        debug!(
            "appending to PDF {} with {} pages",
            reader.pdf_version(),
            base.page_count
        );

        let mut pdf_writer = PdfWriter::new(writer);
        pdf_writer.write_raw(&reader.into_bytes())?;

        Ok(PdfDocument {
            writer: pdf_writer,
            info: Vec::new(),
            catalog_id,
            pages_id,
            next_obj_num: base.size,
            base: Some(base),
            page_obj_ids: Vec::new(),
            current_page: None,
            font_ids: BTreeMap::new(),
            outlines: Vec::new(),
            compress: false,
        })
    }

    /// Set a document info entry (e.g. "Creator", "Title").
    /// Setting the same key again replaces the earlier value.
    pub fn set_info(&mut self, key: &str, value: &str) -> &mut Self {
        match self.info.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.info.push((key.to_string(), value.to_string())),
        }
        self
    }

    /// Enable or disable FlateDecode compression of page content.
    pub fn set_compression(&mut self, enabled: bool) -> &mut Self {
        self.compress = enabled;
        self
    }

    /// Number of completed pages, including those of the document
    /// being appended to.
    pub fn page_count(&self) -> usize {
        let base = self.base.as_ref().map_or(0, |b| b.page_count);
        base + self.page_obj_ids.len()
    }

    pub fn has_open_page(&self) -> bool {
        self.current_page.is_some()
    }

    /// Begin a new page with the given dimensions in points.
    /// If a page is currently open, it is closed first.
    pub fn begin_page(&mut self, width: f64, height: f64) -> Result<&mut Self, DocumentError> {
        if self.current_page.is_some() {
            self.end_page()?;
        }
        let id = self.alloc_id();
        debug!("begin page {} ({} x {})", id.0, width, height);
        self.current_page = Some(PageBuilder {
            id,
            width,
            height,
            content_ops: Vec::new(),
            fonts: BTreeSet::new(),
            font: None,
            saved_fonts: Vec::new(),
        });
        Ok(self)
    }

    /// Select the font used by subsequent `draw_text` calls on the
    /// open page. The selection is part of the graphics state.
    pub fn set_font(&mut self, font: BuiltinFont, size: f64) -> Result<&mut Self, DocumentError> {
        self.page_mut()?.font = Some((font, size));
        Ok(self)
    }

    /// The font selected on the open page, if any.
    pub fn font(&self) -> Option<FontSelection> {
        self.current_page.as_ref().and_then(|page| page.font)
    }

    /// Place text at position (x, y) in the current font.
    /// Coordinates use PDF's default bottom-left origin.
    pub fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        encoding: TextEncoding,
    ) -> Result<&mut Self, DocumentError> {
        let (font, size) = self.page_mut()?.font.ok_or(DocumentError::NoFont)?;
        self.font_id(font);

        let encoding = if font.is_symbolic() {
            TextEncoding::Builtin
        } else {
            encoding
        };
        let escaped = escape_pdf_bytes(&encoding.encode(text));
        let page = self.page_mut()?;
        page.fonts.insert(font);
        page.push_op(&format!(
            "BT\n/{} {} Tf\n{} {} Td\n({}) Tj\nET\n",
            font.pdf_name(),
            format_coord(size),
            format_coord(x),
            format_coord(y),
            escaped,
        ));
        Ok(self)
    }

    /// Set the fill (nonstroking) color.
    pub fn set_fill_color(&mut self, gray: Gray) -> Result<&mut Self, DocumentError> {
        self.page_mut()?.push_op(&gray.fill_op());
        Ok(self)
    }

    /// Save the graphics state (q operator).
    pub fn save_state(&mut self) -> Result<&mut Self, DocumentError> {
        let page = self.page_mut()?;
        page.saved_fonts.push(page.font);
        page.push_op("q\n");
        Ok(self)
    }

    /// Restore the most recently saved graphics state (Q operator).
    pub fn restore_state(&mut self) -> Result<&mut Self, DocumentError> {
        let page = self.page_mut()?;
        let font = page
            .saved_fonts
            .pop()
            .ok_or(DocumentError::UnbalancedRestore)?;
        page.font = font;
        page.push_op("Q\n");
        Ok(self)
    }

    /// Translate the origin of the user coordinate system.
    pub fn translate(&mut self, tx: f64, ty: f64) -> Result<&mut Self, DocumentError> {
        self.page_mut()?.push_op(&format!(
            "1 0 0 1 {} {} cm\n",
            format_coord(tx),
            format_coord(ty)
        ));
        Ok(self)
    }

    /// Paint the rectangle spanned by two opposite corners.
    pub fn draw_rectangle(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        mode: ShapeMode,
    ) -> Result<&mut Self, DocumentError> {
        let re = rect_op(x1, y1, x2, y2);
        self.page_mut()?
            .push_op(&format!("{}{}\n", re, mode.operator()));
        Ok(self)
    }

    /// Stroke a straight line between two points.
    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<&mut Self, DocumentError> {
        self.page_mut()?.push_op(&format!(
            "{} {} m\n{} {} l\nS\n",
            format_coord(x1),
            format_coord(y1),
            format_coord(x2),
            format_coord(y2),
        ));
        Ok(self)
    }

    /// Intersect the clipping path with a rectangle and end the path
    /// without painting it.
    pub fn clip_rectangle(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<&mut Self, DocumentError> {
        let re = rect_op(x1, y1, x2, y2);
        self.page_mut()?.push_op(&format!("{}W n\n", re));
        Ok(self)
    }

    /// Set the text rendering mode (Tr operator), 0 through 7.
    pub fn set_text_rendering(&mut self, mode: i32) -> Result<&mut Self, DocumentError> {
        if !(0..=7).contains(&mode) {
            return Err(DocumentError::InvalidTextRendering(mode));
        }
        self.page_mut()?.push_op(&format!("{} Tr\n", mode));
        Ok(self)
    }

    /// Add a top-level bookmark that shows the open page.
    pub fn add_outline(&mut self, title: &str) -> Result<&mut Self, DocumentError> {
        let page = self.page_mut()?.id;
        self.outlines.push(OutlineEntry {
            title: title.to_string(),
            page,
        });
        Ok(self)
    }

    /// End the current page. Writes page objects to the
    /// writer and frees page content from memory.
    pub fn end_page(&mut self) -> Result<(), DocumentError> {
        let mut page = self.current_page.take().ok_or(DocumentError::NoOpenPage)?;

        if !page.saved_fonts.is_empty() {
            warn!(
                "page {} ended with {} unrestored graphics state(s)",
                page.id.0,
                page.saved_fonts.len()
            );
            for _ in 0..page.saved_fonts.len() {
                page.push_op("Q\n");
            }
        }

        let content_id = self.alloc_id();
        let content_stream = if self.compress {
            PdfObject::stream(
                vec![("Filter", PdfObject::name("FlateDecode"))],
                deflate(&page.content_ops)?,
            )
        } else {
            PdfObject::stream(vec![], page.content_ops)
        };
        self.writer.write_object(content_id, &content_stream)?;

        let font_entries: Vec<(&str, PdfObject)> = page
            .fonts
            .iter()
            .map(|font| (font.pdf_name(), PdfObject::Reference(self.font_ids[font])))
            .collect();
        let resources = if font_entries.is_empty() {
            PdfObject::dict(vec![])
        } else {
            PdfObject::dict(vec![("Font", PdfObject::dict(font_entries))])
        };

        let mut page_entries = vec![
            ("Type", PdfObject::name("Page")),
            ("Parent", PdfObject::Reference(self.pages_id)),
            ("MediaBox", PdfObject::rect(0.0, 0.0, page.width, page.height)),
            ("Contents", PdfObject::Reference(content_id)),
            ("Resources", resources),
        ];
        // New pages hang under the base file's page tree root and
        // must not pick up its crop box or rotation.
        if let Some(base) = &self.base {
            if base.inherits("CropBox") {
                page_entries.push(("CropBox", PdfObject::rect(0.0, 0.0, page.width, page.height)));
            }
            if base.inherits("Rotate") {
                page_entries.push(("Rotate", PdfObject::Integer(0)));
            }
        }
        let page_dict = PdfObject::dict(page_entries);
        self.writer.write_object(page.id, &page_dict)?;

        debug!("end page {}", page.id.0);
        self.page_obj_ids.push(page.id);
        Ok(())
    }

    /// Finish the document. Writes fonts, outlines, the info
    /// dictionary, pages tree, catalog, xref table and trailer.
    /// Consumes self; no further operations are possible.
    pub fn end_document(mut self) -> Result<W, DocumentError> {
        if self.current_page.is_some() {
            self.end_page()?;
        }

        for (font, id) in &self.font_ids {
            let mut entries = vec![
                ("Type", PdfObject::name("Font")),
                ("Subtype", PdfObject::name("Type1")),
                ("BaseFont", PdfObject::name(font.pdf_base_name())),
            ];
            if !font.is_symbolic() {
                entries.push(("Encoding", PdfObject::name("WinAnsiEncoding")));
            }
            self.writer.write_object(*id, &PdfObject::dict(entries))?;
        }

        let outlines_id = if self.outlines.is_empty() {
            None
        } else {
            let root = self.alloc_id();
            let item_ids: Vec<ObjId> = (0..self.outlines.len()).map(|_| self.alloc_id()).collect();
            for (id, obj) in outline_objects(root, &self.outlines, &item_ids) {
                self.writer.write_object(id, &obj)?;
            }
            Some(root)
        };

        let info_id = if self.info.is_empty() {
            self.base.as_ref().and_then(|b| b.info)
        } else {
            let id = self.alloc_id();
            let entries: Vec<(&str, PdfObject)> = self
                .info
                .iter()
                .map(|(k, v)| (k.as_str(), PdfObject::text_string(v)))
                .collect();
            self.writer.write_object(id, &PdfObject::dict(entries))?;
            Some(id)
        };

        let kids: Vec<PdfObject> = self
            .base
            .iter()
            .flat_map(|b| b.kids.iter())
            .chain(self.page_obj_ids.iter())
            .map(|id| PdfObject::Reference(*id))
            .collect();
        let mut pages = vec![
            ("Type", PdfObject::name("Pages")),
            ("Kids", PdfObject::Array(kids)),
            ("Count", PdfObject::Integer(self.page_count() as i64)),
        ];
        // Old pages may rely on attributes inherited from the root.
        if let Some(base) = &self.base {
            pages.extend(
                base.inherited
                    .iter()
                    .map(|(key, raw)| (key.as_str(), PdfObject::Raw(raw.clone()))),
            );
        }
        let pages = PdfObject::dict(pages);
        self.writer.write_object(self.pages_id, &pages)?;

        // An appended document keeps its catalog unless it has to
        // point at a new outline tree.
        if self.base.is_none() || outlines_id.is_some() {
            let mut catalog = vec![
                ("Type", PdfObject::name("Catalog")),
                ("Pages", PdfObject::Reference(self.pages_id)),
            ];
            if let Some(id) = outlines_id {
                catalog.push(("Outlines", PdfObject::Reference(id)));
            }
            self.writer
                .write_object(self.catalog_id, &PdfObject::dict(catalog))?;
        }

        let trailer = Trailer {
            root: self.catalog_id,
            info: info_id,
            prev: self.base.as_ref().map(|b| b.startxref),
            min_size: self.base.as_ref().map_or(0, |b| b.size),
        };
        self.writer.write_xref_and_trailer(&trailer)?;

        Ok(self.writer.into_inner())
    }

    fn page_mut(&mut self) -> Result<&mut PageBuilder, DocumentError> {
        self.current_page.as_mut().ok_or(DocumentError::NoOpenPage)
    }

    fn alloc_id(&mut self) -> ObjId {
        let id = ObjId(self.next_obj_num, 0);
        self.next_obj_num += 1;
        id
    }

    /// Object id of a font dictionary, reserved on first use and
    /// written once by `end_document`.
    fn font_id(&mut self, font: BuiltinFont) -> ObjId {
        if let Some(id) = self.font_ids.get(&font) {
            return *id;
        }
        let id = self.alloc_id();
        self.font_ids.insert(font, id);
        id
    }
}

/// `x y w h re` for the rectangle spanned by two corners.
fn rect_op(x1: f64, y1: f64, x2: f64, y2: f64) -> String {
    format!(
        "{} {} {} {} re\n",
        format_coord(x1),
        format_coord(y1),
        format_coord(x2 - x1),
        format_coord(y2 - y1),
    )
}

fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Format a coordinate value for PDF content streams.
///
/// NaN and infinities have no PDF syntax and are written as 0.
pub(crate) fn format_coord(v: f64) -> String {
    if !v.is_finite() {
        warn!("non-finite coordinate {} written as 0", v);
        return "0".to_string();
    }
    if v == v.floor() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{:.4}", v);
        let s = s.trim_end_matches('0');
        let s = s.trim_end_matches('.');
        s.to_string()
    }
}
