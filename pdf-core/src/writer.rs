use std::io::{self, Write};

use crate::objects::{ObjId, PdfObject};

/// Everything the trailer of one revision needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trailer {
    pub root: ObjId,
    pub info: Option<ObjId>,
    /// Offset of the previous revision's xref section, for
    /// incremental updates.
    pub prev: Option<usize>,
    /// Lower bound for `/Size`. An incremental update must never
    /// shrink the object number space of the revision it extends.
    pub min_size: u32,
}

impl Trailer {
    pub fn new(root: ObjId) -> Self {
        Trailer {
            root,
            info: None,
            prev: None,
            min_size: 0,
        }
    }
}

/// Low-level PDF binary writer. Serializes PDF objects to any
/// `Write` target while tracking byte offsets for the xref table.
#[derive(Debug)]
pub struct PdfWriter<W: Write> {
    writer: W,
    offset: usize,
    xref_entries: Vec<(u32, usize)>,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W) -> Self {
        PdfWriter {
            writer,
            offset: 0,
            xref_entries: Vec::new(),
        }
    }

    /// Write raw bytes, tracking the byte offset.
    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)?;
        self.offset += data.len();
        Ok(())
    }

    /// Write a formatted string, tracking the byte offset.
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Write the PDF 1.7 header and binary comment.
    pub fn write_header(&mut self) -> io::Result<()> {
        self.write_str("%PDF-1.7\n")?;
        // Binary comment: 4 bytes >= 128 for binary detection.
        self.write_bytes(b"%\xe2\xe3\xcf\xd3\n")?;
        Ok(())
    }

    /// Copy an existing revision verbatim. Used as the base of an
    /// incremental update; a trailing EOL is added if missing so the
    /// next object starts on its own line.
    pub fn write_raw(&mut self, data: &[u8]) -> io::Result<()> {
        self.write_bytes(data)?;
        if !data.ends_with(b"\n") && !data.ends_with(b"\r") {
            self.write_bytes(b"\n")?;
        }
        Ok(())
    }

    /// Write an indirect object, recording its byte offset for xref.
    pub fn write_object(
        &mut self,
        id: ObjId,
        obj: &PdfObject,
    ) -> io::Result<()> {
        self.xref_entries.push((id.0, self.offset));
        self.write_str(&format!("{} {} obj\n", id.0, id.1))?;
        self.write_pdf_object(obj)?;
        self.write_str("\nendobj\n")?;
        Ok(())
    }

    fn write_dict_entries(
        &mut self,
        entries: &[(String, PdfObject)],
    ) -> io::Result<()> {
        for (key, val) in entries {
            self.write_str(" /")?;
            self.write_str(key)?;
            self.write_str(" ")?;
            self.write_pdf_object(val)?;
        }
        Ok(())
    }

    /// Serialize a PdfObject to its PDF text representation.
    fn write_pdf_object(&mut self, obj: &PdfObject) -> io::Result<()> {
        match obj {
            PdfObject::Null => self.write_str("null"),
            PdfObject::Boolean(b) => {
                self.write_str(if *b { "true" } else { "false" })
            }
            PdfObject::Integer(n) => self.write_str(&n.to_string()),
            PdfObject::Real(f) => self.write_str(&format_real(*f)),
            PdfObject::Name(name) => {
                self.write_str("/")?;
                self.write_str(name)
            }
            PdfObject::LiteralString(s) => {
                self.write_str("(")?;
                self.write_str(&escape_pdf_string(s))?;
                self.write_str(")")
            }
            PdfObject::HexString(bytes) => {
                let hex: String = bytes
                    .iter()
                    .map(|b| format!("{:02X}", b))
                    .collect();
                self.write_str("<")?;
                self.write_str(&hex)?;
                self.write_str(">")
            }
            PdfObject::Array(items) => {
                self.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.write_str(" ")?;
                    }
                    self.write_pdf_object(item)?;
                }
                self.write_str("]")
            }
            PdfObject::Dictionary(entries) => {
                self.write_str("<<")?;
                self.write_dict_entries(entries)?;
                self.write_str(" >>")
            }
            PdfObject::Stream { dict, data } => {
                self.write_str("<<")?;
                self.write_dict_entries(dict)?;
                self.write_str(" /Length ")?;
                self.write_str(&data.len().to_string())?;
                self.write_str(" >>\nstream\n")?;
                self.write_bytes(data)?;
                self.write_str("\nendstream")
            }
            PdfObject::Reference(id) => {
                self.write_str(&format!("{} {} R", id.0, id.1))
            }
            PdfObject::Raw(bytes) => self.write_bytes(bytes),
        }
    }

    /// Current byte offset in the output.
    pub fn current_offset(&self) -> usize {
        self.offset
    }

    /// Write xref table, trailer, startxref, and %%EOF.
    ///
    /// The table only lists objects written through this writer,
    /// grouped into contiguous subsections. Object 0 (the head of
    /// the free list) is always present.
    pub fn write_xref_and_trailer(
        &mut self,
        trailer: &Trailer,
    ) -> io::Result<()> {
        let xref_offset = self.offset;

        self.xref_entries.sort_by_key(|&(num, _)| num);
        // A rewritten object keeps only its last offset.
        self.xref_entries.reverse();
        self.xref_entries.dedup_by_key(|&mut (num, _)| num);
        self.xref_entries.reverse();

        let max_obj = self
            .xref_entries
            .last()
            .map(|&(num, _)| num)
            .unwrap_or(0);
        let size = (max_obj + 1).max(trailer.min_size);

        let mut entries: Vec<(u32, Option<usize>)> =
            Vec::with_capacity(self.xref_entries.len() + 1);
        entries.push((0, None));
        entries.extend(
            self.xref_entries
                .iter()
                .map(|&(num, off)| (num, Some(off))),
        );

        self.write_str("xref\n")?;
        let mut start = 0;
        while start < entries.len() {
            let mut end = start + 1;
            while end < entries.len()
                && entries[end].0 == entries[end - 1].0 + 1
            {
                end += 1;
            }
            self.write_str(&format!(
                "{} {}\n",
                entries[start].0,
                end - start
            ))?;
            for &(_, off) in &entries[start..end] {
                match off {
                    // Each entry is exactly 20 bytes.
                    Some(off) => {
                        let entry = format!("{:010} {:05} n\r\n", off, 0);
                        self.write_bytes(entry.as_bytes())?;
                    }
                    None => self.write_bytes(b"0000000000 65535 f\r\n")?,
                }
            }
            start = end;
        }

        self.write_str("trailer\n")?;
        self.write_str(&format!(
            "<< /Size {} /Root {} {} R",
            size, trailer.root.0, trailer.root.1,
        ))?;
        if let Some(info) = trailer.info {
            self.write_str(&format!(" /Info {} {} R", info.0, info.1))?;
        }
        if let Some(prev) = trailer.prev {
            self.write_str(&format!(" /Prev {}", prev))?;
        }
        self.write_str(" >>\n")?;

        self.write_str("startxref\n")?;
        self.write_str(&format!("{}\n", xref_offset))?;
        self.write_str("%%EOF\n")?;

        Ok(())
    }

    /// Return the inner writer, consuming this PdfWriter.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Escape special characters in a PDF literal string.
pub fn escape_pdf_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '(' => result.push_str("\\("),
            ')' => result.push_str("\\)"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape already-encoded string bytes for a content stream.
///
/// Bytes outside printable ASCII become octal escapes, so the
/// resulting operand is plain ASCII whatever the font encoding.
pub fn escape_pdf_bytes(bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'\\' => result.push_str("\\\\"),
            b'(' => result.push_str("\\("),
            b')' => result.push_str("\\)"),
            0x20..=0x7e => result.push(b as char),
            _ => result.push_str(&format!("\\{:03o}", b)),
        }
    }
    result
}

/// Format a float for PDF output: no trailing zeros,
/// no scientific notation.
fn format_real(f: f64) -> String {
    if !f.is_finite() {
        return "0.0".to_string();
    }
    if f == f.floor() && f.abs() < 1e15 {
        format!("{:.1}", f)
    } else {
        let s = format!("{:.6}", f);
        let s = s.trim_end_matches('0');
        let s = s.trim_end_matches('.');
        s.to_string()
    }
}
