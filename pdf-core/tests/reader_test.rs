use pdf_core::{BuiltinFont, PdfDocument, PdfReadError, PdfReader, TextEncoding};

/// Helper: create a PDF with `n` blank pages and return the raw bytes.
fn make_pdf(n: usize) -> Vec<u8> {
    let mut doc = PdfDocument::new(Vec::new()).unwrap();
    for _ in 0..n {
        doc.begin_page(612.0, 792.0).unwrap();
        doc.end_page().unwrap();
    }
    doc.end_document().unwrap()
}

#[test]
fn reader_counts_pages() {
    for n in [0, 1, 3, 10] {
        let reader = PdfReader::from_bytes(make_pdf(n)).unwrap();
        assert_eq!(reader.page_count(), n);
        assert_eq!(reader.page_tree_kids().len(), n);
    }
}

#[test]
fn reader_structure_of_fresh_document() {
    let reader = PdfReader::from_bytes(make_pdf(2)).unwrap();
    assert_eq!(reader.pdf_version(), "1.7");
    assert_eq!(reader.root(), 1);
    assert_eq!(reader.pages_root(), 2);
    assert_eq!(reader.info(), None);
    // 1=Catalog, 2=Pages, two pages with one content stream each.
    assert_eq!(reader.size(), 7);
    assert_eq!(reader.outline_count().unwrap(), 0);
}

#[test]
fn reader_info_values() {
    let mut doc = PdfDocument::new(Vec::new()).unwrap();
    doc.set_info("Title", "Quarterly (Q3) report");
    doc.set_info("Author", "Zoë");
    let reader = PdfReader::from_bytes(doc.end_document().unwrap()).unwrap();
    assert_eq!(
        reader.info_value("Title").unwrap().as_deref(),
        Some("Quarterly (Q3) report")
    );
    assert_eq!(reader.info_value("Author").unwrap().as_deref(), Some("Zoë"));
    assert_eq!(reader.info_value("Subject").unwrap(), None);
}

#[test]
fn reader_outline_count() {
    let mut doc = PdfDocument::new(Vec::new()).unwrap();
    doc.begin_page(612.0, 792.0).unwrap();
    doc.add_outline("One").unwrap();
    doc.add_outline("Two").unwrap();
    doc.set_font(BuiltinFont::Helvetica, 9.0).unwrap();
    doc.draw_text("x", 1.0, 1.0, TextEncoding::WinAnsi).unwrap();
    let reader = PdfReader::from_bytes(doc.end_document().unwrap()).unwrap();
    assert_eq!(reader.outline_count().unwrap(), 2);
}

#[test]
fn reader_open_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("two_pages.pdf");
    std::fs::write(&path, make_pdf(2)).unwrap();

    let reader = PdfReader::open(&path).unwrap();
    assert_eq!(reader.page_count(), 2);
}

#[test]
fn reader_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = PdfReader::open(dir.path().join("absent.pdf"));
    assert!(matches!(result, Err(PdfReadError::Io(_))));
}

#[test]
fn reader_empty_bytes_returns_error() {
    let result = PdfReader::from_bytes(vec![]);
    assert!(matches!(result, Err(PdfReadError::NotAPdf)));
}

#[test]
fn reader_garbage_bytes_returns_error() {
    let result = PdfReader::from_bytes(b"this is not a pdf at all".to_vec());
    assert!(matches!(result, Err(PdfReadError::NotAPdf)));
}

#[test]
fn reader_truncated_pdf_returns_error() {
    let result = PdfReader::from_bytes(b"%PDF-1.7\n".to_vec());
    assert!(matches!(result, Err(PdfReadError::StartxrefNotFound)));
}

#[test]
fn reader_rejects_xref_streams() {
    let mut data = b"%PDF-1.5\n".to_vec();
    let offset = data.len();
    data.extend_from_slice(b"1 0 obj\n<< /Type /XRef /Size 2 >>\nstream\nendstream\nendobj\n");
    data.extend_from_slice(format!("startxref\n{}\n%%EOF\n", offset).as_bytes());
    let result = PdfReader::from_bytes(data);
    assert!(matches!(result, Err(PdfReadError::XrefStreamNotSupported)));
}

/// Helper: lay out `objects` as objects 1..=n followed by one classic
/// xref section. `trailer_extra` receives the xref offset and returns
/// extra trailer entries.
fn hand_built_pdf(objects: &[&str], trailer_extra: impl Fn(usize) -> String) -> Vec<u8> {
    let mut data = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(data.len());
        data.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }
    let xref_offset = data.len();
    data.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f\r\n", objects.len() + 1).as_bytes());
    for offset in offsets {
        data.extend_from_slice(format!("{:010} 00000 n\r\n", offset).as_bytes());
    }
    data.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R{} >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            trailer_extra(xref_offset),
            xref_offset
        )
        .as_bytes(),
    );
    data
}

/// Helper: a file whose only xref section is `section`.
fn pdf_with_xref(section: &str) -> Vec<u8> {
    let mut data = b"%PDF-1.4\n".to_vec();
    let offset = data.len();
    data.extend_from_slice(section.as_bytes());
    data.extend_from_slice(
        format!("trailer\n<< /Size 3 /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n", offset).as_bytes(),
    );
    data
}

#[test]
fn reader_keeps_inherited_page_tree_attributes() {
    let data = hand_built_pdf(
        &[
            "<< /Type /Catalog /Pages 2 0 R >>",
            "<< /Type /Pages /Kids [3 0 R] /Count 1 /MediaBox [0 0 300 300] /Resources << /ProcSet [/PDF] >> >>",
            "<< /Type /Page /Parent 2 0 R >>",
        ],
        |_| String::new(),
    );
    let reader = PdfReader::from_bytes(data).unwrap();
    assert_eq!(reader.page_count(), 1);
    assert_eq!(reader.page_tree_kids(), &[3]);
    assert_eq!(
        reader.inherited_page_attributes(),
        &[
            ("MediaBox".to_string(), b"[0 0 300 300]".to_vec()),
            ("Resources".to_string(), b"<< /ProcSet [/PDF] >>".to_vec()),
        ]
    );
}

#[test]
fn reader_own_documents_have_no_inherited_attributes() {
    let reader = PdfReader::from_bytes(make_pdf(2)).unwrap();
    assert!(reader.inherited_page_attributes().is_empty());
}

#[test]
fn reader_rejects_xref_subsection_past_object_limit() {
    let data = pdf_with_xref(
        "xref\n4294967295 2\n0000000009 00000 n\r\n0000000009 00000 n\r\n",
    );
    assert_eq!(
        PdfReader::from_bytes(data).err(),
        Some(PdfReadError::MalformedXref)
    );
}

#[test]
fn reader_rejects_xref_count_that_overflows() {
    let data = pdf_with_xref("xref\n0 18446744073709551615\n");
    assert_eq!(
        PdfReader::from_bytes(data).err(),
        Some(PdfReadError::MalformedXref)
    );
}

#[test]
fn reader_rejects_truncated_xref_table() {
    let data = pdf_with_xref(
        "xref\n0 50\n0000000000 65535 f\r\n0000000009 00000 n\r\n",
    );
    assert_eq!(
        PdfReader::from_bytes(data).err(),
        Some(PdfReadError::MalformedXref)
    );
}

#[test]
fn reader_rejects_prev_cycle() {
    let data = hand_built_pdf(
        &[
            "<< /Type /Catalog /Pages 2 0 R >>",
            "<< /Type /Pages /Kids [] /Count 0 >>",
        ],
        |xref_offset| format!(" /Prev {}", xref_offset),
    );
    assert_eq!(
        PdfReader::from_bytes(data).err(),
        Some(PdfReadError::MalformedXref)
    );
}

#[test]
fn reader_rejects_oversized_trailer_size() {
    let data = hand_built_pdf(&["<< /Type /Catalog /Pages 2 0 R >>"], |_| String::new());
    let text = String::from_utf8(data).unwrap().replace("/Size 2", "/Size 4294967295");
    assert_eq!(
        PdfReader::from_bytes(text.into_bytes()).err(),
        Some(PdfReadError::MalformedTrailer)
    );
}
