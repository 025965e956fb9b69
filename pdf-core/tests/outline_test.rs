use pdf_core::{PdfDocument, PdfReader};

#[test]
fn outline_tree_is_linked_from_catalog() {
    let mut doc = PdfDocument::new(Vec::new()).unwrap();
    doc.begin_page(612.0, 792.0).unwrap();
    doc.add_outline("Chapter 1").unwrap();
    doc.begin_page(612.0, 792.0).unwrap();
    doc.add_outline("Chapter 2").unwrap();
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);

    // Pages are 3 and 5; outline root and items follow the content streams.
    assert!(output.contains("/Outlines 7 0 R"));
    assert!(output.contains("<< /Type /Outlines /First 8 0 R /Last 9 0 R /Count 2 >>"));
    assert!(output.contains("/Title (Chapter 1) /Parent 7 0 R /Next 9 0 R /Dest [3 0 R /Fit]"));
    assert!(output.contains("/Title (Chapter 2) /Parent 7 0 R /Prev 8 0 R /Dest [5 0 R /Fit]"));

    let reader = PdfReader::from_bytes(bytes).unwrap();
    assert_eq!(reader.outline_count().unwrap(), 2);
}

#[test]
fn no_outline_without_entries() {
    let mut doc = PdfDocument::new(Vec::new()).unwrap();
    doc.begin_page(612.0, 792.0).unwrap();
    let output = String::from_utf8_lossy(&doc.end_document().unwrap()).into_owned();
    assert!(!output.contains("/Outlines"));
}

#[test]
fn outline_needs_open_page() {
    let mut doc = PdfDocument::new(Vec::new()).unwrap();
    assert!(doc.add_outline("Orphan").is_err());
}

#[test]
fn outline_title_with_non_ascii_is_utf16() {
    let mut doc = PdfDocument::new(Vec::new()).unwrap();
    doc.begin_page(612.0, 792.0).unwrap();
    doc.add_outline("Übersicht").unwrap();
    let output = String::from_utf8_lossy(&doc.end_document().unwrap()).into_owned();
    assert!(output.contains("/Title <FEFF00DC"));
}

#[test]
fn outlines_added_while_appending_rewrite_catalog() {
    let mut base = PdfDocument::new(Vec::new()).unwrap();
    base.begin_page(612.0, 792.0).unwrap();
    let base = base.end_document().unwrap();
    let base_len = base.len();

    let mut doc = PdfDocument::append(Vec::new(), base).unwrap();
    doc.begin_page(612.0, 792.0).unwrap();
    doc.add_outline("Appendix").unwrap();
    let updated = doc.end_document().unwrap();

    let tail = String::from_utf8_lossy(&updated[base_len..]).into_owned();
    assert!(tail.contains("1 0 obj\n<< /Type /Catalog /Pages 2 0 R /Outlines"));
    let reader = PdfReader::from_bytes(updated).unwrap();
    assert_eq!(reader.outline_count().unwrap(), 1);
    assert_eq!(reader.page_count(), 2);
}
