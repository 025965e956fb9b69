use pdf_core::objects::{ObjId, PdfObject};
use pdf_core::writer::{escape_pdf_string, PdfWriter, Trailer};

#[test]
fn header_bytes() {
    let mut buf = Vec::new();
    let mut w = PdfWriter::new(&mut buf);
    w.write_header().unwrap();
    let output = String::from_utf8_lossy(&buf);
    assert!(output.starts_with("%PDF-1.7\n"));
    assert_eq!(buf[9], b'%');
    // Binary bytes >= 128.
    assert!(buf[10..14].iter().all(|&b| b >= 128));
}

#[test]
fn write_dictionary() {
    let mut buf = Vec::new();
    let mut w = PdfWriter::new(&mut buf);
    let obj = PdfObject::dict(vec![
        ("Type", PdfObject::name("Catalog")),
        ("Pages", PdfObject::reference(2, 0)),
    ]);
    w.write_object(ObjId(1, 0), &obj).unwrap();
    let output = String::from_utf8_lossy(&buf);
    assert!(output.contains("1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n"));
}

#[test]
fn write_stream() {
    let mut buf = Vec::new();
    let mut w = PdfWriter::new(&mut buf);
    let obj = PdfObject::stream(vec![], b"0 0 5 5 re S".to_vec());
    w.write_object(ObjId(4, 0), &obj).unwrap();
    let output = String::from_utf8_lossy(&buf);
    assert!(output.contains("<< /Length 12 >>\nstream\n0 0 5 5 re S\nendstream"));
}

#[test]
fn write_literal_string_escaped() {
    let mut buf = Vec::new();
    let mut w = PdfWriter::new(&mut buf);
    w.write_object(ObjId(1, 0), &PdfObject::literal_string("a(b)c\\d"))
        .unwrap();
    let output = String::from_utf8_lossy(&buf);
    assert!(output.contains("(a\\(b\\)c\\\\d)"));
}

#[test]
fn xref_entry_is_20_bytes() {
    let mut buf = Vec::new();
    let mut w = PdfWriter::new(&mut buf);
    w.write_header().unwrap();
    w.write_object(ObjId(1, 0), &PdfObject::name("Catalog")).unwrap();
    w.write_xref_and_trailer(&Trailer::new(ObjId(1, 0))).unwrap();

    let xref_marker = b"xref\n0 2\n";
    let xref_pos = buf
        .windows(xref_marker.len())
        .position(|w| w == xref_marker)
        .unwrap();
    let entries = &buf[xref_pos + xref_marker.len()..];
    assert_eq!(&entries[18..20], b"\r\n");
    assert_eq!(&entries[38..40], b"\r\n");
    assert_eq!(&entries[..20], b"0000000000 65535 f\r\n");
}

#[test]
fn trailer_has_required_keys() {
    let mut buf = Vec::new();
    let mut w = PdfWriter::new(&mut buf);
    w.write_header().unwrap();
    w.write_object(ObjId(1, 0), &PdfObject::name("Catalog")).unwrap();
    let info = PdfObject::dict(vec![("Creator", PdfObject::literal_string("test"))]);
    w.write_object(ObjId(2, 0), &info).unwrap();
    let trailer = Trailer {
        info: Some(ObjId(2, 0)),
        ..Trailer::new(ObjId(1, 0))
    };
    w.write_xref_and_trailer(&trailer).unwrap();

    let output = String::from_utf8_lossy(&buf);
    assert!(output.contains("<< /Size 3 /Root 1 0 R /Info 2 0 R >>"));
    assert!(output.contains("startxref"));
    assert!(!output.contains("/Prev"));
    assert!(output.ends_with("%%EOF\n"));
}

#[test]
fn escape_special_chars() {
    assert_eq!(escape_pdf_string("hello"), "hello");
    assert_eq!(escape_pdf_string("a(b)c"), "a\\(b\\)c");
    assert_eq!(escape_pdf_string("back\\slash"), "back\\\\slash");
}
