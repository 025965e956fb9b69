/// Object identifier: (object_number, generation_number).
/// Generation is always 0 for objects written by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjId(pub u32, pub u16);

/// Represents PDF object types per PDF 32000-1:2008 Section 7.3.
#[derive(Debug, Clone)]
pub enum PdfObject {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    /// PDF name object (stored without the leading `/`).
    Name(String),
    /// PDF literal string (stored without the enclosing parens).
    LiteralString(String),
    /// PDF hexadecimal string, stored as raw bytes.
    HexString(Vec<u8>),
    Array(Vec<PdfObject>),
    /// Key-value pairs. Uses Vec for deterministic output order.
    Dictionary(Vec<(String, PdfObject)>),
    Stream {
        dict: Vec<(String, PdfObject)>,
        data: Vec<u8>,
    },
    Reference(ObjId),
    /// Serialized value bytes taken from an existing file, written
    /// back unchanged.
    Raw(Vec<u8>),
}

impl PdfObject {
    pub fn name(s: &str) -> Self {
        PdfObject::Name(s.to_string())
    }

    pub fn literal_string(s: &str) -> Self {
        PdfObject::LiteralString(s.to_string())
    }

    /// A text string for document info and outline titles.
    ///
    /// Printable ASCII stays a literal string. Anything else is
    /// written as UTF-16BE with a byte order mark, which viewers
    /// decode regardless of the font in use.
    pub fn text_string(s: &str) -> Self {
        if s.bytes().all(|b| (0x20..0x7f).contains(&b)) {
            return PdfObject::literal_string(s);
        }
        let mut bytes = vec![0xfe, 0xff];
        for unit in s.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        PdfObject::HexString(bytes)
    }

    pub fn reference(obj_num: u32, gen: u16) -> Self {
        PdfObject::Reference(ObjId(obj_num, gen))
    }

    pub fn array(items: Vec<PdfObject>) -> Self {
        PdfObject::Array(items)
    }

    /// A `[x1 y1 x2 y2]` rectangle, e.g. for /MediaBox.
    pub fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        PdfObject::Array(vec![
            PdfObject::Real(x1),
            PdfObject::Real(y1),
            PdfObject::Real(x2),
            PdfObject::Real(y2),
        ])
    }

    pub fn dict(entries: Vec<(&str, PdfObject)>) -> Self {
        PdfObject::Dictionary(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    pub fn stream(
        dict_entries: Vec<(&str, PdfObject)>,
        data: Vec<u8>,
    ) -> Self {
        PdfObject::Stream {
            dict: dict_entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obj_ids_order_by_number() {
        let mut ids = vec![ObjId(7, 0), ObjId(2, 0), ObjId(5, 0)];
        ids.sort();
        assert_eq!(ids, vec![ObjId(2, 0), ObjId(5, 0), ObjId(7, 0)]);
    }

    #[test]
    fn ascii_text_string_is_literal() {
        match PdfObject::text_string("Chapter 1") {
            PdfObject::LiteralString(s) => assert_eq!(s, "Chapter 1"),
            other => panic!("expected LiteralString, got {:?}", other),
        }
    }

    #[test]
    fn non_ascii_text_string_is_utf16_hex() {
        match PdfObject::text_string("Résumé") {
            PdfObject::HexString(bytes) => {
                assert_eq!(&bytes[..2], &[0xfe, 0xff]);
                // 'R' then 'é' as UTF-16BE.
                assert_eq!(&bytes[2..6], &[0x00, b'R', 0x00, 0xe9]);
                assert_eq!(bytes.len(), 2 + 6 * 2);
            }
            other => panic!("expected HexString, got {:?}", other),
        }
    }

    #[test]
    fn control_chars_force_hex_string() {
        assert!(matches!(
            PdfObject::text_string("line\nbreak"),
            PdfObject::HexString(_)
        ));
    }

    #[test]
    fn rect_constructor() {
        match PdfObject::rect(0.0, 0.0, 612.0, 792.0) {
            PdfObject::Array(items) => {
                assert_eq!(items.len(), 4);
                assert!(matches!(items[2], PdfObject::Real(w) if w == 612.0));
            }
            other => panic!("expected Array, got {:?}", other),
        }
    }

    #[test]
    fn stream_constructor() {
        let data = b"0 0 10 10 re f".to_vec();
        let obj = PdfObject::stream(
            vec![("Filter", PdfObject::name("FlateDecode"))],
            data.clone(),
        );
        match obj {
            PdfObject::Stream { dict, data: d } => {
                assert_eq!(dict.len(), 1);
                assert_eq!(dict[0].0, "Filter");
                assert_eq!(d, data);
            }
            _ => panic!("expected Stream"),
        }
    }
}
