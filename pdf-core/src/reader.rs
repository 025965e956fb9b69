use std::collections::{HashMap, HashSet};
use std::io;
use std::path::Path;

use thiserror::Error;

// ── Error type ────────────────────────────────────────────────────────────────

/// Errors that can occur when reading a PDF file.
#[derive(Debug, Error, PartialEq)]
pub enum PdfReadError {
    /// The bytes do not start with a valid `%PDF-` header.
    #[error("not a PDF file")]
    NotAPdf,
    /// The `startxref` keyword or its offset could not be found.
    #[error("startxref not found")]
    StartxrefNotFound,
    /// The cross-reference table is missing or could not be parsed.
    #[error("malformed or missing xref table")]
    MalformedXref,
    /// The trailer dictionary is missing or malformed.
    #[error("malformed or missing trailer")]
    MalformedTrailer,
    /// The PDF uses a cross-reference stream (PDF 1.5+).
    #[error("cross-reference streams (PDF 1.5+) are not supported")]
    XrefStreamNotSupported,
    /// An object reference could not be resolved (offset out of range or malformed).
    #[error("cannot resolve object {0}")]
    UnresolvableObject(u32),
    /// The page tree structure is invalid (missing /Count or /Pages).
    #[error("malformed page tree")]
    MalformedPageTree,
    /// An I/O error occurred while opening a file.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<io::Error> for PdfReadError {
    fn from(e: io::Error) -> Self {
        PdfReadError::Io(e.to_string())
    }
}

// ── Public API ─────────────────────────────────────────────────────────────────

/// Reads the document structure of an existing PDF file.
///
/// Only what is needed to extend a document is resolved: the merged
/// cross-reference map (following `/Prev` through earlier revisions),
/// the trailer, and the root of the page tree. The raw bytes are kept
/// so an incremental update can copy them unchanged.
///
/// # Limitations
/// PDF 1.5+ cross-reference streams are not supported. Files that use them
/// return `PdfReadError::XrefStreamNotSupported`.
pub struct PdfReader {
    data: Vec<u8>,
    /// Maps each object number to its byte offset in `data`.
    xref: HashMap<u32, usize>,
    version: String,
    startxref: usize,
    size: u32,
    root: u32,
    info: Option<u32>,
    pages_root: u32,
    page_count: usize,
    kids: Vec<u32>,
    inherited: Vec<(String, Vec<u8>)>,
}

/// Highest object number a conforming file may use.
const MAX_OBJ_NUM: u32 = 8_388_607;

/// Page attributes a /Pages node passes down to its kids.
const INHERITABLE_PAGE_KEYS: [&str; 4] = ["Resources", "MediaBox", "CropBox", "Rotate"];

impl PdfReader {
    /// Open a PDF from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PdfReadError> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(data)
    }

    /// Parse a PDF from raw bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, PdfReadError> {
        let version = parse_version(&data)?;
        let startxref = find_startxref(&data)?;
        let (xref, trailer) = parse_xref_chain(&data, startxref)?;

        let catalog = resolve_dict(&data, &xref, trailer.root)?;
        let pages_root = catalog
            .get("Pages")
            .and_then(RawValue::as_obj_num)
            .ok_or(PdfReadError::MalformedPageTree)?;
        let pages_entries = resolve_entries(&data, &xref, pages_root)?;
        let inherited = pages_entries
            .iter()
            .filter(|(key, _, _)| INHERITABLE_PAGE_KEYS.contains(&key.as_str()))
            .map(|(key, _, raw)| (key.clone(), raw.to_vec()))
            .collect();
        let pages: HashMap<String, RawValue> = pages_entries
            .into_iter()
            .map(|(key, value, _)| (key, value))
            .collect();
        let page_count = pages
            .get("Count")
            .and_then(RawValue::as_token)
            .and_then(|t| t.parse::<usize>().ok())
            .ok_or(PdfReadError::MalformedPageTree)?;
        let kids = match pages.get("Kids") {
            Some(RawValue::Array(items)) => array_refs(items),
            _ => return Err(PdfReadError::MalformedPageTree),
        };

        // /Size may be understated by broken writers; never hand out
        // a number that already has an xref entry. Entries are capped
        // at MAX_OBJ_NUM, so the sum cannot overflow.
        let max_obj = xref.keys().copied().max().unwrap_or(0);
        let size = trailer.size.max(max_obj + 1);

        Ok(PdfReader {
            data,
            xref,
            version,
            startxref,
            size,
            root: trailer.root,
            info: trailer.info,
            pages_root,
            page_count,
            kids,
            inherited,
        })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// PDF version string (e.g. `"1.7"`).
    pub fn pdf_version(&self) -> &str {
        &self.version
    }

    /// Byte offset of the newest xref section.
    pub fn startxref(&self) -> usize {
        self.startxref
    }

    /// One past the highest object number in use.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Object number of the document catalog.
    pub fn root(&self) -> u32 {
        self.root
    }

    /// Object number of the document info dictionary, if any.
    pub fn info(&self) -> Option<u32> {
        self.info
    }

    /// Object number of the root /Pages node.
    pub fn pages_root(&self) -> u32 {
        self.pages_root
    }

    /// Direct children of the root /Pages node, in order.
    pub fn page_tree_kids(&self) -> &[u32] {
        &self.kids
    }

    /// Inheritable entries (`/Resources`, `/MediaBox`, `/CropBox`,
    /// `/Rotate`) of the root /Pages node, as raw value bytes in the
    /// order they appear.
    pub fn inherited_page_attributes(&self) -> &[(String, Vec<u8>)] {
        &self.inherited
    }

    /// Number of top-level items in the document outline.
    /// Zero when the catalog has no /Outlines entry.
    pub fn outline_count(&self) -> Result<usize, PdfReadError> {
        let catalog = resolve_dict(&self.data, &self.xref, self.root)?;
        let Some(outlines) = catalog.get("Outlines").and_then(RawValue::as_obj_num) else {
            return Ok(0);
        };
        let dict = resolve_dict(&self.data, &self.xref, outlines)?;
        Ok(dict
            .get("Count")
            .and_then(RawValue::as_token)
            .and_then(|t| t.parse::<i64>().ok())
            .map(|n| n.unsigned_abs() as usize)
            .unwrap_or(0))
    }

    /// A string entry of the document info dictionary (e.g. "Title").
    pub fn info_value(&self, key: &str) -> Result<Option<String>, PdfReadError> {
        let Some(info) = self.info else {
            return Ok(None);
        };
        let dict = resolve_dict(&self.data, &self.xref, info)?;
        Ok(match dict.get(key) {
            Some(RawValue::Bytes(bytes)) => Some(decode_text_string(bytes)),
            _ => None,
        })
    }

    /// The raw file bytes, consuming the reader.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

// ── Internal parsing ───────────────────────────────────────────────────────────

/// A dictionary value as far as this reader cares about it.
#[derive(Debug, Clone, PartialEq)]
enum RawValue {
    /// A bare token: number, name (with its `/`), keyword.
    Token(String),
    /// An indirect reference `N G R`; only N is kept.
    Ref(u32),
    /// Whitespace-separated tokens of a flat array.
    Array(Vec<String>),
    /// Decoded bytes of a literal or hex string.
    Bytes(Vec<u8>),
    /// A nested dictionary, skipped.
    Dict,
}

impl RawValue {
    fn as_obj_num(&self) -> Option<u32> {
        match self {
            RawValue::Ref(n) => Some(*n),
            _ => None,
        }
    }

    fn as_token(&self) -> Option<&str> {
        match self {
            RawValue::Token(t) => Some(t),
            _ => None,
        }
    }
}

struct TrailerInfo {
    size: u32,
    root: u32,
    info: Option<u32>,
}

/// Extract the PDF version from the `%PDF-x.y` header.
fn parse_version(data: &[u8]) -> Result<String, PdfReadError> {
    if data.len() < 8 || !data.starts_with(b"%PDF-") {
        return Err(PdfReadError::NotAPdf);
    }
    let rest = &data[5..];
    let end = rest
        .iter()
        .position(|&b| b == b'\n' || b == b'\r' || b == b' ')
        .unwrap_or(rest.len());
    std::str::from_utf8(&rest[..end])
        .map(|s| s.to_string())
        .map_err(|_| PdfReadError::NotAPdf)
}

/// Scan backward from the end of the file to find the `startxref` offset.
///
/// The offset sits within the last 1024 bytes, after which only
/// `%%EOF` and whitespace or comments may follow.
fn find_startxref(data: &[u8]) -> Result<usize, PdfReadError> {
    let search_start = data.len().saturating_sub(1024);
    let tail = &data[search_start..];

    let keyword = b"startxref";
    let pos = tail
        .windows(keyword.len())
        .rposition(|w| w == keyword)
        .ok_or(PdfReadError::StartxrefNotFound)?;

    let after = &tail[pos + keyword.len()..];
    let (offset_str, _) = next_token(after).ok_or(PdfReadError::StartxrefNotFound)?;
    let offset: usize = offset_str
        .parse()
        .map_err(|_| PdfReadError::StartxrefNotFound)?;

    if offset >= data.len() {
        return Err(PdfReadError::StartxrefNotFound);
    }
    Ok(offset)
}

/// Walk the xref sections from the newest one back through `/Prev`.
///
/// The first offset seen for an object number wins, so objects
/// rewritten by an incremental update resolve to their newest body.
/// The trailer values come from the newest section.
fn parse_xref_chain(
    data: &[u8],
    startxref: usize,
) -> Result<(HashMap<u32, usize>, TrailerInfo), PdfReadError> {
    let mut xref = HashMap::new();
    let mut newest: Option<TrailerInfo> = None;
    let mut visited = HashSet::new();
    let mut next = Some(startxref);

    while let Some(offset) = next {
        if offset >= data.len() || !visited.insert(offset) {
            return Err(PdfReadError::MalformedXref);
        }
        let section = &data[offset..];
        if !skip_ascii_whitespace(section).starts_with(b"xref") {
            return Err(PdfReadError::XrefStreamNotSupported);
        }
        for (num, off) in parse_xref_table(section)? {
            xref.entry(num).or_insert(off);
        }

        let trailer = parse_trailer_dict(section)?;
        next = match trailer.get("Prev").and_then(RawValue::as_token) {
            Some(t) => Some(t.parse().map_err(|_| PdfReadError::MalformedTrailer)?),
            None => None,
        };
        if newest.is_none() {
            let root = trailer
                .get("Root")
                .and_then(RawValue::as_obj_num)
                .ok_or(PdfReadError::MalformedTrailer)?;
            let size = trailer
                .get("Size")
                .and_then(RawValue::as_token)
                .and_then(|t| t.parse().ok())
                .filter(|&size: &u32| size <= MAX_OBJ_NUM + 1)
                .ok_or(PdfReadError::MalformedTrailer)?;
            let info = trailer.get("Info").and_then(RawValue::as_obj_num);
            newest = Some(TrailerInfo { size, root, info });
        }
    }

    let trailer = newest.ok_or(PdfReadError::MalformedTrailer)?;
    Ok((xref, trailer))
}

/// Parse one traditional xref table.
///
/// Each subsection has a header line `{first_obj} {count}` followed by
/// 20-byte fixed-width entries: `{offset:010} {gen:05} {n|f}\r\n`.
fn parse_xref_table(section: &[u8]) -> Result<Vec<(u32, usize)>, PdfReadError> {
    let mut entries = Vec::new();
    let mut cursor = consume_token(section, b"xref")?;

    loop {
        let trimmed = skip_ascii_whitespace(cursor);
        if trimmed.is_empty() || trimmed.starts_with(b"trailer") {
            break;
        }

        let (first_str, after_first) = next_token(trimmed).ok_or(PdfReadError::MalformedXref)?;
        let first_obj: u32 = first_str.parse().map_err(|_| PdfReadError::MalformedXref)?;
        let (count_str, after_count) =
            next_token(after_first).ok_or(PdfReadError::MalformedXref)?;
        let count: usize = count_str.parse().map_err(|_| PdfReadError::MalformedXref)?;

        let entry_size = 20;
        let body = skip_line(after_count);
        let table_len = count
            .checked_mul(entry_size)
            .filter(|&len| len <= body.len())
            .ok_or(PdfReadError::MalformedXref)?;

        for (i, entry) in body[..table_len].chunks_exact(entry_size).enumerate() {
            // Byte 17 is 'n' for in-use entries, 'f' for free ones.
            if entry[17] != b'n' {
                continue;
            }
            let offset: usize = std::str::from_utf8(&entry[..10])
                .ok()
                .and_then(|s| s.parse().ok())
                .ok_or(PdfReadError::MalformedXref)?;
            let obj_num = u32::try_from(i)
                .ok()
                .and_then(|i| first_obj.checked_add(i))
                .filter(|&num| num <= MAX_OBJ_NUM)
                .ok_or(PdfReadError::MalformedXref)?;
            if obj_num > 0 {
                entries.push((obj_num, offset));
            }
        }

        cursor = &body[table_len..];
    }

    Ok(entries)
}

/// Parse the trailer dictionary following an xref table.
fn parse_trailer_dict(section: &[u8]) -> Result<HashMap<String, RawValue>, PdfReadError> {
    let pos = section
        .windows(7)
        .position(|w| w == b"trailer")
        .ok_or(PdfReadError::MalformedTrailer)?;
    parse_dict_bytes(&section[pos + 7..]).ok_or(PdfReadError::MalformedTrailer)
}

/// Resolve an indirect object by number and parse its body as a dictionary.
fn resolve_dict(
    data: &[u8],
    xref: &HashMap<u32, usize>,
    obj_num: u32,
) -> Result<HashMap<String, RawValue>, PdfReadError> {
    Ok(resolve_entries(data, xref, obj_num)?
        .into_iter()
        .map(|(key, value, _)| (key, value))
        .collect())
}

/// Like `resolve_dict`, keeping each value's source bytes.
fn resolve_entries<'a>(
    data: &'a [u8],
    xref: &HashMap<u32, usize>,
    obj_num: u32,
) -> Result<Vec<DictEntry<'a>>, PdfReadError> {
    let offset = xref
        .get(&obj_num)
        .copied()
        .filter(|&off| off < data.len())
        .ok_or(PdfReadError::UnresolvableObject(obj_num))?;

    skip_obj_header(&data[offset..])
        .and_then(dict_entries)
        .ok_or(PdfReadError::UnresolvableObject(obj_num))
}

/// Parse `<<...>>` dictionary bytes into a `key → value` map.
fn parse_dict_bytes(data: &[u8]) -> Option<HashMap<String, RawValue>> {
    Some(
        dict_entries(data)?
            .into_iter()
            .map(|(key, value, _)| (key, value))
            .collect(),
    )
}

/// Key, classified value and the value's raw bytes.
type DictEntry<'a> = (String, RawValue, &'a [u8]);

/// Split `<<...>>` dictionary bytes into entries, in source order.
fn dict_entries(data: &[u8]) -> Option<Vec<DictEntry<'_>>> {
    let data = skip_ascii_whitespace(data);
    if !data.starts_with(b"<<") {
        return None;
    }

    let mut entries = Vec::new();
    let mut cursor = &data[2..];

    loop {
        cursor = skip_ascii_whitespace(cursor);
        if cursor.is_empty() {
            return None;
        }
        if cursor.starts_with(b">>") {
            break;
        }

        if !cursor.starts_with(b"/") {
            let (_, rest) = next_token(cursor)?;
            cursor = rest;
            continue;
        }

        let (key, after_key) = next_token(&cursor[1..])?;
        let key = key.to_string();
        let start = skip_ascii_whitespace(after_key);
        cursor = start;

        let value = if cursor.starts_with(b"<<") {
            cursor = skip_nested_dict(cursor)?;
            RawValue::Dict
        } else if cursor.starts_with(b"<") {
            let (bytes, rest) = read_hex_string(cursor)?;
            cursor = rest;
            RawValue::Bytes(bytes)
        } else if cursor.starts_with(b"[") {
            let (items, rest) = read_array(cursor)?;
            cursor = rest;
            RawValue::Array(items)
        } else if cursor.starts_with(b"(") {
            let (bytes, rest) = read_literal_string(cursor)?;
            cursor = rest;
            RawValue::Bytes(bytes)
        } else {
            let (val, rest) = next_token(cursor)?;
            cursor = rest;
            match read_reference(val, rest) {
                Some((num, after_r)) => {
                    cursor = after_r;
                    RawValue::Ref(num)
                }
                None => RawValue::Token(val.to_string()),
            }
        };
        let raw = &start[..start.len() - cursor.len()];
        entries.push((key, value, raw));
    }

    Some(entries)
}

/// `N G R` following the token `num`: the object number and the
/// bytes after `R`.
fn read_reference<'a>(num: &str, rest: &'a [u8]) -> Option<(u32, &'a [u8])> {
    let (gen_str, after_gen) = next_token(rest)?;
    let (r, after_r) = next_token(after_gen)?;
    if r != "R" || !gen_str.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((num.parse().ok()?, after_r))
}

/// Collect the `N G R` triples of an array as object numbers.
fn array_refs(items: &[String]) -> Vec<u32> {
    items
        .windows(3)
        .filter(|w| w[2] == "R")
        .filter_map(|w| {
            let num = w[0].parse::<u32>().ok()?;
            w[1].parse::<u16>().ok()?;
            Some(num)
        })
        .collect()
}

/// Decode a PDF text string: UTF-16BE with BOM, else Latin-1.
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xfe, 0xff]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&b| b as char).collect()
}

// ── Token / byte utilities ─────────────────────────────────────────────────────

/// Skip over a `<<...>>` block (with nested dicts), returning bytes after `>>`.
fn skip_nested_dict(data: &[u8]) -> Option<&[u8]> {
    let mut depth = 0usize;
    let mut i = 0;
    while i < data.len() {
        if data[i..].starts_with(b"<<") {
            depth += 1;
            i += 2;
        } else if data[i..].starts_with(b">>") {
            depth -= 1;
            i += 2;
            if depth == 0 {
                return Some(&data[i..]);
            }
        } else {
            i += 1;
        }
    }
    None
}

/// Read a flat `[...]` array into its tokens, returning bytes after `]`.
fn read_array(data: &[u8]) -> Option<(Vec<String>, &[u8])> {
    let end = data.iter().position(|&b| b == b']')?;
    let inner = std::str::from_utf8(&data[1..end]).ok()?;
    let items = inner.split_ascii_whitespace().map(str::to_string).collect();
    Some((items, &data[end + 1..]))
}

/// Read a `<...>` hex string, returning its bytes and the bytes after `>`.
fn read_hex_string(data: &[u8]) -> Option<(Vec<u8>, &[u8])> {
    let end = data.iter().position(|&b| b == b'>')?;
    let digits: Vec<u8> = data[1..end]
        .iter()
        .filter(|b| !b.is_ascii_whitespace())
        .map(|&b| (b as char).to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()?;
    // An odd final digit is padded with 0.
    let bytes = digits
        .chunks(2)
        .map(|pair| (pair[0] << 4) | pair.get(1).copied().unwrap_or(0))
        .collect();
    Some((bytes, &data[end + 1..]))
}

/// Read a `(...)` literal string, resolving escapes. Returns the
/// decoded bytes and the bytes after the closing `)`.
fn read_literal_string(data: &[u8]) -> Option<(Vec<u8>, &[u8])> {
    let mut out = Vec::new();
    let mut depth = 1i32;
    let mut i = 1;
    while i < data.len() {
        match data[i] {
            b'\\' => {
                let next = *data.get(i + 1)?;
                i += 2;
                match next {
                    b'n' => out.push(b'\n'),
                    b'r' => out.push(b'\r'),
                    b't' => out.push(b'\t'),
                    b'b' => out.push(0x08),
                    b'f' => out.push(0x0c),
                    b'0'..=b'7' => {
                        let mut value = u32::from(next - b'0');
                        let mut digits = 1;
                        while digits < 3 {
                            match data.get(i) {
                                Some(&d @ b'0'..=b'7') => {
                                    value = value * 8 + u32::from(d - b'0');
                                    i += 1;
                                    digits += 1;
                                }
                                _ => break,
                            }
                        }
                        out.push((value & 0xff) as u8);
                    }
                    // Line continuation.
                    b'\n' => {}
                    b'\r' => {
                        if data.get(i) == Some(&b'\n') {
                            i += 1;
                        }
                    }
                    other => out.push(other),
                }
            }
            b'(' => {
                depth += 1;
                out.push(b'(');
                i += 1;
            }
            b')' => {
                depth -= 1;
                i += 1;
                if depth == 0 {
                    return Some((out, &data[i..]));
                }
                out.push(b')');
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    None
}

/// Skip "N G obj" indirect object header, returning bytes after "obj".
fn skip_obj_header(data: &[u8]) -> Option<&[u8]> {
    let (_, rest) = next_token(data)?;
    let (_, rest) = next_token(rest)?;
    let (keyword, rest) = next_token(rest)?;
    if keyword != "obj" {
        return None;
    }
    Some(rest)
}

/// Return a sub-slice starting at the first non-whitespace byte.
fn skip_ascii_whitespace(data: &[u8]) -> &[u8] {
    let pos = data
        .iter()
        .position(|&b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    &data[pos..]
}

/// Skip to the end of the current line (past `\n` or `\r\n`).
fn skip_line(data: &[u8]) -> &[u8] {
    match data.iter().position(|&b| b == b'\n') {
        Some(pos) => &data[pos + 1..],
        None => &data[data.len()..],
    }
}

/// Consume a literal byte sequence at the start of `data`, returning the remainder.
fn consume_token<'a>(data: &'a [u8], token: &[u8]) -> Result<&'a [u8], PdfReadError> {
    let trimmed = skip_ascii_whitespace(data);
    if trimmed.starts_with(token) {
        Ok(&trimmed[token.len()..])
    } else {
        Err(PdfReadError::MalformedXref)
    }
}

/// Read the next whitespace-delimited token from `data`.
/// Returns `(token_str, remaining_bytes)` or `None` if at end.
fn next_token(data: &[u8]) -> Option<(&str, &[u8])> {
    let data = skip_ascii_whitespace(data);
    if data.is_empty() {
        return None;
    }
    let end = data
        .iter()
        .position(|&b| b.is_ascii_whitespace() || matches!(b, b'<' | b'>' | b'[' | b'(' | b'/'))
        .unwrap_or(data.len());
    // A delimiter in first position is a token of its own, except a
    // name's leading slash which stays attached to the name.
    let end = match (end, data[0]) {
        (0, b'/') => {
            1 + data[1..]
                .iter()
                .position(|&b| {
                    b.is_ascii_whitespace() || matches!(b, b'<' | b'>' | b'[' | b'(' | b'/')
                })
                .unwrap_or(data.len() - 1)
        }
        (0, _) => 1,
        (end, _) => end,
    };
    let token = std::str::from_utf8(&data[..end]).ok()?;
    Some((token, &data[end..]))
}
