use crate::objects::{ObjId, PdfObject};

/// A top-level bookmark pointing at a page.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub title: String,
    pub page: ObjId,
}

/// Build the objects of a flat outline tree.
///
/// `root` is the id of the /Outlines dictionary and `item_ids`
/// holds one id per entry, in order. Returns `(id, object)` pairs
/// ready to be written, root first.
pub(crate) fn outline_objects(
    root: ObjId,
    entries: &[OutlineEntry],
    item_ids: &[ObjId],
) -> Vec<(ObjId, PdfObject)> {
    debug_assert_eq!(entries.len(), item_ids.len());
    let mut objects = Vec::with_capacity(entries.len() + 1);

    let mut root_entries = vec![("Type", PdfObject::name("Outlines"))];
    if let (Some(first), Some(last)) = (item_ids.first(), item_ids.last()) {
        root_entries.push(("First", PdfObject::Reference(*first)));
        root_entries.push(("Last", PdfObject::Reference(*last)));
    }
    root_entries.push(("Count", PdfObject::Integer(entries.len() as i64)));
    objects.push((root, PdfObject::dict(root_entries)));

    for (i, (entry, id)) in entries.iter().zip(item_ids).enumerate() {
        let mut item = vec![
            ("Title", PdfObject::text_string(&entry.title)),
            ("Parent", PdfObject::Reference(root)),
        ];
        if i > 0 {
            item.push(("Prev", PdfObject::Reference(item_ids[i - 1])));
        }
        if let Some(next) = item_ids.get(i + 1) {
            item.push(("Next", PdfObject::Reference(*next)));
        }
        item.push((
            "Dest",
            PdfObject::array(vec![
                PdfObject::Reference(entry.page),
                PdfObject::name("Fit"),
            ]),
        ));
        objects.push((*id, PdfObject::dict(item)));
    }

    objects
}
