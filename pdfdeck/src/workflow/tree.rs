//! Page tree rewriting shared by the workflows.
//!
//! Arranged documents are written with a flat page tree: one `/Pages`
//! node whose `/Kids` are the pages in display order. Attributes a page
//! used to inherit from intermediate nodes are copied onto the page first,
//! so flattening never changes how a page looks.

use lopdf::{Document, Object, ObjectId};

use crate::error::{PdfDeckError, Result};

/// Page attributes that PDF readers resolve through `/Parent`.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against `/Parent` cycles in malformed files.
const MAX_TREE_DEPTH: usize = 64;

/// Object id of the root `/Pages` node.
pub(crate) fn pages_root(doc: &Document) -> Result<ObjectId> {
    doc.catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| PdfDeckError::page_tree_failed(format!("Failed to get pages reference: {e}")))
}

fn inherited_attributes(doc: &Document, page_id: ObjectId) -> Result<Vec<(Vec<u8>, Object)>> {
    let page = doc
        .get_dictionary(page_id)
        .map_err(|e| PdfDeckError::page_tree_failed(format!("Failed to get page: {e}")))?;

    let mut missing: Vec<&[u8]> = INHERITABLE
        .into_iter()
        .filter(|key| !page.has(key))
        .collect();
    let mut found = Vec::new();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    for _ in 0..MAX_TREE_DEPTH {
        let Some(node) = parent.and_then(|id| doc.get_dictionary(id).ok()) else {
            break;
        };
        if missing.is_empty() {
            break;
        }

        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                found.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    Ok(found)
}

/// Make `page_ids` the complete, ordered page list of `doc`.
///
/// Pages not listed are detached from the tree; callers prune them
/// afterwards.
pub(crate) fn rebuild_page_tree(doc: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
    let root_id = pages_root(doc)?;

    let resolved = page_ids
        .iter()
        .map(|&id| inherited_attributes(doc, id).map(|attrs| (id, attrs)))
        .collect::<Result<Vec<_>>>()?;

    for (page_id, attrs) in resolved {
        let page = doc
            .get_dictionary_mut(page_id)
            .map_err(|e| PdfDeckError::page_tree_failed(format!("Failed to get page: {e}")))?;
        for (key, value) in attrs {
            page.set(key, value);
        }
        page.set("Parent", Object::Reference(root_id));
    }

    let root = doc.get_dictionary_mut(root_id).map_err(|e| {
        PdfDeckError::page_tree_failed(format!("Pages object is not a dictionary: {e}"))
    })?;

    // Every page now carries its own copy; pages merged in from other
    // documents must not pick up this root's values.
    for key in INHERITABLE {
        root.remove(key);
    }
    root.set(
        "Kids",
        Object::Array(page_ids.iter().map(|&id| Object::Reference(id)).collect()),
    );
    root.set("Count", Object::Integer(page_ids.len() as i64));

    Ok(())
}

/// Add `degrees` to the page's own `/Rotate`.
pub(crate) fn rotate_page(doc: &mut Document, page_id: ObjectId, degrees: i64) -> Result<()> {
    if degrees.rem_euclid(360) == 0 {
        return Ok(());
    }

    let page = doc
        .get_dictionary_mut(page_id)
        .map_err(|e| PdfDeckError::page_tree_failed(format!("Failed to get page: {e}")))?;

    let current = page.get(b"Rotate").and_then(Object::as_i64).unwrap_or(0);
    page.set("Rotate", Object::Integer((current + degrees).rem_euclid(360)));

    Ok(())
}
