//! In-memory PDF fixtures for unit tests.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

/// Marker text drawn on page `n` of a fixture tagged `tag`.
pub fn page_marker(tag: &str, n: usize) -> String {
    format!("{tag}-p{n}")
}

fn add_page(doc: &mut Document, parent: ObjectId, tag: &str, n: usize) -> ObjectId {
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(page_marker(tag, n))]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        Dictionary::new(),
        content.encode().unwrap_or_default(),
    ));

    doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => parent,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Contents" => content_id,
    })
}

fn finish(mut doc: Document, pages_id: ObjectId, kids: Vec<ObjectId>, count: usize) -> Document {
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids.into_iter().map(Object::Reference).collect::<Vec<_>>(),
            "Count" => count as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// A flat document with `pages` pages, each carrying its marker text.
pub fn pdf_document(pages: usize, tag: &str) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let kids = (1..=pages)
        .map(|n| add_page(&mut doc, pages_id, tag, n))
        .collect();
    finish(doc, pages_id, kids, pages)
}

/// A three-page document whose first two pages sit under an intermediate
/// `/Pages` node that supplies an inherited `/Rotate 90`.
pub fn nested_pdf_document(tag: &str) -> Document {
    let mut doc = Document::with_version("1.5");
    let root_id = doc.new_object_id();
    let branch_id = doc.new_object_id();

    let first = add_page(&mut doc, branch_id, tag, 1);
    let second = add_page(&mut doc, branch_id, tag, 2);
    let third = add_page(&mut doc, root_id, tag, 3);

    doc.objects.insert(
        branch_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Parent" => root_id,
            "Kids" => vec![Object::Reference(first), Object::Reference(second)],
            "Count" => 2,
            "Rotate" => 90,
        }),
    );

    finish(doc, root_id, vec![branch_id, third], 3)
}

/// Serialised form of [`pdf_document`].
pub fn pdf_bytes(pages: usize, tag: &str) -> Vec<u8> {
    let mut doc = pdf_document(pages, tag);
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap_or_default();
    buffer
}

/// Marker text of every page of `doc`, in page order.
pub fn page_markers(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .values()
        .map(|&id| {
            let content = doc.get_page_content(id).unwrap_or_default();
            let text = String::from_utf8_lossy(&content);
            text.split(['(', ')'])
                .nth(1)
                .unwrap_or_default()
                .to_string()
        })
        .collect()
}

/// Effective `/Rotate` of every page of `doc` (own value only).
pub fn page_rotations(doc: &Document) -> Vec<i64> {
    doc.get_pages()
        .values()
        .map(|&id| {
            doc.get_dictionary(id)
                .and_then(|page| page.get(b"Rotate"))
                .and_then(Object::as_i64)
                .unwrap_or(0)
        })
        .collect()
}
