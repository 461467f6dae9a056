//! Helpers shared by the integration tests.
//!
//! Fixtures are generated on the fly: every page draws a marker string
//! such as `"a-p2"` so tests can read back which page landed where.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Build a flat document with `pages` pages tagged `tag`.
pub fn build_pdf(pages: usize, tag: &str) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (1..=pages)
        .map(|n| {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(format!("{tag}-p{n}"))]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(
                Dictionary::new(),
                content.encode().expect("encode content"),
            ));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Write a generated PDF named `name` into `dir`.
pub fn write_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let tag = name.trim_end_matches(".pdf");
    let path = dir.join(name);
    build_pdf(pages, tag).save(&path).expect("write fixture");
    path
}

/// A temporary directory holding the given `(name, pages)` fixtures.
pub fn fixture_dir(files: &[(&str, usize)]) -> (TempDir, Vec<PathBuf>) {
    let dir = TempDir::new().expect("create temp dir");
    let paths = files
        .iter()
        .map(|&(name, pages)| write_pdf(dir.path(), name, pages))
        .collect();
    (dir, paths)
}

/// Marker of every page of `doc`, in page order.
pub fn page_markers(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .values()
        .map(|&id| {
            let content = doc.get_page_content(id).expect("page content");
            String::from_utf8_lossy(&content)
                .split(['(', ')'])
                .nth(1)
                .unwrap_or_default()
                .to_string()
        })
        .collect()
}

/// Markers of a PDF on disk.
pub fn markers_on_disk(path: &Path) -> Vec<String> {
    page_markers(&Document::load(path).expect("load output"))
}

/// Own `/Rotate` value of every page of a PDF on disk.
pub fn rotations_on_disk(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).expect("load output");
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
