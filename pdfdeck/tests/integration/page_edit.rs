//! Editing the pages of one file.

use pdfdeck::config::{PageRange, PageRotation, Rotation};
use pdfdeck::io::{PdfReader, PdfWriter};
use pdfdeck::output::page_lines;
use pdfdeck::workflow::PageEditSession;

use crate::common::{fixture_dir, markers_on_disk, rotations_on_disk};

async fn open(pages: usize) -> (tempfile::TempDir, PageEditSession) {
    let (dir, paths) = fixture_dir(&[("doc.pdf", pages)]);
    let loaded = PdfReader::new().load(&paths[0]).await.unwrap();
    (dir, PageEditSession::open(loaded))
}

#[tokio::test]
async fn test_reorder_rotate_and_delete() {
    let (dir, mut session) = open(5).await;
    let output = dir.path().join("edited.pdf");

    session.order_by_numbers(&[5, 4, 3, 2, 1]).unwrap();
    session.select_range(&PageRange::parse("1-2").unwrap()).unwrap();
    session.rotate_selected(Rotation::Clockwise90);

    let third = session.page_id(3).unwrap();
    session.pages_mut().deselect_all();
    session.pages_mut().select(third).unwrap();
    assert_eq!(session.delete_selected(), 1);

    let doc = session.build().unwrap();
    PdfWriter::without_compression()
        .save(&doc, &output)
        .await
        .unwrap();

    assert_eq!(
        markers_on_disk(&output),
        vec!["doc-p5", "doc-p4", "doc-p2", "doc-p1"]
    );
    assert_eq!(rotations_on_disk(&output), vec![0, 0, 90, 90]);
}

#[tokio::test]
async fn test_extract_selected_pages() {
    let (dir, mut session) = open(6).await;
    let output = dir.path().join("extract.pdf");

    session
        .select_range(&PageRange::parse("2,4-5").unwrap())
        .unwrap();
    let fourth = session.page_id(4).unwrap();
    session.pages_mut().move_to_position(fourth, 0).unwrap();

    let doc = session.extract_selected().unwrap();
    PdfWriter::without_compression()
        .save(&doc, &output)
        .await
        .unwrap();

    assert_eq!(markers_on_disk(&output), vec!["doc-p4", "doc-p2", "doc-p5"]);
}

#[tokio::test]
async fn test_shift_selected_pages_and_list_them() {
    let (_dir, mut session) = open(4).await;

    session.select_range(&PageRange::parse("1").unwrap()).unwrap();
    let first = session.page_id(1).unwrap();
    session.rotate(first, Rotation::Rotate180).unwrap();
    assert!(session.pages_mut().move_selected_by_offset(2));

    assert_eq!(
        page_lines(session.pages()),
        vec![
            "    1. page 2",
            "    2. page 3",
            "*   3. page 1 rotated 180°",
            "    4. page 4",
        ]
    );

    // Rotating a full turn brings the page back to its stored orientation.
    session.rotate(first, Rotation::Rotate180).unwrap();
    assert_eq!(
        session.pages().get(first).map(|entry| entry.attr),
        Some(PageRotation::None)
    );
}
