//! Failures surfaced by the workflows and io layer.

use pdfdeck::PdfDeckError;
use pdfdeck::config::PageRange;
use pdfdeck::io::{PdfReader, PdfWriter, load_pdf};
use pdfdeck::workflow::{MergeSession, PageEditSession};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{build_pdf, fixture_dir};

#[tokio::test]
async fn test_missing_input() {
    let err = load_pdf(&PathBuf::from("/nonexistent/file.pdf"))
        .await
        .unwrap_err();

    assert!(matches!(err, PdfDeckError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_not_a_pdf() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.pdf");
    std::fs::write(&path, b"just some text").unwrap();

    let err = PdfReader::new().load(&path).await.unwrap_err();

    assert!(matches!(err, PdfDeckError::FailedToLoadPdf { .. }));
}

#[tokio::test]
async fn test_failed_add_leaves_session_unchanged() {
    let (_dir, paths) = fixture_dir(&[("a.pdf", 1)]);
    let mut session = MergeSession::new();
    session.add_files(&paths).await.unwrap();

    let before = session.files().snapshot();
    assert!(session.add_file(&PathBuf::from("missing.pdf")).await.is_err());

    assert_eq!(session.files().snapshot(), before);
}

#[tokio::test]
async fn test_merge_nothing() {
    let session = MergeSession::new();
    assert!(matches!(session.build(), Err(PdfDeckError::NoFilesToMerge)));
}

#[test]
fn test_page_range_past_end() {
    let mut session = PageEditSession::from_document(build_pdf(3, "r"));

    let err = session
        .select_range(&PageRange::parse("3-4").unwrap())
        .unwrap_err();

    assert!(matches!(err, PdfDeckError::InvalidPageRange { .. }));
}

#[tokio::test]
async fn test_write_into_missing_directory() {
    let writer = PdfWriter::new();
    let target = PathBuf::from("/nonexistent/dir/out.pdf");

    assert!(writer.can_write(&target).await.is_err());
    assert!(matches!(
        writer.save(&build_pdf(1, "w"), &target).await,
        Err(PdfDeckError::FailedToCreateOutput { .. })
    ));
}
