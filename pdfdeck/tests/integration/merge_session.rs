//! Merging files from disk.

use pdfdeck::io::{PdfReader, PdfWriter};
use pdfdeck::output::file_items;
use pdfdeck::utils::collect_paths_for_patterns;
use pdfdeck::workflow::MergeSession;

use crate::common::{fixture_dir, markers_on_disk};

#[tokio::test]
async fn test_merge_reordered_files_to_disk() {
    let (dir, paths) = fixture_dir(&[("a.pdf", 2), ("b.pdf", 1), ("c.pdf", 3)]);
    let output = dir.path().join("merged.pdf");

    let mut session = MergeSession::new();
    let ids = session.add_files(&paths).await.unwrap();
    assert_eq!(session.total_pages(), 6);

    session.order_by_positions(&[3, 1, 2]).unwrap();
    session.files_mut().move_by_offset(ids[1], -1).unwrap();

    let result = session.build().unwrap();
    let stats = PdfWriter::without_compression()
        .save_with_stats(&result.document, &output)
        .await
        .unwrap();

    assert_eq!(result.statistics.files_merged, 3);
    assert_eq!(
        result.merged_files,
        vec![paths[2].clone(), paths[1].clone(), paths[0].clone()]
    );
    assert!(stats.file_size > 0);
    assert_eq!(
        markers_on_disk(&output),
        vec!["c-p1", "c-p2", "c-p3", "b-p1", "a-p1", "a-p2"]
    );
}

#[tokio::test]
async fn test_remove_selected_before_merge() {
    let (dir, paths) = fixture_dir(&[("a.pdf", 1), ("b.pdf", 1), ("c.pdf", 1)]);
    let output = dir.path().join("out.pdf");

    let mut session = MergeSession::new();
    let ids = session.add_files(&paths).await.unwrap();
    session.files_mut().select(ids[0]).unwrap();
    session.files_mut().select(ids[2]).unwrap();

    let items = file_items(session.files());
    assert_eq!(items.iter().filter(|item| item.selected).count(), 2);

    assert_eq!(session.remove_selected(), 2);

    let result = session.build().unwrap();
    PdfWriter::without_compression()
        .save(&result.document, &output)
        .await
        .unwrap();

    assert_eq!(markers_on_disk(&output), vec!["b-p1"]);
}

#[tokio::test]
async fn test_compressed_output_reloads() {
    let (dir, paths) = fixture_dir(&[("a.pdf", 2), ("b.pdf", 2)]);
    let output = dir.path().join("compressed.pdf");

    let mut session = MergeSession::new();
    session.add_files(&paths).await.unwrap();
    let result = session.build().unwrap();

    let stats = PdfWriter::new()
        .save_with_stats(&result.document, &output)
        .await
        .unwrap();
    assert!(stats.compressed);

    let reloaded = PdfReader::new().load(&output).await.unwrap();
    assert_eq!(reloaded.page_count, 4);
}

#[tokio::test]
async fn test_glob_inputs_merge_in_sorted_order() {
    let (dir, _) = fixture_dir(&[("02.pdf", 1), ("01.pdf", 1), ("03.pdf", 1)]);
    let pattern = dir.path().join("*.pdf").display().to_string();

    let inputs = collect_paths_for_patterns([pattern]).unwrap();
    let mut session = MergeSession::new();
    session.add_files(&inputs).await.unwrap();

    let output = dir.path().join("all.out");
    let result = session.build().unwrap();
    PdfWriter::without_compression()
        .save(&result.document, &output)
        .await
        .unwrap();

    assert_eq!(markers_on_disk(&output), vec!["01-p1", "02-p1", "03-p1"]);
}
