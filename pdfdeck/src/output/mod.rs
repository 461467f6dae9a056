//! Rendering arrangements and results for the user.
//!
//! The `*_lines` functions build the text so it can be tested; the
//! `display_*` functions print it through an [`OutputFormatter`]. JSON
//! output goes through `serde_json`.

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use serde::Serialize;

use crate::config::PageRotation;
use crate::error::{PdfDeckError, Result};
use crate::io::{LoadedPdf, WriteStatistics};
use crate::list::{ItemId, ListSnapshot, OrderedSelectionList};
use crate::workflow::{MergeStatistics, PageRef};

const SELECTED_MARK: &str = "*";

/// One row of an arrangement as printed in JSON mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrangedItem {
    /// 1-indexed display position.
    pub position: usize,
    /// Stable identity.
    pub id: ItemId,
    /// File name or source page label.
    pub label: String,
    /// Page count for files, rotation in degrees for pages.
    pub detail: i64,
    /// Whether the item is selected.
    pub selected: bool,
}

/// Rows describing the files of a merge, in display order.
pub fn file_items(files: &OrderedSelectionList<LoadedPdf>) -> Vec<ArrangedItem> {
    files
        .iter()
        .enumerate()
        .map(|(index, entry)| ArrangedItem {
            position: index + 1,
            id: entry.id(),
            label: entry.payload.display_name(),
            detail: entry.payload.page_count as i64,
            selected: files.is_selected(entry.id()),
        })
        .collect()
}

/// Rows describing pages being edited, in display order.
pub fn page_items(pages: &OrderedSelectionList<PageRef, PageRotation>) -> Vec<ArrangedItem> {
    pages
        .iter()
        .enumerate()
        .map(|(index, entry)| ArrangedItem {
            position: index + 1,
            id: entry.id(),
            label: format!("page {}", entry.payload.number),
            detail: entry.attr.as_degrees(),
            selected: pages.is_selected(entry.id()),
        })
        .collect()
}

/// Text lines for a file arrangement.
pub fn file_lines(files: &OrderedSelectionList<LoadedPdf>) -> Vec<String> {
    files
        .iter()
        .zip(file_items(files))
        .map(|(entry, item)| {
            format!(
                "{mark:1} {pos:>3}. {label} ({pages} pages, {size})",
                mark = if item.selected { SELECTED_MARK } else { "" },
                pos = item.position,
                label = item.label,
                pages = item.detail,
                size = entry.payload.format_file_size(),
            )
        })
        .collect()
}

/// Text lines for a page arrangement.
pub fn page_lines(pages: &OrderedSelectionList<PageRef, PageRotation>) -> Vec<String> {
    page_items(pages)
        .into_iter()
        .map(|item| {
            let rotation = match item.detail {
                0 => String::new(),
                degrees => format!(" rotated {degrees}°"),
            };
            format!(
                "{mark:1} {pos:>3}. {label}{rotation}",
                mark = if item.selected { SELECTED_MARK } else { "" },
                pos = item.position,
                label = item.label,
            )
        })
        .collect()
}

/// Text lines for a bare order/selection snapshot.
pub fn snapshot_lines(snapshot: &ListSnapshot) -> Vec<String> {
    let join = |ids: &[ItemId]| {
        ids.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    };
    vec![
        format!("order:    {}", join(&snapshot.order)),
        format!("selected: {}", join(&snapshot.selected)),
    ]
}

/// Print the files of a merge, with the raw identities in verbose mode.
pub fn display_files(formatter: &OutputFormatter, files: &OrderedSelectionList<LoadedPdf>) {
    formatter.section(&format!("Files ({}):", files.len()));
    for line in file_lines(files) {
        formatter.line(&line);
    }
    if formatter.is_verbose() {
        display_snapshot(formatter, &files.snapshot());
    }
}

/// Print the pages being edited.
pub fn display_pages(
    formatter: &OutputFormatter,
    pages: &OrderedSelectionList<PageRef, PageRotation>,
) {
    formatter.section(&format!(
        "Pages ({}, {} selected):",
        pages.len(),
        pages.selection_len()
    ));
    for line in page_lines(pages) {
        formatter.line(&line);
    }
    if formatter.is_verbose() {
        display_snapshot(formatter, &pages.snapshot());
    }
}

/// Print the order and selection of a list as identities.
pub fn display_snapshot(formatter: &OutputFormatter, snapshot: &ListSnapshot) {
    for line in snapshot_lines(snapshot) {
        formatter.line(&line);
    }
}

/// Serialize any report as pretty JSON.
///
/// # Errors
///
/// Returns `Other` if serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| PdfDeckError::other(format!("Failed to serialize output: {e}")))
}

/// Summarise a finished merge.
pub fn display_merge_summary(
    formatter: &OutputFormatter,
    stats: &MergeStatistics,
    write: Option<&WriteStatistics>,
) {
    formatter.success(&format!(
        "Merged {} file(s), {} pages ({} in) in {:.2}s",
        stats.files_merged,
        stats.total_pages,
        stats.format_input_size(),
        stats.merge_time.as_secs_f64()
    ));
    if let Some(write) = write {
        formatter.detail("Output", &write.output_path.display().to_string());
        formatter.detail("Size", &write.format_file_size());
        formatter.detail("Compressed", if write.compressed { "yes" } else { "no" });
    }
}
