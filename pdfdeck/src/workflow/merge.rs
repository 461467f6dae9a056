//! Merging several PDFs in a user-arranged order.
//!
//! A [`MergeSession`] owns the list of loaded files. The caller reorders,
//! selects and removes files through [`MergeSession::files_mut`], then
//! calls [`MergeSession::build`] to concatenate them in display order.

use lopdf::{Document, ObjectId};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::error::{PdfDeckError, Result};
use crate::io::{LoadedPdf, PdfReader};
use crate::list::{ItemId, OrderedSelectionList};
use crate::utils::format_file_size;
use crate::workflow::tree;

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of PDFs merged.
    pub files_merged: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Total size of the source files.
    pub input_size: u64,

    /// Time taken to build the merged document.
    pub merge_time: Duration,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of a merge operation.
#[derive(Debug)]
pub struct MergeResult {
    /// The merged PDF document.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// Source paths in the order they were merged.
    pub merged_files: Vec<PathBuf>,
}

/// Files waiting to be merged, in display order.
#[derive(Debug, Default)]
pub struct MergeSession {
    files: OrderedSelectionList<LoadedPdf>,
    reader: PdfReader,
}

impl MergeSession {
    /// Create an empty session with the default reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session that loads files with `reader`.
    pub fn with_reader(reader: PdfReader) -> Self {
        Self {
            files: OrderedSelectionList::new(),
            reader,
        }
    }

    /// Load `path` and append it to the session.
    ///
    /// # Errors
    ///
    /// Propagates load failures; the session is unchanged on error.
    pub async fn add_file(&mut self, path: &Path) -> Result<ItemId> {
        let loaded = self.reader.load(path).await?;
        Ok(self.add_loaded(loaded))
    }

    /// Load and append several files, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Propagates the first load failure. Files loaded before it stay in
    /// the session.
    pub async fn add_files(&mut self, paths: &[PathBuf]) -> Result<Vec<ItemId>> {
        let mut ids = Vec::with_capacity(paths.len());
        for path in paths {
            ids.push(self.add_file(path).await?);
        }
        Ok(ids)
    }

    /// Append an already loaded document.
    pub fn add_loaded(&mut self, loaded: LoadedPdf) -> ItemId {
        debug!(path = %loaded.path.display(), pages = loaded.page_count, "Queued file for merge");
        self.files.insert(loaded)
    }

    /// Files in display order.
    pub fn files(&self) -> &OrderedSelectionList<LoadedPdf> {
        &self.files
    }

    /// Files for reordering and selection.
    pub fn files_mut(&mut self) -> &mut OrderedSelectionList<LoadedPdf> {
        &mut self.files
    }

    /// Reorder by current 1-indexed display positions, e.g. `[3, 1, 2]`
    /// moves the third file to the front.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPermutation` unless every position appears exactly
    /// once.
    pub fn order_by_positions(&mut self, positions: &[u32]) -> Result<()> {
        let order = positions
            .iter()
            .map(|&position| {
                position
                    .checked_sub(1)
                    .and_then(|index| self.files.id_at(index as usize))
                    .ok_or_else(|| {
                        PdfDeckError::invalid_permutation(format!(
                            "position {position} is out of range (1-{})",
                            self.files.len()
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        self.files.reorder_by_permutation(&order)
    }

    /// Drop every selected file, returning how many were removed.
    pub fn remove_selected(&mut self) -> usize {
        self.files.remove_selected().len()
    }

    /// Pages the merged document will have.
    pub fn total_pages(&self) -> usize {
        self.files.iter().map(|entry| entry.payload.page_count).sum()
    }

    /// Concatenate every file in display order.
    ///
    /// # Errors
    ///
    /// Returns `NoFilesToMerge` for an empty session and `PageTreeFailed`
    /// if a source document has no usable page tree.
    pub fn build(&self) -> Result<MergeResult> {
        let start = Instant::now();

        let mut entries = self.files.iter();
        let Some(first) = entries.next() else {
            return Err(PdfDeckError::NoFilesToMerge);
        };

        let mut merged = first.payload.document.clone();
        let mut page_ids: Vec<ObjectId> = merged.get_pages().into_values().collect();
        let mut max_id = merged.max_id;

        for entry in entries {
            let mut doc = entry.payload.document.clone();

            // Shift ids past everything merged so far.
            doc.renumber_objects_with(max_id + 1);
            max_id = doc.max_id;

            page_ids.extend(doc.get_pages().into_values());
            merged.objects.extend(doc.objects);
        }
        merged.max_id = max_id;

        tree::rebuild_page_tree(&mut merged, &page_ids)?;
        merged.prune_objects();
        merged.renumber_objects();

        let statistics = MergeStatistics {
            files_merged: self.files.len(),
            total_pages: merged.get_pages().len(),
            input_size: self.files.iter().map(|e| e.payload.file_size).sum(),
            merge_time: start.elapsed(),
        };

        info!(
            files = statistics.files_merged,
            pages = statistics.total_pages,
            elapsed_ms = statistics.merge_time.as_millis() as u64,
            "Merged documents"
        );

        Ok(MergeResult {
            document: merged,
            statistics,
            merged_files: self.files.iter().map(|e| e.payload.path.clone()).collect(),
        })
    }
}
