//! PDF loading.
//!
//! Bytes are read with `tokio::fs` and parsed on the blocking pool, so an
//! interactive caller never stalls its runtime on a large document.
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::io::PdfReader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("document.pdf")).await?;
//! println!("Loaded {} pages in {:?}", loaded.page_count, loaded.load_time);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::debug;

use crate::error::{PdfDeckError, Result};
use crate::utils::format_file_size;

/// A loaded PDF document with metadata.
#[derive(Debug, Clone)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path (or label) of the source.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// Source size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    /// File name for display, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Format the source size as a human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF reader with configurable loading behavior.
#[derive(Debug, Clone)]
pub struct PdfReader {
    /// Reject documents without pages.
    verify: bool,
}

impl PdfReader {
    /// Create a new PDF reader with default settings.
    pub fn new() -> Self {
        Self { verify: true }
    }

    /// Create a reader that accepts documents without pages.
    pub fn without_verification() -> Self {
        Self { verify: false }
    }

    /// Load a PDF document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The file is not a valid PDF
    /// - The PDF is encrypted
    /// - The PDF has no pages (unless verification is off)
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let start = Instant::now();

        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => PdfDeckError::file_not_found(path.to_path_buf()),
            _ => PdfDeckError::FileNotAccessible {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let mut loaded = self.parse(path.to_path_buf(), bytes).await?;
        loaded.load_time = start.elapsed();

        debug!(
            path = %loaded.path.display(),
            pages = loaded.page_count,
            size = loaded.file_size,
            elapsed_ms = loaded.load_time.as_millis() as u64,
            "Loaded PDF"
        );

        Ok(loaded)
    }

    /// Load a PDF document from bytes already in memory.
    ///
    /// `label` stands in for the path in errors and display names.
    ///
    /// # Errors
    ///
    /// Same as [`PdfReader::load`], minus the file system failures.
    pub async fn load_from_memory(
        &self,
        label: impl Into<PathBuf>,
        bytes: Vec<u8>,
    ) -> Result<LoadedPdf> {
        let start = Instant::now();
        let mut loaded = self.parse(label.into(), bytes).await?;
        loaded.load_time = start.elapsed();
        Ok(loaded)
    }

    async fn parse(&self, path: PathBuf, bytes: Vec<u8>) -> Result<LoadedPdf> {
        let verify = self.verify;
        let file_size = bytes.len() as u64;

        task::spawn_blocking(move || {
            let document = Document::load_mem(&bytes).map_err(|e| {
                let err_msg = e.to_string();
                if err_msg.contains("encrypt") || err_msg.contains("password") {
                    PdfDeckError::encrypted_pdf(path.clone())
                } else {
                    PdfDeckError::failed_to_load_pdf(path.clone(), err_msg)
                }
            })?;

            let page_count = document.get_pages().len();
            if verify && page_count == 0 {
                return Err(PdfDeckError::corrupted_pdf(path, "PDF has no pages"));
            }

            Ok(LoadedPdf {
                document,
                path,
                page_count,
                load_time: Duration::ZERO,
                file_size,
            })
        })
        .await
        .map_err(|e| PdfDeckError::other(format!("Load task failed: {e}")))?
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}
