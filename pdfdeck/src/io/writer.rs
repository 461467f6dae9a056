//! PDF writing.
//!
//! Documents are serialised on the blocking pool, written to a sibling
//! temporary file and renamed into place so a failed write never leaves a
//! half-written output behind.
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::io::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! let stats = writer.save_with_stats(&doc, Path::new("output.pdf")).await?;
//! println!("Wrote {} in {:?}", stats.format_file_size(), stats.write_time);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::{debug, warn};

use crate::error::{PdfDeckError, Result};
use crate::utils::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Write to a temporary file, then rename.
    pub atomic: bool,

    /// Compress streams before writing.
    pub compress: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compress: true,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Whether compression was applied.
    pub compressed: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer that leaves streams as they are.
    pub fn without_compression() -> Self {
        Self::with_options(WriteOptions {
            compress: false,
            ..Default::default()
        })
    }

    /// Save a PDF document to a file.
    ///
    /// # Errors
    ///
    /// See [`PdfWriter::save_with_stats`].
    pub async fn save(&self, doc: &Document, path: &Path) -> Result<()> {
        self.save_with_stats(doc, path).await.map(|_| ())
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// # Errors
    ///
    /// Returns `FailedToCreateOutput` if the file cannot be created and
    /// `FailedToWrite` if serialisation, flushing or the final rename fails.
    pub async fn save_with_stats(&self, doc: &Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();
        let mut doc = doc.clone();

        let stats = task::spawn_blocking(move || {
            let start = Instant::now();

            if options.compress {
                doc.compress();
            }

            if options.atomic {
                let staging = staging_path(&path_buf);
                let outcome = write_file(&mut doc, &staging, options.buffer_size).and_then(|()| {
                    std::fs::rename(&staging, &path_buf)
                        .map_err(|source| PdfDeckError::failed_to_write(path_buf.clone(), source))
                });
                if outcome.is_err()
                    && staging.exists()
                    && let Err(err) = std::fs::remove_file(&staging)
                {
                    warn!(path = %staging.display(), %err, "Could not remove staging file");
                }
                outcome?;
            } else {
                write_file(&mut doc, &path_buf, options.buffer_size)?;
            }

            Ok::<_, PdfDeckError>(WriteStatistics {
                write_time: start.elapsed(),
                file_size: std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0),
                output_path: path_buf,
                compressed: options.compress,
            })
        })
        .await
        .map_err(|e| PdfDeckError::other(format!("Write task failed: {e}")))??;

        debug!(
            path = %stats.output_path.display(),
            size = stats.file_size,
            compressed = stats.compressed,
            "Wrote PDF"
        );

        Ok(stats)
    }

    /// Check that the parent directory of `path` exists and is writable.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a missing or read-only directory.
    pub async fn can_write(&self, path: &Path) -> Result<()> {
        let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        let metadata =
            tokio::fs::metadata(parent)
                .await
                .map_err(|_| {
                    PdfDeckError::invalid_config(format!(
                        "Output directory does not exist: {}",
                        parent.display()
                    ))
                })?;

        if metadata.permissions().readonly() {
            return Err(PdfDeckError::invalid_config(format!(
                "Output directory is not writable: {}",
                parent.display()
            )));
        }

        Ok(())
    }
}

/// Sibling path an atomic save writes to before renaming: `out.pdf` stages
/// as `out.pdf.tmp`.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Serialise `doc` into a new file at `path`.
fn write_file(doc: &mut Document, path: &Path, buffer_size: usize) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|source| {
        PdfDeckError::FailedToCreateOutput {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let mut out = std::io::BufWriter::with_capacity(buffer_size, file);

    // lopdf reports its own error type; keep it as the io source.
    doc.save_to(&mut out)
        .map_err(|e| PdfDeckError::failed_to_write(path.to_path_buf(), std::io::Error::other(e)))?;
    out.flush()
        .map_err(|source| PdfDeckError::failed_to_write(path.to_path_buf(), source))
}
