//! Reading and writing PDF files.

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};

use std::path::Path;

use crate::error::Result;

/// Load a single PDF with the default reader.
///
/// # Errors
///
/// See [`PdfReader::load`].
pub async fn load_pdf(path: &Path) -> Result<LoadedPdf> {
    PdfReader::new().load(path).await
}
