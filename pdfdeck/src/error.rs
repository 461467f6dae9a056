//! Error types for pdfdeck.
//!
//! A single error enum covers the ordered list, document workflows and
//! output handling so callers can decide in one place whether to surface
//! a failure, skip it, or exit.
//!
//! # Error Categories
//!
//! - **List Errors**: unknown identities, duplicate identities, bad permutations
//! - **Document Errors**: unreadable, encrypted or structurally broken PDFs
//! - **Output Errors**: existing targets, failed writes
//! - **Configuration Errors**: invalid arguments

use std::io;
use std::path::PathBuf;

use crate::list::ItemId;

/// Result type alias for pdfdeck operations.
pub type Result<T> = std::result::Result<T, PdfDeckError>;

/// Main error type for pdfdeck operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfDeckError {
    /// An operation referenced an identity that is not in the list.
    #[error("No item with identity {id} in the list")]
    NotFound {
        /// The unknown identity.
        id: ItemId,
    },

    /// An insertion supplied an identity that is already present.
    #[error("Identity {id} is already present in the list")]
    DuplicateIdentity {
        /// The duplicated identity.
        id: ItemId,
    },

    /// An insertion supplied an identity from the range the list mints from.
    #[error("Identity {id} is out of range for caller-supplied identities")]
    IdentityOutOfRange {
        /// The rejected identity.
        id: ItemId,
    },

    /// A reorder request was not an exact permutation of the current items.
    #[error("Invalid reorder: {reason}")]
    InvalidPermutation {
        /// What was wrong with the requested order.
        reason: String,
    },

    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input file could not be read.
    #[error("Cannot access file: {}\n  Reason: {source}", path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to load PDF file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF file is corrupted or has invalid structure.
    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", path.display())]
    CorruptedPdf {
        /// Path to the corrupted PDF.
        path: PathBuf,
        /// Details about the corruption.
        details: String,
    },

    /// PDF file is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// No files were provided for merging.
    #[error("No input files to merge")]
    NoFilesToMerge,

    /// A workflow was asked to produce a document without pages.
    #[error("Nothing to write: {reason}")]
    EmptyResult {
        /// Why the result would be empty.
        reason: String,
    },

    /// Page range does not match the document.
    #[error(
        "Invalid page range '{range}'\n  \
         Document has {total_pages} page(s). Page numbers must be between 1 and {total_pages}"
    )]
    InvalidPageRange {
        /// Requested page range.
        range: String,
        /// Total pages in the document.
        total_pages: usize,
    },

    /// The page tree could not be read or rewritten.
    #[error("Page tree operation failed: {reason}")]
    PageTreeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or choose a different output path",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfDeckError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for PdfDeckError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl PdfDeckError {
    /// Create a NotFound error.
    pub fn not_found(id: ItemId) -> Self {
        Self::NotFound { id }
    }

    /// Create an InvalidPermutation error.
    pub fn invalid_permutation(reason: impl Into<String>) -> Self {
        Self::InvalidPermutation {
            reason: reason.into(),
        }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an EmptyResult error.
    pub fn empty_result(reason: impl Into<String>) -> Self {
        Self::EmptyResult {
            reason: reason.into(),
        }
    }

    /// Create a PageTreeFailed error.
    pub fn page_tree_failed(reason: impl Into<String>) -> Self {
        Self::PageTreeFailed {
            reason: reason.into(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create a FailedToWrite error.
    pub fn failed_to_write(path: PathBuf, source: io::Error) -> Self {
        Self::FailedToWrite { path, source }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error leaves the caller free to carry on.
    ///
    /// List errors never mutate state, so an interactive caller can show
    /// them and keep the session open.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::DuplicateIdentity { .. }
                | Self::IdentityOutOfRange { .. }
                | Self::InvalidPermutation { .. }
                | Self::FailedToLoadPdf { .. }
                | Self::CorruptedPdf { .. }
                | Self::EncryptedPdf { .. }
                | Self::InvalidPageRange { .. }
                | Self::EmptyResult { .. }
        )
    }

    /// Check if this error should stop all processing immediately.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::NoFilesToMerge
                | Self::FailedToCreateOutput { .. }
                | Self::FailedToWrite { .. }
                | Self::Cancelled
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => 1,
            Self::DuplicateIdentity { .. } => 1,
            Self::IdentityOutOfRange { .. } => 1,
            Self::InvalidPermutation { .. } => 1,
            Self::FileNotFound { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::NoFilesToMerge => 1,
            Self::EmptyResult { .. } => 1,
            Self::InvalidPageRange { .. } => 1,
            Self::PageTreeFailed { .. } => 6,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // SIGINT
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
