//! pdfdeck - Arrange PDF files and pages.
//!
//! The core of the crate is [`OrderedSelectionList`]: an ordered list of
//! items with a selection that follows each item's stable identity through
//! moves and reorders. Two workflows build on it:
//!
//! - [`workflow::MergeSession`] arranges whole files and concatenates them
//! - [`workflow::PageEditSession`] reorders, rotates, deletes and extracts
//!   the pages of one file
//!
//! # Examples
//!
//! ## Arranging items
//!
//! ```
//! use pdfdeck::OrderedSelectionList;
//!
//! let mut list: OrderedSelectionList<&str> = OrderedSelectionList::new();
//! let intro = list.insert("intro");
//! let body = list.insert("body");
//! list.select(body)?;
//!
//! list.move_to_position(body, 0)?;
//!
//! assert_eq!(list.position(intro), Some(1));
//! assert!(list.is_selected_at(0));
//! # Ok::<(), pdfdeck::PdfDeckError>(())
//! ```
//!
//! ## Merging files
//!
//! ```no_run
//! use pdfdeck::io::PdfWriter;
//! use pdfdeck::workflow::MergeSession;
//! use std::path::{Path, PathBuf};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = MergeSession::new();
//! session
//!     .add_files(&[PathBuf::from("a.pdf"), PathBuf::from("b.pdf")])
//!     .await?;
//! session.order_by_positions(&[2, 1])?;
//!
//! let result = session.build()?;
//! PdfWriter::new()
//!     .save(&result.document, Path::new("merged.pdf"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod io;
pub mod list;
pub mod output;
pub mod utils;
pub mod workflow;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use error::{PdfDeckError, Result};
pub use list::{ItemId, ListSnapshot, OrderedSelectionList};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
