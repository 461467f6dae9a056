//! Document workflows built on [`OrderedSelectionList`](crate::list::OrderedSelectionList).
//!
//! - [`merge`]: several files, concatenated in display order
//! - [`pages`]: one file's pages, reordered, rotated, deleted or extracted

pub mod merge;
pub mod pages;
mod tree;

pub use merge::{MergeResult, MergeSession, MergeStatistics};
pub use pages::{PageEditSession, PageRef};
