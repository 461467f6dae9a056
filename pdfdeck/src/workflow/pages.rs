//! Editing the pages of a single PDF: reorder, rotate, delete, extract.
//!
//! Each page is an item in an [`OrderedSelectionList`] whose attribute is
//! the rotation accumulated while editing. Nothing touches the source
//! document until [`PageEditSession::build`] or
//! [`PageEditSession::extract_selected`] writes a new one.

use lopdf::{Document, ObjectId};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::config::{PageRange, PageRotation, Rotation};
use crate::error::{PdfDeckError, Result};
use crate::io::LoadedPdf;
use crate::list::{Entry, ItemId, OrderedSelectionList};
use crate::workflow::tree;

/// Reference to a page of the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRef {
    /// 1-indexed page number in the source document.
    pub number: u32,

    /// Page object in the source document.
    #[serde(skip)]
    pub object_id: ObjectId,
}

/// Pages of one document being rearranged.
#[derive(Debug, Clone)]
pub struct PageEditSession {
    source: Document,
    source_pages: usize,
    pages: OrderedSelectionList<PageRef, PageRotation>,
}

impl PageEditSession {
    /// Start editing `document`; every page starts unrotated and unselected.
    pub fn from_document(document: Document) -> Self {
        let mut pages = OrderedSelectionList::new();
        for (number, object_id) in document.get_pages() {
            pages.insert(PageRef { number, object_id });
        }

        Self {
            source_pages: pages.len(),
            source: document,
            pages,
        }
    }

    /// Start editing a loaded file.
    pub fn open(loaded: LoadedPdf) -> Self {
        debug!(path = %loaded.path.display(), pages = loaded.page_count, "Opened for editing");
        Self::from_document(loaded.document)
    }

    /// Pages in display order.
    pub fn pages(&self) -> &OrderedSelectionList<PageRef, PageRotation> {
        &self.pages
    }

    /// Pages for reordering and selection.
    pub fn pages_mut(&mut self) -> &mut OrderedSelectionList<PageRef, PageRotation> {
        &mut self.pages
    }

    /// Number of pages in the source document.
    pub fn source_page_count(&self) -> usize {
        self.source_pages
    }

    /// Identity of the page that was page `number` in the source document,
    /// if it has not been deleted.
    pub fn page_id(&self, number: u32) -> Option<ItemId> {
        self.pages
            .iter()
            .find(|entry| entry.payload.number == number)
            .map(Entry::id)
    }

    /// Select the remaining pages whose source number falls in `range`.
    /// Returns how many pages were newly selected.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPageRange` if `range` goes past the source document.
    pub fn select_range(&mut self, range: &PageRange) -> Result<usize> {
        range.check_against(self.source_pages)?;
        Ok(self.pages.select_where(|page| range.contains(page.number)))
    }

    /// Reorder using source page numbers, e.g. `[2, 1, 3]` swaps the first
    /// two pages.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPermutation` unless the numbers name every remaining
    /// page exactly once.
    pub fn order_by_numbers(&mut self, numbers: &[u32]) -> Result<()> {
        let by_number: HashMap<u32, ItemId> = self
            .pages
            .iter()
            .map(|entry| (entry.payload.number, entry.id()))
            .collect();

        let order = numbers
            .iter()
            .map(|number| {
                by_number.get(number).copied().ok_or_else(|| {
                    PdfDeckError::invalid_permutation(format!("page {number} is not in the document"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.pages.reorder_by_permutation(&order)
    }

    /// Rotate one page, returning its accumulated rotation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is not a page of this session.
    pub fn rotate(&mut self, id: ItemId, rotation: Rotation) -> Result<PageRotation> {
        let attr = self.pages.attr_mut(id)?;
        *attr = attr.rotated_by(rotation);
        Ok(*attr)
    }

    /// Rotate every selected page, returning how many were rotated.
    pub fn rotate_selected(&mut self, rotation: Rotation) -> usize {
        let mut rotated = 0;
        for entry in self.pages.selected_entries_mut() {
            entry.attr = entry.attr.rotated_by(rotation);
            rotated += 1;
        }
        rotated
    }

    /// Rotate every page.
    pub fn rotate_all(&mut self, rotation: Rotation) {
        for entry in self.pages.iter_mut() {
            entry.attr = entry.attr.rotated_by(rotation);
        }
    }

    /// Delete every selected page, returning how many were deleted.
    ///
    /// Deleting all pages is allowed here; [`PageEditSession::build`]
    /// refuses to write an empty document.
    pub fn delete_selected(&mut self) -> usize {
        let removed = self.pages.remove_selected().len();
        debug!(removed, remaining = self.pages.len(), "Deleted pages");
        removed
    }

    /// Write every remaining page in display order with its rotation.
    ///
    /// # Errors
    ///
    /// Returns `EmptyResult` if every page was deleted.
    pub fn build(&self) -> Result<Document> {
        if self.pages.is_empty() {
            return Err(PdfDeckError::empty_result("all pages were deleted"));
        }
        self.write_pages(self.pages.iter())
    }

    /// Write only the selected pages, in display order.
    ///
    /// # Errors
    ///
    /// Returns `EmptyResult` if no page is selected.
    pub fn extract_selected(&self) -> Result<Document> {
        if self.pages.selection_len() == 0 {
            return Err(PdfDeckError::empty_result("no pages selected"));
        }
        self.write_pages(self.pages.selected_entries())
    }

    fn write_pages<'a, I>(&self, entries: I) -> Result<Document>
    where
        I: Iterator<Item = &'a Entry<PageRef, PageRotation>>,
    {
        let (page_ids, rotations): (Vec<ObjectId>, Vec<PageRotation>) = entries
            .map(|entry| (entry.payload.object_id, entry.attr))
            .unzip();

        let mut doc = self.source.clone();
        tree::rebuild_page_tree(&mut doc, &page_ids)?;

        for (&page_id, rotation) in page_ids.iter().zip(rotations) {
            tree::rotate_page(&mut doc, page_id, rotation.as_degrees())?;
        }

        doc.prune_objects();
        doc.renumber_objects();

        info!(
            pages = page_ids.len(),
            source_pages = self.source_pages,
            "Wrote arranged pages"
        );

        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{nested_pdf_document, page_markers, page_rotations, pdf_document};

    fn session(pages: usize) -> PageEditSession {
        PageEditSession::from_document(pdf_document(pages, "e"))
    }

    #[test]
    fn test_open_lists_pages_in_order() {
        let session = session(3);
        let numbers: Vec<u32> = session.pages().iter().map(|e| e.payload.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(session.source_page_count(), 3);
    }

    #[test]
    fn test_build_unchanged() {
        let doc = session(3).build().unwrap();
        assert_eq!(page_markers(&doc), vec!["e-p1", "e-p2", "e-p3"]);
        assert_eq!(page_rotations(&doc), vec![0, 0, 0]);
    }

    #[test]
    fn test_rotation_follows_page_through_reorder() {
        let mut session = session(3);
        let first = session.page_id(1).unwrap();

        session.rotate(first, Rotation::Clockwise90).unwrap();
        session.pages_mut().move_to_position(first, 2).unwrap();

        let doc = session.build().unwrap();
        assert_eq!(page_markers(&doc), vec!["e-p2", "e-p3", "e-p1"]);
        assert_eq!(page_rotations(&doc), vec![0, 0, 90]);
    }

    #[test]
    fn test_rotate_selected_and_all() {
        let mut session = session(4);
        session
            .select_range(&PageRange::parse("2-3").unwrap())
            .unwrap();

        assert_eq!(session.rotate_selected(Rotation::Rotate180), 2);
        session.rotate_all(Rotation::Clockwise90);

        let doc = session.build().unwrap();
        assert_eq!(page_rotations(&doc), vec![90, 270, 270, 90]);
    }

    #[test]
    fn test_rotation_adds_to_existing_rotate() {
        let mut session = PageEditSession::from_document(nested_pdf_document("n"));
        session.rotate_all(Rotation::Clockwise90);

        let doc = session.build().unwrap();
        assert_eq!(page_rotations(&doc), vec![180, 180, 90]);
    }

    #[test]
    fn test_delete_selected() {
        let mut session = session(4);
        session
            .select_range(&PageRange::parse("1,3").unwrap())
            .unwrap();

        assert_eq!(session.delete_selected(), 2);

        let doc = session.build().unwrap();
        assert_eq!(page_markers(&doc), vec!["e-p2", "e-p4"]);
        assert_eq!(session.page_id(1), None);
    }

    #[test]
    fn test_delete_all_then_build_fails() {
        let mut session = session(2);
        session.pages_mut().select_all();
        session.delete_selected();

        assert!(session.pages().is_empty());
        assert!(matches!(
            session.build(),
            Err(PdfDeckError::EmptyResult { .. })
        ));
    }

    #[test]
    fn test_extract_selected_keeps_display_order() {
        let mut session = session(5);
        session.order_by_numbers(&[5, 4, 3, 2, 1]).unwrap();
        session
            .select_range(&PageRange::parse("2,4").unwrap())
            .unwrap();

        let doc = session.extract_selected().unwrap();

        assert_eq!(page_markers(&doc), vec!["e-p4", "e-p2"]);
    }

    #[test]
    fn test_extract_without_selection_fails() {
        assert!(matches!(
            session(2).extract_selected(),
            Err(PdfDeckError::EmptyResult { .. })
        ));
    }

    #[test]
    fn test_select_range_past_end() {
        let mut session = session(3);
        let err = session
            .select_range(&PageRange::parse("2-9").unwrap())
            .unwrap_err();
        assert!(matches!(err, PdfDeckError::InvalidPageRange { .. }));
        assert_eq!(session.pages().selection_len(), 0);
    }

    #[test]
    fn test_order_by_numbers_rejects_bad_input() {
        let mut session = session(3);
        assert!(matches!(
            session.order_by_numbers(&[1, 2]),
            Err(PdfDeckError::InvalidPermutation { .. })
        ));
        assert!(matches!(
            session.order_by_numbers(&[1, 2, 7]),
            Err(PdfDeckError::InvalidPermutation { .. })
        ));
    }

    #[test]
    fn test_move_selected_pages_down() {
        let mut session = session(4);
        let first = session.page_id(1).unwrap();
        let second = session.page_id(2).unwrap();
        session.pages_mut().select(first).unwrap();
        session.pages_mut().select(second).unwrap();

        session.pages_mut().move_selected_by_offset(2);

        let doc = session.build().unwrap();
        assert_eq!(page_markers(&doc), vec!["e-p3", "e-p4", "e-p1", "e-p2"]);
    }
}
