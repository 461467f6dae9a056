//! Ordered item list with identity-keyed selection.
//!
//! [`OrderedSelectionList`] backs every arrangement screen in pdfdeck: the
//! files of a merge, the pages of an edit, the pages picked for a split.
//! Items get a stable [`ItemId`] when they are inserted and the selection is
//! a set of those identities, so reordering is a plain permutation of the
//! backing vector and the selection never has to be patched up afterwards.
//! Index-based views ("is the item at position 3 selected?") are derived on
//! demand.
//!
//! # Examples
//!
//! ```
//! use pdfdeck::list::OrderedSelectionList;
//!
//! let mut list: OrderedSelectionList<&str> = OrderedSelectionList::new();
//! let x = list.insert("x");
//! let y = list.insert("y");
//! let z = list.insert("z");
//!
//! list.select(y).unwrap();
//! list.select(z).unwrap();
//! list.move_to_position(x, 2).unwrap();
//!
//! assert_eq!(list.ids().collect::<Vec<_>>(), vec![y, z, x]);
//! assert_eq!(list.selected_ids(), vec![y, z]);
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PdfDeckError, Result};

/// Stable identity of an item in an [`OrderedSelectionList`].
///
/// Identities are minted from a per-list counter and are never handed out
/// twice, even after the item they named has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Caller-supplied identities must stay below this value. The upper half
    /// of the range is left to the list's own counter.
    pub const CALLER_LIMIT: u64 = 1 << 63;

    /// Wrap a raw identity value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identity value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One item of the list: its identity, the caller's payload and an
/// auxiliary attribute the list carries but never looks at.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T, A = ()> {
    id: ItemId,
    /// Caller-owned payload (a file, a page reference, ...).
    pub payload: T,
    /// Per-item attribute travelling with the payload (e.g. a rotation).
    pub attr: A,
}

impl<T, A> Entry<T, A> {
    /// Identity of this entry.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Consume the entry, returning payload and attribute.
    pub fn into_parts(self) -> (T, A) {
        (self.payload, self.attr)
    }
}

/// Copy of the list's order and selection, suitable for rendering or
/// serialising while the list itself keeps changing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSnapshot {
    /// Identities in display order.
    pub order: Vec<ItemId>,
    /// Selected identities, in display order.
    pub selected: Vec<ItemId>,
}

/// Ordered sequence of items plus a selection that follows item identity.
///
/// Every mutating operation either succeeds completely or returns an error
/// and leaves the list untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedSelectionList<T, A = ()> {
    entries: Vec<Entry<T, A>>,
    selected: HashSet<ItemId>,
    next_id: u64,
}

impl<T, A> Default for OrderedSelectionList<T, A> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            selected: HashSet::new(),
            next_id: 0,
        }
    }
}

impl<T, A: Default> OrderedSelectionList<T, A> {
    /// Append an item with a default attribute.
    pub fn insert(&mut self, payload: T) -> ItemId {
        self.insert_with_attr(payload, A::default())
    }

    /// Insert an item at `index` (clamped to the list length) with a
    /// default attribute.
    pub fn insert_at(&mut self, index: usize, payload: T) -> ItemId {
        self.insert_at_with_attr(index, payload, A::default())
    }
}

impl<T, A> OrderedSelectionList<T, A> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list holds no items.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry<T, A>> {
        self.entries.iter()
    }

    /// Iterate entries in display order for in-place payload/attribute
    /// changes. Identities cannot be changed through an entry.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Entry<T, A>> {
        self.entries.iter_mut()
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[Entry<T, A>] {
        &self.entries
    }

    /// Identities in display order.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.entries.iter().map(|entry| entry.id)
    }

    /// Whether `id` names an item in the list.
    pub fn contains(&self, id: ItemId) -> bool {
        self.position(id).is_some()
    }

    /// Current display position of `id`.
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Identity of the item at `index`.
    pub fn id_at(&self, index: usize) -> Option<ItemId> {
        self.entries.get(index).map(|entry| entry.id)
    }

    /// Look up an entry by identity.
    pub fn get(&self, id: ItemId) -> Option<&Entry<T, A>> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Look up an entry by identity for in-place payload/attribute changes.
    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Entry<T, A>> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }

    /// Mutable access to the attribute of `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is not in the list.
    pub fn attr_mut(&mut self, id: ItemId) -> Result<&mut A> {
        self.get_mut(id)
            .map(|entry| &mut entry.attr)
            .ok_or_else(|| PdfDeckError::not_found(id))
    }

    fn index_of(&self, id: ItemId) -> Result<usize> {
        self.position(id).ok_or_else(|| PdfDeckError::not_found(id))
    }

    fn mint(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        // Reaching the end takes 2^63 inserts past the highest caller id.
        self.next_id = match self.next_id.checked_add(1) {
            Some(next) => next,
            None => panic!("item identities exhausted"),
        };
        id
    }

    /// Append an item with an explicit attribute.
    pub fn insert_with_attr(&mut self, payload: T, attr: A) -> ItemId {
        let index = self.entries.len();
        self.insert_at_with_attr(index, payload, attr)
    }

    /// Insert an item with an explicit attribute at `index`, clamped to the
    /// list length.
    pub fn insert_at_with_attr(&mut self, index: usize, payload: T, attr: A) -> ItemId {
        let id = self.mint();
        let index = index.min(self.entries.len());
        self.entries.insert(index, Entry { id, payload, attr });
        id
    }

    /// Insert an item under a caller-supplied identity.
    ///
    /// The internal counter moves past `id` so freshly minted identities can
    /// never collide with it later.
    ///
    /// # Errors
    ///
    /// Returns `IdentityOutOfRange` if `id` is not below
    /// [`ItemId::CALLER_LIMIT`], and `DuplicateIdentity` if `id` is already
    /// in the list. The list is left unchanged in both cases.
    pub fn insert_with_id(&mut self, id: ItemId, index: usize, payload: T, attr: A) -> Result<()> {
        if id.0 >= ItemId::CALLER_LIMIT {
            return Err(PdfDeckError::IdentityOutOfRange { id });
        }
        if self.contains(id) {
            return Err(PdfDeckError::DuplicateIdentity { id });
        }

        self.next_id = self.next_id.max(id.0 + 1);
        let index = index.min(self.entries.len());
        self.entries.insert(index, Entry { id, payload, attr });
        Ok(())
    }

    /// Remove an item, dropping it from the selection if it was selected.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is not in the list.
    pub fn remove(&mut self, id: ItemId) -> Result<Entry<T, A>> {
        let index = self.index_of(id)?;
        self.selected.remove(&id);
        Ok(self.entries.remove(index))
    }

    /// Remove every selected item and return them in display order.
    ///
    /// The list may end up empty; whether that is acceptable is up to the
    /// caller.
    pub fn remove_selected(&mut self) -> Vec<Entry<T, A>> {
        let selected = std::mem::take(&mut self.selected);
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| selected.contains(&entry.id));
        self.entries = kept;
        removed
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.selected.clear();
    }

    /// Add `id` to the selection. Returns `true` if it was not selected yet.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is not in the list.
    pub fn select(&mut self, id: ItemId) -> Result<bool> {
        self.index_of(id)?;
        Ok(self.selected.insert(id))
    }

    /// Remove `id` from the selection. Returns `true` if it was selected.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is not in the list.
    pub fn deselect(&mut self, id: ItemId) -> Result<bool> {
        self.index_of(id)?;
        Ok(self.selected.remove(&id))
    }

    /// Flip the selection state of `id`, returning the new state.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is not in the list.
    pub fn toggle_select(&mut self, id: ItemId) -> Result<bool> {
        self.index_of(id)?;
        if self.selected.remove(&id) {
            Ok(false)
        } else {
            self.selected.insert(id);
            Ok(true)
        }
    }

    /// Select every item.
    pub fn select_all(&mut self) {
        self.selected = self.entries.iter().map(|entry| entry.id).collect();
    }

    /// Clear the selection.
    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Select every item whose payload matches `predicate`, returning how
    /// many were newly selected.
    pub fn select_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut added = 0;
        for entry in &self.entries {
            if predicate(&entry.payload) && self.selected.insert(entry.id) {
                added += 1;
            }
        }
        added
    }

    /// Whether `id` is selected. Unknown identities are never selected.
    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected.contains(&id)
    }

    /// Whether the item at `index` is selected.
    pub fn is_selected_at(&self, index: usize) -> bool {
        self.id_at(index).is_some_and(|id| self.selected.contains(&id))
    }

    /// Number of selected items.
    pub fn selection_len(&self) -> usize {
        self.selected.len()
    }

    /// Selected identities in display order.
    pub fn selected_ids(&self) -> Vec<ItemId> {
        self.selected_entries().map(|entry| entry.id).collect()
    }

    /// Display positions of the selected items, ascending.
    pub fn selected_positions(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| self.selected.contains(&entry.id))
            .map(|(index, _)| index)
            .collect()
    }

    /// Selected entries in display order.
    pub fn selected_entries(&self) -> impl Iterator<Item = &Entry<T, A>> + '_ {
        self.entries
            .iter()
            .filter(|entry| self.selected.contains(&entry.id))
    }

    /// Selected entries in display order, for in-place changes.
    pub fn selected_entries_mut(&mut self) -> impl Iterator<Item = &mut Entry<T, A>> + '_ {
        let selected = &self.selected;
        self.entries
            .iter_mut()
            .filter(move |entry| selected.contains(&entry.id))
    }

    /// Move `id` to `new_index`, clamped to the last position. Returns the
    /// position the item ended up at.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is not in the list.
    pub fn move_to_position(&mut self, id: ItemId, new_index: usize) -> Result<usize> {
        let from = self.index_of(id)?;
        let to = new_index.min(self.entries.len() - 1);

        if from < to {
            self.entries[from..=to].rotate_left(1);
        } else if to < from {
            self.entries[to..=from].rotate_right(1);
        }

        Ok(to)
    }

    /// Move `id` by `delta` positions. Moves past either end clamp, so a
    /// request to move the first item up is a no-op rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is not in the list.
    pub fn move_by_offset(&mut self, id: ItemId, delta: isize) -> Result<usize> {
        let from = self.index_of(id)?;
        self.move_to_position(id, from.saturating_add_signed(delta))
    }

    /// Move every selected item `delta` steps, one step at a time.
    ///
    /// A selected item stops when it reaches the end of the list or runs
    /// into a selected item that has already stopped. Unselected items keep
    /// their relative order. Returns `true` if anything moved.
    pub fn move_selected_by_offset(&mut self, delta: isize) -> bool {
        let mut changed = false;

        for _ in 0..delta.unsigned_abs() {
            let mut moved = false;

            if delta < 0 {
                for i in 1..self.entries.len() {
                    if self.is_selected_at(i) && !self.is_selected_at(i - 1) {
                        self.entries.swap(i - 1, i);
                        moved = true;
                    }
                }
            } else {
                for i in (0..self.entries.len().saturating_sub(1)).rev() {
                    if self.is_selected_at(i) && !self.is_selected_at(i + 1) {
                        self.entries.swap(i, i + 1);
                        moved = true;
                    }
                }
            }

            if !moved {
                break;
            }
            changed = true;
        }

        changed
    }

    /// Replace the display order with `order`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPermutation` unless `order` names every current item
    /// exactly once.
    pub fn reorder_by_permutation(&mut self, order: &[ItemId]) -> Result<()> {
        if order.len() != self.entries.len() {
            return Err(PdfDeckError::invalid_permutation(format!(
                "expected {} identities, got {}",
                self.entries.len(),
                order.len()
            )));
        }

        let current: HashSet<ItemId> = self.ids().collect();
        let mut rank = HashMap::with_capacity(order.len());
        for (index, id) in order.iter().enumerate() {
            if !current.contains(id) {
                return Err(PdfDeckError::invalid_permutation(format!(
                    "identity {id} is not in the list"
                )));
            }
            if rank.insert(*id, index).is_some() {
                return Err(PdfDeckError::invalid_permutation(format!(
                    "identity {id} appears more than once"
                )));
            }
        }

        self.entries
            .sort_by_key(|entry| rank.get(&entry.id).copied().unwrap_or(usize::MAX));
        Ok(())
    }

    /// Copy of the current order and selection.
    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            order: self.ids().collect(),
            selected: self.selected_ids(),
        }
    }
}
