//! The generic append-with-reuse slotted container.
//!
//! `SlotMap<T>` hands out stable `usize` indices on [`SlotMap::insert`] and
//! recycles freed ones through a LIFO free-slot stack. It is generic enough
//! to serve both the graph store's node/edge containers (whose elements
//! must learn their own assigned index) and a node's incidence arrays
//! (whose elements are bare [`gp2_common::EdgeIndex`] values with no
//! back-reference need) — insertion is closure-based,
//! `insert(|assigned_index| T)`, rather than requiring an `Indexed` trait
//! bound on `T`.

use gp2_common::utils::hash::FxHashSet;
use gp2_common::{Error, Result};

/// A generic slotted container with stable-index reuse.
///
/// # Invariants
///
/// - Slots `< capacity()` are exactly partitioned into *occupied* and
///   *free-stack*.
/// - [`SlotMap::iterate`] never yields a free slot.
/// - `insert` followed by `get` on the returned index yields the same
///   element.
#[derive(Debug, Clone)]
pub struct SlotMap<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
    occupied_count: usize,
}

impl<T> SlotMap<T> {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            occupied_count: 0,
        }
    }

    /// Creates an empty container with room for `capacity` elements before
    /// the backing vector reallocates.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            occupied_count: 0,
        }
    }

    /// Inserts an element, assigning it a stable index.
    ///
    /// If the free-slot stack is non-empty, pops a slot and builds the
    /// element there; otherwise appends at the high-water mark and grows it.
    /// `f` receives the index the element is about to be assigned, so
    /// elements that record their own index (nodes, edges) can do so; code
    /// storing bare values (incidence arrays) can ignore it.
    pub fn insert(&mut self, f: impl FnOnce(usize) -> T) -> usize {
        let index = if let Some(index) = self.free.pop() {
            index
        } else {
            let index = self.slots.len();
            self.slots.push(None);
            index
        };
        self.slots[index] = Some(f(index));
        self.occupied_count += 1;
        index
    }

    /// Removes and returns the element at `index`.
    ///
    /// Uses the trailing-slot collapse rule: if `index` was the last
    /// populated vector slot, the backing vector shrinks and no free-slot
    /// entry is produced; otherwise `index` is pushed onto the free-slot
    /// stack.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `index >= self.capacity()`.
    /// [`Error::InvariantViolation`] if the slot at `index` is already
    /// empty (removing an already-removed index is a caller bug, not a
    /// normal not-found case — normal not-found is expressed by [`get`]
    /// returning [`Error::EmptySlot`]).
    ///
    /// [`get`]: SlotMap::get
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.slots.len() {
            return Err(Error::OutOfRange {
                index,
                len: self.slots.len(),
            });
        }
        let Some(value) = self.slots[index].take() else {
            return Err(Error::InvariantViolation(format!(
                "remove called on already-empty slot {index}"
            )));
        };
        self.occupied_count -= 1;

        if index == self.slots.len() - 1 {
            self.slots.pop();
        } else {
            self.free.push(index);
        }

        Ok(value)
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `index >= self.capacity()`;
    /// [`Error::EmptySlot`] if the slot is currently empty. Bound checks use
    /// `>=`, never bare `>` — a bare `>` permits a one-past-the-end read of
    /// a free slot.
    pub fn get(&self, index: usize) -> Result<&T> {
        if index >= self.slots.len() {
            return Err(Error::OutOfRange {
                index,
                len: self.slots.len(),
            });
        }
        self.slots[index].as_ref().ok_or(Error::EmptySlot { index })
    }

    /// Returns a mutable reference to the element at `index`. See [`get`](SlotMap::get)
    /// for the error conditions.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.slots.len();
        if index >= len {
            return Err(Error::OutOfRange { index, len });
        }
        self.slots[index].as_mut().ok_or(Error::EmptySlot { index })
    }

    /// Returns `true` if `index` names a currently occupied slot.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(Option::is_some)
    }

    /// Yields `(index, &element)` for every occupied slot, in ascending
    /// index order. Finite and restartable.
    pub fn iterate(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (i, v)))
    }

    /// Yields `(index, &mut element)` for every occupied slot, in ascending
    /// index order.
    pub fn iterate_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|v| (i, v)))
    }

    /// Number of currently occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.occupied_count
    }

    /// `true` if there are no occupied slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupied_count == 0
    }

    /// The high-water mark: one past the largest index ever assigned that
    /// hasn't triggered a trailing-slot collapse.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Checks that slots below the high-water mark are exactly partitioned
    /// into occupied and free-stack, with no index appearing in both or in
    /// neither. Returns one diagnostic string per violation found; used by
    /// [`crate::validate`].
    pub(crate) fn diagnose(&self, label: &str) -> Vec<String> {
        let mut violations = Vec::new();
        let mut seen = FxHashSet::default();

        for &index in &self.free {
            if index >= self.slots.len() {
                violations.push(format!(
                    "{label}: free-slot stack references out-of-range index {index}"
                ));
                continue;
            }
            if !seen.insert(index) {
                violations.push(format!("{label}: free-slot stack contains duplicate index {index}"));
            }
            if self.slots[index].is_some() {
                violations.push(format!(
                    "{label}: free-slot stack claims slot {index} is free but it is occupied"
                ));
            }
        }

        let empty_count = self.slots.iter().filter(|s| s.is_none()).count();
        if empty_count != self.free.len() {
            violations.push(format!(
                "{label}: {empty_count} empty slot(s) below the high-water mark but free-slot stack holds {}",
                self.free.len()
            ));
        }

        if self.occupied_count != self.slots.len().saturating_sub(self.free.len()) {
            violations.push(format!("{label}: occupied count inconsistent with slots/free-list size"));
        }

        violations
    }
}

impl<T> Default for SlotMap<T> {
    fn default() -> Self {
        Self::new()
    }
}
