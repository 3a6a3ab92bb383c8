//! Pagination over a received study-set list.
//!
//! The paginator owns the full list and an explicit cursor; the rendered
//! page is derived from it, never stored in the view. Sets are immutable
//! once received.

use crate::model::StudySet;

/// A rendered page shows at most this many sets.
pub const PAGE_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetPaginator {
    sets: Vec<StudySet>,
    cursor: usize,
}

impl SetPaginator {
    /// Create a paginator with the first page already served.
    #[must_use]
    pub fn new(sets: Vec<StudySet>) -> Self {
        let cursor = sets.len().min(PAGE_SIZE);
        Self { sets, cursor }
    }

    /// Every set shown so far, in order.
    #[must_use]
    pub fn shown(&self) -> &[StudySet] {
        &self.sets[..self.cursor]
    }

    /// Count of sets not yet shown.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.sets.len() - self.cursor
    }

    /// True once every local set has been shown. A "see more" action past
    /// this point must fetch a fresh list instead.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.sets.len()
    }

    /// Serve the next page of up to [`PAGE_SIZE`] sets. Returns the slice
    /// of newly shown sets (empty when already exhausted).
    pub fn next_page(&mut self) -> &[StudySet] {
        let start = self.cursor;
        self.cursor = (self.cursor + PAGE_SIZE).min(self.sets.len());
        &self.sets[start..self.cursor]
    }

    /// Replace the backing list with a freshly fetched one and serve its
    /// first page. Used when "see more" exhausted the local sets.
    pub fn replace(&mut self, sets: Vec<StudySet>) {
        *self = Self::new(sets);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
