//! Ordered, deduplicating page storage

use crate::page::{PageDescriptor, PageId};

/// Pages of one stack, bottom to top
///
/// Knows nothing about animation, offsets or other stacks. Keeping at least
/// one page around is the owning manager's job.
#[derive(Debug, Default)]
pub struct StackContainer {
    entries: Vec<PageDescriptor>,
}

impl StackContainer {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page. Returns `false` and leaves the container untouched if
    /// a page with the same id is already present at any level.
    pub fn push(&mut self, page: PageDescriptor) -> bool {
        if self.contains(page.id()) {
            return false;
        }
        self.entries.push(page);
        true
    }

    /// Remove and return the top page
    pub fn pop(&mut self) -> Option<PageDescriptor> {
        self.entries.pop()
    }

    /// Remove every page
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Current pages in display order (last is visible)
    pub fn snapshot(&self) -> &[PageDescriptor] {
        &self.entries
    }

    /// Check whether a page id is present
    pub fn contains(&self, id: PageId) -> bool {
        self.entries.iter().any(|entry| entry.id() == id)
    }

    /// Index of a page id
    pub fn position(&self, id: PageId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }

    /// Top page
    pub fn top(&self) -> Option<&PageDescriptor> {
        self.entries.last()
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut PageDescriptor> {
        self.entries.get_mut(index)
    }

    /// Number of pages
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
