//! Bulk operation result types

use indexmap::IndexMap;

/// Outcome of a bulk operation over a set of selected items.
///
/// Every input item ends up in exactly one of the two collections, and both
/// preserve the order in which items were processed.
#[derive(Debug, Clone)]
pub struct BulkActionResult<T> {
    /// Items whose remote call completed without error.
    pub success_items: Vec<T>,
    /// Failed items keyed by id, each annotated with its error message.
    pub failed_items: IndexMap<String, T>,
}

impl<T> BulkActionResult<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of items accounted for.
    pub fn len(&self) -> usize {
        self.success_items.len() + self.failed_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.success_items.is_empty() && self.failed_items.is_empty()
    }

    /// True when no item failed.
    pub fn all_succeeded(&self) -> bool {
        self.failed_items.is_empty()
    }
}

impl<T> Default for BulkActionResult<T> {
    fn default() -> Self {
        Self {
            success_items: Vec::new(),
            failed_items: IndexMap::new(),
        }
    }
}
