//! Search results for the codebase sidebar.

use steer_core::file_tree::{FileTreeNode, filter_tree};
use steer_core::reactive::{Readable, Subscription, Writable};

/// Holds the filtered copy of the current file tree.
///
/// `None` means no filter is active and the unfiltered tree should be shown.
#[derive(Clone, Default)]
pub struct FilteredFiles {
    result: Writable<Option<FileTreeNode>>,
}

impl FilteredFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters `tree` by `query` and publishes the result.
    pub fn search(&self, query: Option<&str>, tree: Option<&FileTreeNode>) {
        tracing::debug!(query = ?query, "FilteredFiles::search");
        self.result.set(filter_tree(tree, query));
    }

    pub fn clear(&self) {
        self.result.set(None);
    }

    pub fn current(&self) -> Option<FileTreeNode> {
        self.result.get()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Option<FileTreeNode>) + Send + Sync + 'static,
    {
        self.result.subscribe(listener)
    }
}
