//! File tree model and search filter.

mod filter;
mod model;

pub use filter::filter_tree;
pub use model::FileTreeNode;
