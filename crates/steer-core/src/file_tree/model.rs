use serde::{Deserialize, Serialize};

/// A file or directory in a repository tree.
///
/// Files have no children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTreeNode {
    /// Display name (last path component).
    pub file_name: String,
    pub file_path: String,
    pub is_directory: bool,
    #[serde(default)]
    pub expanded: bool,
    #[serde(default)]
    pub children: Vec<FileTreeNode>,
}

impl FileTreeNode {
    pub fn file(file_name: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            file_path: file_path.into(),
            is_directory: false,
            expanded: false,
            children: Vec::new(),
        }
    }

    pub fn directory(
        file_name: impl Into<String>,
        file_path: impl Into<String>,
        children: Vec<FileTreeNode>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            file_path: file_path.into(),
            is_directory: true,
            expanded: false,
            children,
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(FileTreeNode::node_count).sum::<usize>()
    }

    /// Paths of every file in this subtree, depth first.
    pub fn file_paths(&self) -> Vec<&str> {
        let mut paths = Vec::new();
        self.collect_file_paths(&mut paths);
        paths
    }

    fn collect_file_paths<'a>(&'a self, out: &mut Vec<&'a str>) {
        if !self.is_directory {
            out.push(&self.file_path);
        }
        for child in &self.children {
            child.collect_file_paths(out);
        }
    }
}
