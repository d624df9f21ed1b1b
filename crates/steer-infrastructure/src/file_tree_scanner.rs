//! Builds a [`FileTreeNode`] from a directory on disk.

use ignore::WalkBuilder;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use steer_core::file_tree::FileTreeNode;
use steer_core::{Result, SteerError};

/// Options for [`scan_directory`].
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Include entries whose name starts with `.`.
    pub include_hidden: bool,
    /// Skip entries matched by `.gitignore` (and `.ignore`, the repository's
    /// exclude file and the global git excludes), inside a git repository or
    /// not.
    pub respect_gitignore: bool,
    /// Deepest level whose children are listed; the root is level 0.
    /// `None` scans everything.
    pub max_depth: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            include_hidden: false,
            respect_gitignore: true,
            max_depth: None,
        }
    }
}

struct ScannedEntry {
    path: PathBuf,
    name: String,
    is_directory: bool,
}

/// Scans `root` into a tree.
///
/// Directories come before files, and siblings are sorted by name
/// case-insensitively. Symbolic links are listed as files and never
/// followed. A directory that cannot be read becomes an empty node.
///
/// # Errors
///
/// Returns an error if `root` is not a readable directory.
pub fn scan_directory(root: impl AsRef<Path>, options: &ScanOptions) -> Result<FileTreeNode> {
    let root = root.as_ref();
    let metadata = fs::metadata(root)?;
    if !metadata.is_dir() {
        return Err(SteerError::validation(format!(
            "{} is not a directory",
            root.display()
        )));
    }
    // The walker only logs an unreadable root.
    fs::read_dir(root)?;

    let walker = WalkBuilder::new(root)
        .hidden(!options.include_hidden)
        .git_ignore(options.respect_gitignore)
        .git_global(options.respect_gitignore)
        .git_exclude(options.respect_gitignore)
        .require_git(false)
        .ignore(options.respect_gitignore)
        .parents(options.respect_gitignore)
        .follow_links(false)
        // Entries one level below the deepest listed directory.
        .max_depth(options.max_depth.map(|max| max + 1))
        .build();

    let mut by_parent: HashMap<PathBuf, Vec<ScannedEntry>> = HashMap::new();
    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(root = %root.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }
        let Some(parent) = entry.path().parent() else {
            continue;
        };
        let is_directory = entry.file_type().is_some_and(|t| t.is_dir());
        by_parent
            .entry(parent.to_path_buf())
            .or_default()
            .push(ScannedEntry {
                path: entry.path().to_path_buf(),
                name: entry.file_name().to_string_lossy().into_owned(),
                is_directory,
            });
    }

    let mut node = FileTreeNode::directory(display_name(root), path_string(root), Vec::new());
    node.children = assemble(root, &mut by_parent);
    tracing::debug!(
        root = %root.display(),
        nodes = node.node_count(),
        "Scanned directory"
    );
    Ok(node)
}

fn assemble(dir: &Path, by_parent: &mut HashMap<PathBuf, Vec<ScannedEntry>>) -> Vec<FileTreeNode> {
    let Some(entries) = by_parent.remove(dir) else {
        return Vec::new();
    };

    let mut nodes: Vec<FileTreeNode> = entries
        .into_iter()
        .map(|entry| {
            if entry.is_directory {
                let children = assemble(&entry.path, by_parent);
                FileTreeNode::directory(entry.name, path_string(&entry.path), children)
            } else {
                FileTreeNode::file(entry.name, path_string(&entry.path))
            }
        })
        .collect();
    nodes.sort_by(compare_nodes);
    nodes
}

fn compare_nodes(a: &FileTreeNode, b: &FileTreeNode) -> Ordering {
    match (a.is_directory, b.is_directory) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a
            .file_name
            .to_lowercase()
            .cmp(&b.file_name.to_lowercase())
            .then_with(|| a.file_name.cmp(&b.file_name)),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path_string(path))
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
