//! Hierarchical name filter over a file tree.

use super::model::FileTreeNode;

/// Prunes `tree` down to the files whose name contains `query`.
///
/// Returns `None` when there is no tree or the query is empty; callers show
/// the unfiltered original in that case. Otherwise the result is a fresh copy
/// of the root holding only the directories that still contain a match and
/// the matching files. Every directory in the result is expanded. Matching is
/// a case-insensitive substring test on the file name only.
pub fn filter_tree(tree: Option<&FileTreeNode>, query: Option<&str>) -> Option<FileTreeNode> {
    let tree = tree?;
    let query = query.filter(|q| !q.is_empty())?;
    Some(filter_children(tree, &query.to_lowercase()))
}

fn filter_children(node: &FileTreeNode, needle: &str) -> FileTreeNode {
    let mut children = Vec::new();

    for child in &node.children {
        if child.is_directory {
            let filtered = filter_children(child, needle);
            if !filtered.children.is_empty() {
                children.push(filtered);
            }
        } else if child.file_name.to_lowercase().contains(needle) {
            children.push(child.clone());
        }
    }

    FileTreeNode {
        file_name: node.file_name.clone(),
        file_path: node.file_path.clone(),
        is_directory: node.is_directory,
        expanded: true,
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> FileTreeNode {
        FileTreeNode::directory(
            "repo",
            "/repo",
            vec![
                FileTreeNode::directory(
                    "src",
                    "/repo/src",
                    vec![
                        FileTreeNode::file("Main.rs", "/repo/src/Main.rs"),
                        FileTreeNode::file("lib.rs", "/repo/src/lib.rs"),
                        FileTreeNode::directory(
                            "util",
                            "/repo/src/util",
                            vec![FileTreeNode::file("strings.rs", "/repo/src/util/strings.rs")],
                        ),
                    ],
                ),
                FileTreeNode::directory(
                    "docs",
                    "/repo/docs",
                    vec![FileTreeNode::file("guide.md", "/repo/docs/guide.md")],
                ),
                FileTreeNode::file("README.md", "/repo/README.md"),
            ],
        )
    }

    #[test]
    fn test_empty_query_or_missing_tree_yields_none() {
        let tree = sample_tree();
        assert_eq!(filter_tree(Some(&tree), Some("")), None);
        assert_eq!(filter_tree(Some(&tree), None), None);
        assert_eq!(filter_tree(None, Some("x")), None);
    }

    #[test]
    fn test_directory_keeps_only_matching_file() {
        let tree = FileTreeNode::directory(
            "root",
            "/root",
            vec![FileTreeNode::directory(
                "dir",
                "/root/dir",
                vec![
                    FileTreeNode::file("match.txt", "/root/dir/match.txt"),
                    FileTreeNode::file("other.txt", "/root/dir/other.txt"),
                ],
            )],
        );

        let filtered = filter_tree(Some(&tree), Some("match")).unwrap();

        assert_eq!(filtered.children.len(), 1);
        let dir = &filtered.children[0];
        assert!(dir.expanded);
        assert_eq!(dir.children.len(), 1);
        assert_eq!(dir.children[0].file_name, "match.txt");
    }

    #[test]
    fn test_directory_without_matches_is_pruned() {
        let tree = FileTreeNode::directory(
            "root",
            "/root",
            vec![FileTreeNode::directory(
                "dir",
                "/root/dir",
                vec![FileTreeNode::file("nope.txt", "/root/dir/nope.txt")],
            )],
        );

        let filtered = filter_tree(Some(&tree), Some("zzz")).unwrap();

        assert_eq!(filtered.file_name, "root");
        assert!(filtered.children.is_empty());
    }

    #[test]
    fn test_match_is_case_insensitive_and_name_only() {
        let tree = sample_tree();

        let filtered = filter_tree(Some(&tree), Some("MAIN")).unwrap();
        assert_eq!(filtered.file_paths(), vec!["/repo/src/Main.rs"]);

        // "src" appears in paths but never in a file name.
        let by_path = filter_tree(Some(&tree), Some("src")).unwrap();
        assert!(by_path.children.is_empty());
    }

    #[test]
    fn test_nested_match_expands_every_ancestor() {
        let tree = sample_tree();

        let filtered = filter_tree(Some(&tree), Some("strings")).unwrap();

        assert!(filtered.expanded);
        let src = &filtered.children[0];
        assert_eq!(src.file_name, "src");
        assert!(src.expanded);
        assert_eq!(src.children.len(), 1);
        assert!(src.children[0].expanded);
        assert_eq!(src.children[0].children[0].file_name, "strings.rs");
    }

    #[test]
    fn test_source_tree_is_untouched() {
        let tree = sample_tree();
        let before = tree.clone();

        let _ = filter_tree(Some(&tree), Some("md"));

        assert_eq!(tree, before);
    }

    #[test]
    fn test_refiltering_is_stable() {
        let tree = sample_tree();

        let once = filter_tree(Some(&tree), Some("md")).unwrap();
        let twice = filter_tree(Some(&once), Some("md")).unwrap();

        assert_eq!(once, twice);
        assert_eq!(
            once.file_paths(),
            vec!["/repo/docs/guide.md", "/repo/README.md"]
        );
    }
}
