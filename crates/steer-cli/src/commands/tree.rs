use anyhow::{Context, Result};
use clap::Args;
use std::fmt::Write as _;
use std::path::PathBuf;
use steer_application::FilteredFiles;
use steer_core::file_tree::FileTreeNode;
use steer_infrastructure::{ScanOptions, scan_directory};

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Directory to scan
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Only show files whose name contains this text (case-insensitive)
    #[arg(short, long)]
    pub query: Option<String>,

    /// Include entries starting with '.'
    #[arg(long)]
    pub hidden: bool,

    /// List entries matched by .gitignore too
    #[arg(long)]
    pub no_ignore: bool,

    /// Do not descend below this depth
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Print the tree as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: TreeArgs) -> Result<()> {
    let options = ScanOptions {
        include_hidden: args.hidden,
        respect_gitignore: !args.no_ignore,
        max_depth: args.max_depth,
    };
    let root = args.root.clone();
    let tree = tokio::task::spawn_blocking(move || scan_directory(&root, &options))
        .await
        .context("Directory scan panicked")?
        .with_context(|| format!("Failed to scan {}", args.root.display()))?;

    let search = FilteredFiles::new();
    search.search(args.query.as_deref(), Some(&tree));
    let shown = search.current().unwrap_or(tree);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
    } else {
        print!("{}", render(&shown));
    }
    Ok(())
}

/// Renders `node` as an indented listing, directories suffixed with `/`.
pub fn render(node: &FileTreeNode) -> String {
    let mut out = String::new();
    render_into(node, 0, &mut out);
    out
}

fn render_into(node: &FileTreeNode, depth: usize, out: &mut String) {
    let suffix = if node.is_directory { "/" } else { "" };
    let _ = writeln!(out, "{}{}{}", "  ".repeat(depth), node.file_name, suffix);
    for child in &node.children {
        render_into(child, depth + 1, out);
    }
}
