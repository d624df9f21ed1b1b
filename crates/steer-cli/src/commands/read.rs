use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use steer_infrastructure::{FileContentItem, get_contents_for_files};

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Files to load
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Print the loaded files as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ReadArgs) -> Result<()> {
    let batch = get_contents_for_files(&args.paths).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&batch.files)?);
    } else {
        for item in &batch.files {
            print!("{}", format_item(item));
        }
    }

    if !batch.is_complete() {
        for err in &batch.errors {
            eprintln!("{err}");
        }
        anyhow::bail!(
            "{} of {} file(s) could not be loaded",
            batch.errors.len(),
            args.paths.len()
        );
    }
    Ok(())
}

/// Formats a file as a fenced block headed by its path.
pub fn format_item(item: &FileContentItem) -> String {
    let mut content = item.file_content.clone();
    if !content.ends_with('\n') {
        content.push('\n');
    }
    format!("--- {}\n```\n{}```\n", item.file_path, content)
}
