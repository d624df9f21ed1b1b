//! Loading file contents to attach to an agent prompt.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use steer_core::SteerError;
use thiserror::Error;

/// Placeholder content for files that are never read.
pub const IGNORED_CONTENT: &str = "Content Ignored\n";

/// Extensions (lowercase) whose content is not loaded.
const IGNORED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "svg", "mp4", "mp3", "log", "lock",
];

/// A loaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContentItem {
    pub file_path: String,
    pub file_name: String,
    pub file_content: String,
}

/// A file could not be loaded.
#[derive(Debug, Error)]
#[error("Failed to load {}: {message}", .path.display())]
pub struct LoadFileError {
    pub path: PathBuf,
    pub message: String,
}

impl From<LoadFileError> for SteerError {
    fn from(err: LoadFileError) -> Self {
        SteerError::io(err.to_string())
    }
}

/// Outcome of loading several files.
///
/// `files` keeps the order of the requested paths, minus the failures.
#[derive(Debug, Default)]
pub struct BatchLoad {
    pub files: Vec<FileContentItem>,
    pub errors: Vec<LoadFileError>,
}

impl BatchLoad {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Whether the loader skips reading `path`.
///
/// Matches the ignored extensions case-insensitively, and names ending in a
/// bare `.`.
pub fn is_ignored(path: &Path) -> bool {
    let name = path.to_string_lossy();
    if name.ends_with('.') {
        return true;
    }
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IGNORED_EXTENSIONS.contains(&ext.as_str()))
}

/// Loads one file as text, or the placeholder for ignored types.
///
/// Bytes that are not valid UTF-8 become U+FFFD; only I/O failures are errors.
pub async fn load_file_content(path: impl AsRef<Path>) -> Result<FileContentItem, LoadFileError> {
    let path = path.as_ref();
    let file_path = path.to_string_lossy().into_owned();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.clone());

    if is_ignored(path) {
        tracing::debug!(path = %file_path, "Skipping content of ignored file type");
        return Ok(FileContentItem {
            file_path,
            file_name,
            file_content: IGNORED_CONTENT.to_string(),
        });
    }

    let bytes = tokio::fs::read(path).await.map_err(|e| LoadFileError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let file_content = String::from_utf8_lossy(&bytes).into_owned();

    Ok(FileContentItem {
        file_path,
        file_name,
        file_content,
    })
}

/// Loads every path concurrently.
///
/// A failing file is logged and reported in [`BatchLoad::errors`]; it never
/// aborts the batch.
pub async fn get_contents_for_files<P>(paths: &[P]) -> BatchLoad
where
    P: AsRef<Path>,
{
    let results = join_all(paths.iter().map(load_file_content)).await;

    let mut batch = BatchLoad::default();
    for result in results {
        match result {
            Ok(item) => batch.files.push(item),
            Err(err) => {
                tracing::warn!("There was an error loading content for file: {err}");
                batch.errors.push(err);
            }
        }
    }
    batch
}
