//! Infrastructure layer for Steer.
//!
//! File system access (configuration, file contents, directory scans),
//! notification sinks and in-memory remote collections.

pub mod config_service;
pub mod file_content;
pub mod file_tree_scanner;
pub mod in_memory_remote;
pub mod notification_sinks;
pub mod paths;
pub mod storage;

pub use config_service::ConfigService;
pub use file_content::{
    BatchLoad, FileContentItem, LoadFileError, get_contents_for_files, load_file_content,
};
pub use file_tree_scanner::{ScanOptions, scan_directory};
pub use in_memory_remote::{
    InMemoryConversations, InMemoryRemote, InMemoryRepositories, RemoteOperation,
    ScriptedFailure,
};
pub use notification_sinks::{ChannelNotificationSink, TracingNotificationSink};
pub use paths::{PathError, SteerPaths};
