//! File System Types
//!
//! Node model and errors for the path-keyed virtual file system.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File system errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("no such file or directory: '{path}'")]
    NotFound { path: String },

    #[error("not a file: '{path}'")]
    NotAFile { path: String },

    #[error("not a directory: '{path}'")]
    NotADirectory { path: String },

    #[error("file already exists: '{path}'")]
    AlreadyExists { path: String },

    #[error("cannot place '{src}' inside itself at '{dest}'")]
    InvalidTarget { src: String, dest: String },
}

impl FsError {
    pub(crate) fn not_found(path: &str) -> Self {
        FsError::NotFound { path: path.to_string() }
    }
}

/// Current time truncated to milliseconds, the precision the stored format keeps.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// A regular file. Its size is always derived from its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredFile")]
pub struct FileNode {
    content: String,
    size: usize,
    last_modified: DateTime<Utc>,
}

impl FileNode {
    /// Create a file holding `content`, stamped with the current time.
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_mtime(content, now())
    }

    pub fn with_mtime(content: impl Into<String>, last_modified: DateTime<Utc>) -> Self {
        let content = content.into();
        Self {
            size: content.len(),
            content,
            last_modified,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Size of the content in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Replace the content, recomputing size and modification time.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.size = self.content.len();
        self.last_modified = now();
    }
}

/// On-disk shape of a file. `size` is ignored and recomputed, so a stale
/// value written by an older client can never leak back in.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredFile {
    #[serde(default)]
    content: String,
    #[serde(default)]
    last_modified: Option<DateTime<Utc>>,
}

impl From<StoredFile> for FileNode {
    fn from(stored: StoredFile) -> Self {
        FileNode::with_mtime(stored.content, stored.last_modified.unwrap_or_default())
    }
}

/// File system entry types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    File(FileNode),
    Directory,
}

impl Node {
    /// Check if entry is a file
    pub fn is_file(&self) -> bool {
        matches!(self, Node::File(_))
    }

    /// Check if entry is a directory
    pub fn is_directory(&self) -> bool {
        matches!(self, Node::Directory)
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Node::File(file) => Some(file),
            Node::Directory => None,
        }
    }
}

/// Directory entry with type information
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    pub name: String,
    pub is_directory: bool,
}
