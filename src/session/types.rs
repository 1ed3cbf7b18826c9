use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::commands::Output;
use crate::fs::FsError;

/// Working directory a session starts in.
pub const DEFAULT_CWD: &str = "/home/user";

/// Simulated latency of the `weather` lookup.
pub const DEFAULT_WEATHER_DELAY: Duration = Duration::from_millis(1000);

/// Options for creating a Session.
#[derive(Debug, Clone, Default)]
pub struct ShellOptions {
    /// Starting working directory
    pub cwd: Option<String>,
    /// Delay before `weather` answers
    pub weather_delay: Option<Duration>,
    /// Key the file system is stored under when building the `Persistence`
    pub storage_key: Option<String>,
}

/// One executed command line and what it printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub command: String,
    pub output: Output,
    pub timestamp: String,
}

/// Modal editor state. While a file is open no command is dispatched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Closed,
    Editing { path: String, draft: String },
}

impl EditorState {
    pub fn is_open(&self) -> bool {
        matches!(self, EditorState::Editing { .. })
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            EditorState::Editing { path, .. } => Some(path),
            EditorState::Closed => None,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            EditorState::Editing { draft, .. } => Some(draft),
            EditorState::Closed => None,
        }
    }
}

/// Misuse of the session API by the front end.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("editor is open on '{path}'; save or cancel first")]
    EditorOpen { path: String },

    #[error("no file is open in the editor")]
    EditorClosed,

    #[error("editor is open on '{open}', not '{requested}'")]
    EditorPathMismatch { open: String, requested: String },

    #[error(transparent)]
    Fs(#[from] FsError),
}
