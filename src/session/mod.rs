pub mod session;
pub mod types;

pub use session::Session;
pub use types::{EditorState, HistoryEntry, SessionError, ShellOptions, DEFAULT_CWD};
