//! vterm - a simulated terminal over a virtual file system
//!
//! A path-keyed in-memory file system, a small set of shell-like commands
//! that operate on it, and a session that records their output as history
//! and writes the file system back to durable storage after each change.

pub mod commands;
pub mod config;
pub mod fs;
pub mod logging;
pub mod session;
pub mod storage;

pub use commands::{CommandRegistry, Output};
pub use fs::{FsError, Node, VirtualFs};
pub use session::{EditorState, HistoryEntry, Session, SessionError, ShellOptions};
pub use storage::{FileStorage, MemoryStorage, Persistence, Storage};
