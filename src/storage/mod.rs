//! Storage Module
//!
//! Key-value persistence for the virtual file system:
//! - MemoryStorage: process-local map (tests, `--memory`)
//! - FileStorage: a JSON object of key -> value kept in one file
//! - Persistence: binds a backend to the fixed state key

pub mod file;
pub mod memory;
pub mod persistence;
pub mod types;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use persistence::{Persistence, STORAGE_KEY};
pub use types::{Storage, StorageError};
