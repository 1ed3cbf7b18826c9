//! File System Module
//!
//! The virtual file system the shell operates on:
//! - path: literal path resolution against a working directory
//! - types: nodes and errors
//! - virtual_fs: the path-keyed map and its operations

pub mod path;
pub mod types;
pub mod virtual_fs;

pub use types::*;
pub use virtual_fs::VirtualFs;
