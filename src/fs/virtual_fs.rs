//! Virtual File System
//!
//! A flat map from absolute path to node. Directories are implied by key
//! prefixes: every descendant of `/a` is a key starting with `/a/`, so listing
//! and recursive removal are prefix scans instead of tree walks.
//!
//! Every mutating method either applies completely or returns an error
//! without touching the map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::path::{basename, child_prefix};
use super::types::{DirEntry, FileNode, FsError, Node};

const SAMPLE_NOTE: &str = "Welcome to the terminal!\nUse \"edit <filename>\" to edit files.";

/// Path-keyed virtual file system. Iteration follows insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VirtualFs {
    entries: IndexMap<String, Node>,
}

impl VirtualFs {
    /// Create a file system holding only the root directory.
    pub fn new() -> Self {
        let mut entries = IndexMap::new();
        entries.insert("/".to_string(), Node::Directory);
        Self { entries }
    }

    /// The layout a fresh session starts with: a home directory holding one
    /// directory and one sample note.
    pub fn seeded() -> Self {
        let mut fs = Self::new();
        for dir in ["/home", "/home/user", "/home/user/documents"] {
            fs.entries.insert(dir.to_string(), Node::Directory);
        }
        fs.entries.insert(
            "/home/user/documents/notes.txt".to_string(),
            Node::File(FileNode::new(SAMPLE_NOTE)),
        );
        fs
    }

    /// Decode the stored JSON form (`path -> {type, content?, size?, lastModified?}`).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut fs: VirtualFs = serde_json::from_str(json)?;
        fs.ensure_root();
        Ok(fs)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Insert the root directory if a loaded map lacks it.
    pub fn ensure_root(&mut self) {
        if !self.entries.contains_key("/") {
            self.entries.shift_insert(0, "/".to_string(), Node::Directory);
        }
    }

    pub fn get(&self, path: &str) -> Option<&Node> {
        self.entries.get(path)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(path, node)| (path.as_str(), node))
    }

    /// Succeeds only if `path` is a directory.
    pub fn require_directory(&self, path: &str) -> Result<(), FsError> {
        match self.entries.get(path) {
            Some(Node::Directory) => Ok(()),
            Some(Node::File(_)) => Err(FsError::NotADirectory { path: path.to_string() }),
            None => Err(FsError::not_found(path)),
        }
    }

    /// Direct children of `dir`, in insertion order.
    pub fn list(&self, dir: &str) -> Vec<DirEntry> {
        let prefix = child_prefix(dir);
        self.entries
            .iter()
            .filter(|(path, _)| path.as_str() != dir)
            .filter_map(|(path, node)| {
                let rest = path.strip_prefix(&prefix)?;
                if rest.is_empty() || rest.contains('/') {
                    return None;
                }
                Some(DirEntry {
                    name: basename(path).to_string(),
                    is_directory: node.is_directory(),
                })
            })
            .collect()
    }

    /// Create a directory. The parent is not required to exist.
    pub fn make_directory(&mut self, path: &str) -> Result<(), FsError> {
        if self.entries.contains_key(path) {
            return Err(FsError::AlreadyExists { path: path.to_string() });
        }
        self.entries.insert(path.to_string(), Node::Directory);
        Ok(())
    }

    /// Create an empty file, replacing whatever node was at `path`.
    pub fn touch(&mut self, path: &str) {
        self.entries.insert(path.to_string(), Node::File(FileNode::new("")));
    }

    /// Remove a node. Removing a directory also removes every key under it.
    /// Returns the number of keys removed.
    pub fn remove(&mut self, path: &str) -> Result<usize, FsError> {
        let node = self
            .entries
            .shift_remove(path)
            .ok_or_else(|| FsError::not_found(path))?;
        let mut removed = 1;
        if node.is_directory() {
            let prefix = child_prefix(path);
            let before = self.entries.len();
            self.entries.retain(|key, _| !key.starts_with(&prefix));
            removed += before - self.entries.len();
        }
        Ok(removed)
    }

    pub fn read(&self, path: &str) -> Result<&str, FsError> {
        match self.entries.get(path) {
            Some(Node::File(file)) => Ok(file.content()),
            Some(Node::Directory) => Err(FsError::NotAFile { path: path.to_string() }),
            None => Err(FsError::not_found(path)),
        }
    }

    /// Replace the content of an existing file.
    pub fn write(&mut self, path: &str, content: impl Into<String>) -> Result<(), FsError> {
        match self.entries.get_mut(path) {
            Some(Node::File(file)) => {
                file.set_content(content);
                Ok(())
            }
            Some(Node::Directory) => Err(FsError::NotAFile { path: path.to_string() }),
            None => Err(FsError::not_found(path)),
        }
    }

    /// Move `src` to `dest`, carrying a directory's descendants along.
    pub fn move_node(&mut self, src: &str, dest: &str) -> Result<(), FsError> {
        if src == dest {
            return if self.entries.contains_key(src) {
                Ok(())
            } else {
                Err(FsError::not_found(src))
            };
        }
        let subtree = self.subtree(src, dest)?;
        for (key, _) in &subtree {
            self.entries.shift_remove(key);
        }
        self.graft(src, dest, subtree);
        Ok(())
    }

    /// Copy `src` to `dest`, duplicating a directory's descendants.
    pub fn copy(&mut self, src: &str, dest: &str) -> Result<(), FsError> {
        if src == dest {
            return if self.entries.contains_key(src) {
                Ok(())
            } else {
                Err(FsError::not_found(src))
            };
        }
        let subtree = self.subtree(src, dest)?;
        self.graft(src, dest, subtree);
        Ok(())
    }

    /// Collect `src` and, for a directory, every key under it.
    fn subtree(&self, src: &str, dest: &str) -> Result<Vec<(String, Node)>, FsError> {
        let node = self.entries.get(src).ok_or_else(|| FsError::not_found(src))?;
        let mut subtree = vec![(src.to_string(), node.clone())];
        if node.is_directory() {
            let prefix = child_prefix(src);
            if dest.starts_with(&prefix) {
                return Err(FsError::InvalidTarget {
                    src: src.to_string(),
                    dest: dest.to_string(),
                });
            }
            subtree.extend(
                self.entries
                    .iter()
                    .filter(|(key, _)| key.starts_with(&prefix))
                    .map(|(key, node)| (key.clone(), node.clone())),
            );
        }
        Ok(subtree)
    }

    fn graft(&mut self, src: &str, dest: &str, subtree: Vec<(String, Node)>) {
        for (key, node) in subtree {
            let target = format!("{}{}", dest, &key[src.len()..]);
            self.entries.insert(target, node);
        }
    }
}

impl Default for VirtualFs {
    fn default() -> Self {
        Self::new()
    }
}
