//! Path Resolution
//!
//! Paths are plain `/`-separated strings. Resolution is deliberately literal:
//! only a bare `..` token is special, and `.`/`..` segments inside a longer
//! token are kept as-is. Nothing here checks that a path exists.

/// Resolve a path token typed by the user against the current directory.
///
/// - `..` drops the last segment of `cwd` (never above `/`)
/// - absolute tokens are returned unchanged
/// - anything else is joined onto `cwd`
pub fn resolve(input: &str, cwd: &str) -> String {
    if input == ".." {
        parent(cwd)
    } else if input.starts_with('/') {
        input.to_string()
    } else {
        join(cwd, input)
    }
}

/// Join a name onto a directory path without normalizing it.
pub fn join(dir: &str, name: &str) -> String {
    if dir == "/" {
        format!("/{}", name)
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Parent directory of a path; the parent of `/` is `/`.
pub fn parent(path: &str) -> String {
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(pos) => path[..pos].to_string(),
    }
}

/// Last `/`-delimited segment of a path.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Prefix shared by every descendant key of `dir`.
///
/// Always ends with `/` so that `/a` never claims `/ab` as a child.
pub fn child_prefix(dir: &str) -> String {
    if dir == "/" {
        "/".to_string()
    } else {
        format!("{}/", dir)
    }
}
