//! Mapping request targets onto files under the served directory.
//!
//! The traversal guard is deliberately coarse: it rejects any target with
//! `..` in it, more than [`MAX_PATH_DEPTH`] slashes, or a resource name that
//! is anything but plain relative components. No canonicalization happens
//! after that.

use std::path::{Component, Path, PathBuf};

/// Maximum number of `/` characters allowed in a target.
pub const MAX_PATH_DEPTH: usize = 2;

/// Served when the target names the root.
pub const DEFAULT_RESOURCE: &str = "index.html";

/// Returns `true` when the target may touch the filesystem.
pub fn is_safe_target(target: &str) -> bool {
    !target.contains("..")
        && target.matches('/').count() <= MAX_PATH_DEPTH
        && Path::new(resource_name(target))
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// Strips one leading `/` and substitutes the default resource for an empty name.
pub fn resource_name(target: &str) -> &str {
    let name = target.strip_prefix('/').unwrap_or(target);
    if name.is_empty() { DEFAULT_RESOURCE } else { name }
}

/// Resolves a sanitized target against `root`.
pub fn resolve(root: &Path, target: &str) -> PathBuf {
    root.join(resource_name(target))
}
