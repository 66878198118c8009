//! Filesystem helpers shared by the staging engine and the copy step

use std::io;
use std::path::{Component, Path, PathBuf};

use tokio::fs;
use walkdir::WalkDir;

/// Recursively copy the contents of `source` into `dest`, creating `dest`
/// and any subdirectories as needed. Existing files are overwritten.
pub async fn copy_dir_recursive(source: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir_all(dest).await?;

    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry.map_err(io::Error::other)?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(io::Error::other)?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).await?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::copy(entry.path(), &target).await?;
        }
    }

    Ok(())
}

/// Compute the relative path from the directory `base` to `target`, purely
/// lexically (no filesystem access, symlinks are not resolved).
///
/// Both paths must be of the same kind (both relative to a common root, or
/// both absolute); when they are not, `target` is returned unchanged.
pub fn relative_from(target: &Path, base: &Path) -> PathBuf {
    if target.is_absolute() != base.is_absolute() {
        return target.to_path_buf();
    }

    let target_comps: Vec<Component> = target
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let base_comps: Vec<Component> = base
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let common = target_comps
        .iter()
        .zip(base_comps.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common..base_comps.len() {
        result.push("..");
    }
    for comp in &target_comps[common..] {
        result.push(comp.as_os_str());
    }
    if result.as_os_str().is_empty() {
        result.push(".");
    }
    result
}
