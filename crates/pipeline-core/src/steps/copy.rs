//! Glob-based copy lists (fonts, icons, images)

use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;

use crate::config::CopySpec;
use crate::fsops;

/// Copy everything matching the spec's glob into the destination directory.
///
/// The pattern resolves relative to the project root; the destination
/// resolves under the output directory. A matched directory has its
/// contents copied recursively into the destination, a matched file lands
/// under its own name. Returns the number of entries copied; zero matches
/// is not an error (copy lists routinely reference optional vendor paths).
pub async fn copy_glob(spec: &CopySpec, project_root: &Path, output_dir: &Path) -> Result<usize> {
    let pattern = project_root.join(&spec.from);
    let pattern = pattern
        .to_str()
        .with_context(|| format!("Glob pattern is not valid UTF-8: {}", pattern.display()))?;

    let dest = if spec.to.is_absolute() {
        spec.to.clone()
    } else {
        output_dir.join(&spec.to)
    };
    fs::create_dir_all(&dest)
        .await
        .with_context(|| format!("Failed to create directory: {}", dest.display()))?;

    let mut copied = 0;
    for entry in glob::glob(pattern).context("Invalid glob pattern")? {
        let path = entry.context("Failed to read glob match")?;

        if path.is_dir() {
            fsops::copy_dir_recursive(&path, &dest)
                .await
                .with_context(|| format!("Failed to copy directory: {}", path.display()))?;
        } else {
            let name = path
                .file_name()
                .with_context(|| format!("Glob match has no file name: {}", path.display()))?;
            fs::copy(&path, dest.join(name))
                .await
                .with_context(|| format!("Failed to copy file: {}", path.display()))?;
        }
        copied += 1;
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn spec(from: &str, to: &str) -> CopySpec {
        CopySpec {
            from: from.to_string(),
            to: PathBuf::from(to),
        }
    }

    #[tokio::test]
    async fn test_copies_glob_matches() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("fonts")).unwrap();
        std::fs::write(root.join("fonts/roboto-latin-400.woff2"), "a").unwrap();
        std::fs::write(root.join("fonts/roboto-latin-700.woff2"), "b").unwrap();
        std::fs::write(root.join("fonts/other.txt"), "c").unwrap();

        let out = root.join("build");
        let n = copy_glob(&spec("fonts/roboto-latin-*", "static/fonts"), root, &out)
            .await
            .unwrap();

        assert_eq!(n, 2);
        assert!(out.join("static/fonts/roboto-latin-400.woff2").is_file());
        assert!(out.join("static/fonts/roboto-latin-700.woff2").is_file());
        assert!(!out.join("static/fonts/other.txt").exists());
    }

    #[tokio::test]
    async fn test_zero_matches_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        let out = root.join("build");

        let n = copy_glob(&spec("missing/*.woff2", "static/fonts"), root, &out)
            .await
            .unwrap();

        assert_eq!(n, 0);
        // the destination directory is still prepared
        assert!(out.join("static/fonts").is_dir());
    }

    #[tokio::test]
    async fn test_matched_directory_contents_copied_into_dest() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("vendor/icons/outline")).unwrap();
        std::fs::write(root.join("vendor/icons/outline/x.svg"), "<svg/>").unwrap();

        let out = root.join("build");
        let n = copy_glob(&spec("vendor/icons", "icons"), root, &out)
            .await
            .unwrap();

        // contents land directly in dest, not nested under the source name
        assert_eq!(n, 1);
        assert!(out.join("icons/outline/x.svg").is_file());
        assert!(!out.join("icons/icons").exists());
    }
}
