//! Asset-loader source generation
//!
//! The application runtime loads compiled assets through a generated source
//! file: the production variant embeds the listed asset directories into the
//! binary, the development variant resolves the assets directory on disk at
//! startup (next to the executable, falling back to the output path). The
//! file is overwritten on every build.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;

use crate::config::{AssetsFileSpec, BuildMode};

/// Render the asset-loader source for the given mode and include list.
///
/// `output_dir` must be the manifest's project-relative output directory:
/// it is spliced into the generated source (after `$CARGO_MANIFEST_DIR/` in
/// production, as the development fallback path), where a machine-absolute
/// path would be meaningless.
pub fn render_assets_file(mode: BuildMode, includes: &[String], output_dir: &Path) -> String {
    let mut out = String::new();
    out.push_str("// DO NOT EDIT: generated by assetpipe\n\n");
    out.push_str("//! Compiled asset access for the application runtime.\n\n");

    match mode {
        BuildMode::Production => {
            out.push_str("use include_dir::{include_dir, Dir};\n\n");
            for include in includes {
                let _ = writeln!(
                    out,
                    "pub static {}: Dir<'static> = include_dir!(\"$CARGO_MANIFEST_DIR/{}/{}\");",
                    include.to_uppercase(),
                    output_dir.display(),
                    include,
                );
            }
        }
        BuildMode::Development => {
            out.push_str("use std::path::PathBuf;\n\n");
            out.push_str("/// Root of the compiled assets directory, resolved at startup.\n");
            out.push_str("pub fn assets_root() -> PathBuf {\n");
            out.push_str("    if let Ok(exe) = std::env::current_exe() {\n");
            out.push_str("        if let Some(dir) = exe.parent() {\n");
            out.push_str("            let candidate = dir.join(\"assets\");\n");
            out.push_str("            if candidate.is_dir() {\n");
            out.push_str("                return candidate;\n");
            out.push_str("            }\n");
            out.push_str("        }\n");
            out.push_str("    }\n");
            let _ = writeln!(out, "    PathBuf::from(\"{}\")", output_dir.display());
            out.push_str("}\n\n");
            out.push_str("/// Path of a single asset below the assets root.\n");
            out.push_str("pub fn asset_path(relative: &str) -> PathBuf {\n");
            out.push_str("    assets_root().join(relative)\n");
            out.push_str("}\n");
        }
    }

    out
}

/// Generate the asset-loader file at the spec's destination.
pub async fn write_assets_file(
    spec: &AssetsFileSpec,
    mode: BuildMode,
    project_root: &Path,
    output_dir: &Path,
) -> Result<()> {
    let dest = if spec.to.is_absolute() {
        spec.to.clone()
    } else {
        project_root.join(&spec.to)
    };
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = render_assets_file(mode, &spec.includes, output_dir);
    fs::write(&dest, content)
        .await
        .with_context(|| format!("Failed to write {}", dest.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn includes() -> Vec<String> {
        vec![
            "icons".to_string(),
            "static".to_string(),
            "templates".to_string(),
        ]
    }

    #[test]
    fn test_production_embeds_every_include() {
        let out = render_assets_file(
            BuildMode::Production,
            &includes(),
            Path::new("build/assets"),
        );
        assert!(out.starts_with("// DO NOT EDIT"));
        assert!(out.contains(
            "pub static ICONS: Dir<'static> = include_dir!(\"$CARGO_MANIFEST_DIR/build/assets/icons\");"
        ));
        assert!(out.contains("$CARGO_MANIFEST_DIR/build/assets/static"));
        assert!(out.contains("$CARGO_MANIFEST_DIR/build/assets/templates"));
    }

    #[test]
    fn test_development_resolves_at_runtime() {
        let out = render_assets_file(
            BuildMode::Development,
            &includes(),
            Path::new("build/assets"),
        );
        assert!(out.starts_with("// DO NOT EDIT"));
        assert!(out.contains("pub fn assets_root() -> PathBuf"));
        assert!(out.contains("PathBuf::from(\"build/assets\")"));
        assert!(!out.contains("include_dir"));
    }

    #[tokio::test]
    async fn test_writes_and_overwrites_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        let spec = AssetsFileSpec {
            to: PathBuf::from("src/assets_fs.rs"),
            includes: includes(),
        };

        write_assets_file(&spec, BuildMode::Development, root, Path::new("build/assets"))
            .await
            .unwrap();
        let first = std::fs::read_to_string(root.join("src/assets_fs.rs")).unwrap();
        assert!(first.contains("assets_root"));

        write_assets_file(&spec, BuildMode::Production, root, Path::new("build/assets"))
            .await
            .unwrap();
        let second = std::fs::read_to_string(root.join("src/assets_fs.rs")).unwrap();
        assert!(second.contains("include_dir"));
    }
}
