//! Pipeline runner
//!
//! Executes the manifest's steps in declaration order, single-threaded and
//! run-to-completion. A failing step aborts the build; earlier steps are
//! not rolled back.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::{BuildMode, PipelineManifest, Step};
use crate::staging::StageRequest;
use crate::steps::{self, StepOutcome};

/// Summary of a completed pipeline run
#[derive(Debug, Default)]
pub struct RunReport {
    pub executed: usize,
    pub skipped: usize,
}

/// Run every step of the manifest against the project root.
pub async fn run_pipeline(
    manifest: &PipelineManifest,
    mode: BuildMode,
    project_root: &Path,
) -> Result<RunReport> {
    let output_dir = if manifest.output_dir.is_absolute() {
        manifest.output_dir.clone()
    } else {
        project_root.join(&manifest.output_dir)
    };

    println!(
        "{}",
        format!(
            "Building assets in {} mode ({} steps)...",
            mode,
            manifest.steps.len()
        )
        .cyan()
        .bold()
    );
    println!();

    let mut report = RunReport::default();
    for step in &manifest.steps {
        print!("  {} {}...", "->".blue(), step.label());

        let outcome = execute_step(step, mode, project_root, &output_dir, &manifest.output_dir)
            .await
            .with_context(|| format!("Step failed: {}", step.label()))?;

        match outcome {
            StepOutcome::Done(Some(count)) => {
                println!(" {} ({} copied)", "done".green(), count);
                if count == 0 {
                    eprintln!(
                        "{} No files matched: {}",
                        "Warning:".yellow(),
                        step.label()
                    );
                }
                report.executed += 1;
            }
            StepOutcome::Done(None) => {
                println!(" {}", "done".green());
                report.executed += 1;
            }
            StepOutcome::Skipped => {
                println!(" {}", "skipped".yellow());
                report.skipped += 1;
            }
        }
    }

    println!();
    println!(
        "{}",
        format!(
            "Finished: {} steps executed, {} skipped",
            report.executed, report.skipped
        )
        .green()
        .bold()
    );
    Ok(report)
}

async fn execute_step(
    step: &Step,
    mode: BuildMode,
    project_root: &Path,
    output_dir: &Path,
    // as declared in the manifest, for paths that end up in generated source
    raw_output_dir: &Path,
) -> Result<StepOutcome> {
    match step {
        Step::Copy(spec) => {
            let count = steps::copy_glob(spec, project_root, output_dir).await?;
            Ok(StepOutcome::Done(Some(count)))
        }
        Step::Templates(spec) => {
            let source = if spec.from.is_absolute() {
                spec.from.clone()
            } else {
                project_root.join(&spec.from)
            };
            let dest = if spec.to.is_absolute() {
                spec.to.clone()
            } else {
                output_dir.join(&spec.to)
            };
            let request = StageRequest::new(source, dest, mode);
            crate::staging::stage(&request)
                .await
                .context("Failed to stage templates")?;
            Ok(StepOutcome::Done(None))
        }
        Step::AssetsFile(spec) => {
            steps::write_assets_file(spec, mode, project_root, raw_output_dir).await?;
            Ok(StepOutcome::Done(None))
        }
        Step::Run(spec) => steps::run_program(spec, mode, project_root).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_manifest;

    const MANIFEST: &str = r#"
output_dir: build/assets
steps:
  - copy:
      from: "resources/fonts/*.woff2"
      to: static/fonts
  - templates:
      from: resources/views
      to: templates
  - assets_file:
      to: generated/assets_fs.rs
      includes: [static, templates]
"#;

    fn project() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("resources/fonts")).unwrap();
        std::fs::write(root.join("resources/fonts/a.woff2"), "f").unwrap();
        std::fs::create_dir_all(root.join("resources/views")).unwrap();
        std::fs::write(root.join("resources/views/home.html"), "<home>").unwrap();
        std::fs::write(root.join("pipeline.yaml"), MANIFEST).unwrap();
        tmp
    }

    #[tokio::test]
    async fn test_development_build() {
        let tmp = project();
        let root = tmp.path();
        let manifest = load_manifest(&root.join("pipeline.yaml")).unwrap();

        let report = run_pipeline(&manifest, BuildMode::Development, root)
            .await
            .unwrap();

        assert_eq!(report.executed, 3);
        assert_eq!(report.skipped, 0);
        assert!(root.join("build/assets/static/fonts/a.woff2").is_file());
        let templates = root.join("build/assets/templates");
        assert!(std::fs::symlink_metadata(&templates).unwrap().is_symlink());
        let generated =
            std::fs::read_to_string(root.join("generated/assets_fs.rs")).unwrap();
        assert!(generated.contains("assets_root"));
        // the fallback path is the manifest's relative output dir, not the
        // absolute project root it was resolved against
        assert!(generated.contains("PathBuf::from(\"build/assets\")"));
        assert!(!generated.contains(root.to_str().unwrap()));
    }

    #[tokio::test]
    async fn test_production_build() {
        let tmp = project();
        let root = tmp.path();
        let manifest = load_manifest(&root.join("pipeline.yaml")).unwrap();

        run_pipeline(&manifest, BuildMode::Production, root)
            .await
            .unwrap();

        let templates = root.join("build/assets/templates");
        assert!(!std::fs::symlink_metadata(&templates).unwrap().is_symlink());
        assert!(templates.join("home.html").is_file());
        let generated =
            std::fs::read_to_string(root.join("generated/assets_fs.rs")).unwrap();
        assert!(generated.contains("$CARGO_MANIFEST_DIR/build/assets/templates"));
        assert!(!generated.contains(root.to_str().unwrap()));
    }

    #[tokio::test]
    async fn test_mode_switch_converges() {
        let tmp = project();
        let root = tmp.path();
        let manifest = load_manifest(&root.join("pipeline.yaml")).unwrap();

        // dev build leaves a symlink, the following prod build must replace it
        run_pipeline(&manifest, BuildMode::Development, root)
            .await
            .unwrap();
        run_pipeline(&manifest, BuildMode::Production, root)
            .await
            .unwrap();

        let templates = root.join("build/assets/templates");
        assert!(!std::fs::symlink_metadata(&templates).unwrap().is_symlink());
        assert!(templates.join("home.html").is_file());
    }
}
