//! Pipeline manifest types and parsing
//!
//! The manifest (`pipeline.yaml`) declares the ordered list of staging steps
//! for a project: glob-based copy lists, template staging, asset-loader file
//! generation, and external compiler invocations.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Build mode supplied by the caller, consumed by every mode-aware step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Production,
    Development,
}

impl BuildMode {
    pub fn is_production(&self) -> bool {
        matches!(self, BuildMode::Production)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BuildMode::Production => "production",
            BuildMode::Development => "development",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Root manifest describing a project's asset pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineManifest {
    /// Base output directory for all staged assets
    pub output_dir: PathBuf,

    /// Steps executed in declaration order
    ///
    /// Steps are written as single-key maps (`- copy: {...}`), which is the
    /// singleton-map layout rather than serde_yaml's default `!tag` form.
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<Step>,
}

/// A single pipeline step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Copy files matching a glob into a destination directory
    Copy(CopySpec),
    /// Stage a template directory (copy in production, symlink in development)
    Templates(TemplatesSpec),
    /// Generate the asset-loader source file for the application runtime
    AssetsFile(AssetsFileSpec),
    /// Invoke an external compiler or optimizer
    Run(RunSpec),
}

impl Step {
    /// Short human-readable label for progress output
    pub fn label(&self) -> String {
        match self {
            Step::Copy(spec) => format!("copy {}", spec.from),
            Step::Templates(spec) => format!("templates {}", spec.from.display()),
            Step::AssetsFile(spec) => format!("assets_file {}", spec.to.display()),
            Step::Run(spec) => format!("run {}", spec.program),
        }
    }
}

/// Glob-based copy list (fonts, icons, images)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopySpec {
    /// Glob pattern, relative to the project root
    pub from: String,

    /// Destination directory, relative to the output directory
    pub to: PathBuf,
}

/// Template staging step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesSpec {
    /// Source template directory, relative to the project root
    pub from: PathBuf,

    /// Destination, relative to the output directory
    pub to: PathBuf,
}

/// Asset-loader source generation step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsFileSpec {
    /// Output source file, relative to the project root
    pub to: PathBuf,

    /// Asset directories (under `output_dir`) the loader exposes
    #[serde(default)]
    pub includes: Vec<String>,
}

/// External command step (SASS/JS compilers, minifiers)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSpec {
    pub program: String,

    #[serde(default)]
    pub args: Vec<String>,

    /// Restrict the step to one build mode; runs in both when absent
    #[serde(default)]
    pub mode: Option<BuildMode>,
}

/// Load and parse a pipeline manifest from disk
pub fn load_manifest(path: &Path) -> Result<PipelineManifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let manifest: PipelineManifest = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(manifest)
}
