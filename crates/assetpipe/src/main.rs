//! assetpipe CLI - mode-aware asset staging for web projects

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use pipeline_core::{load_manifest, run_pipeline, BuildMode, DEFAULT_MANIFEST};

#[derive(Parser, Debug)]
#[command(name = "assetpipe")]
#[command(about = "Run the asset staging pipeline for a web project")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the pipeline (default: development mode)
    Build(BuildArgs),
    /// Parse the manifest and report its steps without touching the filesystem
    Validate(ValidateArgs),
}

#[derive(Parser, Debug, Default)]
pub struct BuildArgs {
    /// Build in production mode (materialize copies, no symlinks)
    #[arg(short, long)]
    pub production: bool,

    /// Manifest to use instead of pipeline.yaml in the project root
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Project root directory (defaults to the current directory)
    #[arg(long = "project-root")]
    pub project_root: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Manifest to use instead of pipeline.yaml in the project root
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Project root directory (defaults to the current directory)
    #[arg(long = "project-root")]
    pub project_root: Option<PathBuf>,
}

fn resolve_paths(
    manifest: Option<PathBuf>,
    project_root: Option<PathBuf>,
) -> (PathBuf, PathBuf) {
    let root = project_root.unwrap_or_else(|| PathBuf::from("."));
    let manifest = manifest.unwrap_or_else(|| root.join(DEFAULT_MANIFEST));
    (manifest, root)
}

async fn build(args: BuildArgs) -> Result<()> {
    let mode = if args.production {
        BuildMode::Production
    } else {
        BuildMode::Development
    };
    let (manifest_path, root) = resolve_paths(args.manifest, args.project_root);

    let manifest = load_manifest(&manifest_path)?;
    run_pipeline(&manifest, mode, &root).await?;
    Ok(())
}

fn validate(args: ValidateArgs) -> Result<()> {
    let (manifest_path, _root) = resolve_paths(args.manifest, args.project_root);

    let manifest = load_manifest(&manifest_path)?;
    println!(
        "{} {} ({} steps)",
        "Valid manifest:".green().bold(),
        manifest_path.display(),
        manifest.steps.len()
    );
    for step in &manifest.steps {
        println!("  {} {}", "->".blue(), step.label());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Some(Command::Build(build_args)) => build(build_args).await,
        Some(Command::Validate(validate_args)) => validate(validate_args),
        // No subcommand provided, default to a development build
        None => build(BuildArgs::default()).await,
    }
}
