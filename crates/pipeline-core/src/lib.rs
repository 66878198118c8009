//! Pipeline Core - Shared library for the assetpipe build tool
//!
//! This library implements a small, mode-aware asset staging pipeline for
//! web projects: it reads a declarative YAML manifest and executes staging
//! steps in order.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Primitives** - Filesystem helpers and the template staging
//!   engine (copy in production, symlink in development)
//! - **Layer 2: Steps** - Copy lists, asset-loader generation, external
//!   compiler invocation
//! - **Layer 3: Runner** - Manifest loading and ordered step execution
//!
//! # Example Usage
//!
//! ```ignore
//! use pipeline_core::{load_manifest, run_pipeline, BuildMode};
//!
//! let manifest = load_manifest(Path::new("pipeline.yaml"))?;
//! run_pipeline(&manifest, BuildMode::Development, Path::new(".")).await?;
//! ```

pub mod config;
pub mod fsops;
pub mod pipeline;
pub mod staging;
pub mod steps;

// Re-export main types for convenience
pub use config::{load_manifest, BuildMode, PipelineManifest, Step};
pub use pipeline::{run_pipeline, RunReport};
pub use staging::{stage, DestState, StageError, StageRequest};

/// Default manifest file name looked up in the project root
pub const DEFAULT_MANIFEST: &str = "pipeline.yaml";
