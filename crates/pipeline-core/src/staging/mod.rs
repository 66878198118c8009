//! Template staging: real copy in production, symlink in development
//!
//! The destination may hold leftovers from a previous build in the other
//! mode (a stale symlink, a copied directory, a regular file). `stage`
//! inspects what is there and reconciles it before applying the mode
//! action, so repeated runs and mode switches converge on the right state.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;

use crate::config::BuildMode;
use crate::fsops;

#[derive(Debug, Error)]
pub enum StageError {
    #[error("filesystem error while staging")]
    Io(#[from] io::Error),

    #[error("path occupied by a conflicting entry: {0}")]
    PathConflict(PathBuf),
}

/// One staging invocation. Constructed fresh per run, never reused.
#[derive(Debug, Clone)]
pub struct StageRequest {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub mode: BuildMode,
}

impl StageRequest {
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>, mode: BuildMode) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            mode,
        }
    }

    /// The symlink target the development mode wants at `dest`: the source
    /// path expressed relative to the destination's parent directory.
    pub fn link_target(&self) -> PathBuf {
        let base = self.dest.parent().unwrap_or(Path::new(""));
        fsops::relative_from(&self.source, base)
    }
}

/// What currently occupies the destination path. Derived by inspection
/// immediately before acting, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestState {
    Absent,
    SymlinkCorrect,
    SymlinkStale(PathBuf),
    Directory,
    RegularFile,
}

/// Classify the destination. `NotFound` is the `Absent` state, not an error.
pub async fn inspect(dest: &Path, desired_target: &Path) -> Result<DestState, StageError> {
    let meta = match fs::symlink_metadata(dest).await {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(DestState::Absent),
        Err(err) => return Err(err.into()),
    };

    if meta.file_type().is_symlink() {
        let target = fs::read_link(dest).await?;
        if target == desired_target {
            Ok(DestState::SymlinkCorrect)
        } else {
            Ok(DestState::SymlinkStale(target))
        }
    } else if meta.is_dir() {
        Ok(DestState::Directory)
    } else {
        Ok(DestState::RegularFile)
    }
}

/// Ensure `dir` and all its ancestors exist as directories.
///
/// An ancestor occupied by anything other than a directory is a hard
/// conflict rather than a mode-dependent guess.
pub async fn ensure_dirs(dir: &Path) -> Result<(), StageError> {
    let mut cur = PathBuf::new();
    for comp in dir.components() {
        cur.push(comp);
        match fs::metadata(&cur).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(StageError::PathConflict(cur)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                fs::create_dir(&cur).await?;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Stage `source` at `dest` according to the request's build mode.
///
/// Production materializes a real copy; development places a relative
/// symlink. Idempotent: a second development run against an unchanged
/// destination performs no filesystem mutation.
pub async fn stage(req: &StageRequest) -> Result<(), StageError> {
    let link_target = req.link_target();

    if let Some(parent) = req.dest.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dirs(parent).await?;
        }
    }

    match inspect(&req.dest, &link_target).await? {
        DestState::Absent => {}
        DestState::SymlinkCorrect => match req.mode {
            // already staged
            BuildMode::Development => return Ok(()),
            BuildMode::Production => fs::remove_file(&req.dest).await?,
        },
        DestState::SymlinkStale(_) => {
            fs::remove_file(&req.dest).await?;
        }
        DestState::Directory => match req.mode {
            BuildMode::Development => fs::remove_dir_all(&req.dest).await?,
            // the recursive copy below refreshes it in place
            BuildMode::Production => {}
        },
        DestState::RegularFile => match req.mode {
            BuildMode::Production => fs::remove_file(&req.dest).await?,
            BuildMode::Development => {
                return Err(StageError::PathConflict(req.dest.clone()));
            }
        },
    }

    match req.mode {
        BuildMode::Production => fsops::copy_dir_recursive(&req.source, &req.dest).await?,
        BuildMode::Development => fs::symlink(&link_target, &req.dest).await?,
    }

    Ok(())
}
