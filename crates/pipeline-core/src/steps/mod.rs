//! Pipeline step implementations
//!
//! Each step consumes its spec from the manifest plus the resolved project
//! paths and active build mode. Steps are synchronous-in-effect: they run
//! to completion before the next one starts.

pub mod assets_gen;
pub mod copy;
pub mod run;

pub use assets_gen::write_assets_file;
pub use copy::copy_glob;
pub use run::run_program;

/// What a step did, for the runner's progress line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step ran; the payload counts copied files where that is meaningful
    Done(Option<usize>),
    /// Step was gated to the other build mode
    Skipped,
}
