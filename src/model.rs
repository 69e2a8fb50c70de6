//! Value types for a single build run.
//!
//! The aggregate in [`crate::action`] owns these; reporters read them back.

mod error_count;
mod metadata;
mod state;
mod step;
mod warning;

pub use error_count::ErrorCount;
pub use metadata::BuildMetadata;
pub use state::{BuildState, Transition};
pub use step::{BuildStep, StepError, StepParams};
pub use warning::{Warning, WarningParams};
