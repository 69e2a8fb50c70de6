//! Bookkeeping for a single build run.
//!
//! A [`BuildAction`] records the steps and warnings an external collector
//! reports for one project/target/configuration build, tracks whether the
//! run is still going or ended in success or failure, and answers the
//! questions a reporter asks afterwards: did it fail, how many errors, how
//! long did it take.

pub mod action;
pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod model;
pub mod summary;

pub use action::BuildAction;
pub use error::{BuildError, Result};
pub use feed::{FeedEntry, FeedError, FeedRecord};
pub use model::{
    BuildMetadata, BuildState, BuildStep, ErrorCount, StepError, StepParams, Transition, Warning,
    WarningParams,
};
pub use summary::Summary;
