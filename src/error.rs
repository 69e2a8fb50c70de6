//! Errors raised by the build-result core.
//!
//! Every failure here is a usage error by the driver: an event fired at the
//! wrong time, or a parameter set that cannot describe a step or warning.
//! Nothing is transient, so nothing is retried.

use crate::model::{BuildState, Transition};

/// Errors that can occur while recording a build run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("cannot fire {event} while build is {from}")]
    InvalidTransition { from: BuildState, event: Transition },

    #[error("invalid step: {0}")]
    InvalidStep(String),

    #[error("invalid warning: {0}")]
    InvalidWarning(String),
}

pub type Result<T> = core::result::Result<T, BuildError>;
