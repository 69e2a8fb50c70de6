//! Build lifecycle: running until exactly one terminal event fires.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BuildError, Result};

/// Where a build run stands in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuildState {
    /// The build tool is still running.
    #[default]
    Running,

    /// The build tool exited successfully.
    Successful,

    /// The build tool exited with a failure.
    Failed,
}

/// A lifecycle event fired by the driver when the build tool exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Transition {
    Success,
    Failure,
}

impl BuildState {
    /// Returns the state reached by firing `event` from `self`.
    ///
    /// Only `Running` has outgoing transitions. Firing anything from a
    /// terminal state is rejected with [`BuildError::InvalidTransition`].
    pub fn fire(self, event: Transition) -> Result<Self> {
        match (self, event) {
            (Self::Running, Transition::Success) => Ok(Self::Successful),
            (Self::Running, Transition::Failure) => Ok(Self::Failed),
            (from, event) => Err(BuildError::InvalidTransition { from, event }),
        }
    }

    /// True once the build reached `Successful` or `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Successful | Self::Failed)
    }
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Running => "running",
            Self::Successful => "successful",
            Self::Failed => "failed",
        })
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Failure => "failure",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_moves_to_either_terminal_state() {
        assert_eq!(
            BuildState::Running.fire(Transition::Success),
            Ok(BuildState::Successful)
        );
        assert_eq!(
            BuildState::Running.fire(Transition::Failure),
            Ok(BuildState::Failed)
        );
    }

    #[test]
    fn terminal_states_reject_every_event() {
        for from in [BuildState::Successful, BuildState::Failed] {
            for event in [Transition::Success, Transition::Failure] {
                assert_eq!(
                    from.fire(event),
                    Err(BuildError::InvalidTransition { from, event })
                );
            }
        }
    }

    #[test]
    fn terminal_predicate() {
        assert!(!BuildState::Running.is_terminal());
        assert!(BuildState::Successful.is_terminal());
        assert!(BuildState::Failed.is_terminal());
    }

    #[test]
    fn invalid_transition_message_names_state_and_event() {
        let err = BuildState::Failed.fire(Transition::Success).unwrap_err();
        assert_eq!(err.to_string(), "cannot fire success while build is failed");
    }
}
