//! Reporter snapshot of a build run.
//!
//! Collects every query a reporter needs into one serializable value, so
//! rendering (JSON here, anything else elsewhere) never touches the live
//! action.

use jiff::Timestamp;
use serde::Serialize;
use uuid::Uuid;

use crate::action::BuildAction;
use crate::model::{BuildMetadata, BuildState, BuildStep, ErrorCount, Warning};

/// Point-in-time view of a [`BuildAction`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub id: Uuid,
    pub label: String,
    pub metadata: BuildMetadata,
    pub state: BuildState,
    pub finished: bool,
    pub successful: bool,
    pub failed: bool,
    pub has_errors: bool,
    pub error_count: ErrorCount,
    pub error_total: usize,
    pub has_warnings: bool,
    pub warnings: Vec<WarningSummary>,
    pub steps_completed: usize,
    pub failed_steps: Vec<BuildStep>,
    pub last_step: Option<BuildStep>,
    pub started_at: Timestamp,
    pub finished_at: Option<Timestamp>,

    /// Elapsed seconds; absent while the build is running.
    pub duration_secs: Option<f64>,
}

/// A warning together with its rendered location.
///
/// The warning is nested so its free-form details cannot shadow `location`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningSummary {
    pub location: String,
    pub warning: Warning,
}

impl Summary {
    pub fn of(action: &BuildAction) -> Self {
        let error_count = action.error_count();
        Self {
            id: action.id(),
            label: action.label(),
            metadata: action.metadata().clone(),
            state: action.state(),
            finished: action.is_finished(),
            successful: action.is_successful(),
            failed: action.is_failed(),
            has_errors: action.has_errors(),
            error_total: error_count.total(),
            error_count,
            has_warnings: action.has_warnings(),
            warnings: action
                .warnings()
                .iter()
                .map(|w| WarningSummary {
                    location: w.location(),
                    warning: w.clone(),
                })
                .collect(),
            steps_completed: action.steps_completed().len(),
            failed_steps: action.failed_steps().into_iter().cloned().collect(),
            last_step: action.last_step().cloned(),
            started_at: action.started_at(),
            finished_at: action.finished_at(),
            duration_secs: action.duration().map(|d| d.as_secs_f64()),
        }
    }
}
