//! The build action: the record of one build run.
//!
//! A driver creates a [`BuildAction`] when the build tool starts, appends
//! steps and warnings as the collector reports them, then fires exactly one
//! of [`BuildAction::success`] or [`BuildAction::failure`] when the tool
//! exits. Reporters query the action afterwards.

use jiff::{SignedDuration, Timestamp};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::model::{
    BuildMetadata, BuildState, BuildStep, ErrorCount, StepParams, Transition, Warning,
    WarningParams,
};

/// Label used when the driver does not supply one.
pub const DEFAULT_LABEL: &str = "build";

/// One build run of a project, target and configuration.
#[derive(Debug, Clone)]
pub struct BuildAction {
    id: Uuid,
    metadata: BuildMetadata,
    label: String,
    started_at: Timestamp,

    /// Set exactly when `state` becomes terminal.
    finished_at: Option<Timestamp>,
    state: BuildState,

    steps_completed: Vec<BuildStep>,
    warnings: Vec<Warning>,
}

impl BuildAction {
    /// Starts a run labelled [`DEFAULT_LABEL`].
    pub fn new(metadata: BuildMetadata) -> Self {
        Self::with_label(metadata, DEFAULT_LABEL)
    }

    /// Starts a run with an explicit label (e.g. `"clean"`, `"TEST"`).
    pub fn with_label(metadata: BuildMetadata, label: impl Into<String>) -> Self {
        let action = Self {
            id: Uuid::new_v4(),
            metadata,
            label: label.into(),
            started_at: Timestamp::now(),
            finished_at: None,
            state: BuildState::Running,
            steps_completed: Vec::new(),
            warnings: Vec::new(),
        };
        debug!(
            id = %action.id,
            project = %action.metadata.project,
            target = %action.metadata.target,
            configuration = %action.metadata.configuration,
            "build started"
        );
        action
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn metadata(&self) -> &BuildMetadata {
        &self.metadata
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<Timestamp> {
        self.finished_at
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    // ── Lifecycle ──

    /// Marks the run successful. Fails if the run already finished.
    pub fn success(&mut self) -> Result<()> {
        self.fire(Transition::Success)
    }

    /// Marks the run failed. Fails if the run already finished.
    pub fn failure(&mut self) -> Result<()> {
        self.fire(Transition::Failure)
    }

    fn fire(&mut self, event: Transition) -> Result<()> {
        let next = self.state.fire(event).inspect_err(|e| {
            warn!(id = %self.id, %e, "rejected build transition");
        })?;

        // The wall clock may step backwards; never finish before starting.
        let finished_at = Timestamp::now().max(self.started_at);
        self.state = next;
        self.finished_at = Some(finished_at);

        info!(
            id = %self.id,
            state = %next,
            steps = self.steps_completed.len(),
            warnings = self.warnings.len(),
            "build finished"
        );
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn is_successful(&self) -> bool {
        self.state == BuildState::Successful
    }

    pub fn is_failed(&self) -> bool {
        self.state == BuildState::Failed
    }

    /// Elapsed time between start and finish. `None` while running.
    pub fn duration(&self) -> Option<SignedDuration> {
        self.finished_at
            .map(|finished| finished.duration_since(self.started_at))
    }

    // ── Steps ──

    /// Records a completed step.
    pub fn add_step(&mut self, params: StepParams) -> Result<()> {
        let step = BuildStep::new(params)?;
        debug!(
            id = %self.id,
            kind = step.kind(),
            failed = step.is_failed(),
            "step completed"
        );
        self.steps_completed.push(step);
        Ok(())
    }

    /// Steps in completion order.
    pub fn steps_completed(&self) -> &[BuildStep] {
        &self.steps_completed
    }

    /// Finds the first recorded step whose identifying parameters match.
    ///
    /// Earlier steps shadow later ones with the same identity. Parameters
    /// that cannot form a step match nothing.
    pub fn step_with_params(&self, params: StepParams) -> Option<&BuildStep> {
        let probe = BuildStep::new(params).ok()?;
        self.steps_completed.iter().find(|step| **step == probe)
    }

    pub fn last_step(&self) -> Option<&BuildStep> {
        self.steps_completed.last()
    }

    /// Failed steps, in completion order.
    pub fn failed_steps(&self) -> Vec<&BuildStep> {
        self.steps_completed
            .iter()
            .filter(|step| step.is_failed())
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.steps_completed.iter().any(BuildStep::is_failed)
    }

    /// Errors per failed step, or [`ErrorCount::Zero`] when none failed.
    pub fn error_count(&self) -> ErrorCount {
        if !self.has_errors() {
            return ErrorCount::Zero;
        }
        ErrorCount::PerStep(
            self.failed_steps()
                .iter()
                .map(|step| step.errors().len())
                .collect(),
        )
    }

    // ── Warnings ──

    /// Records a warning.
    pub fn add_warning(&mut self, params: WarningParams) -> Result<()> {
        let warning = Warning::new(params)?;
        debug!(id = %self.id, location = %warning.location(), "warning recorded");
        self.warnings.push(warning);
        Ok(())
    }

    /// Warnings in discovery order.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    // ── Metadata ──

    /// The run label, lowercased with the first letter capitalized
    /// (`"DEBUG"` → `"Debug"`).
    pub fn label(&self) -> String {
        let lower = self.label.to_lowercase();
        let mut chars = lower.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn project_name(&self) -> &str {
        &self.metadata.project
    }

    pub fn target(&self) -> &str {
        &self.metadata.target
    }

    pub fn configuration(&self) -> &str {
        &self.metadata.configuration
    }

    pub fn is_default_configuration(&self) -> bool {
        self.metadata.default
    }
}
