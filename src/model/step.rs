//! Build steps: one discrete unit of work reported by the collector.

use serde::{Deserialize, Serialize};

use crate::error::{BuildError, Result};

/// The parameter set a [`BuildStep`] is built from.
///
/// `kind` and `arguments` identify the step (e.g. `CompileC` with the source
/// path). `failed` and `errors` describe its outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepParams {
    pub kind: String,

    #[serde(default)]
    pub arguments: Vec<String>,

    #[serde(default)]
    pub failed: bool,

    #[serde(default)]
    pub errors: Vec<StepError>,
}

impl StepParams {
    /// Identifying parameters only, for looking a recorded step back up.
    pub fn identity<I, S>(kind: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: kind.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// A single error emitted by a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepError {
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// A completed build step.
///
/// Two steps are equal when their identifying parameters match, regardless
/// of outcome, so a step can be found again by re-supplying `kind` and
/// `arguments`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStep {
    kind: String,
    arguments: Vec<String>,
    failed: bool,
    errors: Vec<StepError>,
}

impl BuildStep {
    /// Builds a step from its parameters. The step kind must not be blank.
    pub fn new(params: StepParams) -> Result<Self> {
        let StepParams {
            kind,
            arguments,
            failed,
            errors,
        } = params;

        if kind.trim().is_empty() {
            return Err(BuildError::InvalidStep("step kind cannot be empty".into()));
        }

        Ok(Self {
            kind,
            arguments,
            failed,
            errors,
        })
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Error records in the order the collector reported them.
    pub fn errors(&self) -> &[StepError] {
        &self.errors
    }
}

impl PartialEq for BuildStep {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.arguments == other.arguments
    }
}

impl Eq for BuildStep {}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(file: &str) -> StepParams {
        StepParams::identity("CompileSwift", ["normal", "arm64", file])
    }

    #[test]
    fn equality_ignores_outcome() {
        let passing = BuildStep::new(compile("Main.swift")).unwrap();
        let failing = BuildStep::new(StepParams {
            failed: true,
            errors: vec![StepError {
                message: "cannot find 'x' in scope".into(),
                file: Some("Main.swift".into()),
                line: Some(3),
            }],
            ..compile("Main.swift")
        })
        .unwrap();

        assert_eq!(passing, failing);
        assert!(!passing.is_failed());
        assert!(failing.is_failed());
        assert_eq!(failing.errors().len(), 1);
    }

    #[test]
    fn different_arguments_are_different_steps() {
        let a = BuildStep::new(compile("Main.swift")).unwrap();
        let b = BuildStep::new(compile("App.swift")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_blank_kind() {
        let err = BuildStep::new(StepParams::identity("  ", ["x"])).unwrap_err();
        assert_eq!(
            err,
            BuildError::InvalidStep("step kind cannot be empty".into())
        );
    }

    #[test]
    fn params_deserialize_with_defaults() {
        let params: StepParams = serde_json::from_str(r#"{"kind":"Ld"}"#).unwrap();
        assert_eq!(params, StepParams::identity("Ld", Vec::<String>::new()));
    }
}
