//! Warnings: non-fatal diagnostics tied to a source location.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BuildError, Result};

/// The parameter set a [`Warning`] is built from.
///
/// `file` and `line` are named; anything else the collector sends lands in
/// `details` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(flatten)]
    pub details: BTreeMap<String, Value>,
}

impl WarningParams {
    pub fn at(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: Some(file.into()),
            line: Some(line),
            ..Self::default()
        }
    }
}

/// A recorded warning.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,

    #[serde(flatten)]
    details: BTreeMap<String, Value>,
}

impl Warning {
    /// Builds a warning. A `file` that is present must not be blank.
    pub fn new(params: WarningParams) -> Result<Self> {
        let WarningParams {
            file,
            line,
            message,
            details,
        } = params;

        if file.as_deref().is_some_and(|f| f.trim().is_empty()) {
            return Err(BuildError::InvalidWarning(
                "warning file cannot be empty".into(),
            ));
        }

        Ok(Self {
            file,
            line,
            message,
            details,
        })
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Free-form fields beyond file, line and message.
    pub fn details(&self) -> &BTreeMap<String, Value> {
        &self.details
    }

    /// Human-readable location, e.g. `in Main.swift:42`.
    pub fn location(&self) -> String {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => format!("in {file}:{line}"),
            (Some(file), None) => format!("in {file}"),
            (None, _) => "in unknown location".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_combines_file_and_line() {
        let warning = Warning::new(WarningParams::at("Main.swift", 42)).unwrap();
        assert_eq!(warning.location(), "in Main.swift:42");
    }

    #[test]
    fn location_without_line() {
        let warning = Warning::new(WarningParams {
            file: Some("Info.plist".into()),
            ..WarningParams::default()
        })
        .unwrap();
        assert_eq!(warning.location(), "in Info.plist");
    }

    #[test]
    fn location_without_file() {
        let warning = Warning::new(WarningParams::default()).unwrap();
        assert_eq!(warning.location(), "in unknown location");
    }

    #[test]
    fn rejects_blank_file() {
        let err = Warning::new(WarningParams::at("", 1)).unwrap_err();
        assert_eq!(
            err,
            BuildError::InvalidWarning("warning file cannot be empty".into())
        );
    }

    #[test]
    fn unknown_fields_are_kept_as_details() {
        let params: WarningParams = serde_json::from_str(
            r#"{"file":"View.swift","line":7,"message":"unused variable","column":12}"#,
        )
        .unwrap();
        let warning = Warning::new(params).unwrap();

        assert_eq!(warning.message(), Some("unused variable"));
        assert_eq!(warning.details().get("column"), Some(&Value::from(12)));
        assert_eq!(warning.location(), "in View.swift:7");
    }
}
