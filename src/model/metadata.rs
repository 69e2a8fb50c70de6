//! Build metadata: the project/target/configuration triple a run builds.

use serde::{Deserialize, Serialize};

/// What a build run is building. Set once when the run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildMetadata {
    pub project: String,
    pub target: String,
    pub configuration: String,

    /// Whether `configuration` is the project's default configuration.
    pub default: bool,
}

impl BuildMetadata {
    pub fn new(
        project: impl Into<String>,
        target: impl Into<String>,
        configuration: impl Into<String>,
        default: bool,
    ) -> Self {
        Self {
            project: project.into(),
            target: target.into(),
            configuration: configuration.into(),
            default,
        }
    }
}
