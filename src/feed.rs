//! Structured driver feed: a build run as JSON Lines.
//!
//! Each line is one [`FeedRecord`], tagged by `record`:
//!
//! ```text
//! {"record":"step","kind":"CompileSwift","arguments":["Main.swift"]}
//! {"record":"warning","file":"Main.swift","line":42}
//! {"record":"failure"}
//! ```
//!
//! The collector that produced the records has already parsed the build
//! tool's output; this module only replays them onto a [`BuildAction`].

use std::{fs, io, path::Path};

// Trait must be in scope for `.lines()` on BufReader.
use io::BufRead;

use serde::{Deserialize, Serialize};

use crate::action::BuildAction;
use crate::error::BuildError;
use crate::model::{StepParams, WarningParams};

/// Errors that can occur while loading or replaying a feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: {source}")]
    Build {
        line: usize,
        #[source]
        source: BuildError,
    },
}

/// One operation reported by the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "camelCase")]
pub enum FeedRecord {
    /// A step completed.
    Step(StepParams),

    /// A warning was discovered.
    Warning(WarningParams),

    /// The build tool exited successfully.
    Success,

    /// The build tool exited with a failure.
    Failure,
}

/// A record together with the 1-based line it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub line: usize,
    pub record: FeedRecord,
}

/// Loads every record from a JSON Lines file. Blank lines are skipped.
pub fn load(path: &Path) -> Result<Vec<FeedEntry>, FeedError> {
    let file = fs::File::open(path)?;
    read(io::BufReader::new(file))
}

/// Reads records from any buffered source.
pub fn read(reader: impl BufRead) -> Result<Vec<FeedEntry>, FeedError> {
    let mut entries = Vec::new();
    for (i, text) in reader.lines().enumerate() {
        let text = text?;
        let line = i + 1;
        if text.trim().is_empty() {
            continue;
        }
        let record =
            serde_json::from_str(&text).map_err(|source| FeedError::Json { line, source })?;
        entries.push(FeedEntry { line, record });
    }
    Ok(entries)
}

impl BuildAction {
    /// Applies a single record.
    pub fn apply(&mut self, record: FeedRecord) -> crate::error::Result<()> {
        match record {
            FeedRecord::Step(params) => self.add_step(params),
            FeedRecord::Warning(params) => self.add_warning(params),
            FeedRecord::Success => self.success(),
            FeedRecord::Failure => self.failure(),
        }
    }

    /// Applies entries in order, stopping at the first that fails.
    ///
    /// Entries before the failing one stay applied. The error carries the
    /// failing entry's source line.
    pub fn replay(
        &mut self,
        entries: impl IntoIterator<Item = FeedEntry>,
    ) -> Result<(), FeedError> {
        for FeedEntry { line, record } in entries {
            self.apply(record)
                .map_err(|source| FeedError::Build { line, source })?;
        }
        Ok(())
    }
}
