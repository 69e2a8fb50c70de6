//! Error counts across the failed steps of a run.

use serde::{Deserialize, Serialize};

/// How many errors each failed step reported.
///
/// A run with no failed steps reports a plain `Zero` rather than an empty
/// list. Serialized untagged, so `Zero` is `0` and `PerStep` is `[n, ...]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Repr", try_from = "Repr")]
pub enum ErrorCount {
    Zero,
    /// One count per failed step, in the order the steps completed.
    PerStep(Vec<usize>),
}

/// Wire shape: a bare number or a list of numbers.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Repr {
    Scalar(usize),
    List(Vec<usize>),
}

impl From<ErrorCount> for Repr {
    fn from(count: ErrorCount) -> Self {
        match count {
            ErrorCount::Zero => Self::Scalar(0),
            ErrorCount::PerStep(counts) => Self::List(counts),
        }
    }
}

impl TryFrom<Repr> for ErrorCount {
    type Error = String;

    fn try_from(repr: Repr) -> Result<Self, Self::Error> {
        match repr {
            Repr::Scalar(0) => Ok(Self::Zero),
            Repr::Scalar(n) => Err(format!("scalar error count must be 0, got {n}")),
            Repr::List(counts) => Ok(Self::PerStep(counts)),
        }
    }
}

impl ErrorCount {
    /// Sum of all per-step counts.
    pub fn total(&self) -> usize {
        match self {
            Self::Zero => 0,
            Self::PerStep(counts) => counts.iter().sum(),
        }
    }
}
