//! Domain types for one run: the jobs to submit, the handle the remote
//! system gives back, and the per-job outcome reported at the end.

use serde::Deserialize;

/// One job to submit, derived from one member of the PDS location.
/// Immutable once built; the listing stage drops entries without a
/// member name before any `CandidateJob` exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateJob {
    pub dataset: String,
    pub member: String,
    pub account_number: String,
    pub system_affinity: Option<String>,
}

impl CandidateJob {
    pub fn new(
        dataset: impl Into<String>,
        member: impl Into<String>,
        account_number: impl Into<String>,
        system_affinity: Option<String>,
    ) -> Self {
        Self {
            dataset: dataset.into(),
            member: member.into(),
            account_number: account_number.into(),
            system_affinity,
        }
    }

    /// Display identity used in every message: `DATASET(MEMBER)`.
    pub fn identifier(&self) -> String {
        format!("{}({})", self.dataset, self.member)
    }
}

/// Handle for a submitted job as z/OSMF reports it. Owned exclusively by
/// the pipeline execution that created it and discarded after the return
/// code is classified.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobHandle {
    #[serde(rename = "jobname")]
    pub name: Option<String>,
    #[serde(rename = "jobid")]
    pub id: Option<String>,
    #[serde(rename = "retcode")]
    pub return_code: Option<String>,
    #[serde(rename = "status")]
    pub status: Option<String>,
}

/// Per-candidate result. Exactly one is produced per dispatched
/// candidate, whether the pipeline finished, errored, or timed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    pub succeeded: bool,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            succeeded: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            succeeded: false,
        }
    }
}

/// Classified form of a remote job's return code string. Success is a
/// completion-code form (`CC nnnn`) or a bare integer; anything else is
/// unrecognized and reported as a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnCode {
    Completion(String),
    Numeric(i32),
    Unrecognized(String),
}

impl ReturnCode {
    pub fn classify(code: &str) -> Self {
        if code.starts_with("CC") {
            return ReturnCode::Completion(code.to_string());
        }
        match code.parse::<i32>() {
            Ok(value) => ReturnCode::Numeric(value),
            Err(_) => ReturnCode::Unrecognized(code.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, ReturnCode::Unrecognized(_))
    }
}
