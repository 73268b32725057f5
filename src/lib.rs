//! Bulk submission of JCL jobs stored as PDS members to z/OSMF.
//!
//! Given a PDS location, every member becomes one candidate job. A
//! bounded worker pool runs the per-candidate pipeline (retrieve content
//! with retry, prepend a generated job card, submit, poll to OUTPUT,
//! classify the return code) and the outcomes are aggregated into a
//! success list and a failure list. Jobs are independent: one failure or
//! timeout never affects another.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod fetch;
pub mod jobcard;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod zosmf;

pub use config::Config;
pub use dispatcher::{Dispatcher, TaskResult};
pub use error::{AppError, Result};
pub use fetch::{ContentFetcher, RetryPolicy};
pub use model::{CandidateJob, JobHandle, Outcome, ReturnCode};
pub use pipeline::SubmissionPipeline;
pub use report::RunReport;
pub use zosmf::{MemberEntry, ZosServices, ZosmfClient};
