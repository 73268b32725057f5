//! Concurrent fan-out of submission pipelines over a bounded worker
//! pool, with a per-task harvest timeout and failure isolation.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::model::{CandidateJob, Outcome};
use crate::pipeline::SubmissionPipeline;

/// Result of waiting for one task. A timed-out or errored wait still
/// yields exactly one entry per candidate, so the run report stays
/// total over the dispatched set.
#[derive(Debug)]
pub enum TaskResult {
    Completed(Outcome),
    TimedOut { identifier: String, seconds: u64 },
    Errored { identifier: String, error: String },
}

impl TaskResult {
    pub fn into_outcome(self) -> Outcome {
        match self {
            TaskResult::Completed(outcome) => outcome,
            TaskResult::TimedOut {
                identifier,
                seconds,
            } => Outcome::failure(format!("{identifier} - {}", AppError::TaskTimeout(seconds))),
            TaskResult::Errored { identifier, error } => {
                Outcome::failure(format!("{identifier} - {error}"))
            }
        }
    }
}

pub struct Dispatcher {
    pipeline: Arc<SubmissionPipeline>,
    pool_size: usize,
    task_timeout: Duration,
}

impl Dispatcher {
    pub fn new(pipeline: Arc<SubmissionPipeline>, pool_size: usize, task_timeout: Duration) -> Self {
        Self {
            pipeline,
            // An empty pool would deadlock every task on permit acquire.
            pool_size: pool_size.max(1),
            task_timeout,
        }
    }

    /// Submit one pipeline execution per candidate on the bounded pool
    /// and harvest every result. Each wait is bounded by the task
    /// timeout, measured from when that task's result is awaited; one
    /// slow or failed task never blocks the others. Whatever is still
    /// running once every result has been harvested is aborted locally
    /// (any job already accepted remotely keeps running there).
    pub async fn dispatch(&self, candidates: Vec<CandidateJob>) -> Vec<TaskResult> {
        let semaphore = Arc::new(Semaphore::new(self.pool_size));
        let mut handles = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let semaphore = semaphore.clone();
            let pipeline = self.pipeline.clone();
            let identifier = candidate.identifier();
            let handle = tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return Outcome::failure(format!(
                            "{} - worker pool closed before execution",
                            candidate.identifier()
                        ))
                    }
                };
                pipeline.run(&candidate).await
            });
            handles.push((identifier, handle));
        }

        let abort_handles: Vec<_> = handles
            .iter()
            .map(|(_, handle)| handle.abort_handle())
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (identifier, handle) in handles {
            let result = match timeout(self.task_timeout, handle).await {
                Ok(Ok(outcome)) => {
                    debug!("harvested outcome for {identifier}");
                    TaskResult::Completed(outcome)
                }
                Ok(Err(join_error)) => {
                    warn!("task for {identifier} failed to join: {join_error}");
                    TaskResult::Errored {
                        identifier,
                        error: join_error.to_string(),
                    }
                }
                Err(_) => {
                    warn!(
                        "task for {identifier} did not finish within {}s",
                        self.task_timeout.as_secs()
                    );
                    TaskResult::TimedOut {
                        identifier,
                        seconds: self.task_timeout.as_secs(),
                    }
                }
            };
            results.push(result);
        }

        // Force-shutdown of the pool: abandon whatever is still running.
        for abort in abort_handles {
            abort.abort();
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_out_result_carries_identifier_and_duration() {
        let outcome = TaskResult::TimedOut {
            identifier: "HLQ.PROJ.JCL(JOB1)".to_string(),
            seconds: 300,
        }
        .into_outcome();
        assert!(!outcome.succeeded);
        assert_eq!(
            outcome.message,
            "HLQ.PROJ.JCL(JOB1) - timed out after 300s waiting for job task"
        );
    }

    #[test]
    fn errored_result_becomes_failure_outcome() {
        let outcome = TaskResult::Errored {
            identifier: "HLQ.PROJ.JCL(JOB2)".to_string(),
            error: "task panicked".to_string(),
        }
        .into_outcome();
        assert!(!outcome.succeeded);
        assert!(outcome.message.starts_with("HLQ.PROJ.JCL(JOB2) - "));
    }
}
