//! Content retrieval with bounded retry. The only stage of the pipeline
//! that retries; everything downstream of it runs at most once.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

use crate::error::{AppError, Result};
use crate::jobcard;
use crate::model::CandidateJob;
use crate::zosmf::ZosServices;

/// Fixed-interval retry policy: `max_tries` attempts with `backoff`
/// between them. No jitter, no exponential growth.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_tries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_tries: u32, backoff_ms: u64) -> Self {
        Self {
            // A policy of zero tries would silently drop every job.
            max_tries: max_tries.max(1),
            backoff: Duration::from_millis(backoff_ms),
        }
    }
}

pub struct ContentFetcher {
    services: Arc<dyn ZosServices>,
    policy: RetryPolicy,
}

impl ContentFetcher {
    pub fn new(services: Arc<dyn ZosServices>, policy: RetryPolicy) -> Self {
        Self { services, policy }
    }

    /// Retrieve the member's JCL and prepend the generated job card.
    /// Transport errors and blank content are both retryable; after the
    /// policy is exhausted, the error carries the last transport error
    /// text, or a fixed message when the member was merely empty.
    pub async fn fetch(&self, candidate: &CandidateJob) -> Result<String> {
        let identifier = candidate.identifier();
        let mut last_error: Option<AppError> = None;

        for attempt in 1..=self.policy.max_tries {
            if attempt > 1 {
                sleep(self.policy.backoff).await;
            }
            match self.services.get_content(&identifier).await {
                Ok(Some(content)) if !content.trim().is_empty() => {
                    return Ok(format!("{}{}", jobcard::build_card(candidate), content));
                }
                Ok(_) => {
                    warn!(
                        "attempt {attempt}/{} for {identifier} returned no content",
                        self.policy.max_tries
                    );
                    last_error = None;
                }
                Err(e) => {
                    warn!(
                        "attempt {attempt}/{} for {identifier} failed: {e}",
                        self.policy.max_tries
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(match last_error {
            Some(e) => AppError::ContentRetrieval(e.to_string()),
            None => AppError::ContentRetrieval("cannot retrieve jcl content".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    use crate::model::JobHandle;
    use crate::zosmf::MemberEntry;

    struct BlankContent {
        attempts: AtomicU32,
    }

    #[async_trait]
    impl ZosServices for BlankContent {
        async fn list_members(&self, _dataset: &str) -> Result<Vec<MemberEntry>> {
            Ok(Vec::new())
        }

        async fn get_content(&self, _identifier: &str) -> Result<Option<String>> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Ok(Some(String::new()))
        }

        async fn submit_jcl(&self, _jcl: &str) -> Result<JobHandle> {
            unreachable!("fetch never submits")
        }

        async fn wait_for_output(&self, _handle: &JobHandle) -> Result<JobHandle> {
            unreachable!("fetch never monitors")
        }
    }

    fn candidate() -> CandidateJob {
        CandidateJob::new("HLQ.PROJ.JCL", "JOB1", "ACCT1", None)
    }

    #[tokio::test(start_paused = true)]
    async fn blank_content_exhausts_retries_with_backoff() {
        let services = Arc::new(BlankContent {
            attempts: AtomicU32::new(0),
        });
        let fetcher = ContentFetcher::new(services.clone(), RetryPolicy::new(3, 2000));

        let started = Instant::now();
        let err = fetcher.fetch(&candidate()).await.unwrap_err();

        assert_eq!(services.attempts.load(Ordering::SeqCst), 3);
        // Two backoff intervals between three attempts.
        assert_eq!(started.elapsed(), Duration::from_millis(4000));
        assert!(err.to_string().contains("cannot retrieve jcl content"));
    }

    struct FlakyThenGood {
        attempts: AtomicU32,
    }

    #[async_trait]
    impl ZosServices for FlakyThenGood {
        async fn list_members(&self, _dataset: &str) -> Result<Vec<MemberEntry>> {
            Ok(Vec::new())
        }

        async fn get_content(&self, _identifier: &str) -> Result<Option<String>> {
            if self.attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(AppError::Api {
                    status: 500,
                    message: "temporary outage".to_string(),
                });
            }
            Ok(Some("//STEP1 EXEC PGM=IEFBR14\n".to_string()))
        }

        async fn submit_jcl(&self, _jcl: &str) -> Result<JobHandle> {
            unreachable!("fetch never submits")
        }

        async fn wait_for_output(&self, _handle: &JobHandle) -> Result<JobHandle> {
            unreachable!("fetch never monitors")
        }
    }

    #[tokio::test(start_paused = true)]
    async fn transient_error_recovers_and_prefixes_job_card() {
        let services = Arc::new(FlakyThenGood {
            attempts: AtomicU32::new(0),
        });
        let fetcher = ContentFetcher::new(services.clone(), RetryPolicy::new(5, 2000));

        let payload = fetcher.fetch(&candidate()).await.unwrap();

        assert_eq!(services.attempts.load(Ordering::SeqCst), 2);
        assert!(payload.starts_with("//JOB1 JOB (ACCT1),"));
        assert!(payload.ends_with("//STEP1 EXEC PGM=IEFBR14\n"));
    }
}
