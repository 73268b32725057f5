//! Per-candidate submission pipeline: fetch → submit → poll-to-terminal
//! → classify. Every error is converted to a failure [`Outcome`] here;
//! nothing propagates to the dispatcher.

use std::sync::Arc;
use tracing::info;

use crate::error::{AppError, Result};
use crate::fetch::{ContentFetcher, RetryPolicy};
use crate::model::{CandidateJob, Outcome, ReturnCode};
use crate::zosmf::ZosServices;

pub struct SubmissionPipeline {
    services: Arc<dyn ZosServices>,
    fetcher: ContentFetcher,
}

impl SubmissionPipeline {
    pub fn new(services: Arc<dyn ZosServices>, retry: RetryPolicy) -> Self {
        let fetcher = ContentFetcher::new(services.clone(), retry);
        Self { services, fetcher }
    }

    /// Run the full pipeline for one candidate. Always produces exactly
    /// one outcome; failure messages are `"<identifier> - <error>"`.
    pub async fn run(&self, candidate: &CandidateJob) -> Outcome {
        let identifier = candidate.identifier();
        match self.execute(candidate, &identifier).await {
            Ok(outcome) => outcome,
            Err(e) => Outcome::failure(format!("{identifier} - {e}")),
        }
    }

    async fn execute(&self, candidate: &CandidateJob, identifier: &str) -> Result<Outcome> {
        let payload = self.fetcher.fetch(candidate).await?;

        let handle = self.services.submit_jcl(&payload).await?;
        let name = handle
            .name
            .as_deref()
            .ok_or_else(|| AppError::Submission("job name missing".to_string()))?;
        let id = handle
            .id
            .clone()
            .ok_or_else(|| AppError::Submission("job id missing".to_string()))?;

        info!("Waiting for jobName {name} with jobId {id} to complete.");
        let finished = self.services.wait_for_output(&handle).await?;
        let code = finished
            .return_code
            .ok_or_else(|| AppError::Monitoring("job return code missing".to_string()))?;

        if !ReturnCode::classify(&code).is_success() {
            return Err(AppError::InvalidReturnCode(code));
        }

        let end = match &candidate.system_affinity {
            Some(ssid) => format!(" with SSID={ssid}."),
            None => ".".to_string(),
        };
        Ok(Outcome::success(format!(
            "Return code for {identifier} and {id} is {code}{end}"
        )))
    }
}
