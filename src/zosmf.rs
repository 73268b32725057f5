//! z/OSMF REST client for the external collaborators: member listing,
//! JCL content retrieval, job submission, and job status monitoring.
//!
//! The core never talks to reqwest directly; everything goes through the
//! [`ZosServices`] trait so the dispatcher and pipeline can be exercised
//! against in-memory fakes.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::model::JobHandle;

/// One entry of a member listing. z/OSMF can return rows without a
/// member name (e.g. truncated listings); callers drop those before
/// building candidates.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberEntry {
    #[serde(rename = "member")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MemberList {
    #[serde(default)]
    items: Vec<MemberEntry>,
}

/// Remote collaborator surface consumed by the core.
#[async_trait]
pub trait ZosServices: Send + Sync {
    /// List the members of a partitioned data set. Failure here is fatal
    /// to the whole run: no candidates can be built.
    async fn list_members(&self, dataset: &str) -> Result<Vec<MemberEntry>>;

    /// Retrieve the raw content of `DATASET(MEMBER)` as text.
    async fn get_content(&self, identifier: &str) -> Result<Option<String>>;

    /// Submit JCL text, returning a handle with at least name and id
    /// populated on success.
    async fn submit_jcl(&self, jcl: &str) -> Result<JobHandle>;

    /// Poll the job identified by `handle` until it reaches OUTPUT
    /// state, returning an updated handle carrying the return code.
    /// Blocks arbitrarily long; the dispatcher's task timeout is the
    /// only bound.
    async fn wait_for_output(&self, handle: &JobHandle) -> Result<JobHandle>;
}

pub struct ZosmfClient {
    http: Client,
    base_url: String,
    user: String,
    password: String,
    poll_interval: Duration,
}

impl ZosmfClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .danger_accept_invalid_certs(config.insecure_tls)
            .build()?;
        Ok(Self {
            http,
            base_url: format!("https://{}:{}", config.host, config.port),
            user: config.user.clone(),
            password: config.password.clone(),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        })
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth(&self.user, Some(&self.password))
            .header("X-CSRF-ZOSMF-HEADER", "")
    }

    /// Surface non-2xx responses as errors carrying the z/OSMF `message`
    /// body field when present, the raw body otherwise.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| {
                if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.clone()
                }
            });
        Err(AppError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ZosServices for ZosmfClient {
    async fn list_members(&self, dataset: &str) -> Result<Vec<MemberEntry>> {
        let url = format!("{}/zosmf/restfiles/ds/{}/member", self.base_url, dataset);
        debug!("listing members of {dataset}");
        let response = self.request(Method::GET, &url).send().await?;
        let listing: MemberList = Self::check(response).await?.json().await?;
        Ok(listing.items)
    }

    async fn get_content(&self, identifier: &str) -> Result<Option<String>> {
        let url = format!("{}/zosmf/restfiles/ds/{}", self.base_url, identifier);
        debug!("retrieving content of {identifier}");
        let response = self.request(Method::GET, &url).send().await?;
        let content = Self::check(response).await?.text().await?;
        Ok(Some(content))
    }

    async fn submit_jcl(&self, jcl: &str) -> Result<JobHandle> {
        let url = format!("{}/zosmf/restjobs/jobs", self.base_url);
        let response = self
            .request(Method::PUT, &url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .header("X-IBM-Intrdr-Class", "A")
            .body(jcl.to_string())
            .send()
            .await?;
        let handle: JobHandle = Self::check(response).await?.json().await?;
        Ok(handle)
    }

    async fn wait_for_output(&self, handle: &JobHandle) -> Result<JobHandle> {
        let name = handle
            .name
            .as_deref()
            .ok_or_else(|| AppError::Monitoring("job name missing".to_string()))?;
        let id = handle
            .id
            .as_deref()
            .ok_or_else(|| AppError::Monitoring("job id missing".to_string()))?;
        let url = format!("{}/zosmf/restjobs/jobs/{}/{}", self.base_url, name, id);
        loop {
            let response = self.request(Method::GET, &url).send().await?;
            let current: JobHandle = Self::check(response).await?.json().await?;
            if current.status.as_deref() == Some("OUTPUT") {
                return Ok(current);
            }
            debug!(
                "job {name} ({id}) in state {:?}, polling again",
                current.status
            );
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
