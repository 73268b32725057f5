use anyhow::Context;
use dotenv::dotenv;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zjob_runner::{
    CandidateJob, Config, Dispatcher, RetryPolicy, RunReport, SubmissionPipeline, ZosServices,
    ZosmfClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("startup configuration")?;
    let client = Arc::new(ZosmfClient::new(&config).context("building z/OSMF client")?);

    let candidates = build_candidates(client.as_ref(), &config).await?;
    info!(
        "🚀 Submitting {} job(s) from {}",
        candidates.len(),
        config.pds_location
    );

    let pipeline = Arc::new(SubmissionPipeline::new(
        client,
        RetryPolicy::new(config.max_tries, config.retry_backoff_ms),
    ));
    let dispatcher = Dispatcher::new(
        pipeline,
        config.worker_pool_size,
        Duration::from_secs(config.task_timeout_seconds),
    );

    let results = dispatcher.dispatch(candidates).await;
    let report = RunReport::from_results(results);
    report.print_successes();
    report.print_failures();

    Ok(())
}

/// Build one candidate per listed member. Listing failure is fatal to
/// the run; rows without a member name are dropped.
async fn build_candidates(
    services: &dyn ZosServices,
    config: &Config,
) -> anyhow::Result<Vec<CandidateJob>> {
    let members = services
        .list_members(&config.pds_location)
        .await
        .with_context(|| format!("failed to list members of {}", config.pds_location))?;
    Ok(members
        .into_iter()
        .filter_map(|entry| entry.name)
        .map(|member| {
            CandidateJob::new(
                &config.pds_location,
                member,
                &config.account_number,
                config.ssid.clone(),
            )
        })
        .collect())
}
