use crate::api::InsiderApi;
use crate::error::InsiderError;
use crate::models::AnalysisJob;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Polling cadence and upper bound for waiting on a remote analysis.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub poll_interval: Duration,
    /// `None` waits forever; callers running under CI should keep a bound.
    pub max_wait: Option<Duration>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            max_wait: Some(Duration::from_secs(30 * 60)),
        }
    }
}

/// Poll the status endpoint until the job leaves its running state.
///
/// Each iteration decodes a fresh snapshot; running snapshots are discarded
/// and the first non-running one is returned untouched. A non-OK status or an
/// undecodable body aborts immediately — only "still running" loops. The
/// future suspends on `tokio::time::sleep`, so dropping or racing it cancels
/// the watch promptly.
pub async fn watch_analysis(
    api: &dyn InsiderApi,
    token: &str,
    component: i64,
    job_id: i64,
    config: &WatchConfig,
) -> Result<AnalysisJob, InsiderError> {
    let started = Instant::now();

    loop {
        let snapshot = api.fetch_analysis(token, job_id, component).await?;
        if !snapshot.status.is_running() {
            tracing::debug!(job_id, status = snapshot.status.code(), "analysis reached terminal status");
            return Ok(snapshot);
        }

        if let Some(max_wait) = config.max_wait {
            if started.elapsed() >= max_wait {
                return Err(InsiderError::WatchTimeout {
                    waited_secs: started.elapsed().as_secs(),
                });
            }
        }

        tracing::trace!(job_id, "analysis still running");
        sleep(config.poll_interval).await;
    }
}
