use crate::analyzer::watcher::{watch_analysis, WatchConfig};
use crate::api::InsiderApi;
use crate::error::InsiderError;
use crate::models::AnalysisJob;
use std::path::PathBuf;
use std::sync::Arc;

/// One scan run against the platform: holds the session token, the target
/// component and the package for the lifetime of a single CI invocation.
pub struct ScanOrchestrator {
    api: Arc<dyn InsiderApi>,
    token: String,
    component: i64,
    package: PathBuf,
    watch: WatchConfig,
}

impl ScanOrchestrator {
    pub fn new(
        api: Arc<dyn InsiderApi>,
        token: String,
        component: i64,
        package: PathBuf,
        watch: WatchConfig,
    ) -> Self {
        Self {
            api,
            token,
            component,
            package,
            watch,
        }
    }

    /// Authenticate and build an orchestrator in one step.
    pub async fn connect(
        api: Arc<dyn InsiderApi>,
        email: &str,
        password: &str,
        component: i64,
        package: PathBuf,
        watch: WatchConfig,
    ) -> Result<Self, InsiderError> {
        let token = api.authenticate(email, password).await?;
        Ok(Self::new(api, token, component, package, watch))
    }

    /// Submit the package, watch the job to its terminal status and verify it
    /// succeeded. Any stage error short-circuits the rest; a terminal
    /// non-success status fails with the server-supplied log.
    pub async fn start(&self) -> Result<AnalysisJob, InsiderError> {
        tracing::info!(component = self.component, "starting analysis");
        let submitted = self
            .api
            .submit_package(&self.token, self.component, &self.package)
            .await?;

        tracing::info!(job_id = submitted.id, "waiting for the analysis to finish");
        let finished = watch_analysis(
            self.api.as_ref(),
            &self.token,
            self.component,
            submitted.id,
            &self.watch,
        )
        .await?;

        if !finished.status.is_succeeded() {
            return Err(InsiderError::AnalysisFailed(finished.log.clone()));
        }

        tracing::info!(job_id = finished.id, "analysis finished successfully");
        Ok(finished)
    }

    pub fn component(&self) -> i64 {
        self.component
    }
}
