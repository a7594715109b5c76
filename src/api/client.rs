use crate::api::decode::{decode_submit_response, SubmitSchema};
use crate::error::InsiderError;
use crate::models::{AnalysisJob, ComponentCreated, ComponentRequest, TechnologyProfile};
use reqwest::header::AUTHORIZATION;
use reqwest::{multipart, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use tokio_util::io::ReaderStream;

pub const DEFAULT_SAST_URL: &str = "https://backend.insidersec.io/core/api/v1";
pub const DEFAULT_UPLOAD_URL: &str = "https://upload.insidersec.io/core/api/v1";

/// Endpoint configuration for one run, threaded through constructors instead
/// of living in process-wide state.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub sast_base_url: String,
    pub upload_base_url: String,
    pub submit_schema: SubmitSchema,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            sast_base_url: DEFAULT_SAST_URL.to_string(),
            upload_base_url: DEFAULT_UPLOAD_URL.to_string(),
            submit_schema: SubmitSchema::default(),
        }
    }
}

pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, InsiderError>> + Send + 'a>>;

/// The remote analysis platform, as seen by the orchestration pipeline.
pub trait InsiderApi: Send + Sync {
    fn authenticate<'a>(&'a self, email: &'a str, password: &'a str) -> ApiFuture<'a, String>;

    fn list_technologies<'a>(&'a self, token: &'a str) -> ApiFuture<'a, Vec<TechnologyProfile>>;

    fn create_component<'a>(
        &'a self,
        token: &'a str,
        request: &'a ComponentRequest,
    ) -> ApiFuture<'a, ComponentCreated>;

    fn submit_package<'a>(
        &'a self,
        token: &'a str,
        component: i64,
        package: &'a Path,
    ) -> ApiFuture<'a, AnalysisJob>;

    fn fetch_analysis<'a>(
        &'a self,
        token: &'a str,
        job: i64,
        component: i64,
    ) -> ApiFuture<'a, AnalysisJob>;
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    message: String,
}

pub struct HttpApiClient {
    config: ApiConfig,
    http: reqwest::Client,
}

impl HttpApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    async fn do_authenticate(&self, email: &str, password: &str) -> Result<String, InsiderError> {
        let url = format!("{}/auth", self.config.sast_base_url);
        let credentials = serde_json::json!({ "email": email, "password": password });

        let response = self.http.post(&url).json(&credentials).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(InsiderError::AuthenticationFailed {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = serde_json::from_str(&body)?;
        match value.get("token").and_then(Value::as_str) {
            Some(token) => Ok(token.to_string()),
            None => Err(InsiderError::MalformedAuthResponse(body)),
        }
    }

    async fn do_list_technologies(
        &self,
        token: &str,
    ) -> Result<Vec<TechnologyProfile>, InsiderError> {
        let url = format!("{}/technologies", self.config.sast_base_url);

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, token)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        // A non-OK catalog answer is logged but does not abort resolution on
        // its own; an unparsable body does.
        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), %body, "technology catalog returned non-OK status");
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn do_create_component(
        &self,
        token: &str,
        request: &ComponentRequest,
    ) -> Result<ComponentCreated, InsiderError> {
        let url = format!("{}/component/ci", self.config.sast_base_url);

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, token)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(InsiderError::ComponentCreationFailed {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn do_submit_package(
        &self,
        token: &str,
        component: i64,
        package: &Path,
    ) -> Result<AnalysisJob, InsiderError> {
        let url = format!("{}/sast/{}", self.config.upload_base_url, component);

        let file = tokio::fs::File::open(package).await?;
        let length = file.metadata().await?.len();
        let file_name = package
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("package.zip")
            .to_string();

        let part = multipart::Part::stream_with_length(
            reqwest::Body::wrap_stream(ReaderStream::new(file)),
            length,
        )
        .file_name(file_name);
        let form = multipart::Form::new().part("package", part);

        tracing::info!(component, package = %package.display(), "submitting package for analysis");

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, token)
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status != StatusCode::OK {
            return Err(submission_error(&body));
        }

        decode_submit_response(&body, self.config.submit_schema)
    }

    async fn do_fetch_analysis(
        &self,
        token: &str,
        job: i64,
        component: i64,
    ) -> Result<AnalysisJob, InsiderError> {
        let url = format!(
            "{}/sast/{}/component/{}/ci",
            self.config.sast_base_url, job, component
        );

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, token)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(InsiderError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Rejected uploads carry a `{message}` envelope when the platform produced
/// the error itself; anything else (proxies, gateways) surfaces verbatim.
fn submission_error(body: &[u8]) -> InsiderError {
    let raw = String::from_utf8_lossy(body).into_owned();

    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.message.is_empty() => {
            InsiderError::SubmissionRejected(envelope.message)
        }
        _ => InsiderError::SubmissionRejected(format!("unexpected error response: {raw}")),
    }
}

impl InsiderApi for HttpApiClient {
    fn authenticate<'a>(&'a self, email: &'a str, password: &'a str) -> ApiFuture<'a, String> {
        Box::pin(async move { self.do_authenticate(email, password).await })
    }

    fn list_technologies<'a>(&'a self, token: &'a str) -> ApiFuture<'a, Vec<TechnologyProfile>> {
        Box::pin(async move { self.do_list_technologies(token).await })
    }

    fn create_component<'a>(
        &'a self,
        token: &'a str,
        request: &'a ComponentRequest,
    ) -> ApiFuture<'a, ComponentCreated> {
        Box::pin(async move { self.do_create_component(token, request).await })
    }

    fn submit_package<'a>(
        &'a self,
        token: &'a str,
        component: i64,
        package: &'a Path,
    ) -> ApiFuture<'a, AnalysisJob> {
        Box::pin(async move { self.do_submit_package(token, component, package).await })
    }

    fn fetch_analysis<'a>(
        &'a self,
        token: &'a str,
        job: i64,
        component: i64,
    ) -> ApiFuture<'a, AnalysisJob> {
        Box::pin(async move { self.do_fetch_analysis(token, job, component).await })
    }
}
