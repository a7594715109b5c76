use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsiderError {
    #[error("authentication failed with status {status}: {body}")]
    AuthenticationFailed { status: u16, body: String },

    #[error("token not found in authentication response: {0}")]
    MalformedAuthResponse(String),

    #[error("unknown technology: {name}")]
    UnknownTechnology { name: String, available: Vec<String> },

    #[error("component creation failed with status {status}: {body}")]
    ComponentCreationFailed { status: u16, body: String },

    #[error("{0}")]
    SubmissionRejected(String),

    #[error("unexpected success response: {0}")]
    MalformedSubmitResponse(String),

    #[error("status code {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("{0}")]
    AnalysisFailed(String),

    #[error("analysis did not finish within {waited_secs} seconds")]
    WatchTimeout { waited_secs: u64 },

    #[error("package not found: {}", .0.display())]
    PackageNotFound(PathBuf),

    #[error("failed to write {}: {}", .path.display(), .source)]
    ArtifactWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid command line arguments: {0}")]
    InvalidArguments(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}
