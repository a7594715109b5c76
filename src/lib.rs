pub mod analyzer;
pub mod api;
pub mod cli;
pub mod error;
pub mod models;
pub mod package;
pub mod report;

pub use error::InsiderError;

// Re-export commonly used types
pub use models::{
    AnalysisJob, ComponentCreated, ComponentRequest, DraFinding, GateOutcome, GatePolicy,
    JobStatus, TechnologyProfile, Vulnerability,
};

pub use analyzer::{ScanOrchestrator, WatchConfig};
pub use api::{ApiConfig, HttpApiClient, InsiderApi, SubmitSchema};
pub use cli::CliHandler;
