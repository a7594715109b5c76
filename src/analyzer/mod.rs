// Analyzer module - drives a remote analysis job from submission to verdict

pub mod orchestrator;
pub mod watcher;

pub use orchestrator::ScanOrchestrator;
pub use watcher::{watch_analysis, WatchConfig};
