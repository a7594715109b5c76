pub mod component;
pub mod gate;
pub mod job;
pub mod technology;

pub use component::{default_component_name, ComponentCreated, ComponentRequest};
pub use gate::{GateOutcome, GatePolicy};
pub use job::{AnalysisJob, DraFinding, JobStatus, Library, ScaFinding, Vulnerability};
pub use technology::TechnologyProfile;
