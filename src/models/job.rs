use serde::{Deserialize, Serialize};

/// Lifecycle code the platform reports for one analysis run.
///
/// The wire value is a bare integer: `1` while the scan is running, `2` for a
/// successful finish, anything else is a failure code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum JobStatus {
    Running,
    Succeeded,
    Failed(i64),
}

impl JobStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, JobStatus::Running)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, JobStatus::Succeeded)
    }

    pub fn code(&self) -> i64 {
        i64::from(*self)
    }
}

impl Default for JobStatus {
    fn default() -> Self {
        JobStatus::Running
    }
}

impl From<i64> for JobStatus {
    fn from(code: i64) -> Self {
        match code {
            1 => JobStatus::Running,
            2 => JobStatus::Succeeded,
            other => JobStatus::Failed(other),
        }
    }
}

impl From<JobStatus> for i64 {
    fn from(status: JobStatus) -> i64 {
        match status {
            JobStatus::Running => 1,
            JobStatus::Succeeded => 2,
            JobStatus::Failed(code) => code,
        }
    }
}

/// One asynchronous analysis run against a component.
///
/// Created server-side on submission; the id is assigned exactly once and is
/// the key for all later polling requests. The client only ever re-fetches
/// snapshots, it never mutates a job locally.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisJob {
    pub id: i64,
    pub status: JobStatus,
    pub log: String,
    pub security_score: i64,
    pub vulnerabilities: Vec<Vulnerability>,
    #[serde(rename = "dra")]
    pub dra_findings: Vec<DraFinding>,
    pub libraries: Vec<Library>,
    #[serde(rename = "sca")]
    pub sca_findings: Vec<ScaFinding>,
}

impl AnalysisJob {
    pub fn has_vulnerabilities(&self) -> bool {
        !self.vulnerabilities.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vulnerability {
    pub id: i64,
    pub cwe: String,
    pub cvss: String,
    pub rank: String,
    pub priority: String,
    pub category: String,
    pub short_message: String,
    pub long_message: String,
    pub class: String,
    pub class_message: String,
    pub method: String,
    pub method_message: String,
    pub line: i64,
    pub column: i64,
    pub status: bool,
    pub analyse: bool,
    #[serde(rename = "vul_id")]
    pub vul_id: String,
    pub affected_files: Vec<String>,
}

/// A flagged instance of sensitive-data handling, independent of the
/// CVSS-scored vulnerabilities.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraFinding {
    pub id: i64,
    pub dra: String,
    pub file: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Dependency found by the composition-analysis schema variant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Library {
    pub id: i64,
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScaFinding {
    pub id: i64,
    pub cve: String,
    pub cvss: String,
    pub severity: String,
    pub description: String,
    pub library: String,
}
