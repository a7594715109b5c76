use crate::models::AnalysisJob;

/// CI pass/fail thresholds applied to a completed job.
#[derive(Debug, Clone, Copy, Default)]
pub struct GatePolicy {
    /// Score the analysis must strictly exceed when vulnerabilities exist.
    /// Zero means any vulnerability fails the build.
    pub score_threshold: u8,
    /// Report findings but never fail the pipeline.
    pub no_fail: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Passed,
    Failed(String),
}

impl GateOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, GateOutcome::Passed)
    }
}

impl GatePolicy {
    /// Evaluate the completed job against this policy.
    ///
    /// A job with no vulnerabilities always passes, whatever its score. With
    /// vulnerabilities present, a non-zero threshold passes only when the
    /// security score is strictly greater than it (equality fails).
    pub fn evaluate(&self, job: &AnalysisJob) -> GateOutcome {
        if self.no_fail {
            return GateOutcome::Passed;
        }

        if !job.has_vulnerabilities() {
            return GateOutcome::Passed;
        }

        if self.score_threshold == 0 {
            return GateOutcome::Failed(format!(
                "{} vulnerabilities found",
                job.vulnerabilities.len()
            ));
        }

        if job.security_score > i64::from(self.score_threshold) {
            GateOutcome::Passed
        } else {
            GateOutcome::Failed(format!(
                "score {} lower than {}",
                job.security_score, self.score_threshold
            ))
        }
    }
}
