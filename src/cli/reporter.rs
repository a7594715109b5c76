use crate::models::AnalysisJob;

const DIVIDER: &str = "-----------------------------------------------------------------------------------------------------------------------";

/// Formats the console summary of a finished analysis. A pure read of the
/// job: nothing here affects the exit code.
pub struct ScanFormatter {
    use_colors: bool,
}

impl ScanFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub fn format_summary(&self, job: &AnalysisJob) -> String {
        let mut output = String::new();

        output.push_str(DIVIDER);
        output.push('\n');
        output.push_str(&self.format_score(job.security_score));
        output.push('\n');
        output.push_str(DIVIDER);
        output.push('\n');

        if !job.dra_findings.is_empty() {
            output.push_str("DRA - Data Risk Analytics\n");
            for dra in &job.dra_findings {
                output.push_str(&format!("File: {}\n", dra.file));
                output.push_str(&format!("Dra: {}\n", dra.dra));
                output.push_str(&format!("Type: {}\n", dra.kind));
            }
        }

        if !job.libraries.is_empty() {
            output.push_str(DIVIDER);
            output.push('\n');
            output.push_str("Libraries\n");
            for library in &job.libraries {
                output.push_str(&format!("{} {}\n", library.name, library.version));
            }
        }

        if !job.vulnerabilities.is_empty() {
            output.push_str(DIVIDER);
            output.push('\n');
            output.push_str("Vulnerabilities\n");
            for vulnerability in &job.vulnerabilities {
                output.push_str(&format!("CVSS: {}\n", vulnerability.cvss));
                output.push_str(&format!("Rank: {}\n", vulnerability.rank));
                output.push_str(&format!("Class: {}\n", vulnerability.class));
                output.push_str(&format!("Method: {}\n", vulnerability.method));
                output.push_str(&format!("VulnerabilityID: {}\n", vulnerability.vul_id));
                output.push_str(&format!("LongMessage: {}\n", vulnerability.long_message));
                output.push_str(&format!("ClassMessage: {}\n", vulnerability.class_message));
                output.push_str(&format!("ShortMessage: {}\n\n", vulnerability.short_message));
            }
        }

        output.push_str(DIVIDER);
        output
    }

    fn format_score(&self, score: i64) -> String {
        if !self.use_colors {
            return format!("Score Security {score}/100");
        }

        let color_code = if score >= 80 {
            "\x1b[1m\x1b[32m" // bold green
        } else if score >= 50 {
            "\x1b[1m\x1b[33m" // bold yellow
        } else {
            "\x1b[1m\x1b[31m" // bold red
        };

        format!("{color_code}Score Security {score}/100\x1b[0m")
    }
}
