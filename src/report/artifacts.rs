use crate::error::InsiderError;
use crate::models::AnalysisJob;
use std::fs;
use std::path::{Path, PathBuf};

// Written next to the HTML report instead of being fetched at report time.
const STYLESHEET: &str = include_str!("assets/style.css");

/// Writes a completed job to disk as `result-<component>.json` and
/// `result-<component>.html` plus the bundled stylesheet.
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write every artifact, returning the created paths.
    pub fn write_all(
        &self,
        component: i64,
        job: &AnalysisJob,
    ) -> Result<Vec<PathBuf>, InsiderError> {
        let mut written = vec![self.write_json(component, job)?];
        written.extend(self.write_html(component, job)?);
        Ok(written)
    }

    pub fn write_json(&self, component: i64, job: &AnalysisJob) -> Result<PathBuf, InsiderError> {
        let path = self.output_dir.join(format!("result-{component}.json"));
        let body = serde_json::to_string_pretty(job)?;
        write_file(&path, &body)?;
        Ok(path)
    }

    pub fn write_html(
        &self,
        component: i64,
        job: &AnalysisJob,
    ) -> Result<Vec<PathBuf>, InsiderError> {
        let html_path = self.output_dir.join(format!("result-{component}.html"));
        write_file(&html_path, &render_html(job))?;

        let style_path = self.output_dir.join("style.css");
        write_file(&style_path, STYLESHEET)?;

        Ok(vec![html_path, style_path])
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), InsiderError> {
    fs::write(path, content).map_err(|source| InsiderError::ArtifactWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn render_html(job: &AnalysisJob) -> String {
    let mut page = String::new();

    page.push_str(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\" />\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n\
         <title>Report</title>\n\
         <link href=\"./style.css\" rel=\"stylesheet\" />\n\
         </head>\n\
         <body>\n\
         <div class=\"container\">\n",
    );

    page.push_str(&format!(
        "<h6>Score Security {}/100</h6>\n",
        job.security_score
    ));

    if !job.dra_findings.is_empty() {
        page.push_str("<div class=\"section\">\n<h6>DRA - Data Risk Analytics</h6>\n<table><tbody>\n");
        for dra in &job.dra_findings {
            page.push_str(&format!(
                "<tr><td><b>File :</b>{}<br /><b>Dra :</b>{}<br /><b>Type :</b>{}</td></tr>\n",
                escape_html(&dra.file),
                escape_html(&dra.dra),
                escape_html(&dra.kind),
            ));
        }
        page.push_str("</tbody></table>\n</div>\n");
    }

    if !job.libraries.is_empty() {
        page.push_str(
            "<div class=\"section\">\n<h6>Libraries</h6>\n\
             <table><thead><tr><td>Name</td><td>Version</td></tr></thead><tbody>\n",
        );
        for library in &job.libraries {
            page.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                escape_html(&library.name),
                escape_html(&library.version),
            ));
        }
        page.push_str("</tbody></table>\n</div>\n");
    }

    if !job.vulnerabilities.is_empty() {
        page.push_str("<div class=\"section\">\n<h6>Vulnerabilities</h6>\n<table><tbody>\n");
        for vulnerability in &job.vulnerabilities {
            page.push_str(&format!(
                "<tr><td><p>\
                 <b>CVSS :</b>{}<br />\
                 <b>Rank :</b>{}<br />\
                 <b>Class :</b>{}<br />\
                 <b>VulnerabilityID :</b>{}<br />\
                 <b>Method :</b>{}<br />\
                 <b>LongMessage :</b>{}<br />\
                 <b>ClassMessage :</b>{}<br />\
                 <b>ShortMessage :</b>{}\
                 </p></td></tr>\n",
                escape_html(&vulnerability.cvss),
                escape_html(&vulnerability.rank),
                escape_html(&vulnerability.class),
                escape_html(&vulnerability.vul_id),
                escape_html(&vulnerability.method),
                escape_html(&vulnerability.long_message),
                escape_html(&vulnerability.class_message),
                escape_html(&vulnerability.short_message),
            ));
        }
        page.push_str("</tbody></table>\n</div>\n");
    }

    page.push_str("</div>\n</body>\n</html>\n");
    page
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
