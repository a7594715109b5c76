use crate::analyzer::WatchConfig;
use crate::api::{ApiConfig, SubmitSchema, DEFAULT_SAST_URL, DEFAULT_UPLOAD_URL};
use crate::error::InsiderError;
use crate::models::GatePolicy;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "insiderci")]
#[command(about = "Run Insider platform analysis from a CI pipeline")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Insider account email (falls back to INSIDER_EMAIL)
    #[arg(short = 'e', long)]
    pub email: Option<String>,

    /// Insider account password (falls back to INSIDER_PASSWORD)
    #[arg(short = 'p', long)]
    pub password: Option<String>,

    /// Do not fail the pipeline, even if issues were found
    #[arg(long)]
    pub no_fail: bool,

    /// Security score (1-100) the analysis must beat for the pipeline to pass
    #[arg(short = 's', long, default_value = "0", value_parser = validate_score)]
    pub score: u8,

    /// Existing component id; skips technology and component resolution
    #[arg(short = 'c', long)]
    pub component: Option<i64>,

    /// Save results as result-<component>.json and result-<component>.html
    #[arg(long)]
    pub save: bool,

    /// Technology profile name used when creating a component
    #[arg(short = 't', long)]
    pub tech: Option<String>,

    /// Maximum seconds to wait for the analysis to finish
    #[arg(long, default_value = "1800", value_parser = validate_max_wait)]
    pub max_wait: u64,

    /// Analysis API base URL
    #[arg(long, default_value = DEFAULT_SAST_URL)]
    pub api_url: String,

    /// Upload API base URL
    #[arg(long, default_value = DEFAULT_UPLOAD_URL)]
    pub upload_url: String,

    /// Enable verbose output to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Enable debug output including HTTP request traces
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Package file to analyze, or a source directory to zip and submit
    pub package: PathBuf,
}

impl Cli {
    pub fn validate(&self) -> Result<(), InsiderError> {
        self.email()?;
        self.password()?;

        // Without an explicit component id we must be able to create one.
        if self.component.is_none() && self.tech.is_none() {
            return Err(InsiderError::InvalidArguments(
                "either --component or --tech is required".to_string(),
            ));
        }

        Ok(())
    }

    pub fn email(&self) -> Result<String, InsiderError> {
        credential(&self.email, "INSIDER_EMAIL").ok_or_else(|| {
            InsiderError::InvalidArguments(
                "email is required (use --email or INSIDER_EMAIL)".to_string(),
            )
        })
    }

    pub fn password(&self) -> Result<String, InsiderError> {
        credential(&self.password, "INSIDER_PASSWORD").ok_or_else(|| {
            InsiderError::InvalidArguments(
                "password is required (use --password or INSIDER_PASSWORD)".to_string(),
            )
        })
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose || self.debug
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn should_use_color(&self) -> bool {
        std::env::var("NO_COLOR").is_err()
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            sast_base_url: self.api_url.trim_end_matches('/').to_string(),
            upload_base_url: self.upload_url.trim_end_matches('/').to_string(),
            submit_schema: SubmitSchema::Auto,
        }
    }

    pub fn watch_config(&self) -> WatchConfig {
        WatchConfig {
            max_wait: Some(Duration::from_secs(self.max_wait)),
            ..Default::default()
        }
    }

    pub fn gate_policy(&self) -> GatePolicy {
        GatePolicy {
            score_threshold: self.score,
            no_fail: self.no_fail,
        }
    }
}

fn credential(flag: &Option<String>, env_var: &str) -> Option<String> {
    flag.clone()
        .filter(|value| !value.is_empty())
        .or_else(|| std::env::var(env_var).ok().filter(|value| !value.is_empty()))
}

fn validate_score(s: &str) -> Result<u8, String> {
    let score: u8 = s.parse().map_err(|_| "Score must be a number")?;
    if score <= 100 {
        Ok(score)
    } else {
        Err("Score must be between 0 and 100".to_string())
    }
}

fn validate_max_wait(s: &str) -> Result<u64, String> {
    let seconds: u64 = s.parse().map_err(|_| "Max wait must be a number")?;
    if seconds > 0 {
        Ok(seconds)
    } else {
        Err("Max wait must be greater than 0".to_string())
    }
}
