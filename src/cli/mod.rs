pub mod args;
pub mod reporter;

pub use args::Cli;
pub use reporter::ScanFormatter;

use crate::analyzer::ScanOrchestrator;
use crate::api::{HttpApiClient, InsiderApi};
use crate::error::InsiderError;
use crate::models::{self, ComponentRequest, GateOutcome};
use crate::package::package_directory;
use crate::report::ArtifactWriter;
use std::path::PathBuf;
use std::sync::Arc;

pub struct CliHandler {
    cli: Cli,
}

impl CliHandler {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    pub async fn run(&self) -> Result<i32, InsiderError> {
        let email = self.cli.email()?;
        let password = self.cli.password()?;

        let api: Arc<dyn InsiderApi> = Arc::new(HttpApiClient::new(self.cli.api_config()));

        // Step 1: authenticate; the token drives every later call
        let token = api.authenticate(&email, &password).await?;
        if self.cli.is_verbose() {
            eprintln!("Authenticated as {email}");
        }

        // Step 2: resolve the scan target
        let component = match self.cli.component {
            Some(id) => id,
            None => self.resolve_component(api.as_ref(), &token).await?,
        };

        // Step 3: make sure we have a single package file to upload
        let package = self.resolve_package()?;

        // Step 4: submit and watch the analysis to its terminal status
        let orchestrator = ScanOrchestrator::new(
            Arc::clone(&api),
            token,
            component,
            package,
            self.cli.watch_config(),
        );
        let job = orchestrator.start().await?;

        // Step 5: console summary
        let formatter = ScanFormatter::new(self.cli.should_use_color());
        println!("{}", formatter.format_summary(&job));

        // Step 6: the gate decision is fixed before any artifact is written
        let outcome = self.cli.gate_policy().evaluate(&job);

        if self.cli.save {
            let writer = ArtifactWriter::new(".");
            match writer.write_all(component, &job) {
                Ok(paths) => {
                    if self.cli.is_verbose() {
                        for path in paths {
                            eprintln!("Saved {}", path.display());
                        }
                    }
                }
                // Reported, but never overturns the gate decision above.
                Err(e) => eprintln!("Error to save results: {e}"),
            }
        }

        match outcome {
            GateOutcome::Passed => Ok(0),
            GateOutcome::Failed(reason) => {
                eprintln!("{reason}");
                Ok(1)
            }
        }
    }

    /// Resolve `--tech` against the remote catalog and create a component
    /// named after the working directory.
    async fn resolve_component(
        &self,
        api: &dyn InsiderApi,
        token: &str,
    ) -> Result<i64, InsiderError> {
        let tech_name = self.cli.tech.as_deref().ok_or_else(|| {
            InsiderError::InvalidArguments("either --component or --tech is required".to_string())
        })?;

        let profiles = api.list_technologies(token).await?;
        let technology = match models::technology::resolve(&profiles, tech_name) {
            Some(id) => id,
            None => {
                let available: Vec<String> =
                    profiles.iter().map(|profile| profile.name.clone()).collect();
                print_technology_help(&available);
                return Err(InsiderError::UnknownTechnology {
                    name: tech_name.to_string(),
                    available,
                });
            }
        };

        let name = models::default_component_name(&std::env::current_dir()?);
        eprintln!("Component name created automatically: {name}");

        let created = api
            .create_component(token, &ComponentRequest { name, technology })
            .await?;
        if self.cli.is_verbose() {
            eprintln!("Component {} ready: {}", created.id, created.message);
        }

        Ok(created.id)
    }

    /// A directory argument is zipped in place; a file is submitted as-is.
    fn resolve_package(&self) -> Result<PathBuf, InsiderError> {
        let path = &self.cli.package;
        if !path.exists() {
            return Err(InsiderError::PackageNotFound(path.clone()));
        }

        if path.is_dir() {
            if self.cli.is_verbose() {
                eprintln!("Packaging source directory {}", path.display());
            }
            return package_directory(path);
        }

        Ok(path.clone())
    }
}

fn print_technology_help(available: &[String]) {
    eprintln!("\nAvailable technologies, please choose one.\n");
    for name in available {
        eprintln!("{name}");
    }
    eprintln!("\nUsage:");
    eprintln!(
        "insiderci --email <user-email> --password <password> --score 80 --tech \"{}\" <package>",
        available.first().map(String::as_str).unwrap_or("Java"),
    );
}
