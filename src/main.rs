use clap::Parser;
use insiderci::cli::{Cli, CliHandler};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(&cli);

    if let Err(e) = cli.validate() {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    let handler = CliHandler::new(cli);
    let exit_code = match handler.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    };

    process::exit(exit_code);
}

fn init_tracing(cli: &Cli) {
    let default_filter = if cli.is_debug() {
        "insiderci=debug"
    } else if cli.is_verbose() {
        "insiderci=info"
    } else {
        "insiderci=warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
