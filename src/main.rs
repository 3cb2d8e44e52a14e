//! AMFI NAV lookup - search the daily mutual fund NAV listing
//!
//! Prints every fund whose name contains the query, along with its latest
//! net asset value.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use amfinav::app;
use amfinav::cli::Cli;

/// Installs a stderr log subscriber. `RUST_LOG` wins over `-v` when set.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Missing or malformed arguments exit with status 2 here
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    let config = cli.to_config();
    let mut stdout = io::stdout().lock();

    match app::run(&config, &cli.query, &mut stdout).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
