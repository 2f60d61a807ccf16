//! tracker-herald entry point.

use std::process::ExitCode;

use clap::Parser;

use tracker_herald::cli::{execute, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
