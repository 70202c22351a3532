use std::process::ExitCode;

use clap::Parser;
use incidentdashboard_lib::{run_with_system_clock, Cli};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays clean for --json consumers.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    match run_with_system_clock(cli) {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            if json {
                match serde_json::to_string_pretty(&err) {
                    Ok(body) => eprintln!("{body}"),
                    Err(_) => eprintln!("{err}"),
                }
            } else {
                eprintln!("error: {err}");
                if let Some(details) = &err.details {
                    eprintln!("  {details}");
                }
            }
            ExitCode::FAILURE
        }
    }
}
