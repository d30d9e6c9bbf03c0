use std::process::ExitCode;

use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use service_calendar::cli::{self, CliError, USAGE};
use service_calendar::config::CalendarConfig;

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "service-calendar failed");
            if matches!(e, CliError::Usage(_)) {
                eprintln!("{USAGE}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(args: &[String]) -> Result<String, CliError> {
    let config = CalendarConfig::from_env()?;
    debug!(?config, "loaded configuration");

    let invocation = cli::parse_args(args)?;
    let value = cli::run(invocation, &config)?;
    Ok(serde_json::to_string_pretty(&value)?)
}
