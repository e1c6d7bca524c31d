//! Command line interface for gordon_release.
//!
//! Parses arguments, captures the environment and runs the release, turning any
//! failure into a printed message and an exit code.

mod args;
pub mod commands;
mod output;

pub use args::{Args, RuntimeConfig};
pub use commands::execute_command;
pub use output::OutputManager;

use crate::env::EnvConfig;
use crate::error::ConfigError;
use clap::error::ErrorKind;

/// Main CLI entry point. Returns the process exit code.
pub async fn run() -> i32 {
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) => return report_parse_error(&e, &RuntimeConfig::new(false)),
    };
    let env = EnvConfig::from_process();
    execute_command(args, &env).await
}

/// Print a clap parse outcome. `--help` and `--version` succeed, everything
/// else is an argument error.
fn report_parse_error(err: &clap::Error, config: &RuntimeConfig) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            0
        }
        _ => {
            let rendered = err.to_string();
            let reason = rendered.trim_start_matches("error: ").trim_end().to_string();
            config.error_println(&ConfigError::InvalidArguments { reason }.to_string());
            1
        }
    }
}
