//! Command execution.
//!
//! This is the single place where a release error becomes an exit status.

mod release;

use crate::cli::{Args, RuntimeConfig};
use crate::env::EnvConfig;
use crate::error::ConfigError;

use release::execute_release;

/// Execute the release described by `args`. Returns 0 on success, 1 on any failure.
pub async fn execute_command(args: Args, env: &EnvConfig) -> i32 {
    let config = RuntimeConfig::from(&args);

    if let Err(reason) = args.validate() {
        config.error_println(&ConfigError::InvalidArguments { reason }.to_string());
        return 1;
    }

    match execute_release(&args, env, &config).await {
        Ok(()) => 0,
        Err(e) => {
            log::debug!("Release failed: {:?}", e);
            config.error_println(&e.to_string());

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                config.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    config.indent(&format!("• {}", suggestion));
                }
            }

            1
        }
    }
}
