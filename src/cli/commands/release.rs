//! Release command wiring: real subprocesses and the HTTP repository client.

use crate::archive::SystemRunner;
use crate::cli::{Args, RuntimeConfig};
use crate::env::EnvConfig;
use crate::error::Result;
use crate::publish::RepositoryClient;
use crate::release::{ReleaseContext, perform_release};

/// Execute the release command
pub(super) async fn execute_release(
    args: &Args,
    env: &EnvConfig,
    config: &RuntimeConfig,
) -> Result<()> {
    let release_config = args.release_config();
    let runner = SystemRunner;

    let ctx = ReleaseContext {
        config: &release_config,
        env,
        runner: &runner,
        output: config,
    };

    let outcome = perform_release(&ctx, |credentials| {
        RepositoryClient::new(&release_config.api_url, credentials)
    })
    .await?;

    match outcome.upload {
        Some(upload) => {
            config.success_println(&format!(
                "🎉 Released {} {} as {}",
                release_config.package, outcome.version, upload.file.file_name
            ))
        }
        None => config.success_println("Dry run complete"),
    }

    Ok(())
}
