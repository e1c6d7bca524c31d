//! gordon_release - publish a Gordon deployment bundle for a tagged release.
//!
//! Exits 0 when the bundle is published and 1 on the first failure.

use gordon_release::cli;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    let exit_code = cli::run().await;
    process::exit(exit_code);
}
