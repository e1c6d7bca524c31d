//! Inputs shared by every release step.

use crate::ReleaseConfig;
use crate::archive::ProcessRunner;
use crate::cli::RuntimeConfig;
use crate::env::EnvConfig;

/// Everything a release run reads, passed by reference to each step
pub struct ReleaseContext<'a, R: ProcessRunner> {
    /// Settings from the command line
    pub config: &'a ReleaseConfig,
    /// Environment captured at startup
    pub env: &'a EnvConfig,
    /// Runs the build tool and the archiver
    pub runner: &'a R,
    /// Console output
    pub output: &'a RuntimeConfig,
}
