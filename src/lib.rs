//! # Gordon Release
//!
//! Publishes a Gordon deployment bundle for one tagged release.
//!
//! A run checks that the release tag's `MAJOR.MINOR.PATCH` equals the version the
//! build tool reports, unpacks the assembled artifact into the deployment tree,
//! zips that tree and publishes the zip to a Bintray-style package repository
//! (create the version, then upload and publish the file). The first failure
//! stops the run.
//!
//! ## Usage
//!
//! ```bash
//! BASE_DIR=$PWD REPO_USER=ci REPO_API_KEY=... gordon_release 0.3.0
//! gordon_release v0.3.0 --dry-run     # validate only
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod archive;
pub mod cli;
pub mod env;
pub mod error;
pub mod publish;
pub mod release;
pub mod version;
pub mod workspace;

// Re-export main types for public API
pub use archive::{Archiver, Invocation, ProcessRunner, SystemRunner};
pub use cli::Args;
pub use env::EnvConfig;
pub use error::{ReleaseError, Result};
pub use publish::{PackageCoordinates, PackageRepository, RepositoryClient, VersionCreation};
pub use release::{ReleaseContext, ReleaseOutcome, perform_release};
pub use version::ReleaseVersion;
pub use workspace::{Credentials, ReleaseLayout};

use std::path::PathBuf;

/// Configuration for one release run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseConfig {
    /// Release tag as given on the command line
    pub tag: String,
    /// Package name
    pub package: String,
    /// Repository organization
    pub org: String,
    /// Repository name
    pub repo: String,
    /// Repository API root
    pub api_url: String,
    /// Artifact path relative to the base directory, with `{package}` and `{version}`
    pub artifact_template: String,
    /// Staging directory relative to the base directory
    pub staging_dir: PathBuf,
    /// Archiver source relative to the base directory, may contain a wildcard
    pub bundle_source: String,
    /// Directory receiving the deployment archive
    pub output_dir: PathBuf,
    /// Archiver program
    pub archiver: String,
    /// Program and arguments that print the project version
    pub version_command: Vec<String>,
    /// Stop after validation
    pub dry_run: bool,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            tag: String::new(),
            package: "kinesis-tee".to_string(),
            org: "snowplow".to_string(),
            repo: "snowplow-generic".to_string(),
            api_url: publish::DEFAULT_API_URL.to_string(),
            artifact_template: "target/scala-2.11/{package}-{version}.jar".to_string(),
            staging_dir: PathBuf::from("deploy/gordon/kinesis-tee/kinesis-tee-app/kinesis-tee-code"),
            bundle_source: "deploy/gordon/*".to_string(),
            output_dir: PathBuf::from("."),
            archiver: "7z".to_string(),
            version_command: vec!["sbt".to_string(), "version".to_string()],
            dry_run: false,
        }
    }
}
