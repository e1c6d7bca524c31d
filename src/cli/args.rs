//! Command line argument parsing and validation.
//!
//! One positional argument, the release tag. Everything else has a default that
//! matches the standard Gordon deployment of the package.

use crate::ReleaseConfig;
use crate::publish::DEFAULT_API_URL;
use clap::Parser;
use std::path::PathBuf;

/// Publish a Gordon deployment bundle for a tagged release
#[derive(Parser, Debug)]
#[command(
    name = "gordon_release",
    version,
    about = "Publish a Gordon deployment bundle for a tagged release",
    long_about = "Check the release tag against the build tool's project version, unpack the
assembled artifact into the Gordon deployment tree, zip the tree and publish the
zip to the package repository.

Environment:
  BASE_DIR       build workspace root
  REPO_USER      repository username
  REPO_API_KEY   repository API key

Usage:
  gordon_release 0.3.0
  gordon_release v0.3.0-rc1 --dry-run"
)]
pub struct Args {
    /// Release tag; its MAJOR.MINOR.PATCH must match the project version
    #[arg(index = 1, value_name = "TAG")]
    pub tag: String,

    /// Package name in the repository and artifact file names
    #[arg(long, default_value = "kinesis-tee")]
    pub package: String,

    /// Repository organization
    #[arg(long, default_value = "snowplow")]
    pub org: String,

    /// Repository name within the organization
    #[arg(long, default_value = "snowplow-generic")]
    pub repo: String,

    /// Repository API root
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Build artifact path relative to BASE_DIR; {package} and {version} are substituted
    #[arg(long = "artifact", default_value = "target/scala-2.11/{package}-{version}.jar")]
    pub artifact_template: String,

    /// Staging directory relative to BASE_DIR; must already exist
    #[arg(
        long,
        default_value = "deploy/gordon/kinesis-tee/kinesis-tee-app/kinesis-tee-code"
    )]
    pub staging_dir: PathBuf,

    /// Archiver source relative to BASE_DIR, wildcards allowed
    #[arg(long, default_value = "deploy/gordon/*")]
    pub bundle_source: String,

    /// Directory the deployment archive is written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// 7-Zip compatible archiver program
    #[arg(long, default_value = "7z")]
    pub archiver: String,

    /// Command printing the project version, run inside BASE_DIR
    #[arg(long, default_values = ["sbt", "version"], value_delimiter = ' ')]
    pub version_command: Vec<String>,

    /// Validate and print the plan without extracting, compressing or uploading
    #[arg(long)]
    pub dry_run: bool,

    /// Show paths and other details
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse command line arguments without exiting on failure
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.tag.trim().is_empty() {
            return Err("Release tag is required".to_string());
        }

        if self.package.trim().is_empty() {
            return Err("--package must not be empty".to_string());
        }

        if self.version_command.iter().all(|word| word.is_empty()) {
            return Err("--version-command must name a program".to_string());
        }

        Ok(())
    }

    /// Release settings described by these arguments
    pub fn release_config(&self) -> ReleaseConfig {
        ReleaseConfig {
            tag: self.tag.clone(),
            package: self.package.clone(),
            org: self.org.clone(),
            repo: self.repo.clone(),
            api_url: self.api_url.clone(),
            artifact_template: self.artifact_template.clone(),
            staging_dir: self.staging_dir.clone(),
            bundle_source: self.bundle_source.clone(),
            output_dir: self.output_dir.clone(),
            archiver: self.archiver.clone(),
            version_command: self
                .version_command
                .iter()
                .filter(|word| !word.is_empty())
                .cloned()
                .collect(),
            dry_run: self.dry_run,
        }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(verbose: bool) -> Self {
        Self {
            output: super::OutputManager::new(verbose, false),
        }
    }

    /// Runtime configuration that prints nothing
    pub fn quiet() -> Self {
        Self {
            output: super::OutputManager::new(false, true),
        }
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.verbose)
    }
}

impl RuntimeConfig {
    /// Print message
    pub fn println(&self, message: &str) {
        let _ = self.output.println(message);
    }

    /// Print message in verbose mode only
    pub fn verbose_println(&self, message: &str) {
        let _ = self.output.verbose(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        let _ = self.output.success(message);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        let _ = self.output.indent(message);
    }
}
