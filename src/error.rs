//! Error types for gordon_release operations.
//!
//! Every failure is fatal to the run. Components return these errors and only the
//! binary entry point turns them into an exit status.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for gordon_release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all gordon_release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Missing environment or argument input
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Version or filesystem validation failures
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Archiving subprocess failures
    #[error("{0}")]
    Archive(#[from] ArchiveError),

    /// Package repository failures
    #[error("{0}")]
    Repository(#[from] RepositoryError),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is unset
    #[error("{name} not set")]
    MissingEnv {
        /// Variable name
        name: String,
    },

    /// Required credential is unset
    #[error("Cannot find required field: {name}")]
    MissingCredential {
        /// Variable name
        name: String,
    },

    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// No `MAJOR.MINOR.PATCH` substring in the input
    #[error("No version of the form MAJOR.MINOR.PATCH found in '{input}'")]
    VersionNotFound {
        /// Text that was searched
        input: String,
    },

    /// Release tag disagrees with the build tool
    #[error("Tag version '{tag}' doesn't match project version '{project}'")]
    VersionMismatch {
        /// Raw release tag
        tag: String,
        /// Version reported by the build tool
        project: String,
    },

    /// Build artifact is absent
    #[error("Cannot find build artifact in '{path}'")]
    MissingArtifact {
        /// Expected artifact location
        path: PathBuf,
    },

    /// Deployment target directory is absent
    #[error("Gordon target directory '{path}' doesn't exist")]
    MissingStagingDir {
        /// Expected directory location
        path: PathBuf,
    },
}

/// Archiving subprocess errors
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Program could not be located on PATH
    #[error("Cannot find '{program}' on PATH")]
    ToolNotFound {
        /// Program name
        program: String,
    },

    /// Program could not be started
    #[error("Failed to start '{command}': {source}")]
    SpawnFailed {
        /// Escaped command line
        command: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// Program exited with a non-zero or abnormal status
    #[error("Failed to execute '{command}' process exited abnormally")]
    CommandFailed {
        /// Escaped command line
        command: String,
        /// Exit code, if the process exited normally
        code: Option<i32>,
    },
}

/// Package repository errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Version creation hit a 5xx
    #[error("Failed to create version {version} of {package} (error code: {status})")]
    ServerError {
        /// Package name
        package: String,
        /// Version being created
        version: String,
        /// HTTP status
        status: u16,
    },

    /// Version creation returned an unclassified status
    #[error("Unknown error creating version {version} of {package} (error code: {status})")]
    UnexpectedStatus {
        /// Package name
        package: String,
        /// Version being created
        version: String,
        /// HTTP status
        status: u16,
    },

    /// File publish returned a non-2xx status
    #[error("File failed to upload (error code: {status})")]
    UploadFailed {
        /// HTTP status
        status: u16,
    },

    /// File to publish could not be read
    #[error("Cannot read '{path}': {source}")]
    UnreadableFile {
        /// File path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Request never produced a response
    #[error("Request to {url} failed: {source}")]
    Transport {
        /// Request URL
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Config(ConfigError::MissingEnv { name })
            | ReleaseError::Config(ConfigError::MissingCredential { name }) => {
                vec![format!("Export {} before running the release", name)]
            }
            ReleaseError::Validation(ValidationError::VersionMismatch { project, .. }) => vec![
                format!("Tag the release as {} or bump the project version", project),
            ],
            ReleaseError::Validation(ValidationError::MissingArtifact { .. }) => vec![
                "Run the assembly build step before publishing".to_string(),
            ],
            ReleaseError::Archive(ArchiveError::ToolNotFound { program }) => vec![
                format!("Install {} or pass --archiver with its path", program),
            ],
            ReleaseError::Repository(RepositoryError::ServerError { .. }) => vec![
                "The repository reported a server error; re-run the release later".to_string(),
            ],
            ReleaseError::Repository(RepositoryError::UploadFailed { status: 401 | 403 }) => vec![
                "Verify REPO_USER and REPO_API_KEY have publish rights".to_string(),
            ],
            _ => vec![],
        }
    }
}
