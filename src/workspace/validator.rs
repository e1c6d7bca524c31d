//! Fail-fast environment and filesystem checks.

use super::ReleaseLayout;
use crate::env::{BASE_DIR, EnvConfig, REPO_API_KEY, REPO_USER};
use crate::error::{ConfigError, Result, ValidationError};
use std::fmt;
use std::path::PathBuf;

/// Repository publishing credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account name
    pub user: String,
    /// API key used as the Basic auth password
    pub api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Read the build workspace root
pub fn require_base_dir(env: &EnvConfig) -> Result<PathBuf> {
    env.get(BASE_DIR).map(PathBuf::from).ok_or_else(|| {
        ConfigError::MissingEnv {
            name: BASE_DIR.to_string(),
        }
        .into()
    })
}

/// Check the artifact file, then the staging directory
pub fn validate_layout(layout: &ReleaseLayout) -> Result<()> {
    if !layout.artifact.is_file() {
        return Err(ValidationError::MissingArtifact {
            path: layout.artifact.clone(),
        }
        .into());
    }

    if !layout.staging_dir.is_dir() {
        return Err(ValidationError::MissingStagingDir {
            path: layout.staging_dir.clone(),
        }
        .into());
    }

    Ok(())
}

/// Read the username, then the API key
pub fn require_credentials(env: &EnvConfig) -> Result<Credentials> {
    let user = require(env, REPO_USER)?;
    let api_key = require(env, REPO_API_KEY)?;
    Ok(Credentials { user, api_key })
}

fn require(env: &EnvConfig, name: &str) -> Result<String> {
    env.get(name).ok_or_else(|| {
        ConfigError::MissingCredential {
            name: name.to_string(),
        }
        .into()
    })
}
