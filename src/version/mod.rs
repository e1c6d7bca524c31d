//! Release version resolution.
//!
//! Versions are pulled out of free-form text: the build tool's console output and
//! the release tag passed on the command line.

use crate::archive::{Invocation, ProcessRunner};
use crate::error::{Result, ValidationError};
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+\.\d+").expect("version regex is valid"));

/// A `MAJOR.MINOR.PATCH` string extracted from larger text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
    /// Extract the first `MAJOR.MINOR.PATCH` substring of `text`.
    ///
    /// Fails when `text` holds no such substring.
    pub fn resolve(text: &str) -> Result<Self> {
        VERSION_RE
            .find(text)
            .map(|m| Self(m.as_str().to_string()))
            .ok_or_else(|| {
                ValidationError::VersionNotFound {
                    input: text.trim().to_string(),
                }
                .into()
            })
    }

    /// The version text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The version with every non-alphanumeric character replaced by `_`
    pub fn underscored(&self) -> String {
        underscore(&self.0)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replace every non-alphanumeric character with `_`
pub fn underscore(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Ask the build tool for the project version.
///
/// `command` is the program followed by its arguments (for example `sbt version`),
/// run inside `base_dir`.
pub async fn project_version<R: ProcessRunner>(
    runner: &R,
    command: &[String],
    base_dir: &Path,
) -> Result<ReleaseVersion> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| crate::error::ConfigError::InvalidArguments {
            reason: "version command is empty".to_string(),
        })?;

    let invocation = Invocation::new(program.as_str())
        .args(args.iter().map(String::as_str))
        .current_dir(base_dir);
    let output = runner.capture(&invocation).await?;

    ReleaseVersion::resolve(&output)
}

/// Resolve both versions and require them to agree.
///
/// Returns the shared version.
pub fn ensure_matching(tag: &str, project: &ReleaseVersion) -> Result<ReleaseVersion> {
    let tagged = ReleaseVersion::resolve(tag)?;
    if &tagged != project {
        return Err(ValidationError::VersionMismatch {
            tag: tag.to_string(),
            project: project.to_string(),
        }
        .into());
    }
    Ok(tagged)
}
