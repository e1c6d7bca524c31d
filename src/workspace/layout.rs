//! Filesystem locations for one release.

use crate::ReleaseConfig;
use crate::version::{ReleaseVersion, underscore};
use std::path::{Path, PathBuf};

/// Every path a release touches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseLayout {
    /// Assembled build artifact to repackage
    pub artifact: PathBuf,
    /// Pre-existing directory that receives the extracted artifact
    pub staging_dir: PathBuf,
    /// Source pattern handed to the archiver, may contain a wildcard
    pub bundle_source: String,
    /// Deployment archive to create and upload
    pub archive: PathBuf,
}

impl ReleaseLayout {
    /// Compute the layout for `version` under `base_dir`
    pub fn new(config: &ReleaseConfig, base_dir: &Path, version: &ReleaseVersion) -> Self {
        let artifact = config
            .artifact_template
            .replace("{package}", &config.package)
            .replace("{version}", version.as_str());

        let archive_name = format!(
            "{}_{}.zip",
            underscore(&config.package),
            version.underscored()
        );

        Self {
            artifact: base_dir.join(artifact),
            staging_dir: base_dir.join(&config.staging_dir),
            bundle_source: base_dir.join(&config.bundle_source).display().to_string(),
            archive: config.output_dir.join(archive_name),
        }
    }

    /// File name of the deployment archive, as used in the upload URL
    pub fn archive_name(&self) -> String {
        self.archive
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
