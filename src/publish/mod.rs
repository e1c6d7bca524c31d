//! Package repository publishing.
//!
//! Publishing is two calls: create the version record, then upload the archive
//! under it with publish and override enabled. A version that already exists is
//! not an error, so re-running a release for the same version is safe.

mod client;

pub use client::{DEFAULT_API_URL, RepositoryClient};

use crate::error::{RepositoryError, Result};
use std::path::Path;

/// Outcome of a successful create-version call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCreation {
    /// Repository answered 2xx
    Created,
    /// Repository answered 409, the version is already there
    AlreadyExists,
}

/// Where a package lives in the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageCoordinates {
    /// Owning organization
    pub org: String,
    /// Repository within the organization
    pub repo: String,
    /// Package within the repository
    pub package: String,
}

/// A file accepted by the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedFile {
    /// Name the file was published under
    pub file_name: String,
    /// HTTP status of the upload
    pub status: u16,
}

/// Operations a package repository must support
#[allow(async_fn_in_trait)]
pub trait PackageRepository {
    /// Create `version` for the package
    async fn create_version(
        &self,
        coords: &PackageCoordinates,
        version: &str,
        description: &str,
    ) -> Result<VersionCreation>;

    /// Upload `file` under `version` and publish it
    async fn publish_file(
        &self,
        coords: &PackageCoordinates,
        version: &str,
        file: &Path,
    ) -> Result<PublishedFile>;
}

/// Classify a create-version status code.
///
/// 2xx creates, 409 already exists, 5xx is a server error and anything else is
/// unexpected.
pub fn classify_create_status(
    status: u16,
    coords: &PackageCoordinates,
    version: &str,
) -> std::result::Result<VersionCreation, RepositoryError> {
    match status {
        200..=299 => Ok(VersionCreation::Created),
        409 => Ok(VersionCreation::AlreadyExists),
        500..=599 => Err(RepositoryError::ServerError {
            package: coords.package.clone(),
            version: version.to_string(),
            status,
        }),
        _ => Err(RepositoryError::UnexpectedStatus {
            package: coords.package.clone(),
            version: version.to_string(),
            status,
        }),
    }
}

/// Result of [`upload`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    /// How the version record was obtained
    pub version: VersionCreation,
    /// The published file
    pub file: PublishedFile,
}

/// Create the version, then publish `file` under it.
///
/// There is no rollback: a failed publish leaves the version record in place.
pub async fn upload<P: PackageRepository>(
    repository: &P,
    coords: &PackageCoordinates,
    version: &str,
    file: &Path,
) -> Result<UploadResult> {
    let description = format!("Release of '{}'", coords.package);
    let created = repository
        .create_version(coords, version, &description)
        .await?;

    match created {
        VersionCreation::Created => {
            log::info!("Version {} of {} created", version, coords.package)
        }
        VersionCreation::AlreadyExists => {
            log::info!("Version {} of {} exists, skipping", version, coords.package)
        }
    }

    let published = repository.publish_file(coords, version, file).await?;

    Ok(UploadResult {
        version: created,
        file: published,
    })
}
