//! Release pipeline.
//!
//! Resolve and compare versions, validate the environment and filesystem, extract
//! the artifact into the staging tree, zip the deployment tree and publish it.
//! The first failing step ends the run; nothing is retried or rolled back.

mod context;

pub use context::ReleaseContext;

use crate::archive::{Archiver, ProcessRunner};
use crate::error::Result;
use crate::publish::{
    PackageCoordinates, PackageRepository, UploadResult, VersionCreation, upload,
};
use crate::version::{self, ReleaseVersion};
use crate::workspace::{
    Credentials, ReleaseLayout, require_base_dir, require_credentials, validate_layout,
};

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct ReleaseOutcome {
    /// Version that was released
    pub version: ReleaseVersion,
    /// Paths used by the run
    pub layout: ReleaseLayout,
    /// Upload result, absent on a dry run
    pub upload: Option<UploadResult>,
}

/// Run the full release.
///
/// `connect` builds the repository client once credentials have been validated.
pub async fn perform_release<R, P, F>(
    ctx: &ReleaseContext<'_, R>,
    connect: F,
) -> Result<ReleaseOutcome>
where
    R: ProcessRunner,
    P: PackageRepository,
    F: FnOnce(Credentials) -> P,
{
    let config = ctx.config;

    let base_dir = require_base_dir(ctx.env)?;
    log::debug!("Base directory: {}", base_dir.display());

    ctx.output.println("🔍 Checking project version...");
    let project = version::project_version(ctx.runner, &config.version_command, &base_dir).await?;
    let release_version = version::ensure_matching(&config.tag, &project)?;
    ctx.output
        .success_println(&format!("Version {} matches tag '{}'", release_version, config.tag));

    let layout = ReleaseLayout::new(config, &base_dir, &release_version);
    validate_layout(&layout)?;
    ctx.output
        .verbose_println(&format!("Artifact: {}", layout.artifact.display()));
    ctx.output
        .verbose_println(&format!("Staging: {}", layout.staging_dir.display()));

    let credentials = require_credentials(ctx.env)?;

    let coords = PackageCoordinates {
        org: config.org.clone(),
        repo: config.repo.clone(),
        package: config.package.clone(),
    };

    if config.dry_run {
        ctx.output.println("Dry run, skipping extract, compress and upload:");
        ctx.output.indent(&format!(
            "extract {} -> {}",
            layout.artifact.display(),
            layout.staging_dir.display()
        ));
        ctx.output.indent(&format!(
            "compress {} -> {}",
            layout.bundle_source,
            layout.archive.display()
        ));
        ctx.output.indent(&format!(
            "upload {} to {}/{}/{} version {}",
            layout.archive_name(),
            coords.org,
            coords.repo,
            coords.package,
            release_version
        ));
        return Ok(ReleaseOutcome {
            version: release_version,
            layout,
            upload: None,
        });
    }

    let archiver = Archiver::new(ctx.runner, &config.archiver);

    ctx.output.println("📦 Extracting build artifact...");
    archiver.extract(&layout.artifact, &layout.staging_dir).await?;

    ctx.output.println("🗜  Creating deployment archive...");
    archiver.compress(&layout.bundle_source, &layout.archive).await?;
    ctx.output
        .success_println(&format!("Created {}", layout.archive.display()));

    ctx.output
        .println(&format!("🚀 Uploading '{}'", layout.archive_name()));
    let repository = connect(credentials);
    let uploaded = upload(
        &repository,
        &coords,
        release_version.as_str(),
        &layout.archive,
    )
    .await?;

    match uploaded.version {
        VersionCreation::Created => ctx.output.success_println(&format!(
            "Version {} of {} created",
            release_version, coords.package
        )),
        VersionCreation::AlreadyExists => ctx.output.println(&format!(
            "Version {} of {} exists, skipping...",
            release_version, coords.package
        )),
    }
    ctx.output.success_println("File uploaded!");

    Ok(ReleaseOutcome {
        version: release_version,
        layout,
        upload: Some(uploaded),
    })
}
