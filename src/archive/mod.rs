//! Archive extraction and creation through an external 7-Zip binary.
//!
//! Both operations are thin wrappers that build a 7-Zip command line and hand it
//! to a [`ProcessRunner`]. Output of the tool is discarded; its exit status is the
//! only signal inspected.

mod runner;

pub use runner::{Invocation, ProcessRunner, SystemRunner, shell_escape};

use crate::error::Result;
use std::path::Path;

/// 7-Zip command builder bound to a process runner
#[derive(Debug, Clone)]
pub struct Archiver<'a, R> {
    runner: &'a R,
    program: String,
}

impl<'a, R: ProcessRunner> Archiver<'a, R> {
    /// Create an archiver that invokes `program` (usually `7z`)
    pub fn new(runner: &'a R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    /// Extract every entry of `archive` into `destination`, overwriting existing files.
    pub async fn extract(&self, archive: &Path, destination: &Path) -> Result<()> {
        log::info!(
            "Extracting {} into {}",
            archive.display(),
            destination.display()
        );
        self.runner
            .run(&self.extract_invocation(archive, destination))
            .await
    }

    /// Create a zip at `archive` from `source` with maximum compression.
    ///
    /// `source` may be a wildcard such as `deploy/gordon/*`; 7-Zip expands it.
    pub async fn compress(&self, source: &str, archive: &Path) -> Result<()> {
        log::info!("Compressing {} into {}", source, archive.display());
        self.runner
            .run(&self.compress_invocation(source, archive))
            .await
    }

    fn extract_invocation(&self, archive: &Path, destination: &Path) -> Invocation {
        Invocation::new(&self.program)
            .arg("x")
            .arg(archive.display().to_string())
            .arg("-aoa")
            .arg(format!("-o{}", destination.display()))
    }

    fn compress_invocation(&self, source: &str, archive: &Path) -> Invocation {
        Invocation::new(&self.program)
            .args(["a", "-tzip", "-mx=9"])
            .arg(archive.display().to_string())
            .arg(source)
    }
}
