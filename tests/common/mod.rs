//! Shared fixtures for integration tests.
#![allow(dead_code)]

use gordon_release::error::{ArchiveError, Result};
use gordon_release::{Invocation, ProcessRunner, ReleaseConfig};
use std::cell::RefCell;
use std::path::PathBuf;
use tempfile::TempDir;

/// Process runner that answers the version query and fakes 7-Zip.
///
/// `a` (add) invocations create an empty archive at the requested path so the
/// upload step has a real file to read.
pub struct FakeRunner {
    pub version_output: String,
    pub fail_program_arg: Option<&'static str>,
    pub calls: RefCell<Vec<Invocation>>,
}

impl FakeRunner {
    pub fn reporting(version_output: &str) -> Self {
        Self {
            version_output: version_output.to_string(),
            fail_program_arg: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, first_arg: &'static str) -> Self {
        self.fail_program_arg = Some(first_arg);
        self
    }

    pub fn archiver_calls(&self) -> Vec<Invocation> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.program == "7z")
            .cloned()
            .collect()
    }
}

impl ProcessRunner for FakeRunner {
    async fn run(&self, invocation: &Invocation) -> Result<()> {
        self.calls.borrow_mut().push(invocation.clone());

        let first = invocation.args.first().map(String::as_str);
        if first.is_some() && first == self.fail_program_arg {
            return Err(ArchiveError::CommandFailed {
                command: invocation.display(),
                code: Some(2),
            }
            .into());
        }

        if first == Some("a") {
            let archive = PathBuf::from(&invocation.args[3]);
            std::fs::write(archive, b"PK\x05\x06fake").expect("write fake archive");
        }

        Ok(())
    }

    async fn capture(&self, invocation: &Invocation) -> Result<String> {
        self.calls.borrow_mut().push(invocation.clone());
        Ok(self.version_output.clone())
    }
}

/// Base directory with the default artifact and staging layout for `version`
pub struct Workspace {
    pub base: TempDir,
    pub out: TempDir,
}

impl Workspace {
    pub fn new(version: &str) -> Self {
        let base = TempDir::new().expect("base dir");
        let out = TempDir::new().expect("output dir");

        let artifact = base
            .path()
            .join(format!("target/scala-2.11/kinesis-tee-{version}.jar"));
        std::fs::create_dir_all(artifact.parent().expect("parent")).expect("mkdir target");
        std::fs::write(&artifact, b"jar").expect("write artifact");
        std::fs::create_dir_all(
            base.path()
                .join("deploy/gordon/kinesis-tee/kinesis-tee-app/kinesis-tee-code"),
        )
        .expect("mkdir staging");

        Self { base, out }
    }

    pub fn config(&self, tag: &str) -> ReleaseConfig {
        ReleaseConfig {
            tag: tag.to_string(),
            output_dir: self.out.path().to_path_buf(),
            ..ReleaseConfig::default()
        }
    }

    pub fn base_dir(&self) -> String {
        self.base.path().display().to_string()
    }
}
