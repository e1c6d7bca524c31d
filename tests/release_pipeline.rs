//! Release pipeline ordering and fail-fast behavior, with the archiver and the
//! package repository replaced by in-memory doubles.

mod common;

use common::{FakeRunner, Workspace};
use gordon_release::cli::RuntimeConfig;
use gordon_release::error::{
    ArchiveError, ConfigError, ReleaseError, RepositoryError, Result, ValidationError,
};
use gordon_release::publish::{PublishedFile, classify_create_status};
use gordon_release::{
    EnvConfig, PackageCoordinates, PackageRepository, ReleaseContext, VersionCreation,
    perform_release,
};
use std::cell::{Cell, RefCell};
use std::path::Path;

struct FakeRepository<'a> {
    create_status: u16,
    log: &'a RefCell<Vec<String>>,
}

impl PackageRepository for FakeRepository<'_> {
    async fn create_version(
        &self,
        coords: &PackageCoordinates,
        version: &str,
        _description: &str,
    ) -> Result<VersionCreation> {
        self.log
            .borrow_mut()
            .push(format!("create {}/{}/{} {}", coords.org, coords.repo, coords.package, version));
        Ok(classify_create_status(self.create_status, coords, version)?)
    }

    async fn publish_file(
        &self,
        _coords: &PackageCoordinates,
        version: &str,
        file: &Path,
    ) -> Result<PublishedFile> {
        let name = file
            .file_name()
            .expect("archive has a file name")
            .to_string_lossy()
            .into_owned();
        assert!(file.is_file(), "archive must exist before upload");
        self.log.borrow_mut().push(format!("publish {} {}", version, name));
        Ok(PublishedFile {
            file_name: name,
            status: 200,
        })
    }
}

fn full_env(ws: &Workspace) -> EnvConfig {
    EnvConfig::from_pairs([
        ("BASE_DIR", ws.base_dir()),
        ("REPO_USER", "deployer".to_string()),
        ("REPO_API_KEY", "secret".to_string()),
    ])
}

#[tokio::test]
async fn test_full_release_sequence() {
    let ws = Workspace::new("3.1.0");
    let config = ws.config("3.1.0");
    let env = full_env(&ws);
    let runner = FakeRunner::reporting("[info] Loading project\n[info] 3.1.0\n");
    let output = RuntimeConfig::quiet();
    let log = RefCell::new(Vec::new());

    let ctx = ReleaseContext {
        config: &config,
        env: &env,
        runner: &runner,
        output: &output,
    };
    let outcome = perform_release(&ctx, |credentials| {
        assert_eq!(credentials.user, "deployer");
        assert_eq!(credentials.api_key, "secret");
        FakeRepository {
            create_status: 200,
            log: &log,
        }
    })
    .await
    .expect("release should succeed");

    assert_eq!(outcome.version.as_str(), "3.1.0");
    assert_eq!(outcome.layout.archive, ws.out.path().join("kinesis_tee_3_1_0.zip"));
    assert!(outcome.layout.archive.is_file());

    let calls = runner.calls.borrow();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].program, "sbt");
    assert_eq!(calls[0].args, vec!["version"]);
    assert_eq!(calls[0].current_dir.as_deref(), Some(ws.base.path()));
    assert_eq!(calls[1].args[0], "x");
    assert_eq!(calls[2].args[0], "a");
    assert_eq!(
        calls[2].args[4],
        format!("{}/deploy/gordon/*", ws.base_dir())
    );

    assert_eq!(
        log.into_inner(),
        vec![
            "create snowplow/snowplow-generic/kinesis-tee 3.1.0".to_string(),
            "publish 3.1.0 kinesis_tee_3_1_0.zip".to_string(),
        ]
    );
    let upload = outcome.upload.expect("upload result");
    assert_eq!(upload.version, VersionCreation::Created);
}

#[tokio::test]
async fn test_existing_version_still_publishes() {
    let ws = Workspace::new("1.0.0");
    let config = ws.config("v1.0.0");
    let env = full_env(&ws);
    let runner = FakeRunner::reporting("1.0.0");
    let output = RuntimeConfig::quiet();
    let log = RefCell::new(Vec::new());

    let ctx = ReleaseContext {
        config: &config,
        env: &env,
        runner: &runner,
        output: &output,
    };
    let outcome = perform_release(&ctx, |_| FakeRepository {
        create_status: 409,
        log: &log,
    })
    .await
    .expect("409 is not an error");

    assert_eq!(
        outcome.upload.expect("upload").version,
        VersionCreation::AlreadyExists
    );
    assert_eq!(log.borrow().len(), 2);
}

#[tokio::test]
async fn test_server_error_aborts_before_publish() {
    let ws = Workspace::new("1.0.0");
    let config = ws.config("1.0.0");
    let env = full_env(&ws);
    let runner = FakeRunner::reporting("1.0.0");
    let output = RuntimeConfig::quiet();
    let log = RefCell::new(Vec::new());

    let ctx = ReleaseContext {
        config: &config,
        env: &env,
        runner: &runner,
        output: &output,
    };
    let err = perform_release(&ctx, |_| FakeRepository {
        create_status: 500,
        log: &log,
    })
    .await
    .expect_err("500 must abort");

    assert!(matches!(
        err,
        ReleaseError::Repository(RepositoryError::ServerError { status: 500, .. })
    ));
    assert_eq!(log.into_inner(), vec!["create snowplow/snowplow-generic/kinesis-tee 1.0.0"]);
}

#[tokio::test]
async fn test_version_mismatch_stops_before_io() {
    let ws = Workspace::new("1.2.3");
    let config = ws.config("1.2.4");
    let env = full_env(&ws);
    let runner = FakeRunner::reporting("1.2.3");
    let output = RuntimeConfig::quiet();
    let connected = Cell::new(false);
    let log = RefCell::new(Vec::new());

    let ctx = ReleaseContext {
        config: &config,
        env: &env,
        runner: &runner,
        output: &output,
    };
    let err = perform_release(&ctx, |_| {
        connected.set(true);
        FakeRepository {
            create_status: 200,
            log: &log,
        }
    })
    .await
    .expect_err("mismatch must abort");

    assert!(matches!(
        err,
        ReleaseError::Validation(ValidationError::VersionMismatch { .. })
    ));
    assert!(runner.archiver_calls().is_empty());
    assert!(!connected.get());
    assert_eq!(std::fs::read_dir(ws.out.path()).expect("read out").count(), 0);
}

#[tokio::test]
async fn test_missing_base_dir_runs_nothing() {
    let ws = Workspace::new("1.0.0");
    let config = ws.config("1.0.0");
    let env = EnvConfig::from_pairs([("REPO_USER", "u"), ("REPO_API_KEY", "k")]);
    let runner = FakeRunner::reporting("1.0.0");
    let output = RuntimeConfig::quiet();
    let log = RefCell::new(Vec::new());

    let ctx = ReleaseContext {
        config: &config,
        env: &env,
        runner: &runner,
        output: &output,
    };
    let err = perform_release(&ctx, |_| FakeRepository {
        create_status: 200,
        log: &log,
    })
    .await
    .expect_err("BASE_DIR unset");

    assert!(matches!(err, ReleaseError::Config(ConfigError::MissingEnv { .. })));
    assert!(runner.calls.borrow().is_empty());
}

#[tokio::test]
async fn test_missing_credentials_stop_before_archiving() {
    let ws = Workspace::new("1.0.0");
    let config = ws.config("1.0.0");
    let env = EnvConfig::from_pairs([("BASE_DIR", ws.base_dir())]);
    let runner = FakeRunner::reporting("1.0.0");
    let output = RuntimeConfig::quiet();
    let log = RefCell::new(Vec::new());

    let ctx = ReleaseContext {
        config: &config,
        env: &env,
        runner: &runner,
        output: &output,
    };
    let err = perform_release(&ctx, |_| FakeRepository {
        create_status: 200,
        log: &log,
    })
    .await
    .expect_err("credentials unset");

    assert_eq!(err.to_string(), "Cannot find required field: REPO_USER");
    assert!(runner.archiver_calls().is_empty());
    assert!(log.borrow().is_empty());
}

#[tokio::test]
async fn test_missing_artifact_reported_before_credentials() {
    let ws = Workspace::new("1.0.0");
    let config = ws.config("2.0.0");
    let env = EnvConfig::from_pairs([("BASE_DIR", ws.base_dir())]);
    let runner = FakeRunner::reporting("2.0.0");
    let output = RuntimeConfig::quiet();
    let log = RefCell::new(Vec::new());

    let ctx = ReleaseContext {
        config: &config,
        env: &env,
        runner: &runner,
        output: &output,
    };
    let err = perform_release(&ctx, |_| FakeRepository {
        create_status: 200,
        log: &log,
    })
    .await
    .expect_err("artifact for 2.0.0 is absent");

    assert!(matches!(
        err,
        ReleaseError::Validation(ValidationError::MissingArtifact { .. })
    ));
}

#[tokio::test]
async fn test_extract_failure_skips_compress_and_upload() {
    let ws = Workspace::new("1.0.0");
    let config = ws.config("1.0.0");
    let env = full_env(&ws);
    let runner = FakeRunner::reporting("1.0.0").failing_on("x");
    let output = RuntimeConfig::quiet();
    let connected = Cell::new(false);
    let log = RefCell::new(Vec::new());

    let ctx = ReleaseContext {
        config: &config,
        env: &env,
        runner: &runner,
        output: &output,
    };
    let err = perform_release(&ctx, |_| {
        connected.set(true);
        FakeRepository {
            create_status: 200,
            log: &log,
        }
    })
    .await
    .expect_err("extract failure must abort");

    match err {
        ReleaseError::Archive(ArchiveError::CommandFailed { command, .. }) => {
            assert!(command.starts_with("7z x "), "unexpected command: {command}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(runner.archiver_calls().len(), 1);
    assert!(!connected.get());
}

#[tokio::test]
async fn test_compress_failure_skips_upload() {
    let ws = Workspace::new("1.0.0");
    let config = ws.config("1.0.0");
    let env = full_env(&ws);
    let runner = FakeRunner::reporting("1.0.0").failing_on("a");
    let output = RuntimeConfig::quiet();
    let connected = Cell::new(false);
    let log = RefCell::new(Vec::new());

    let ctx = ReleaseContext {
        config: &config,
        env: &env,
        runner: &runner,
        output: &output,
    };
    let err = perform_release(&ctx, |_| {
        connected.set(true);
        FakeRepository {
            create_status: 200,
            log: &log,
        }
    })
    .await
    .expect_err("compress failure must abort");

    match err {
        ReleaseError::Archive(ArchiveError::CommandFailed { command, .. }) => {
            assert!(
                command.starts_with("7z a -tzip -mx=9 "),
                "unexpected command: {command}"
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(runner.archiver_calls().len(), 2);
    assert!(!connected.get());
    assert!(log.borrow().is_empty());
}

#[tokio::test]
async fn test_dry_run_validates_only() {
    let ws = Workspace::new("1.0.0");
    let config = gordon_release::ReleaseConfig {
        dry_run: true,
        ..ws.config("1.0.0")
    };
    let env = full_env(&ws);
    let runner = FakeRunner::reporting("1.0.0");
    let output = RuntimeConfig::quiet();
    let connected = Cell::new(false);
    let log = RefCell::new(Vec::new());

    let ctx = ReleaseContext {
        config: &config,
        env: &env,
        runner: &runner,
        output: &output,
    };
    let outcome = perform_release(&ctx, |_| {
        connected.set(true);
        FakeRepository {
            create_status: 200,
            log: &log,
        }
    })
    .await
    .expect("dry run succeeds");

    assert!(outcome.upload.is_none());
    assert!(runner.archiver_calls().is_empty());
    assert!(!connected.get());
}
