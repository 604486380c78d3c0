// tests/integration/config_loading.rs

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use joblaunch::config::{JobPaths, load_and_validate, load_from_path};
use joblaunch::errors::LauncherError;
use joblaunch::fs::RealFileSystem;
use tempfile::{NamedTempFile, tempdir};

#[test]
fn test_defaults_when_sections_are_missing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Joblaunch.toml");
    fs::write(&path, "").unwrap();

    let cfg = load_and_validate(&path).unwrap();
    assert_eq!(cfg.project_root, dir.path());
    assert_eq!(cfg.discovery.job_paths.as_slice(), &[PathBuf::from("app/sidekiq")]);
    assert_eq!(cfg.discovery.markers, ["Sidekiq::Job", "Sidekiq::Worker"]);
    assert_eq!(cfg.discovery.include, ["*.rb"]);
    assert_eq!(cfg.signatures.entry_point, "perform");
    assert_eq!(cfg.signatures.root, PathBuf::from("sig"));
    assert_eq!(cfg.signatures.extension, "rbs");
    assert_eq!(cfg.signatures.strip_prefix.as_deref(), Some("app"));
}

#[test]
fn test_full_config() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
project_root = "/srv/app"

[discovery]
job_paths = ["app/sidekiq_jobs", "lib/jobs"]
markers = ["Sidekiq::Job"]
include = ["*_job.rb"]

[signatures]
entry_point = "call"
root = "types"
extension = ".rbs"
strip_prefix = "lib"
"#
    )
    .unwrap();

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.project_root, PathBuf::from("/srv/app"));
    assert_eq!(
        cfg.discovery.job_paths,
        JobPaths::Many(vec!["app/sidekiq_jobs".into(), "lib/jobs".into()])
    );
    assert_eq!(cfg.discovery.markers, ["Sidekiq::Job"]);
    assert_eq!(cfg.signatures.entry_point, "call");

    let layout = cfg.signature_layout();
    assert_eq!(layout.signature_root, PathBuf::from("/srv/app/types"));
    assert_eq!(layout.extension, "rbs");
    assert_eq!(
        layout.signature_path_for(&PathBuf::from("/srv/app/lib/jobs/x_job.rb")),
        Some(PathBuf::from("/srv/app/types/jobs/x_job.rbs"))
    );
}

#[test]
fn test_single_job_path_form() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[discovery]
job_paths = "app/workers"
"#
    )
    .unwrap();

    let raw = load_from_path(file.path()).unwrap();
    assert_eq!(raw.discovery.job_paths, JobPaths::One("app/workers".into()));
    assert_eq!(raw.discovery.job_paths.as_slice(), &[PathBuf::from("app/workers")]);
}

#[test]
fn test_relative_project_root_is_resolved_against_config_dir() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Joblaunch.toml");
    fs::write(&path, "project_root = \"backend\"\n").unwrap();

    let cfg = load_and_validate(&path).unwrap();
    assert_eq!(cfg.project_root, dir.path().join("backend"));
    assert_eq!(
        cfg.resolve(&PathBuf::from("app/sidekiq")),
        dir.path().join("backend/app/sidekiq")
    );
    assert_eq!(cfg.resolve(&PathBuf::from("/abs")), PathBuf::from("/abs"));
}

#[test]
fn test_existing_job_paths_drops_non_directories() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("app/sidekiq")).unwrap();
    fs::create_dir_all(dir.path().join("lib")).unwrap();
    fs::write(dir.path().join("lib/jobs"), "not a directory").unwrap();

    let path = dir.path().join("Joblaunch.toml");
    fs::write(
        &path,
        "[discovery]\njob_paths = [\"app/sidekiq\", \"lib/jobs\", \"missing\"]\n",
    )
    .unwrap();

    let cfg = load_and_validate(&path).unwrap();
    assert_eq!(
        cfg.existing_job_paths(&RealFileSystem),
        [dir.path().join("app/sidekiq")]
    );
}

#[test]
fn test_empty_markers_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[discovery]\nmarkers = []\n").unwrap();

    match load_and_validate(file.path()) {
        Err(LauncherError::ConfigError(msg)) => assert!(msg.contains("markers")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_invalid_entry_point_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[signatures]\nentry_point = \"not a method\"\n").unwrap();

    match load_and_validate(file.path()) {
        Err(LauncherError::ConfigError(msg)) => assert!(msg.contains("entry_point")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_empty_extension_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[signatures]\nextension = \".\"\n").unwrap();

    assert!(matches!(
        load_and_validate(file.path()),
        Err(LauncherError::ConfigError(_))
    ));
}

#[test]
fn test_invalid_include_pattern_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[discovery]\ninclude = [\"[unclosed\"]\n").unwrap();

    match load_and_validate(file.path()) {
        Err(LauncherError::ConfigError(msg)) => assert!(msg.contains("[unclosed")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_malformed_toml_is_a_toml_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[discovery\njob_paths = 3\n").unwrap();

    assert!(matches!(
        load_and_validate(file.path()),
        Err(LauncherError::TomlError(_))
    ));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        load_and_validate(dir.path().join("nope.toml")),
        Err(LauncherError::IoError(_))
    ));
}
