use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use joblaunch::config::load_and_validate;
use joblaunch::fs::mock::MockFileSystem;
use joblaunch::fs::{FileSystem, RealFileSystem};
use joblaunch::registry::TaskRegistry;
use joblaunch::signature::ReaderKind;
use joblaunch::types::TypeKind;
use tempfile::tempdir;

#[test]
fn test_mock_fs_directories_are_implied() {
    let fs = MockFileSystem::new();
    fs.add_file("/p/app/jobs/a_job.rb", "class AJob\nend\n");
    fs.add_file("/p/app/jobs/nested/b_job.rb", "class BJob\nend\n");
    fs.add_dir("/p/empty");

    assert!(fs.is_dir(Path::new("/p/app/jobs")));
    assert!(fs.is_dir(Path::new("/p/empty")));
    assert!(fs.is_file(Path::new("/p/app/jobs/a_job.rb")));
    assert!(!fs.is_file(Path::new("/p/app/jobs")));
    assert!(fs.exists(Path::new("/p/app")));
    assert!(!fs.exists(Path::new("/p/other")));

    assert_eq!(
        fs.read_dir(Path::new("/p/app/jobs")).unwrap(),
        [
            PathBuf::from("/p/app/jobs/a_job.rb"),
            PathBuf::from("/p/app/jobs/nested"),
        ]
    );
    assert!(fs.read_dir(Path::new("/p/empty")).unwrap().is_empty());
    assert!(fs.read_dir(Path::new("/p/app/jobs/a_job.rb")).is_err());

    assert_eq!(
        fs.read_to_string(Path::new("/p/app/jobs/a_job.rb")).unwrap(),
        "class AJob\nend\n"
    );
    assert!(fs.read_to_string(Path::new("/p/app")).is_err());
    assert!(fs.read_to_string(Path::new("/p/none.rb")).is_err());
}

#[test]
fn test_real_fs_read_dir_is_sorted() {
    let dir = tempdir().unwrap();
    for name in ["c.rb", "a.rb", "b.rb"] {
        fs::write(dir.path().join(name), "").unwrap();
    }

    let entries = RealFileSystem.read_dir(dir.path()).unwrap();
    let names: Vec<_> = entries
        .iter()
        .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
        .collect();
    assert_eq!(names, ["a.rb", "b.rb", "c.rb"]);

    let err = RealFileSystem
        .read_to_string(&dir.path().join("missing.rb"))
        .unwrap_err();
    assert!(format!("{err:#}").contains("missing.rb"));
}

#[test]
fn test_registry_on_disk() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("app/sidekiq_rbs")).unwrap();
    fs::create_dir_all(root.join("sig/sidekiq_rbs")).unwrap();

    fs::write(
        root.join("app/sidekiq_rbs/report_job.rb"),
        r#"module SidekiqRbs
  class ReportJob
    include Sidekiq::Job

    def perform(account_id, options = {})
    end
  end
end
"#,
    )
    .unwrap();
    fs::write(
        root.join("sig/sidekiq_rbs/report_job.rbs"),
        "module SidekiqRbs\n  class ReportJob\n    def perform: (Integer account_id, ?Hash[String, untyped] options) -> void\n  end\nend\n",
    )
    .unwrap();

    let config_path = root.join("Joblaunch.toml");
    fs::write(&config_path, "[discovery]\njob_paths = \"app/sidekiq_rbs\"\n").unwrap();

    let cfg = load_and_validate(&config_path).unwrap();
    let registry = TaskRegistry::with_source_catalog(cfg, Arc::new(RealFileSystem)).unwrap();

    let jobs = registry.jobs();
    assert_eq!(jobs.len(), 1);
    let job = &jobs[0];
    assert_eq!(job.name(), "SidekiqRbs::ReportJob");
    assert_eq!(job.reader_kind(), ReaderKind::SignatureFile);
    assert_eq!(job.file_name(), "report_job.rb");

    let options = job.param_specs("options").unwrap();
    assert!(!options.required);
    assert_eq!(options.allowed_types.as_slice(), &[TypeKind::Hash, TypeKind::String]);
}
