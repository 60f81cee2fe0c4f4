//! Integration tests for depozip-core.
//!
//! These tests archive real directory trees and run the upload workflow
//! against in-process deposition clients.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use depozip_core::ArchiveConfig;
use depozip_core::DepositError;
use depozip_core::DepositionClient;
use depozip_core::Metadata;
use depozip_core::ProgressCallback;
use depozip_core::RemoteError;
use depozip_core::UploadRequest;
use depozip_core::archive::ArchiveReport;
use depozip_core::archive_directory;
use depozip_core::deposition::Deposition;
use depozip_core::upload_directory;
use depozip_core::upload_directory_with_progress;
use serde_json::json;
use std::cell::RefCell;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

fn entry_names(path: &Path) -> Vec<String> {
    let archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    let mut names: Vec<_> = archive.file_names().map(str::to_owned).collect();
    names.sort();
    names
}

/// Builds the layout a typical Python project leaves behind.
fn python_project(root: &Path) {
    fs::create_dir_all(root.join(".git/objects")).unwrap();
    fs::write(root.join(".git/config"), "[core]").unwrap();
    fs::create_dir_all(root.join("src/pkg/__pycache__")).unwrap();
    fs::write(root.join("src/pkg/__init__.py"), "").unwrap();
    fs::write(root.join("src/pkg/core.py"), "x = 1\n").unwrap();
    fs::write(root.join("src/pkg/core.pyc"), [0u8; 4]).unwrap();
    fs::write(root.join("src/pkg/__pycache__/core.cpython-312.pyc"), [0u8; 4]).unwrap();
    fs::create_dir_all(root.join("build/lib")).unwrap();
    fs::write(root.join("build/lib/out.so"), "so").unwrap();
    fs::create_dir_all(root.join("docs/build")).unwrap();
    fs::write(root.join("docs/build/index.html"), "<html/>").unwrap();
    fs::write(root.join("docs/index.md"), "# Docs").unwrap();
    fs::write(root.join(".DS_Store"), "junk").unwrap();
    fs::write(root.join(".env"), "SECRET=1").unwrap();
    fs::write(root.join("README.md"), "readme").unwrap();
}

#[test]
fn test_python_project_default_filtering() {
    let temp = TempDir::new().unwrap();
    python_project(temp.path());
    let out = TempDir::new().unwrap();

    let config = ArchiveConfig::default().with_output(Some(out.path().join("p.zip")));
    let archive = archive_directory(temp.path(), &config).unwrap();

    assert_eq!(
        entry_names(&archive.path),
        vec![
            ".env",
            "README.md",
            "docs/index.md",
            "src/pkg/__init__.py",
            "src/pkg/core.py",
        ]
    );
    assert_eq!(archive.report.files_added, 5);
}

#[test]
fn test_pyo_files_excluded() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("mod.pyo"), "o").unwrap();
    fs::write(temp.path().join("mod.py"), "p").unwrap();
    let out = TempDir::new().unwrap();

    let config = ArchiveConfig::default().with_output(Some(out.path().join("o.zip")));
    let archive = archive_directory(temp.path(), &config).unwrap();

    assert_eq!(entry_names(&archive.path), vec!["mod.py"]);
}

#[test]
fn test_extra_ignore_names() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("node_modules/lib")).unwrap();
    fs::write(temp.path().join("node_modules/lib/index.js"), "js").unwrap();
    fs::write(temp.path().join("keep.txt"), "keep").unwrap();
    let out = TempDir::new().unwrap();

    let config = ArchiveConfig::default()
        .with_extra_ignore(["node_modules"])
        .with_output(Some(out.path().join("e.zip")));
    let archive = archive_directory(temp.path(), &config).unwrap();

    assert_eq!(entry_names(&archive.path), vec!["keep.txt"]);
}

#[test]
fn test_archive_in_root_excludes_itself() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("data.csv"), "1,2,3").unwrap();

    let config = ArchiveConfig::default().with_output(Some(root.join("self.zip")));
    let archive = archive_directory(root, &config).unwrap();

    assert_eq!(entry_names(&archive.path), vec!["data.csv"]);
    assert!(archive.report.files_skipped >= 1);
}

#[test]
fn test_contents_round_trip() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("a/b")).unwrap();
    let large: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
    fs::write(root.join("a/b/large.bin"), &large).unwrap();
    fs::write(root.join("empty.txt"), "").unwrap();
    let out = TempDir::new().unwrap();

    let config = ArchiveConfig::default().with_output(Some(out.path().join("rt.zip")));
    let archive = archive_directory(root, &config).unwrap();

    let mut zip = zip::ZipArchive::new(fs::File::open(&archive.path).unwrap()).unwrap();
    let mut extracted = Vec::new();
    zip.by_name("a/b/large.bin")
        .unwrap()
        .read_to_end(&mut extracted)
        .unwrap();
    assert_eq!(extracted, large);

    let empty = zip.by_name("empty.txt").unwrap();
    assert_eq!(empty.size(), 0);
    drop(empty);

    assert_eq!(archive.report.bytes_read, large.len() as u64);
}

#[test]
fn test_empty_directory_gives_empty_archive() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("empty")).unwrap();
    let out = TempDir::new().unwrap();

    let config = ArchiveConfig::default().with_output(Some(out.path().join("x.zip")));
    let archive = archive_directory(temp.path(), &config).unwrap();

    assert!(entry_names(&archive.path).is_empty());
    assert_eq!(archive.report.files_added, 0);
}

/// Records what it was asked to deposit.
#[derive(Default)]
struct RecordingClient {
    calls: RefCell<Vec<(Metadata, Vec<PathBuf>, Vec<String>, bool)>>,
}

impl DepositionClient for RecordingClient {
    fn create(
        &self,
        metadata: &Metadata,
        paths: &[&Path],
        publish: bool,
    ) -> Result<Deposition, RemoteError> {
        // The archive must be complete by the time the client sees it
        let names = paths.first().map(|p| entry_names(p)).unwrap_or_default();
        self.calls.borrow_mut().push((
            metadata.clone(),
            paths.iter().map(|p| p.to_path_buf()).collect(),
            names,
            publish,
        ));
        let state = if publish { "done" } else { "unsubmitted" };
        Deposition::from_response(json!({
            "id": 4242,
            "state": state,
            "links": {"html": "https://zenodo.example/deposit/4242"}
        }))
    }
}

/// Always fails with the same service error.
struct RejectingClient;

impl DepositionClient for RejectingClient {
    fn create(
        &self,
        _metadata: &Metadata,
        _paths: &[&Path],
        _publish: bool,
    ) -> Result<Deposition, RemoteError> {
        Err(RemoteError::Status {
            status: 400,
            url: "https://zenodo.example/api/deposit/depositions".to_string(),
            body: r#"{"message": "Validation error."}"#.to_string(),
        })
    }
}

#[test]
fn test_upload_with_defaults() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("survey-data");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.txt"), "a").unwrap();
    fs::create_dir(root.join("__pycache__")).unwrap();
    fs::write(root.join("__pycache__/x.pyc"), "x").unwrap();

    let client = RecordingClient::default();
    let result = upload_directory(&UploadRequest::new(&root), &client).unwrap();

    let calls = client.calls.borrow();
    assert_eq!(calls.len(), 1);
    let (metadata, paths, names, publish) = &calls[0];
    assert_eq!(metadata.title, "survey-data");
    assert_eq!(metadata.creators[0].name, "Authors, Anonymous");
    assert_eq!(metadata.license, "CC0-1.0");
    assert_eq!(paths, &vec![result.archive_path.clone()]);
    assert_eq!(names, &vec!["a.txt".to_string()]);
    assert!(*publish);

    assert_eq!(result.deposition_id, "4242");
    assert_eq!(result.response["state"], "done");
    assert_eq!(result.html_url(), Some("https://zenodo.example/deposit/4242"));

    fs::remove_file(&result.archive_path).unwrap();
}

#[test]
fn test_upload_draft_only() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    let out = TempDir::new().unwrap();

    let request = UploadRequest::new(temp.path())
        .with_title("Draft")
        .with_creators(["Doe, Jane", "Roe, Richard"])
        .with_publish(false)
        .with_archive_config(
            ArchiveConfig::default().with_output(Some(out.path().join("draft.zip"))),
        );
    let client = RecordingClient::default();
    let result = upload_directory(&request, &client).unwrap();

    let calls = client.calls.borrow();
    assert!(!calls[0].3);
    assert_eq!(calls[0].0.creators.len(), 2);
    assert_eq!(result.response["state"], "unsubmitted");
    assert!(result.archive_path.ends_with("draft.zip"));
}

#[test]
fn test_upload_remote_error_propagates_unchanged() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    let out = TempDir::new().unwrap();
    let output = out.path().join("kept.zip");

    let request = UploadRequest::new(temp.path())
        .with_archive_config(ArchiveConfig::default().with_output(Some(output.clone())));
    let err = upload_directory(&request, &RejectingClient).unwrap_err();

    assert!(err.is_remote());
    match err {
        DepositError::Remote(RemoteError::Status { status, body, .. }) => {
            assert_eq!(status, 400);
            assert!(body.contains("Validation error."));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // The archive is not cleaned up after a failed upload
    assert!(output.exists());
}

#[test]
fn test_upload_invalid_directory_never_reaches_client() {
    let temp = TempDir::new().unwrap();
    let client = RecordingClient::default();

    let err = upload_directory(&UploadRequest::new(temp.path().join("nope")), &client)
        .unwrap_err();

    assert!(matches!(err, DepositError::NotADirectory { .. }));
    assert!(client.calls.borrow().is_empty());
}

#[test]
fn test_upload_invalid_metadata_never_archives() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    let out = TempDir::new().unwrap();
    let output = out.path().join("never.zip");

    let request = UploadRequest::new(temp.path())
        .with_creators(["Doe, Jane", "  "])
        .with_archive_config(ArchiveConfig::default().with_output(Some(output.clone())));
    let client = RecordingClient::default();
    let err = upload_directory(&request, &client).unwrap_err();

    assert!(err.is_invalid_input());
    assert!(!output.exists());
    assert!(client.calls.borrow().is_empty());
}

#[derive(Default)]
struct StageRecorder {
    stages: Vec<String>,
}

impl ProgressCallback for StageRecorder {
    fn on_entry_added(&mut self, arcname: &str, _size: u64) {
        self.stages.push(format!("entry {arcname}"));
    }

    fn on_archive_complete(&mut self, _path: &Path, report: &ArchiveReport) {
        self.stages.push(format!("archived {}", report.files_added));
    }

    fn on_upload_start(&mut self, _archive: &Path) {
        self.stages.push("upload".to_string());
    }

    fn on_complete(&mut self) {
        self.stages.push("done".to_string());
    }
}

#[test]
fn test_upload_progress_stage_order() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    let out = TempDir::new().unwrap();

    let request = UploadRequest::new(temp.path()).with_archive_config(
        ArchiveConfig::default().with_output(Some(out.path().join("p.zip"))),
    );
    let mut progress = StageRecorder::default();
    upload_directory_with_progress(&request, &RecordingClient::default(), &mut progress)
        .unwrap();

    assert_eq!(
        progress.stages,
        vec!["entry a.txt", "archived 1", "upload", "done"]
    );
}

#[test]
fn test_upload_progress_stops_on_failure() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    let out = TempDir::new().unwrap();

    let request = UploadRequest::new(temp.path()).with_archive_config(
        ArchiveConfig::default().with_output(Some(out.path().join("p.zip"))),
    );
    let mut progress = StageRecorder::default();
    upload_directory_with_progress(&request, &RejectingClient, &mut progress).unwrap_err();

    assert_eq!(progress.stages.last().map(String::as_str), Some("upload"));
}
