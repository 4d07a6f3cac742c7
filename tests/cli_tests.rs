//! Integration tests for the kurmi-workspace binaries.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;

fn parser_cmd() -> Command {
    cargo_bin_cmd!("kurmi-workspace-parser")
}

fn filter_cmd() -> Command {
    cargo_bin_cmd!("kurmi-vendor-filter")
}

fn write_archive(path: &Path, members: &[(&str, &str)]) {
    let file = fs::File::create(path).expect("failed to create archive");
    let mut zip = zip::ZipWriter::new(file);
    for (name, content) in members {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

fn sample_workspace(dir: &Path) {
    write_archive(
        &dir.join("prod.configfile.zip"),
        &[
            ("workspace.txt", "workspace metadata"),
            ("Cisco/phone.service.xml", "<service/>"),
            ("Cisco/phone.widget.js", "widget"),
            ("webex/welcome.mail.js", "mail"),
            ("webex/flows/main.scenario.json", "{}"),
            ("notes/readme.md", "ignored"),
        ],
    );
}

fn extraction_tree(root: &Path) {
    for dir in [
        "widgets/Cisco",
        "widgets/Microsoft",
        "widgets/webex",
        "emails/webex",
        "emails/common",
        "scenarios/webex",
    ] {
        fs::create_dir_all(root.join(dir)).unwrap();
        fs::write(root.join(dir).join("file.js"), dir).unwrap();
    }
}

fn snapshot(root: &Path) -> Vec<String> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .map(|e| {
            e.unwrap()
                .path()
                .strip_prefix(root)
                .unwrap()
                .display()
                .to_string()
        })
        .collect()
}

#[test]
fn test_parser_help_flag() {
    parser_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Kurmi workspace export"));
}

#[test]
fn test_filter_version_flag() {
    filter_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_parser_extracts_selected_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");
    sample_workspace(temp.path());

    parser_cmd()
        .current_dir(temp.path())
        .args(["--output-format", "plain"])
        .write_stdin("1\ndone\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("SELECT CATEGORIES TO EXTRACT"))
        .stdout(predicate::str::contains("REPORT: Parsing completed"))
        .stdout(predicate::str::contains("Total: 4"));

    let out = temp.path().join("kurmi_workspace_extraction");
    assert_eq!(
        fs::read_to_string(out.join("service_definitions/Cisco/phone.service.xml")).unwrap(),
        "<service/>"
    );
    assert!(out.join("widgets/Cisco/phone.widget.js").exists());
    assert!(out.join("emails/webex/welcome.mail.js").exists());
    assert!(out.join("scenarios/webex/flows/main.scenario.json").exists());
    assert!(!out.join("workspace.txt").exists());
    assert!(temp.path().join("workspace_parser.log").exists());
}

#[test]
fn test_parser_json_report() {
    let temp = TempDir::new().expect("failed to create temp dir");
    sample_workspace(temp.path());

    parser_cmd()
        .current_dir(temp.path())
        .args(["--input", "prod.configfile.zip", "--output-format", "json"])
        .write_stdin("none\n5\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_files\": 1"))
        .stdout(predicate::str::contains("\"unmatched\": 4"));
}

#[test]
fn test_parser_without_archives_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");

    parser_cmd()
        .current_dir(temp.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No workspace archives found"));
}

#[test]
fn test_parser_missing_input_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");

    parser_cmd()
        .current_dir(temp.path())
        .args(["--input", "missing.configfile.zip"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Workspace archive not found"));
}

#[test]
fn test_parser_corrupt_archive_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");
    fs::write(temp.path().join("broken.configfile.zip"), b"not a zip").unwrap();

    parser_cmd()
        .current_dir(temp.path())
        .write_stdin("1\n\n")
        .assert()
        .code(2);
}

#[test]
fn test_parser_no_categories_selected() {
    let temp = TempDir::new().expect("failed to create temp dir");
    sample_workspace(temp.path());

    parser_cmd()
        .current_dir(temp.path())
        .write_stdin("1\nnone\ndone\n")
        .assert()
        .code(4);

    assert!(!temp.path().join("kurmi_workspace_extraction").exists());
}

#[test]
fn test_parser_quit_at_archive_menu() {
    let temp = TempDir::new().expect("failed to create temp dir");
    sample_workspace(temp.path());

    parser_cmd()
        .current_dir(temp.path())
        .write_stdin("q\n")
        .assert()
        .code(1);

    assert!(!temp.path().join("kurmi_workspace_extraction").exists());
}

#[test]
fn test_filter_keeps_preset_and_toggled_vendors() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = temp.path().join("kurmi_workspace_extraction");
    extraction_tree(&root);

    filter_cmd()
        .current_dir(temp.path())
        .args(["--output-format", "plain"])
        .write_stdin("cisco\n2\ndone\nyes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied preset: Cisco"))
        .stdout(predicate::str::contains("REPORT: Vendor removal completed"))
        .stdout(predicate::str::contains("Removed: 2"));

    assert!(!root.join("widgets/webex").exists());
    assert!(!root.join("emails/webex").exists());
    assert!(root.join("widgets/Cisco/file.js").exists());
    assert!(root.join("widgets/Microsoft/file.js").exists());
    assert!(root.join("emails/common/file.js").exists());
    assert!(root.join("scenarios/webex/file.js").exists());
    assert!(temp.path().join("vendor_filter.log").exists());
}

#[test]
fn test_filter_quit_leaves_tree_unchanged() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = temp.path().join("kurmi_workspace_extraction");
    extraction_tree(&root);
    let before = snapshot(&root);

    filter_cmd()
        .current_dir(temp.path())
        .write_stdin("none\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes made"));

    assert_eq!(snapshot(&root), before);
}

#[test]
fn test_filter_declined_confirmation_leaves_tree_unchanged() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = temp.path().join("custom_root");
    extraction_tree(&root);
    let before = snapshot(&root);

    filter_cmd()
        .current_dir(temp.path())
        .args(["--directory", "custom_root"])
        .write_stdin("webex\ndone\nnope\n")
        .assert()
        .success();

    assert_eq!(snapshot(&root), before);
}

#[test]
fn test_filter_missing_directory() {
    let temp = TempDir::new().expect("failed to create temp dir");

    filter_cmd()
        .current_dir(temp.path())
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Extraction directory not found"));
}

#[test]
fn test_filter_rejects_unknown_reserved_category() {
    let temp = TempDir::new().expect("failed to create temp dir");
    fs::create_dir(temp.path().join("kurmi_workspace_extraction")).unwrap();

    filter_cmd()
        .current_dir(temp.path())
        .args(["--reserved", "bogus"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown reserved category"));
}

#[test]
fn test_generate_config() {
    let temp = TempDir::new().expect("failed to create temp dir");

    filter_cmd()
        .current_dir(temp.path())
        .arg("--generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated sample configuration file"));

    let content = fs::read_to_string(temp.path().join("kurmi.toml")).unwrap();
    assert!(content.contains("reserved_categories"));

    // The generated file is picked up automatically on the next run.
    parser_cmd()
        .current_dir(temp.path())
        .assert()
        .code(3);
}
