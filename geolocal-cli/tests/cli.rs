//! End-to-end tests for the geolocal binary.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use geolocal_schema::TableDocument;
use tempfile::TempDir;

/// Create a working directory with a config and one range file.
fn create_workspace(ranges: &str) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let mut config = File::create(dir.path().join("geo.json")).unwrap();
    writeln!(
        config,
        r#"{{"module": "Geo", "ipv6": false, "countries": {{"us": "US", "eu": ["DE", "FR"]}}}}"#
    )
    .unwrap();

    fs::write(dir.path().join("ranges.csv"), ranges).unwrap();
    dir
}

/// Run geolocal with the given arguments.
fn run(args: &[&str]) -> Output {
    let binary = env!("CARGO_BIN_EXE_geolocal");
    Command::new(binary)
        .args(args)
        .output()
        .expect("Failed to execute geolocal")
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

fn build(dir: &TempDir) -> Output {
    let config = path_arg(&dir.path().join("geo.json"));
    let ranges = path_arg(&dir.path().join("ranges.csv"));
    let out = path_arg(&dir.path().join("out").join("table.json"));
    run(&["build", "-q", "-c", &config, "-i", &ranges, "-o", &out])
}

fn lookup(dir: &TempDir, label: &str, addresses: &[&str]) -> Output {
    let table = path_arg(&dir.path().join("out").join("table.json"));
    let mut args = vec!["lookup", "-t", table.as_str(), "-l", label];
    args.extend_from_slice(addresses);
    run(&args)
}

#[test]
fn test_build_then_lookup() {
    let dir = create_workspace(
        "1.0.0.0,1.0.0.5,US\n1.0.0.6,1.0.0.10,US\n1.0.0.20,1.0.0.25,US\n2.0.0.0/24,DE\n",
    );

    let output = build(&dir);
    assert!(
        output.status.success(),
        "build failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let text = fs::read_to_string(dir.path().join("out").join("table.json")).unwrap();
    let doc = TableDocument::from_json(&text).expect("table document");
    assert_eq!(doc.module, "Geo");
    assert_eq!(doc.range_count(), 3);

    let output = lookup(&dir, "us", &["1.0.0.8", "1.0.0.15", "2.0.0.1"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "1.0.0.8 true\n1.0.0.15 false\n2.0.0.1 false\n"
    );

    let output = lookup(&dir, "EU", &["2.0.0.1"]);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "2.0.0.1 true\n");
}

#[test]
fn test_lookup_disabled_family_fails() {
    let dir = create_workspace("1.0.0.0,1.0.0.5,US\n");
    assert!(build(&dir).status.success());

    let output = lookup(&dir, "US", &["::1"]);
    assert_eq!(output.status.code(), Some(6));
}

#[test]
fn test_reversed_range_fails_without_output() {
    let dir = create_workspace("1.0.0.0,1.0.0.5,US\n10.0.0.5,10.0.0.1,US\n");

    let output = build(&dir);
    assert_eq!(output.status.code(), Some(5));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ranges.csv:2"), "stderr: {}", stderr);
    assert!(stderr.contains("wrong order"), "stderr: {}", stderr);
    assert!(!dir.path().join("out").join("table.json").exists());
}

#[test]
fn test_malformed_range_file() {
    let dir = create_workspace("1.0.0.0\n");
    assert_eq!(build(&dir).status.code(), Some(4));
}

#[test]
fn test_missing_config() {
    let dir = TempDir::new().unwrap();
    let missing = path_arg(&dir.path().join("nope.json"));
    let output = run(&["build", "-c", &missing, "-i", "ranges.csv"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_inputs_is_invalid_argument() {
    let dir = create_workspace("");
    let config = path_arg(&dir.path().join("geo.json"));
    let output = run(&["build", "-c", &config]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_flag_disabling_remaining_family_is_config_error() {
    let dir = create_workspace("1.0.0.0,1.0.0.5,US\n");
    let config = path_arg(&dir.path().join("geo.json"));
    let ranges = path_arg(&dir.path().join("ranges.csv"));
    let out = path_arg(&dir.path().join("out").join("table.json"));

    let output = run(&["build", "-q", "-c", &config, "-i", &ranges, "-o", &out, "--no-ipv4"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(!dir.path().join("out").join("table.json").exists());
}
