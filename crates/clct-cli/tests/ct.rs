//! Running the `ct` binary against files on disk.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use clct_cli::{run_transpile, TranspileArgs};

fn ct(dir: &Path, input: &str, extra: &[&str]) -> Output {
    let in_file = dir.join("config.yaml");
    fs::write(&in_file, input).unwrap();
    Command::new(env!("CARGO_BIN_EXE_ct"))
        .arg("--in-file")
        .arg(&in_file)
        .arg("--out-file")
        .arg(dir.join("config.ign"))
        .args(extra)
        .output()
        .unwrap()
}

#[test]
fn converts_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = ct(
        dir.path(),
        "passwd:\n  users:\n    - name: core\n      ssh_authorized_keys: [key1]\n",
        &["--pretty"],
    );
    assert!(output.status.success());
    assert!(output.stderr.is_empty());

    let written = fs::read_to_string(dir.path().join("config.ign")).unwrap();
    assert!(written.ends_with("}\n"));
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["ignition"]["version"], "2.3.0");
    assert_eq!(value["passwd"]["users"][0]["sshAuthorizedKeys"][0], "key1");
}

#[test]
fn unrecognized_key_fails_and_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let output = ct(dir.path(), "passwd:\n  users:\n    - naem: core\n", &[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("warning: unrecognized keyword: naem at line 3, column 7"));
    assert!(stderr.contains("unrecognized keys in input, aborting"));
    assert!(!dir.path().join("config.ign").exists());
}

#[test]
fn semantic_error_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = ct(dir.path(), "systemd:\n  units:\n    - name: bad.blah\n", &[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error: invalid systemd unit extension at line 3, column 13"));
}

#[test]
fn warnings_do_not_fail() {
    let dir = tempfile::tempdir().unwrap();
    let output = ct(dir.path(), "flannel:\n  version: 0.9.0\n", &[]);
    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("warning: flannel minor version is too new"));
    assert!(dir.path().join("config.ign").exists());
}

#[test]
fn missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let args = TranspileArgs {
        in_file: Some(dir.path().join("absent.yaml")),
        out_file: Some(dir.path().join("out.json")),
        pretty: false,
    };
    let err = run_transpile(&args).unwrap_err();
    assert!(err.to_string().starts_with("failed to read"));
}

#[test]
fn compact_output_round_trips_through_the_library() {
    let dir = tempfile::tempdir().unwrap();
    let in_file = dir.path().join("in.yaml");
    let out_file = dir.path().join("out.json");
    fs::write(&in_file, "").unwrap();
    let args = TranspileArgs { in_file: Some(in_file), out_file: Some(out_file.clone()), pretty: false };
    run_transpile(&args).unwrap();
    assert_eq!(fs::read_to_string(out_file).unwrap(), r#"{"ignition":{"version":"2.3.0"}}"#);
}
