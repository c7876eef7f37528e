// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino_tempfile::Utf8TempDir;
use std::{
    io::Write,
    process::{Command, Output, Stdio},
};
use xml_report_metadata::XmlReportExitCode;

fn xml_report(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_xml-report"))
        .args(args)
        .env_remove("XML_REPORT_LOG")
        .env_remove("gauge_reports_dir")
        .env_remove("overwrite_reports")
        .env_remove("xml_report_file_name")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("xml-report spawned");
    // The process may exit before reading its input, so a failed write is fine.
    let _ = child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes());
    child.wait_with_output().expect("xml-report finished")
}

#[test]
fn converts_stdin_to_stdout() {
    let output = xml_report(
        &["convert", "--color", "never", "--output", "-"],
        r#"{ "specResults": [{ "spec": { "heading": "Checkout" }, "scenarioCount": 0 }] }"#,
    );

    assert_eq!(output.status.code(), Some(XmlReportExitCode::OK));
    let stdout = String::from_utf8(output.stdout).expect("stdout is UTF-8");
    assert!(
        stdout.contains(r#"<testsuite id="1" tests="0" failures="0" errors="0" package="""#),
        "unexpected stdout:\n{stdout}"
    );
    assert!(stdout.contains(r#"name="Checkout""#), "unexpected stdout:\n{stdout}");
}

#[test]
fn writes_report_under_reports_dir() {
    let dir = Utf8TempDir::new().expect("temp dir created");
    let output = xml_report(
        &[
            "convert",
            "--color",
            "never",
            "--reports-dir",
            dir.path().as_str(),
        ],
        r#"{ "suiteResult": { "specResults": [] } }"#,
    );

    assert_eq!(output.status.code(), Some(XmlReportExitCode::OK));
    let report = dir.path().join("xml-report").join("result.xml");
    assert!(report.is_file(), "report written to {report}");
    let stderr = String::from_utf8(output.stderr).expect("stderr is UTF-8");
    assert!(
        stderr.contains("info: successfully generated xml-report to => "),
        "unexpected stderr:\n{stderr}"
    );
}

#[test]
fn invalid_input_exit_code() {
    let output = xml_report(&["convert", "--color", "never", "--output", "-"], "[1, 2");

    assert_eq!(
        output.status.code(),
        Some(XmlReportExitCode::INPUT_PARSE_FAILED)
    );
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).expect("stderr is UTF-8");
    assert!(
        stderr.contains("error: failed to parse execution result from <stdin>"),
        "unexpected stderr:\n{stderr}"
    );
    assert!(stderr.contains("Caused by:"), "unexpected stderr:\n{stderr}");
}

#[test]
fn invalid_config_exit_code() {
    let dir = Utf8TempDir::new().expect("temp dir created");
    let config = dir.path().join("xml-report.toml");
    std::fs::write(&config, "unknown-key = 1\n").expect("config written");

    let output = xml_report(
        &["convert", "--color", "never", "--config", config.as_str()],
        "{}",
    );
    assert_eq!(output.status.code(), Some(XmlReportExitCode::SETUP_ERROR));
}
