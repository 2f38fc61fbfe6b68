#![cfg(feature = "cli")]

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn eiowire() -> Command {
    Command::new(env!("CARGO_BIN_EXE_eiowire"))
}

fn run_with_stdin(mut cmd: Command, input: &[u8]) -> Output {
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().expect("command should start");
    child
        .stdin
        .as_mut()
        .expect("stdin should be piped")
        .write_all(input)
        .expect("stdin should accept input");
    child.wait_with_output().expect("command should finish")
}

fn json_lines(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8(stdout.to_vec())
        .expect("json output should be UTF-8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("each output line should be JSON"))
        .collect()
}

#[test]
fn encode_emits_the_text_wire_form() {
    let output = eiowire()
        .args([
            "encode",
            "--json",
            r#"[{"type":"message","data":"hello"},{"type":"ping"}]"#,
        ])
        .output()
        .expect("encode should run");

    assert!(output.status.success());
    assert_eq!(output.stdout, b"6:4hello1:2");
}

#[test]
fn encode_emits_digit_value_binary_headers() {
    let output = eiowire()
        .args([
            "encode",
            "--binary",
            "--json",
            r#"[{"type":"message","data":"hello"}]"#,
        ])
        .output()
        .expect("encode should run");

    assert!(output.status.success());
    assert_eq!(
        output.stdout,
        [0x00, 0x06, 0xFF, b'4', b'h', b'e', b'l', b'l', b'o']
    );
}

#[test]
fn decode_reads_a_text_payload_from_stdin() {
    let output = run_with_stdin(
        {
            let mut cmd = eiowire();
            cmd.args(["--format", "json", "decode"]);
            cmd
        },
        b"12:4hello world3:4hi",
    );

    assert!(output.status.success());
    let records = json_lines(&output.stdout);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["type"], "message");
    assert_eq!(records[0]["data"], "hello world");
    assert_eq!(records[0]["index"], 0);
    assert_eq!(records[0]["total"], 2);
    assert_eq!(records[1]["data"], "hi");
    assert_eq!(records[1]["index"], 1);
}

#[test]
fn encode_then_decode_round_trips_a_binary_payload() {
    let encoded = eiowire()
        .args([
            "encode",
            "--binary",
            "--json",
            r#"[{"type":"message","data_base64":"AQID"},{"type":"ping"}]"#,
        ])
        .output()
        .expect("encode should run");
    assert!(encoded.status.success());

    let decoded = run_with_stdin(
        {
            let mut cmd = eiowire();
            cmd.args(["--format", "json", "decode"]);
            cmd
        },
        &encoded.stdout,
    );

    assert!(decoded.status.success());
    let records = json_lines(&decoded.stdout);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["type"], "message");
    assert_eq!(records[0]["body"], "binary");
    assert_eq!(records[0]["data"], "AQID");
    assert_eq!(records[1]["type"], "ping");
    assert_eq!(records[1]["body"], "none");
}

#[test]
fn decode_rejects_a_malformed_payload_with_data_invalid() {
    let output = run_with_stdin(
        {
            let mut cmd = eiowire();
            cmd.arg("decode");
            cmd
        },
        b"1:a",
    );

    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rejected"));
}

#[test]
fn decode_rejects_an_empty_payload() {
    let output = run_with_stdin(
        {
            let mut cmd = eiowire();
            cmd.arg("decode");
            cmd
        },
        b"",
    );

    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn version_prints_the_crate_version() {
    let output = eiowire()
        .args(["version"])
        .output()
        .expect("version should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("eiowire "));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn extended_version_reports_the_protocol_revision() {
    let output = eiowire()
        .args(["version", "--extended"])
        .output()
        .expect("version should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("protocol: 2"));
}
