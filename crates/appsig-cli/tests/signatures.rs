//! End to end tests for computing and verifying app signatures

use std::{
    io::Write,
    path::PathBuf,
    process::{Output, Stdio},
};

mod common;
use common::appsig;

const PACKAGE: &str = "com.example.app";

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write_tmp(name: &str, contents: &[u8]) -> PathBuf {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    std::fs::write(&path, contents).expect("Failed to write temporary certificate");
    path
}

#[test]
fn test_compute_known_vector() {
    let output = appsig()
        .args(["compute", "--package", PACKAGE])
        .args(["--certificate", "3082\u{2026}abc"])
        .output()
        .expect("Failed to execute appsig command");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["appSignature"], "fWJJeOH8i8F");
    assert_eq!(json[0]["package"], PACKAGE);
}

#[test]
fn test_compute_package_from_env() {
    let output = appsig()
        .env("APPSIG_PACKAGE", PACKAGE)
        .args(["compute", "--certificate", "308201ab", "-o", "yaml"])
        .output()
        .expect("Failed to execute appsig command");

    assert!(output.status.success());
    assert!(stdout(&output).contains("appSignature: yWvcmvn8c5t"));
}

#[test]
fn test_compute_multiple_certificates_from_files() {
    let der = write_tmp("appsig-test.der", &[0x30, 0x82, 0x01, 0xab]);
    let pem = write_tmp(
        "appsig-test.pem",
        b"-----BEGIN CERTIFICATE-----\nMIIBqw==\n-----END CERTIFICATE-----\n",
    );

    let output = appsig()
        .args(["compute", "--package", PACKAGE])
        .args(["--certificate", "3082\u{2026}abc"])
        .arg("--cert-file")
        .arg(&der)
        .arg("--cert-file")
        .arg(&pem)
        .output()
        .expect("Failed to execute appsig command");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let signatures: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["appSignature"].as_str().unwrap())
        .collect();
    assert_eq!(signatures, ["fWJJeOH8i8F", "yWvcmvn8c5t", "yWvcmvn8c5t"]);
}

#[test]
fn test_compute_text_certificate_file() {
    let text = write_tmp("appsig-test.txt", b"308201ab\n");

    let output = appsig()
        .args(["compute", "--package", PACKAGE, "--cert-file"])
        .arg(&text)
        .output()
        .expect("Failed to execute appsig command");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["certificate"], "308201ab");
    assert_eq!(json[0]["appSignature"], "yWvcmvn8c5t");
}

#[test]
fn test_compute_rejects_unrecognized_certificate_file() {
    let binary = write_tmp("appsig-test.bin", &[0xff, 0xfe, 0x00, 0x01]);

    let output = appsig()
        .args(["compute", "--package", PACKAGE, "--cert-file"])
        .arg(&binary)
        .output()
        .expect("Failed to execute appsig command");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_compute_requires_certificate() {
    let output = appsig()
        .args(["compute", "--package", PACKAGE])
        .output()
        .expect("Failed to execute appsig command");

    assert!(!output.status.success());
}

#[test]
fn test_compute_unavailable_digest() {
    let output = appsig()
        .args(["compute", "--package", PACKAGE, "--certificate", "308201ab"])
        .args(["--digest", "MD5"])
        .output()
        .expect("Failed to execute appsig command");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("MD5"));
}

#[test]
fn test_verify() {
    let matching = appsig()
        .args(["verify", "--package", PACKAGE])
        .args(["--certificate", "3082abc", "--certificate", "308201ab"])
        .args(["--expected", "yWvcmvn8c5t"])
        .output()
        .expect("Failed to execute appsig command");

    assert!(matching.status.success());
    assert!(stdout(&matching).contains("matches certificate 2"));

    let mismatch = appsig()
        .args(["verify", "--package", PACKAGE])
        .args(["--certificate", "3082abc"])
        .args(["--expected", "yWvcmvn8c5t"])
        .output()
        .expect("Failed to execute appsig command");

    assert!(!mismatch.status.success());
}

#[test]
fn test_sms_round_trip() {
    let rendered = appsig()
        .args(["sms", "--code", "123456", "--signature", "fWJJeOH8i8F"])
        .output()
        .expect("Failed to execute appsig command");

    assert!(rendered.status.success());
    let message = stdout(&rendered);
    assert_eq!(message, "<#> Your verification code is 123456\nfWJJeOH8i8F\n");

    let mut child = appsig()
        .arg("parse-sms")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to execute appsig command");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(message.as_bytes())
        .unwrap();
    let parsed = child.wait_with_output().unwrap();

    assert!(parsed.status.success());
    let json: serde_json::Value = serde_json::from_slice(&parsed.stdout).unwrap();
    assert_eq!(json["code"], "123456");
    assert_eq!(json["appSignature"], "fWJJeOH8i8F");
}

#[test]
fn test_quiet_and_no_output() {
    let flags: [&[&str]; 2] = [&["--quiet"], &["-o", "none"]];
    for flag in flags {
        let output = appsig()
            .args(["compute", "--package", PACKAGE, "--certificate", "308201ab"])
            .args(flag)
            .output()
            .expect("Failed to execute appsig command");

        assert!(output.status.success(), "{flag:?}");
        assert!(output.stdout.is_empty(), "{flag:?}: {}", stdout(&output));
    }
}

#[test]
fn test_completion() {
    let output = appsig()
        .args(["completion", "bash"])
        .output()
        .expect("Failed to execute appsig command");

    assert!(output.status.success());
    let script = stdout(&output);
    assert!(script.contains("_appsig"), "{script}");
    assert!(script.contains("compute"), "{script}");
}
