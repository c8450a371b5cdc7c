//! Integration tests for the CryptVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Passwords are passed with `-p`, so every flow is non-interactive.

use std::fs;

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the cryptvault binary.
fn cryptvault() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("cryptvault").expect("binary should exist")
}

#[test]
fn help_flag_shows_usage() {
    cryptvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Encrypt and decrypt files with passwords or saved keys",
        ))
        .stdout(predicate::str::contains("encrypt"))
        .stdout(predicate::str::contains("decrypt"))
        .stdout(predicate::str::contains("save-key"))
        .stdout(predicate::str::contains("list-keys"));
}

#[test]
fn version_flag_shows_version() {
    cryptvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cryptvault"));
}

#[test]
fn no_args_shows_help() {
    cryptvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn encrypt_decrypt_roundtrip() {
    let tmp = TempDir::new().unwrap();
    let sandbox = tmp.path().join("sandbox");
    let input = tmp.path().join("secret.txt");
    fs::write(&input, "top secret contents").unwrap();

    cryptvault()
        .args([
            "encrypt",
            input.to_str().unwrap(),
            "-p",
            "Secr3t!",
            "--sandbox-dir",
            sandbox.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("File encrypted"));

    let encrypted = sandbox.join("secret.txt.encrypted");
    assert!(encrypted.exists());

    cryptvault()
        .args([
            "decrypt",
            encrypted.to_str().unwrap(),
            "-p",
            "Secr3t!",
            "--sandbox-dir",
            sandbox.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("File decrypted"));

    let decrypted = sandbox.join("secret.txt.decrypted");
    assert_eq!(
        fs::read_to_string(decrypted).unwrap(),
        "top secret contents"
    );
}

#[test]
fn wrong_password_exits_nonzero() {
    let tmp = TempDir::new().unwrap();
    let sandbox = tmp.path().join("sandbox");
    let input = tmp.path().join("secret.txt");
    fs::write(&input, "data").unwrap();

    cryptvault()
        .args([
            "encrypt",
            input.to_str().unwrap(),
            "-p",
            "right",
            "--sandbox-dir",
            sandbox.to_str().unwrap(),
        ])
        .assert()
        .success();

    cryptvault()
        .args([
            "decrypt",
            sandbox.join("secret.txt.encrypted").to_str().unwrap(),
            "-p",
            "wrong",
            "--sandbox-dir",
            sandbox.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Decryption failed"));
}

#[test]
fn encrypt_missing_input_fails() {
    let tmp = TempDir::new().unwrap();

    cryptvault()
        .args([
            "encrypt",
            tmp.path().join("nope.txt").to_str().unwrap(),
            "-p",
            "pw",
            "--sandbox-dir",
            tmp.path().join("sandbox").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn decrypt_without_credentials_fails() {
    let tmp = TempDir::new().unwrap();
    let encrypted = tmp.path().join("x.encrypted");
    fs::write(&encrypted, "junk").unwrap();

    cryptvault()
        .args([
            "decrypt",
            encrypted.to_str().unwrap(),
            "--sandbox-dir",
            tmp.path().join("sandbox").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Must provide"));
}

#[test]
fn anonymous_encrypt_prints_generated_key() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("plain.txt");
    fs::write(&input, "data").unwrap();

    cryptvault()
        .args([
            "encrypt",
            input.to_str().unwrap(),
            "--sandbox-dir",
            tmp.path().join("sandbox").to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Randomly generated key"))
        .stdout(predicate::str::contains("Key saved as: key_"));
}

#[test]
fn list_keys_on_empty_store() {
    let tmp = TempDir::new().unwrap();

    cryptvault()
        .args([
            "list-keys",
            "--sandbox-dir",
            tmp.path().join("sandbox").to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved keys yet"));
}

#[test]
fn save_key_then_list_shows_it() {
    let tmp = TempDir::new().unwrap();
    let sandbox = tmp.path().join("sandbox");

    cryptvault()
        .args([
            "save-key",
            "work-projects",
            "-p",
            "MyWorkPass2024",
            "--sandbox-dir",
            sandbox.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved"));

    cryptvault()
        .args(["list-keys", "--sandbox-dir", sandbox.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("work-projects"))
        .stdout(predicate::str::contains("password"));
}

#[test]
fn save_key_without_credentials_fails() {
    let tmp = TempDir::new().unwrap();

    cryptvault()
        .args([
            "save-key",
            "empty",
            "--sandbox-dir",
            tmp.path().join("sandbox").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Must provide"));
}

#[test]
fn save_key_with_invalid_token_fails() {
    let tmp = TempDir::new().unwrap();

    cryptvault()
        .args([
            "save-key",
            "bad",
            "-k",
            "not base64 at all !!",
            "--sandbox-dir",
            tmp.path().join("sandbox").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid key format"));
}

#[test]
fn named_key_flow_via_cli() {
    let tmp = TempDir::new().unwrap();
    let sandbox = tmp.path().join("sandbox");
    let input = tmp.path().join("doc.txt");
    fs::write(&input, "shared secret").unwrap();

    cryptvault()
        .args([
            "save-key",
            "team",
            "-p",
            "hunter22",
            "--sandbox-dir",
            sandbox.to_str().unwrap(),
        ])
        .assert()
        .success();

    cryptvault()
        .args([
            "encrypt",
            input.to_str().unwrap(),
            "-k",
            "team",
            "-p",
            "hunter22",
            "--sandbox-dir",
            sandbox.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Using saved key: team"));

    cryptvault()
        .args([
            "decrypt",
            sandbox.join("doc.txt.encrypted").to_str().unwrap(),
            "-n",
            "team",
            "-p",
            "hunter22",
            "--sandbox-dir",
            sandbox.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(sandbox.join("doc.txt.decrypted")).unwrap(),
        "shared secret"
    );
}

#[test]
fn corrupted_store_warns_but_proceeds() {
    let tmp = TempDir::new().unwrap();
    let sandbox = tmp.path().join("sandbox");
    fs::create_dir_all(&sandbox).unwrap();
    fs::write(sandbox.join(".keys.json"), "{ broken").unwrap();

    cryptvault()
        .args(["list-keys", "--sandbox-dir", sandbox.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Key store was reset to empty"));
}
