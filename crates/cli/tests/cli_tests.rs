// Integration tests for the `folio` binary.
//
// Every command must print exactly one JSON value on stdout and use the
// documented exit codes.
//
// Run with: cargo test -p folio-cli --test cli_tests

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::TempDir;

fn folio() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_folio"));
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd.env_remove("FOLIO_CONFIG");
    cmd.env_remove("FOLIO_API_KEY");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run(args: &[&str]) -> Output {
    folio().args(args).output().expect("run folio")
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = folio()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn folio");
    child.stdin.take().unwrap().write_all(input.as_bytes()).unwrap();
    child.wait_with_output().expect("wait folio")
}

/// Assert stdout is a single, parseable JSON value with no extra lines.
fn assert_single_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "exit code: {:?}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let trimmed = stdout.trim();
    assert!(!trimmed.is_empty(), "stdout should not be empty");
    serde_json::from_str(trimmed)
        .unwrap_or_else(|e| panic!("stdout must be valid JSON.\nParse error: {}\nstdout:\n{}", e, trimmed))
}

fn write_file_config(dir: &Path) -> String {
    let config = dir.join("store.toml");
    let settings = dir.join("settings.json");
    std::fs::write(
        &config,
        format!("backend = \"file\"\npath = {:?}\n", settings.to_str().unwrap()),
    )
    .unwrap();
    config.to_str().unwrap().to_string()
}

// ===========================================================================
// Pure commands
// ===========================================================================

#[test]
fn hex_canonicalizes_short_form() {
    let val = assert_single_json(&run(&["hex", "#FFF"]));
    assert_eq!(val["valid"], true);
    assert_eq!(val["normalized"], "#ffffff");
}

#[test]
fn hex_invalid_uses_fallback() {
    let val = assert_single_json(&run(&["hex", "zzz", "--fallback", "#000000"]));
    assert_eq!(val["valid"], false);
    assert_eq!(val["normalized"], "#000000");
}

#[test]
fn hex_check_only() {
    let val = assert_single_json(&run(&["hex", "12ab", "--check"]));
    assert_eq!(val["valid"], false);
    assert!(val.get("normalized").is_none());
}

#[test]
fn theme_fills_defaults() {
    let val = assert_single_json(&run(&["theme", r##"{"base":"ABC","heroChip":"nope"}"##]));
    assert_eq!(val["base"], "#aabbcc");
    assert_eq!(val["button"], "");
    assert_eq!(val["heroChip"], "#1e293b");
    assert_eq!(val["lightShell"], "#f1f5f9");
}

#[test]
fn theme_reads_stdin() {
    let val = assert_single_json(&run_with_stdin(&["theme"], r##"{"logo":"#0f0"}"##));
    assert_eq!(val["logo"], "#00ff00");
}

#[test]
fn theme_invalid_json_is_usage_error() {
    let output = run(&["theme", "{not json"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid JSON"));
}

#[test]
fn blog_normalizes_fields() {
    let val = assert_single_json(&run(&[
        "blog",
        r#"{"authorName":"  Ada ","aboutEmphasis":"rust, ,web","categoryStrategy":"title"}"#,
    ]));
    assert_eq!(val["authorName"], "Ada");
    assert_eq!(val["aboutEmphasis"], serde_json::json!(["rust", "web"]));
    assert_eq!(val["categoryStrategy"], "title");
    assert!(val["contactLinks"].as_array().is_some_and(|links| !links.is_empty()));
}

#[test]
fn palette_dark_mode() {
    let val = assert_single_json(&run(&["palette", r##"{"base":"#000"}"##, "--mode", "dark"]));
    assert_eq!(val["mode"], "dark");
    assert_eq!(val["base"], "#000000");
    assert_eq!(val["baseContrast"], "#f8fafc");
    assert_eq!(val["shell"], "#0f172a");
}

#[test]
fn palette_vars_only() {
    let val = assert_single_json(&run(&["palette", r##"{"base":"#ffffff"}"##, "--vars"]));
    let vars = val.as_object().expect("object of CSS variables");
    assert_eq!(vars["--accent-base"], "#ffffff");
    assert_eq!(vars["--accent-base-contrast"], "#0f172a");
    assert!(vars.keys().all(|k| k.starts_with("--")));
}

#[test]
fn palette_rejects_unknown_mode() {
    let output = run(&["palette", "{}", "--mode", "sepia"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn parse_malformed_is_defaults() {
    let val = assert_single_json(&run(&["parse", "{not json", "--shape"]));
    assert_eq!(val["shape"], "unrecognized");
    assert_eq!(val["settings"]["theme"]["base"], "#38bdf8");
}

#[test]
fn parse_legacy_theme() {
    let val = assert_single_json(&run(&["parse", r##"{"base":"#123456"}"##, "--shape"]));
    assert_eq!(val["shape"], "legacy_raw_theme");
    assert_eq!(val["settings"]["theme"]["base"], "#123456");
}

#[test]
fn serialize_then_parse() {
    let encoded = run(&["serialize", r##"{"theme":{"base":"#ABC"},"blog":{"authorName":"Kai"}}"##]);
    let envelope = assert_single_json(&encoded);
    assert_eq!(envelope["theme"]["base"], "#aabbcc");

    let stdout = String::from_utf8_lossy(&encoded.stdout).trim().to_string();
    let val = assert_single_json(&run(&["parse", &stdout]));
    assert_eq!(val["blog"]["authorName"], "Kai");
}

#[test]
fn category_by_title() {
    let val = assert_single_json(&run(&["category", "--strategy", "title", "--title", "Rust: traits"]));
    assert_eq!(val["category"], "Rust");
}

#[test]
fn category_without_tags_is_null() {
    let val = assert_single_json(&run(&["category", "--title", "Untagged post"]));
    assert_eq!(val["strategy"], "tag");
    assert!(val["category"].is_null());
}

// ===========================================================================
// Store commands
// ===========================================================================

#[test]
fn pull_empty_store_is_defaults() {
    let dir = TempDir::new().unwrap();
    let config = write_file_config(dir.path());
    let val = assert_single_json(&run(&["--config", &config, "pull"]));
    assert_eq!(val["theme"]["base"], "#38bdf8");
}

#[test]
fn push_then_pull() {
    let dir = TempDir::new().unwrap();
    let config = write_file_config(dir.path());

    let pushed = assert_single_json(&run_with_stdin(
        &["--config", &config, "push"],
        r##"{"theme":{"base":"#F00"},"blog":{"contactEmail":"me@example.org"}}"##,
    ));
    assert_eq!(pushed["theme"]["base"], "#ff0000");

    let pulled = assert_single_json(&run(&["--config", &config, "pull"]));
    assert_eq!(pulled, pushed);

    let raw = assert_single_json(&run(&["--config", &config, "pull", "--raw"]));
    assert!(raw.as_str().is_some_and(|s| s.contains("me@example.org")));
}

#[test]
fn push_legacy_theme_file() {
    let dir = TempDir::new().unwrap();
    let config = write_file_config(dir.path());
    let input = dir.path().join("legacy.json");
    std::fs::write(&input, r##"{"base":"#112233","button":"#445566"}"##).unwrap();

    let val = assert_single_json(&run(&["--config", &config, "push", input.to_str().unwrap()]));
    assert_eq!(val["theme"]["button"], "#445566");
}

#[test]
fn push_unrecognized_shape_keeps_stored_settings() {
    let dir = TempDir::new().unwrap();
    let config = write_file_config(dir.path());
    let settings = dir.path().join("settings.json");

    assert_single_json(&run(&["--config", &config, "push", r##"{"theme":{"base":"#ff0000"}}"##]));
    let before = std::fs::read_to_string(&settings).unwrap();

    // Misspelled wrapper key
    let output = run(&["--config", &config, "push", r##"{"Theme":{"base":"#00ff00"}}"##]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unrecognized settings shape"));
    assert_eq!(std::fs::read_to_string(&settings).unwrap(), before);

    let pulled = assert_single_json(&run(&["--config", &config, "pull"]));
    assert_eq!(pulled["theme"]["base"], "#ff0000");
}

#[test]
fn push_null_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = write_file_config(dir.path());

    let output = run_with_stdin(&["--config", &config, "push"], "null");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("nothing to push"));
    assert!(!dir.path().join("settings.json").exists());
}

#[test]
fn push_inline_non_object_is_shape_error() {
    let dir = TempDir::new().unwrap();
    let config = write_file_config(dir.path());

    let output = run(&["--config", &config, "push", "[1, 2]"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized settings shape"), "stderr: {}", stderr);
    assert!(!stderr.contains("failed to read"));

    let output = run(&["--config", &config, "push", "not-a-file.json"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid JSON"));
}

#[test]
fn pull_sqlite_backend() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("store.toml");
    let config_str = config.to_str().unwrap();
    let db = dir.path().join("site.db");

    let init = assert_single_json(&run(&[
        "--config", config_str, "init-config", "--backend", "sqlite", "--path", db.to_str().unwrap(),
    ]));
    assert_eq!(init["backend"], "sqlite");

    assert_single_json(&run(&["--config", config_str, "push", r##"{"theme":{"base":"#0a0a0a"}}"##]));
    let output = run(&["--config", config_str, "pull"]);
    let val = assert_single_json(&output);
    assert_eq!(val["theme"]["base"], "#0a0a0a");
    assert!(String::from_utf8_lossy(&output.stderr).contains("last updated"));
}

#[test]
fn init_config_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let config = write_file_config(dir.path());
    let output = run(&["--config", &config, "init-config"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--force"));
}

#[test]
fn rest_without_key_is_config_error() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("store.toml");
    std::fs::write(&config, "backend = \"rest\"\nurl = \"http://127.0.0.1:9\"\n").unwrap();

    let output = run(&["--config", config.to_str().unwrap(), "pull"]);
    assert_eq!(output.status.code(), Some(14));
    assert!(output.stdout.is_empty());
}

#[test]
fn rest_unreachable_is_network_error() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("store.toml");
    std::fs::write(&config, "backend = \"rest\"\nurl = \"http://127.0.0.1:9\"\n").unwrap();

    let output = folio()
        .args(["--config", config.to_str().unwrap(), "pull"])
        .env("FOLIO_API_KEY", "anon-key")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(11));
}
