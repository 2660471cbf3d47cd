use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// The `insight` binary with a clean, offline environment rooted at `home`.
fn insight(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_insight"));
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .env("HOME", home)
        .env("RUST_LOG", "off")
        // nothing listens on the discard port, so the scrape fails fast
        .env("INSIGHT_GITHUB_URL", "http://127.0.0.1:9")
        .env_remove("HIBP_API_KEY")
        .env_remove("WHOP_API_KEY")
        .env_remove("INSIGHT_HIBP_URL")
        .env_remove("INSIGHT_WHOP_URL")
        .env_remove("INSIGHT_FALLBACK_POLICY");
    cmd
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn test_check_json_placeholder_report() {
    let tmp = TempDir::new().unwrap();
    let output = insight(tmp.path())
        .args(["check", "bobs", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{output:?}");
    let json = stdout_json(&output);
    assert!(json["error"].is_null());
    assert_eq!(json["query"], "bobs");
    assert_eq!(json["data"]["riskScore"], 12);
    assert_eq!(json["data"]["status"], "complete");
    assert_eq!(json["data"]["identity"]["fullName"], "Alex J. Doe");
    assert_eq!(json["data"]["breaches"].as_array().unwrap().len(), 0);
    assert_eq!(json["data"]["flags"][0]["type"], "Info");
    assert_eq!(json["data"]["social"][0]["platform"], "Whop");
}

#[test]
fn test_check_text_output() {
    let tmp = TempDir::new().unwrap();
    let output = insight(tmp.path())
        .args(["check", "bobby"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{output:?}");
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("Identity report for bobby"));
    assert!(text.contains("Risk score:  85/99"));
    assert!(text.contains("Collection #1 (2019-01-07)"));
    assert!(text.contains("[medium] Breach History"));
}

#[test]
fn test_check_empty_query_fails() {
    let tmp = TempDir::new().unwrap();
    let output = insight(tmp.path())
        .args(["check", "   ", "--format", "json"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["error"], "Please enter an Email, Username, or ID");
    assert!(json["data"].is_null());
}

#[test]
fn test_check_strict_policy_from_env() {
    let tmp = TempDir::new().unwrap();
    let output = insight(tmp.path())
        .env("INSIGHT_FALLBACK_POLICY", "strict")
        .args(["check", "bobs"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("No results found for bobs"), "{stderr}");
}

#[test]
fn test_check_missing_config_file() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.toml");
    let output = insight(tmp.path())
        .arg("--config")
        .arg(&missing)
        .args(["check", "bobs"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("failed to load config"), "{stderr}");
}

#[test]
fn test_config_show_redacts_credentials() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("insight.toml");
    fs::write(
        &config_path,
        "[breach]\ntimeout_secs = 7\n\n[report]\nfallback_policy = \"strict\"\n",
    )
    .unwrap();

    let output = insight(tmp.path())
        .env("HIBP_API_KEY", "super-secret-key")
        .args(["config", "show", "--config"])
        .arg(&config_path)
        .output()
        .unwrap();

    assert!(output.status.success(), "{output:?}");
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("timeout_secs = 7"));
    assert!(text.contains("fallback_policy = \"strict\""));
    assert!(text.contains("# HIBP_API_KEY: set"));
    assert!(text.contains("# WHOP_API_KEY: not set"));
    assert!(!text.contains("super-secret-key"));
}

#[test]
fn test_config_path_uses_config_dir() {
    let tmp = TempDir::new().unwrap();
    let output = insight(tmp.path()).args(["config", "path"]).output().unwrap();

    assert!(output.status.success(), "{output:?}");
    let text = String::from_utf8(output.stdout).unwrap();
    let path = Path::new(text.trim());
    assert!(path.ends_with("insight/config.toml"), "{text}");
}
