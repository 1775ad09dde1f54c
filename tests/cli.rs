//! Exit behaviour of the `agc-loop` binary when it cannot start.

use std::process::{Command, Output};

fn agc_loop(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_agc-loop"));
    cmd.args(args)
        .env_remove("OPENAI_API_KEY")
        .env_remove("E2B_API_KEY")
        .env_remove("AGC_BASE_URL")
        .env_remove("AGC_MODEL")
        .env_remove("RUST_LOG");
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().expect("failed to run agc-loop")
}

#[test]
fn test_missing_api_key_exits_nonzero_with_only_the_error_line() {
    let output = agc_loop(&["mcp"], &[]);

    assert!(!output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "❌ Error: OPENAI_API_KEY environment variable not set\n"
    );
}

#[test]
fn test_missing_e2b_key_for_python_tool() {
    let output = agc_loop(&["py-fun-tool"], &[("OPENAI_API_KEY", "sk-test")]);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "❌ Error: E2B_API_KEY environment variable not set\n");
    assert!(!stdout.contains("sk-test"));
}

#[test]
fn test_invalid_base_url_is_rejected_before_any_request() {
    let output = agc_loop(
        &["file-search", "--base-url", "not a url"],
        &[("OPENAI_API_KEY", "sk-test")],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("❌ Error: "));
}
