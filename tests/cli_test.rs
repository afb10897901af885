//! 命令行进程测试
//!
//! 直接运行编译好的 `ci-notify`，检查退出码与标准输出

use std::io::Read;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

const SCENARIO_A: &str = r#"{"build": {"outcome": "success"}, "test": {"outcome": "failure"}}"#;
const SCENARIO_B: &str = r#"{"build": {"outcome": "success"}}"#;

/// 构造不受外部 CI 环境影响的命令
fn ci_notify() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ci-notify"));
    for var in [
        "step_context",
        "job",
        "gh_repo",
        "run_id",
        "output_name",
        "GITHUB_SERVER_URL",
        "GITHUB_OUTPUT",
        "RUST_LOG",
        "CI_NOTIFY_LOG_LEVEL",
    ] {
        command.env_remove(var);
    }
    command
}

fn report(step_context: &str) -> Output {
    ci_notify()
        .arg("report")
        .env("step_context", step_context)
        .env("job", "ci")
        .env("gh_repo", "acme/widget")
        .env("run_id", "42")
        .output()
        .unwrap()
}

#[test]
fn test_failures_exit_1_with_one_result_line() {
    let output = report(SCENARIO_A);
    assert_eq!(output.status.code(), Some(1), "{:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("result=<p>"));
    assert!(stdout.contains("https://github.com/acme/widget/actions/runs/42"));
    assert!(stdout.contains("<td>test</td><td>FAILED</td>"));
    assert!(!stdout.contains("<td>build</td>"));
}

#[test]
fn test_clean_run_exit_0_without_output() {
    let output = report(SCENARIO_B);
    assert_eq!(output.status.code(), Some(0), "{:?}", output);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_var_exit_2() {
    let output = ci_notify()
        .arg("report")
        .env("step_context", SCENARIO_A)
        .env("gh_repo", "acme/widget")
        .env("run_id", "42")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("job"));
}

#[test]
fn test_malformed_step_context_exit_2() {
    let output = report("not json");
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_github_output_file_receives_result() {
    let file = NamedTempFile::new().unwrap();
    let output = ci_notify()
        .arg("report")
        .env("step_context", SCENARIO_A)
        .env("job", "ci")
        .env("gh_repo", "acme/widget")
        .env("run_id", "42")
        .env("GITHUB_OUTPUT", file.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1), "{:?}", output);
    assert!(output.stdout.is_empty());

    let mut content = String::new();
    std::fs::File::open(file.path())
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert!(content.starts_with("result=<p>"));
    assert!(content.ends_with('\n'));
}

#[test]
fn test_notify_dry_run_prints_payload() {
    let output = ci_notify()
        .args(["notify", "--dry-run"])
        .env("matrix_server", "matrix.example.org")
        .env("matrix_room", "!abc:example.org")
        .env("access_token", "tok123")
        .env("message", "hello")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "{:?}", output);
    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["body"], "hello");
    assert_eq!(payload["formatted_body"], "hello");
    assert!(!String::from_utf8_lossy(&output.stderr).contains("tok123"));
}

#[test]
fn test_version_exit_0() {
    let output = ci_notify().arg("version").output().unwrap();
    assert_eq!(output.status.code(), Some(0), "{:?}", output);
    assert!(String::from_utf8(output.stdout).unwrap().starts_with("ci-notify"));
}
