use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

mod common;

use common::fixture_path;

fn report_cmd(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("testdox-report").unwrap();
    cmd.current_dir(workdir);
    cmd
}

/// Parses a saved runner log and checks that the markdown report is written
/// and its location printed.
///
/// 解析已保存的运行器日志，检查 Markdown 报告已写入且其路径已打印。
#[test]
fn test_run_from_saved_log() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("report.md");

    report_cmd(dir.path())
        .args(["--lang", "en", "run", "--quiet", "--input"])
        .arg(fixture_path("testdox_sample.log"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved to:"))
        .stdout(predicate::str::contains("--- Test Run Summary ---"))
        .stdout(predicate::str::contains("Grouped test lines: 5 failing, 4 passing"))
        .stdout(predicate::str::contains("## Executive Summary").not());

    let report = fs::read_to_string(&output).unwrap();
    assert!(report.starts_with("# WillowCMS Controller Test Detailed Report\n"));
    assert!(report.contains("| Products Controller | 3 | 1 | 4 | 25.0% |"));
}

/// Without `--quiet` the report is echoed to the console as well.
#[test]
fn test_report_is_echoed() {
    let dir = tempdir().unwrap();

    report_cmd(dir.path())
        .args(["--lang", "en", "run", "--input"])
        .arg(fixture_path("testdox_sample.log"))
        .arg("--output")
        .arg(dir.path().join("report.md"))
        .assert()
        .success()
        .stdout(predicate::str::contains("## Executive Summary"))
        .stdout(predicate::str::contains("- ✘ Delete"));
}

/// HTML and JSON companions are written next to the markdown report.
#[test]
fn test_html_and_json_outputs() {
    let dir = tempdir().unwrap();
    let html = dir.path().join("out").join("report.html");
    let json = dir.path().join("out").join("report.json");

    report_cmd(dir.path())
        .args(["--lang", "en", "run", "-q", "--input"])
        .arg(fixture_path("testdox_sample.log"))
        .arg("-o")
        .arg(dir.path().join("report.md"))
        .arg("--html")
        .arg(&html)
        .arg("--json")
        .arg(&json)
        .assert()
        .success()
        .stdout(predicate::str::contains("HTML report saved to:"))
        .stdout(predicate::str::contains("JSON summary saved to:"));

    assert!(fs::read_to_string(&html).unwrap().contains("Products Controller"));
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(value["summary"]["total_tests"], 12);
}

/// Unrecognized output only warns by default, but fails in strict mode.
///
/// 默认情况下无法识别的输出只会发出警告，严格模式下则会失败。
#[test]
fn test_unrecognized_output_warns_or_fails() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("report.md");

    report_cmd(dir.path())
        .args(["--lang", "en", "run", "-q", "--input"])
        .arg(fixture_path("unrecognized.log"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("(N/A)").not())
        .stdout(predicate::str::contains("Grouped test lines").not())
        .stderr(predicate::str::contains("no test summary or test results were recognized"));
    assert!(fs::read_to_string(&output).unwrap().contains("- **Passing**: 0 (N/A)"));

    let strict_output = dir.path().join("strict.md");
    report_cmd(dir.path())
        .args(["--lang", "en", "run", "--strict", "--input"])
        .arg(fixture_path("unrecognized.log"))
        .arg("--output")
        .arg(&strict_output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No test summary or test results were recognized"));
    assert!(!strict_output.exists());
}

/// Settings come from `TestReport.toml` in the working directory.
#[test]
fn test_config_file_in_working_directory() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("configured.md");
    fs::write(
        dir.path().join("TestReport.toml"),
        format!(
            "[report]\ntitle = \"Nightly Controllers\"\noutput = \"{}\"\n",
            output.display()
        ),
    )
    .unwrap();

    report_cmd(dir.path())
        .args(["--lang", "en", "run", "-q", "--input"])
        .arg(fixture_path("testdox_sample.log"))
        .assert()
        .success();

    assert!(fs::read_to_string(&output).unwrap().starts_with("# Nightly Controllers\n"));
}

/// An explicitly named configuration file must exist.
#[test]
fn test_missing_explicit_config_fails() {
    let dir = tempdir().unwrap();

    report_cmd(dir.path())
        .args(["--lang", "en", "--config", "missing.toml", "run", "--input"])
        .arg(fixture_path("testdox_sample.log"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read configuration file"));
}

/// The runner is invoked with the target and its output is parsed.
#[cfg(unix)]
#[test]
fn test_runner_output_is_parsed() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("report.md");
    let config = dir.path().join("runner.toml");
    fs::write(
        &config,
        "[runner]\ncommand = \"cat\"\noutput_flag = \"\"\ntimeout_secs = 30\n",
    )
    .unwrap();

    report_cmd(dir.path())
        .args(["--lang", "en", "-c"])
        .arg(&config)
        .args(["run", "-q", "--output"])
        .arg(&output)
        .arg(fixture_path("testdox_sample.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Running PHPUnit"));

    let report = fs::read_to_string(&output).unwrap();
    assert!(report.contains("| Articles Controller | 2 | 1 | 3 | 33.3% |"));
}

/// A runner that cannot be launched is a hard error.
#[test]
fn test_runner_launch_failure() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("broken.toml");
    fs::write(
        &config,
        "[runner]\ncommand = \"testdox_report_no_such_program_4711\"\n",
    )
    .unwrap();

    report_cmd(dir.path())
        .args(["--lang", "en", "-c"])
        .arg(&config)
        .args(["run", "-o"])
        .arg(dir.path().join("report.md"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to launch the test runner"));
}

/// `init --non-interactive` writes a configuration file.
#[test]
fn test_init_non_interactive() {
    let dir = tempdir().unwrap();

    report_cmd(dir.path())
        .args(["--lang", "en", "init", "--non-interactive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TestReport.toml"));

    let written = fs::read_to_string(dir.path().join("TestReport.toml")).unwrap();
    assert!(written.contains("--testdox"));
}

/// Console messages follow `--lang`.
///
/// 控制台消息跟随 `--lang` 设置。
#[test]
fn test_chinese_console_messages() {
    let dir = tempdir().unwrap();

    report_cmd(dir.path())
        .args(["--lang", "zh-CN", "run", "-q", "--input"])
        .arg(fixture_path("testdox_sample.log"))
        .arg("--output")
        .arg(dir.path().join("report.md"))
        .assert()
        .success()
        .stdout(predicate::str::contains("报告已保存到"))
        .stdout(predicate::str::contains("--- 测试运行摘要 ---"));
}
