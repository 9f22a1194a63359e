//! # Configuration Module / 配置模块
//!
//! Defines `ReportConfig`, the contents of `TestReport.toml`. Every field has a
//! default, so a missing file or a partial file both yield a usable config.
//!
//! 定义 `ReportConfig`，即 `TestReport.toml` 的内容。每个字段都有默认值，
//! 因此缺失的文件或不完整的文件都能得到可用的配置。

use anyhow::{Context, Result};
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default name of the configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "TestReport.toml";

/// How the test runner is invoked.
/// 测试运行器的调用方式。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Command prefix that launches the runner. The target path and the output
    /// flag are appended to it. Environment variables and `~` are expanded.
    ///
    /// 启动运行器的命令前缀。目标路径和输出标志会追加在其后。
    /// 环境变量和 `~` 会被展开。
    pub command: String,
    /// Flag that switches the runner to human-readable per-test output.
    /// 将运行器切换为逐个测试的可读输出的标志。
    pub output_flag: String,
    /// Test scope passed to the runner when none is given on the command line.
    /// 命令行未指定时传给运行器的测试范围。
    pub default_target: String,
    /// Kill the runner after this many seconds. `None` waits indefinitely.
    /// 超过该秒数后终止运行器。`None` 表示无限等待。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Working directory for the runner process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            command: "docker compose exec -T willowcms php vendor/bin/phpunit".to_string(),
            output_flag: "--testdox".to_string(),
            default_target: "tests/TestCase/Controller/".to_string(),
            timeout_secs: None,
            working_dir: None,
        }
    }
}

/// Where and how the report is written.
/// 报告的写入位置和方式。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Title used as the top-level heading of the report.
    pub title: String,
    /// Markdown output path. Overwritten on every run.
    /// Markdown 输出路径。每次运行都会被覆盖。
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<String>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: "WillowCMS Controller Test Detailed Report".to_string(),
            output: "/tmp/phpunit_test_report.md".to_string(),
            html: None,
            json: None,
        }
    }
}

/// The complete `TestReport.toml` configuration.
/// 完整的 `TestReport.toml` 配置。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Language for console messages (e.g., "en", "zh-CN"). Falls back to the
    /// system locale when absent.
    ///
    /// 控制台消息的语言（例如 "en", "zh-CN"）。缺省时回退到系统语言。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub runner: RunnerConfig,
    pub report: ReportSettings,
}

/// Loads and parses a configuration file.
pub fn load_config(path: &Path) -> Result<ReportConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| t!("config_read_failed_path", path = path.display()).to_string())?;
    parse_config(&content).with_context(|| t!("config_parse_failed", path = path.display()).to_string())
}

/// Parses configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ReportConfig> {
    Ok(toml::from_str(content)?)
}

/// Loads `path` when it exists. A missing file yields the default config
/// unless `required` is set, in which case it is an error.
///
/// 当 `path` 存在时加载它。文件缺失时返回默认配置，
/// 除非设置了 `required`，此时返回错误。
pub fn load_or_default(path: &Path, required: bool) -> Result<ReportConfig> {
    if path.exists() || required {
        load_config(path)
    } else {
        Ok(ReportConfig::default())
    }
}
