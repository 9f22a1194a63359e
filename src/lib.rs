//! # testdox-report Library / testdox-report 库
//!
//! This library runs a PHPUnit suite in `--testdox` mode, parses its console
//! output into a structured summary and renders a markdown failure report.
//!
//! 此库以 `--testdox` 模式运行 PHPUnit 测试套件，将其控制台输出解析为
//! 结构化摘要，并渲染 Markdown 失败报告。
//!
//! ## Modules / 模块
//!
//! - `core` - Configuration, data models, output parser and runner invocation
//! - `infra` - Process execution and file system helpers
//! - `reporting` - Markdown, HTML, JSON and console rendering
//! - `cli` / `commands` - Command-line interface and subcommands
//!
//! - `core` - 配置、数据模型、输出解析器和运行器调用
//! - `infra` - 进程执行和文件系统辅助函数
//! - `reporting` - Markdown、HTML、JSON 和控制台渲染
//! - `cli` / `commands` - 命令行接口和子命令

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::config;
pub use core::models;
pub use core::parser;

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");

/// Resolves the language for console messages.
///
/// An explicit choice (command line or config file) wins when it names an
/// available locale. Otherwise the system locale is tried, first in full
/// (e.g., "zh-CN"), then by its language part (e.g., "en" from "en-US"),
/// finally falling back to "en".
///
/// 解析控制台消息所用的语言。
///
/// 当显式指定的语言（命令行或配置文件）可用时优先使用。否则尝试系统语言，
/// 先匹配完整区域（例如 "zh-CN"），再匹配语言部分（例如 "en-US" 中的 "en"），
/// 最后回退到 "en"。
pub fn resolve_locale(explicit: Option<&str>) -> String {
    let available_locales = rust_i18n::available_locales!();
    let matches_available = |candidate: &str| -> Option<String> {
        if available_locales.iter().any(|l| *l == candidate) {
            return Some(candidate.to_string());
        }
        candidate
            .split('-')
            .next()
            .filter(|lang_code| available_locales.iter().any(|l| l == lang_code))
            .map(str::to_string)
    };

    explicit
        .and_then(|l| matches_available(l))
        .or_else(|| sys_locale::get_locale().and_then(|l| matches_available(&l)))
        .unwrap_or_else(|| "en".to_string())
}
