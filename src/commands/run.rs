//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command, the full pipeline of the tool:
//! invoke the runner, parse its output, render the report, save it and echo
//! it to the console. It is also what runs when no subcommand is given.
//!
//! 此模块实现 `run` 命令，即本工具的完整流程：调用运行器、解析输出、
//! 渲染报告、保存报告并回显到控制台。未指定子命令时也会执行它。

use anyhow::Result;
use colored::*;
use rust_i18n::t;
use std::path::{Path, PathBuf};
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::ReportConfig,
        models::TestRunSummary,
        parser,
        runner::{self, RunnerInvocation},
    },
    infra::fs::{expand_path, read_runner_log, write_artifact},
    reporting::{
        console::{print_runner_outcome, print_summary},
        html::generate_html_report,
        json::generate_json_report,
        markdown::{ReportContext, render_markdown},
    },
};

/// Options of a single `run` invocation. Anything left `None` falls back to
/// the configuration file.
///
/// 单次 `run` 调用的选项。任何为 `None` 的项都回退到配置文件。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Test scope handed to the runner.
    pub target: Option<String>,
    /// Markdown output path.
    pub output: Option<PathBuf>,
    pub html: Option<PathBuf>,
    pub json: Option<PathBuf>,
    /// Parse this saved runner log instead of invoking the runner.
    /// 解析此已保存的运行器日志，而不是调用运行器。
    pub input: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    /// Fail when the output contains nothing recognizable.
    /// 当输出中没有任何可识别内容时失败。
    pub strict: bool,
    /// Do not echo the markdown report to the console.
    pub quiet: bool,
}

/// Paths the report artifacts were written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReports {
    pub markdown: PathBuf,
    pub html: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

/// Executes the run command with the provided configuration and options.
///
/// # Arguments
/// * `config` - The loaded (or default) `TestReport.toml` configuration
/// * `options` - Command-line options overriding the configuration
/// * `locale` - Language for console messages
///
/// # Returns
/// A Result indicating success or failure of the command execution. Failing
/// tests are not a failure of this command.
pub async fn execute(config: ReportConfig, options: RunOptions, locale: &str) -> Result<()> {
    let raw_output = match &options.input {
        Some(input) => {
            println!(
                "{}",
                t!("parsing_saved_log", locale = locale, path = input.display()).cyan()
            );
            read_runner_log(input)?
        }
        None => capture_runner_output(&config, &options, locale).await?,
    };

    let summary = parser::parse(&raw_output);
    check_recognized(&summary, options.strict, locale)?;

    let ctx = ReportContext::now(config.report.title.clone());
    let report = render_markdown(&summary, &ctx);
    let written = save_reports(&summary, &ctx, &report, &config, &options)?;

    if !options.quiet {
        println!("{}", report);
    }
    print_summary(&summary, locale);

    println!();
    println!(
        "{}",
        t!("report_saved", locale = locale, path = written.markdown.display())
            .green()
            .bold()
    );
    if let Some(path) = &written.html {
        println!("{}", t!("html_report_saved", locale = locale, path = path.display()));
    }
    if let Some(path) = &written.json {
        println!("{}", t!("json_report_saved", locale = locale, path = path.display()));
    }

    Ok(())
}

/// Invokes the configured runner once and returns its combined output.
async fn capture_runner_output(
    config: &ReportConfig,
    options: &RunOptions,
    locale: &str,
) -> Result<String> {
    let mut runner_config = config.runner.clone();
    if options.timeout_secs.is_some() {
        runner_config.timeout_secs = options.timeout_secs;
    }
    let invocation = RunnerInvocation::resolve(&runner_config, options.target.as_deref())?;

    println!("{}", t!("running_tests", locale = locale).bold());
    println!("{}", t!("may_take_minutes", locale = locale));
    println!(
        "{} {}",
        t!("command_prefix", locale = locale).blue(),
        invocation.display()
    );
    println!();

    let stop_token = setup_signal_handler(locale);
    let captured = runner::invoke_runner(&invocation, stop_token).await?;
    print_runner_outcome(captured.outcome, captured.duration.as_secs_f64(), locale);

    Ok(captured.combined())
}

/// Warns, or fails in strict mode, when the runner output contained neither a
/// summary line nor any grouped test line.
///
/// 当运行器输出既没有摘要行也没有任何分组测试行时发出警告（严格模式下则失败）。
fn check_recognized(summary: &TestRunSummary, strict: bool, locale: &str) -> Result<()> {
    if !summary.is_unrecognized() {
        return Ok(());
    }
    if strict {
        anyhow::bail!(t!("output_unrecognized_strict", locale = locale).to_string());
    }
    eprintln!("{}", t!("output_unrecognized", locale = locale).yellow());
    Ok(())
}

/// Writes the markdown report and any requested HTML/JSON companions.
fn save_reports(
    summary: &TestRunSummary,
    ctx: &ReportContext,
    markdown: &str,
    config: &ReportConfig,
    options: &RunOptions,
) -> Result<WrittenReports> {
    let markdown_path = match &options.output {
        Some(path) => path.clone(),
        None => expand_path(&config.report.output)?,
    };
    write_artifact(&markdown_path, markdown)?;

    let html = resolve_output(options.html.as_deref(), config.report.html.as_deref())?;
    if let Some(path) = &html {
        generate_html_report(summary, ctx, path)?;
    }

    let json = resolve_output(options.json.as_deref(), config.report.json.as_deref())?;
    if let Some(path) = &json {
        generate_json_report(summary, ctx, path)?;
    }

    Ok(WrittenReports {
        markdown: markdown_path,
        html,
        json,
    })
}

/// A path from the command line is used as given; one from the config file is
/// expanded first.
fn resolve_output(cli: Option<&Path>, configured: Option<&str>) -> Result<Option<PathBuf>> {
    match (cli, configured) {
        (Some(path), _) => Ok(Some(path.to_path_buf())),
        (None, Some(raw)) => expand_path(raw).map(Some),
        (None, None) => Ok(None),
    }
}

/// Sets up a Ctrl-C handler that cancels the running test runner.
/// Output captured up to that point is still parsed and reported.
fn setup_signal_handler(locale: &str) -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let locale = locale.to_string();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n{}", t!("shutdown_signal", locale = &locale).yellow());
            token_clone.cancel();
        }
    });

    token
}
