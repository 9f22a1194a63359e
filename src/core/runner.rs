//! # Runner Invocation Module / 运行器调用模块
//!
//! Builds the PHPUnit command line from the configuration and runs it,
//! returning the captured output whatever the exit status.
//!
//! 根据配置构建 PHPUnit 命令行并运行它，
//! 无论退出状态如何都返回捕获的输出。

use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::core::config::RunnerConfig;
use crate::infra::command::{self, CapturedOutput};
use crate::infra::fs::expand_path;

/// A fully resolved runner invocation.
/// 完全解析后的运行器调用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

impl RunnerInvocation {
    /// Resolves the command for `target`, or the configured default target.
    ///
    /// The command string is expanded (`~`, `$VAR`) and split with shell
    /// quoting rules; the target and the output flag are appended as separate
    /// arguments.
    ///
    /// 为 `target`（或配置的默认目标）解析命令。
    ///
    /// 命令字符串会被展开（`~`、`$VAR`）并按 shell 引号规则拆分；
    /// 目标和输出标志作为独立参数追加。
    pub fn resolve(config: &RunnerConfig, target: Option<&str>) -> Result<Self> {
        let expanded = shellexpand::full(&config.command)
            .with_context(|| format!("Failed to expand command: {}", config.command))?;

        let mut parts = shlex::split(&expanded)
            .ok_or_else(|| anyhow!("Failed to parse command: {}", expanded))?;
        if parts.is_empty() {
            return Err(anyhow!("Empty runner command after parsing."));
        }

        let program = parts.remove(0);
        let mut args = parts;
        args.push(target.unwrap_or(&config.default_target).to_string());
        if !config.output_flag.is_empty() {
            args.push(config.output_flag.clone());
        }

        let working_dir = config
            .working_dir
            .as_deref()
            .map(expand_path)
            .transpose()?;

        Ok(Self {
            program,
            args,
            working_dir,
            timeout: config.timeout_secs.map(Duration::from_secs),
        })
    }

    /// The command line as it would be typed in a shell.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(|part| shlex::try_quote(part).map_or_else(|_| part.to_string(), |q| q.into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

/// Runs the test runner once and returns everything it printed.
///
/// A failing test suite exits non-zero; that is the expected case and is not
/// an error here. Only a failure to launch the process is.
///
/// 运行一次测试运行器并返回其全部输出。
///
/// 测试失败时运行器会以非零状态退出；这是预期情况，在此不视为错误。
/// 只有无法启动进程才是错误。
pub async fn invoke_runner(
    invocation: &RunnerInvocation,
    cancel: CancellationToken,
) -> Result<CapturedOutput> {
    command::spawn_and_capture(invocation.to_command(), invocation.timeout, cancel)
        .await
        .with_context(|| {
            rust_i18n::t!("runner_launch_failed", command = invocation.display()).to_string()
        })
}
