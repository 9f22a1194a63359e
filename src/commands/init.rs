//! # Configuration Initialization Module / 配置初始化模块
//!
//! This module provides the `init` command, which creates a `TestReport.toml`
//! either through an interactive command-line wizard or, with
//! `--non-interactive`, straight from the defaults.
//!
//! 此模块提供 `init` 命令，通过交互式命令行向导，
//! 或在 `--non-interactive` 模式下直接使用默认值，创建 `TestReport.toml`。
//!
//! ## Features / 功能特性
//!
//! - **Interactive Wizard**: Prompts for the runner command, test scope and output paths
//! - **Runner Detection**: Suggests a local `vendor/bin/phpunit` when no compose file is present
//! - **Overwrite Protection**: Confirmation prompt before overwriting an existing configuration
//!
//! - **交互式向导**: 提示输入运行器命令、测试范围和输出路径
//! - **运行器检测**: 当不存在 compose 文件时建议使用本地 `vendor/bin/phpunit`
//! - **覆盖保护**: 覆盖现有配置前的确认提示

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use rust_i18n::t;
use std::fs;
use std::path::Path;

use crate::core::config::{ReportConfig, RunnerConfig};

/// Compose file names recognized by `docker compose`.
const COMPOSE_FILES: [&str; 4] = [
    "compose.yaml",
    "compose.yml",
    "docker-compose.yaml",
    "docker-compose.yml",
];

/// Command used when PHPUnit is installed in the project and no compose file exists.
pub const LOCAL_RUNNER_COMMAND: &str = "php vendor/bin/phpunit";

/// Runs the wizard (or writes the defaults) and saves the configuration to
/// `config_path`.
///
/// 运行向导（或直接写入默认值），并将配置保存到 `config_path`。
pub fn run_init_wizard(config_path: &Path, language: &str, non_interactive: bool) -> Result<()> {
    let theme = ColorfulTheme::default();
    let project_dir = Path::new(".");

    if non_interactive {
        let config = default_config_for(project_dir, None);
        return write_config(config_path, &config, language);
    }

    println!("\n{}", t!("init_wizard_welcome", locale = language).cyan().bold());
    println!("{}", t!("init_wizard_description", locale = language));

    if config_path.exists() {
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!(
                "init_overwrite_prompt",
                locale = language,
                path = config_path.display()
            ))
            .default(false)
            .interact()
            .context(t!("init_user_confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init_aborted", locale = language));
            return Ok(());
        }
    }

    let defaults = default_config_for(project_dir, Some(language));
    if defaults.runner.command == LOCAL_RUNNER_COMMAND {
        println!(
            "{}",
            t!("init_detected_local_phpunit", locale = language).green()
        );
    }

    let command: String = Input::with_theme(&theme)
        .with_prompt(t!("init_runner_command_prompt", locale = language))
        .default(defaults.runner.command.clone())
        .interact_text()
        .context(t!("init_user_confirmation_failed", locale = language).to_string())?;

    let default_target: String = Input::with_theme(&theme)
        .with_prompt(t!("init_target_prompt", locale = language))
        .default(defaults.runner.default_target.clone())
        .interact_text()
        .context(t!("init_user_confirmation_failed", locale = language).to_string())?;

    let timeout: String = Input::with_theme(&theme)
        .with_prompt(t!("init_timeout_prompt", locale = language))
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() || input.trim().parse::<u64>().is_ok() {
                Ok(())
            } else {
                Err(t!("init_timeout_invalid", locale = language).to_string())
            }
        })
        .interact_text()
        .context(t!("init_user_confirmation_failed", locale = language).to_string())?;

    let title: String = Input::with_theme(&theme)
        .with_prompt(t!("init_title_prompt", locale = language))
        .default(defaults.report.title.clone())
        .interact_text()
        .context(t!("init_user_confirmation_failed", locale = language).to_string())?;

    let output: String = Input::with_theme(&theme)
        .with_prompt(t!("init_output_prompt", locale = language))
        .default(defaults.report.output.clone())
        .interact_text()
        .context(t!("init_user_confirmation_failed", locale = language).to_string())?;

    let mut config = defaults;
    config.runner.command = command;
    config.runner.default_target = default_target;
    config.runner.timeout_secs = timeout.trim().parse().ok();
    config.report.title = title;
    config.report.output = output;

    write_config(config_path, &config, language)
}

/// Builds the default configuration for a project directory.
///
/// When the project has PHPUnit installed under `vendor/bin` and no compose
/// file, the runner is invoked directly instead of through `docker compose`.
///
/// 为项目目录构建默认配置。
///
/// 当项目在 `vendor/bin` 下安装了 PHPUnit 且没有 compose 文件时，
/// 直接调用运行器，而不是通过 `docker compose`。
pub fn default_config_for(project_dir: &Path, language: Option<&str>) -> ReportConfig {
    let has_compose = COMPOSE_FILES
        .iter()
        .any(|name| project_dir.join(name).is_file());
    let has_local_phpunit = project_dir.join("vendor").join("bin").join("phpunit").is_file();

    let mut runner = RunnerConfig::default();
    if has_local_phpunit && !has_compose {
        runner.command = LOCAL_RUNNER_COMMAND.to_string();
    }

    ReportConfig {
        language: language.map(str::to_string),
        runner,
        ..ReportConfig::default()
    }
}

fn write_config(path: &Path, config: &ReportConfig, language: &str) -> Result<()> {
    let toml_string = toml::to_string_pretty(config)
        .context(t!("init_serialize_failed", locale = language).to_string())?;

    fs::write(path, toml_string)
        .with_context(|| t!("init_write_failed", locale = language, path = path.display()).to_string())?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!("init_success_created", locale = language, path = path.display()).bold()
    );
    println!("{}", t!("init_usage_hint", locale = language));

    Ok(())
}
