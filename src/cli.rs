// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};

use crate::commands::{self, run::RunOptions};
use crate::core::config::{self, DEFAULT_CONFIG_FILE};
use rust_i18n::t;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        return args.get(pos + 1).cloned();
    }
    args.iter()
        .find_map(|arg| arg.strip_prefix("--lang=").map(str::to_string))
}

pub fn build_cli(locale: &str) -> Command {
    Command::new("testdox-report")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("arg_config", locale = locale).to_string())
                .value_name("CONFIG")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cmd_run_about", locale = locale).to_string())
                .arg(
                    Arg::new("target")
                        .help(t!("arg_target", locale = locale).to_string())
                        .value_name("TARGET")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("arg_output", locale = locale).to_string())
                        .value_name("OUTPUT")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .help(t!("arg_html", locale = locale).to_string())
                        .value_name("HTML")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help(t!("arg_json", locale = locale).to_string())
                        .value_name("JSON")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("input")
                        .long("input")
                        .help(t!("arg_input", locale = locale).to_string())
                        .value_name("INPUT")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("timeout")
                        .long("timeout")
                        .help(t!("arg_timeout", locale = locale).to_string())
                        .value_name("SECONDS")
                        .value_parser(clap::value_parser!(u64))
                        .conflicts_with("input")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help(t!("arg_strict", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("quiet")
                        .short('q')
                        .long("quiet")
                        .help(t!("arg_quiet", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("arg_non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Extracts the `run` options from the `run` subcommand's matches.
pub fn run_options_from(matches: &ArgMatches) -> RunOptions {
    RunOptions {
        target: matches.get_one::<String>("target").cloned(),
        output: matches.get_one::<PathBuf>("output").cloned(),
        html: matches.get_one::<PathBuf>("html").cloned(),
        json: matches.get_one::<PathBuf>("json").cloned(),
        input: matches.get_one::<PathBuf>("input").cloned(),
        timeout_secs: matches.get_one::<u64>("timeout").copied(),
        strict: matches.get_flag("strict"),
        quiet: matches.get_flag("quiet"),
    }
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first, so help text is localized.
    let cli_language = pre_parse_language();
    let help_locale = crate::resolve_locale(cli_language.as_deref());
    rust_i18n::set_locale(&help_locale);

    let matches = build_cli(&help_locale).get_matches();

    let config_arg = matches.get_one::<PathBuf>("config").cloned();
    let config_path = config_arg
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    match matches.subcommand() {
        Some(("init", init_matches)) => {
            let non_interactive = init_matches.get_flag("non-interactive");

            // Show language detection message if it was auto-detected
            if cli_language.is_none() && !non_interactive {
                println!(
                    "🌐 {}",
                    t!("system_language_detected", locale = &help_locale, lang = &help_locale)
                );
            }
            commands::init::run_init_wizard(&config_path, &help_locale, non_interactive)?;
        }
        other => {
            // A missing default config file is fine; an explicitly named one must exist.
            let report_config = config::load_or_default(&config_path, config_arg.is_some())?;
            let locale = crate::resolve_locale(
                cli_language
                    .as_deref()
                    .or(report_config.language.as_deref()),
            );
            rust_i18n::set_locale(&locale);

            let options = match other {
                Some(("run", run_matches)) => run_options_from(run_matches),
                _ => RunOptions::default(),
            };
            commands::run::execute(report_config, options, &locale).await?;
        }
    }
    Ok(())
}
