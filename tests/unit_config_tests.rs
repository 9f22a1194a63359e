//! # Config Module Unit Tests / Config 模块单元测试
//!
//! This module contains unit tests for loading and parsing `TestReport.toml`.
//!
//! 此模块包含加载和解析 `TestReport.toml` 的单元测试。

use std::fs;
use tempfile::tempdir;
use testdox_report::config::{ReportConfig, load_config, load_or_default, parse_config};

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = parse_config("").expect("empty config parses");

        assert_eq!(config, ReportConfig::default());
        assert_eq!(
            config.runner.command,
            "docker compose exec -T willowcms php vendor/bin/phpunit"
        );
        assert_eq!(config.runner.output_flag, "--testdox");
        assert_eq!(config.runner.default_target, "tests/TestCase/Controller/");
        assert_eq!(config.report.output, "/tmp/phpunit_test_report.md");
        assert_eq!(config.report.title, "WillowCMS Controller Test Detailed Report");
        assert_eq!(config.language, None);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let toml_str = r#"
            language = "zh-CN"

            [runner]
            timeout_secs = 600

            [report]
            html = "reports/phpunit.html"
        "#;
        let config = parse_config(toml_str).expect("partial config parses");

        assert_eq!(config.language.as_deref(), Some("zh-CN"));
        assert_eq!(config.runner.timeout_secs, Some(600));
        assert_eq!(config.runner.output_flag, "--testdox");
        assert_eq!(config.report.html.as_deref(), Some("reports/phpunit.html"));
        assert_eq!(config.report.json, None);
        assert_eq!(config.report.output, "/tmp/phpunit_test_report.md");
    }

    #[test]
    fn test_full_config() {
        let toml_str = r#"
            [runner]
            command = "php vendor/bin/phpunit"
            output_flag = ""
            default_target = "tests/TestCase/Model/"
            working_dir = "/var/www/html"

            [report]
            title = "Model Tests"
            output = "build/report.md"
            json = "build/report.json"
        "#;
        let config = parse_config(toml_str).expect("full config parses");

        assert_eq!(config.runner.command, "php vendor/bin/phpunit");
        assert!(config.runner.output_flag.is_empty());
        assert_eq!(config.runner.working_dir.as_deref(), Some("/var/www/html"));
        assert_eq!(config.report.title, "Model Tests");
        assert_eq!(config.report.json.as_deref(), Some("build/report.json"));
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(parse_config("[runner\ncommand = ").is_err());
        assert!(parse_config("[runner]\ntimeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn test_serialized_default_parses_back() {
        let original = ReportConfig::default();
        let text = toml::to_string_pretty(&original).expect("serialize");
        assert!(!text.contains("timeout_secs"));

        let restored = parse_config(&text).expect("parse back");
        assert_eq!(restored, original);
    }
}

#[cfg(test)]
mod load_tests {
    use super::*;

    #[test]
    fn test_missing_optional_file_gives_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("TestReport.toml");

        let config = load_or_default(&path, false).expect("defaults");
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn test_missing_required_file_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("custom.toml");

        let err = load_or_default(&path, true).expect_err("missing file must fail");
        assert!(format!("{:#}", err).contains("custom.toml"));
    }

    #[test]
    fn test_existing_file_is_loaded() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("TestReport.toml");
        fs::write(&path, "[report]\ntitle = \"Nightly\"\n").expect("write config");

        let config = load_or_default(&path, false).expect("load");
        assert_eq!(config.report.title, "Nightly");
    }

    #[test]
    fn test_parse_error_mentions_path() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("broken.toml");
        fs::write(&path, "not = [valid").expect("write config");

        let err = load_config(&path).expect_err("broken config must fail");
        assert!(format!("{:#}", err).contains("broken.toml"));
    }
}
