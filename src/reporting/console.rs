//! # Console Reporting Module / 控制台报告模块
//!
//! Prints a short, colored digest of a parsed test run, with
//! internationalization support.
//!
//! 在控制台打印解析后测试运行的简短彩色摘要，支持国际化。

use colored::*;
use rust_i18n::t;

use crate::core::models::TestRunSummary;
use crate::infra::command::ProcessOutcome;

/// Prints the headline counts and the groups with failures.
///
/// 打印主要计数以及存在失败的分组。
///
/// # Output Format / 输出格式
/// ```text
/// --- Test Run Summary ---
///   Tests: 10  Assertions: 40  Passing: 7 (70.0%)  Errors: 1  Failures: 2
///   Grouped test lines: 2 failing, 1 passing
///   - ProductsController                       2 failing / 3 total
/// ```
pub fn print_summary(summary: &TestRunSummary, locale: &str) {
    println!("\n{}", t!("summary_banner", locale = locale).bold());

    // The ratio is left out when no tests were counted.
    let passing_pct = summary.passing_percentage();
    let passing = if passing_pct.is_defined() {
        format!("{} ({})", summary.passing_count(), passing_pct)
    } else {
        summary.passing_count().to_string()
    };
    println!(
        "  {}",
        t!(
            "summary_counts",
            locale = locale,
            tests = summary.total_tests,
            assertions = summary.total_assertions,
            passing = passing.green(),
            errors = summary.error_count.to_string().yellow(),
            failures = summary.failure_count.to_string().red()
        )
    );

    if summary.warning_count > 0 || summary.skipped_count > 0 {
        println!(
            "  {}",
            t!(
                "summary_warnings_skipped",
                locale = locale,
                warnings = summary.warning_count,
                skipped = summary.skipped_count
            )
            .dimmed()
        );
    }

    let grouped = summary.failing_test_count() + summary.passing_test_count();
    if grouped > 0 {
        println!(
            "  {}",
            t!(
                "summary_grouped_tests",
                locale = locale,
                failing = summary.failing_test_count(),
                passing = summary.passing_test_count()
            )
            .dimmed()
        );
    }

    let failing_groups = summary.failing_group_stats();
    if failing_groups.is_empty() {
        println!("  {}", t!("summary_no_failing_groups", locale = locale).green());
    } else {
        for stats in failing_groups {
            println!(
                "  - {:<40} {}",
                stats.name.cyan(),
                t!(
                    "summary_group_line",
                    locale = locale,
                    failing = stats.failing.to_string().red(),
                    total = stats.total
                )
            );
        }
    }

    if !summary.schema_warning_subjects.is_empty() {
        println!(
            "  {}",
            t!(
                "summary_schema_warnings",
                locale = locale,
                count = summary.schema_warning_subjects.len()
            )
            .yellow()
        );
    }
    if !summary.missing_template_paths.is_empty() {
        println!(
            "  {}",
            t!(
                "summary_missing_templates",
                locale = locale,
                count = summary.missing_template_paths.len()
            )
            .yellow()
        );
    }
}

/// Prints how the runner process ended. A non-zero exit is informational:
/// failing suites exit non-zero.
///
/// 打印运行器进程的结束方式。非零退出仅作提示：失败的测试套件本就以非零状态退出。
pub fn print_runner_outcome(outcome: ProcessOutcome, seconds: f64, locale: &str) {
    let duration = format!("{:.2}", seconds);
    let line = match outcome {
        ProcessOutcome::Exited(Some(0)) => {
            t!("runner_exited_ok", locale = locale, duration = duration).green()
        }
        ProcessOutcome::Exited(Some(code)) => t!(
            "runner_exited_code",
            locale = locale,
            code = code,
            duration = duration
        )
        .yellow(),
        ProcessOutcome::Exited(None) => {
            t!("runner_exited_signal", locale = locale, duration = duration).yellow()
        }
        ProcessOutcome::TimedOut => {
            t!("runner_timed_out", locale = locale, duration = duration).red()
        }
        ProcessOutcome::Cancelled => t!("runner_cancelled", locale = locale).red(),
    };
    println!("{}", line);
}
