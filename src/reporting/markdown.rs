//! # Markdown Reporting Module / Markdown 报告模块
//!
//! Renders a [`TestRunSummary`] into the markdown failure report. Rendering is
//! pure: the title and the generation timestamp come in through
//! [`ReportContext`], so identical inputs give byte-identical output.
//!
//! 将 [`TestRunSummary`] 渲染为 Markdown 失败报告。渲染是纯函数：
//! 标题和生成时间通过 [`ReportContext`] 传入，因此相同输入得到逐字节相同的输出。

use chrono::{DateTime, Local};

use crate::core::models::TestRunSummary;
use crate::core::parser::FAIL_MARKER;

/// Format of the `Generated:` timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Values a report needs besides the summary itself.
/// 除摘要本身之外，报告还需要的值。
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub title: String,
    pub generated_at: DateTime<Local>,
}

impl ReportContext {
    pub fn new(title: impl Into<String>, generated_at: DateTime<Local>) -> Self {
        Self {
            title: title.into(),
            generated_at,
        }
    }

    /// A context stamped with the current local time.
    pub fn now(title: impl Into<String>) -> Self {
        Self::new(title, Local::now())
    }

    pub fn timestamp(&self) -> String {
        self.generated_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Renders the full markdown report.
///
/// Sections, in order: title, executive summary, failing groups table,
/// failing tests per group, fixture schema issues (only when present),
/// missing templates (only when present), recommended action plan.
///
/// 渲染完整的 Markdown 报告。
///
/// 各部分依次为：标题、执行摘要、失败分组表、按分组列出的失败测试、
/// fixture schema 问题（仅在存在时）、缺失模板（仅在存在时）、建议的行动计划。
pub fn render_markdown(summary: &TestRunSummary, ctx: &ReportContext) -> String {
    let mut report: Vec<String> = Vec::new();

    report.push(format!("# {}", ctx.title));
    report.push(format!("Generated: {}", ctx.timestamp()));
    report.push(String::new());

    push_executive_summary(&mut report, summary);
    push_failing_groups_table(&mut report, summary);
    push_failing_tests(&mut report, summary);
    push_schema_issues(&mut report, summary);
    push_missing_templates(&mut report, summary);
    push_action_plan(&mut report, summary);

    report.join("\n")
}

fn push_executive_summary(report: &mut Vec<String>, summary: &TestRunSummary) {
    report.push("## Executive Summary".to_string());
    report.push(String::new());
    report.push(format!("- **Total Tests**: {}", summary.total_tests));
    report.push(format!("- **Total Assertions**: {}", summary.total_assertions));
    report.push(format!(
        "- **Passing**: {} ({})",
        summary.passing_count(),
        summary.passing_percentage()
    ));
    report.push(format!(
        "- **Errors**: {} ({})",
        summary.error_count,
        summary.error_percentage()
    ));
    report.push(format!(
        "- **Failures**: {} ({})",
        summary.failure_count,
        summary.failure_percentage()
    ));
    if summary.warning_count > 0 {
        report.push(format!("- **Warnings**: {}", summary.warning_count));
    }
    if summary.skipped_count > 0 {
        report.push(format!("- **Skipped**: {}", summary.skipped_count));
    }
    report.push(String::new());
}

fn push_failing_groups_table(report: &mut Vec<String>, summary: &TestRunSummary) {
    report.push("## Failing Controllers Summary".to_string());
    report.push(String::new());
    report.push("| Controller | Failing Tests | Passing Tests | Total | Pass Rate |".to_string());
    report.push("|------------|---------------|---------------|-------|-----------|".to_string());

    for stats in summary.failing_group_stats() {
        report.push(format!(
            "| {} | {} | {} | {} | {} |",
            stats.name, stats.failing, stats.passing, stats.total, stats.pass_rate
        ));
    }
    report.push(String::new());
}

fn push_failing_tests(report: &mut Vec<String>, summary: &TestRunSummary) {
    report.push("## Detailed Failing Tests by Controller".to_string());
    report.push(String::new());

    for (group, tests) in &summary.failing_by_group {
        if tests.is_empty() {
            continue;
        }
        report.push(format!("### {}", group));
        report.push(String::new());
        for test_name in tests {
            report.push(format!("- {} {}", FAIL_MARKER, test_name));
        }
        report.push(String::new());
    }
}

fn push_schema_issues(report: &mut Vec<String>, summary: &TestRunSummary) {
    if summary.schema_warning_subjects.is_empty() {
        return;
    }
    report.push("## Fixture Schema Issues".to_string());
    report.push(String::new());
    report.push(
        "The following fixtures have SQLite compatibility issues (missing length specifications):"
            .to_string(),
    );
    report.push(String::new());
    for fixture in &summary.schema_warning_subjects {
        report.push(format!("- `{}`", fixture));
    }
    report.push(String::new());
    report.push(
        "**Impact**: These schema errors prevent test fixtures from loading properly in SQLite."
            .to_string(),
    );
    report.push(String::new());
}

fn push_missing_templates(report: &mut Vec<String>, summary: &TestRunSummary) {
    if summary.missing_template_paths.is_empty() {
        return;
    }
    report.push("## Missing Templates".to_string());
    report.push(String::new());
    report.push("The following template files need to be created:".to_string());
    report.push(String::new());
    for template in &summary.missing_template_paths {
        report.push(format!("- `{}`", template));
    }
    report.push(String::new());
}

fn push_action_plan(report: &mut Vec<String>, summary: &TestRunSummary) {
    report.push("## Recommended Action Plan".to_string());
    report.push(String::new());

    report.push("### Priority 1: Fix Fixture Schema Issues (High Impact)".to_string());
    report.push(format!(
        "- **Affected Fixtures**: {} fixtures",
        summary.schema_warning_subjects.len()
    ));
    report.push(format!("- **Impact**: Prevents ~{} test errors", summary.error_count));
    report.push(
        "- **Action**: Add explicit field schemas with length specifications to fixtures"
            .to_string(),
    );
    report.push(String::new());

    report.push("### Priority 2: Create Missing Templates".to_string());
    report.push(format!(
        "- **Missing Templates**: {} templates",
        summary.missing_template_paths.len()
    ));
    report.push("- **Impact**: Prevents view-related test failures".to_string());
    report.push("- **Action**: Create minimal template files for each missing view".to_string());
    report.push(String::new());

    report.push("### Priority 3: Fix Controller Logic Issues".to_string());
    report.push(format!("- **Failing Tests**: {} failures", summary.failure_count));
    report.push(
        "- **Action**: Review and fix controller logic, authentication, and authorization"
            .to_string(),
    );
    report.push(String::new());
}
