//! # HTML Reporting Module / HTML 报告模块
//!
//! Renders the same sections as the markdown report as a standalone, styled
//! HTML page.
//!
//! 以独立的、带样式的 HTML 页面渲染与 Markdown 报告相同的各个部分。

use anyhow::Result;
use maud::{DOCTYPE, Markup, PreEscaped, Render, html};
use std::path::Path;

use crate::core::models::{Percentage, TestRunSummary};
use crate::infra::fs::write_artifact;
use crate::reporting::markdown::ReportContext;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = include_str!("assets/report.css");

impl Render for Percentage {
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str(&self.to_string());
    }
}

/// Renders the HTML report as a string.
/// 将 HTML 报告渲染为字符串。
pub fn render_html(summary: &TestRunSummary, ctx: &ReportContext) -> String {
    let page = html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (ctx.title) }
                style { (PreEscaped(HTML_STYLE)) }
            }
            body {
                h1 { (ctx.title) }
                p class="generated" { "Generated: " (ctx.timestamp()) }
                (summary_cards(summary))
                (failing_groups_table(summary))
                (failing_tests(summary))
                (schema_issues(summary))
                (missing_templates(summary))
                (action_plan(summary))
            }
        }
    };
    page.into_string()
}

fn summary_cards(summary: &TestRunSummary) -> Markup {
    html! {
        div class="summary-container" {
            div class="summary-item" {
                span class="count" { (summary.total_tests) }
                span class="label" { "Total Tests" }
            }
            div class="summary-item" {
                span class="count" { (summary.total_assertions) }
                span class="label" { "Assertions" }
            }
            div class="summary-item" {
                span class="count passed-text" { (summary.passing_count()) }
                span class="label" { "Passing" }
                span class="ratio" { (summary.passing_percentage()) }
            }
            div class="summary-item" {
                span class="count error-text" { (summary.error_count) }
                span class="label" { "Errors" }
                span class="ratio" { (summary.error_percentage()) }
            }
            div class="summary-item" {
                span class="count failed-text" { (summary.failure_count) }
                span class="label" { "Failures" }
                span class="ratio" { (summary.failure_percentage()) }
            }
            @if summary.warning_count > 0 {
                div class="summary-item" {
                    span class="count" { (summary.warning_count) }
                    span class="label" { "Warnings" }
                }
            }
            @if summary.skipped_count > 0 {
                div class="summary-item" {
                    span class="count" { (summary.skipped_count) }
                    span class="label" { "Skipped" }
                }
            }
        }
    }
}

fn failing_groups_table(summary: &TestRunSummary) -> Markup {
    html! {
        h2 { "Failing Controllers Summary" }
        table {
            thead {
                tr {
                    th { "Controller" }
                    th { "Failing Tests" }
                    th { "Passing Tests" }
                    th { "Total" }
                    th { "Pass Rate" }
                }
            }
            tbody {
                @for stats in summary.failing_group_stats() {
                    tr {
                        td { (stats.name) }
                        td class="num failed-text" { (stats.failing) }
                        td class="num" { (stats.passing) }
                        td class="num" { (stats.total) }
                        td class="num" { (stats.pass_rate) }
                    }
                }
            }
        }
    }
}

fn failing_tests(summary: &TestRunSummary) -> Markup {
    html! {
        h2 { "Detailed Failing Tests by Controller" }
        @for (group, tests) in &summary.failing_by_group {
            @if !tests.is_empty() {
                h3 { (group) }
                ul class="failing" {
                    @for test_name in tests {
                        li { (test_name) }
                    }
                }
            }
        }
    }
}

fn schema_issues(summary: &TestRunSummary) -> Markup {
    html! {
        @if !summary.schema_warning_subjects.is_empty() {
            h2 { "Fixture Schema Issues" }
            p {
                "The following fixtures have SQLite compatibility issues (missing length specifications):"
            }
            ul {
                @for fixture in &summary.schema_warning_subjects {
                    li { code { (fixture) } }
                }
            }
            p class="impact" {
                strong { "Impact" }
                ": These schema errors prevent test fixtures from loading properly in SQLite."
            }
        }
    }
}

fn missing_templates(summary: &TestRunSummary) -> Markup {
    html! {
        @if !summary.missing_template_paths.is_empty() {
            h2 { "Missing Templates" }
            p { "The following template files need to be created:" }
            ul {
                @for template in &summary.missing_template_paths {
                    li { code { (template) } }
                }
            }
        }
    }
}

/// The three-priority plan, with the same counts as the markdown report.
fn action_plan(summary: &TestRunSummary) -> Markup {
    html! {
        h2 { "Recommended Action Plan" }
        div class="priority" {
            h3 { "Priority 1: Fix Fixture Schema Issues (High Impact)" }
            ul {
                li { strong { "Affected Fixtures" } ": " (summary.schema_warning_subjects.len()) " fixtures" }
                li { strong { "Impact" } ": Prevents ~" (summary.error_count) " test errors" }
                li { strong { "Action" } ": Add explicit field schemas with length specifications to fixtures" }
            }
        }
        div class="priority" {
            h3 { "Priority 2: Create Missing Templates" }
            ul {
                li { strong { "Missing Templates" } ": " (summary.missing_template_paths.len()) " templates" }
                li { strong { "Impact" } ": Prevents view-related test failures" }
                li { strong { "Action" } ": Create minimal template files for each missing view" }
            }
        }
        div class="priority" {
            h3 { "Priority 3: Fix Controller Logic Issues" }
            ul {
                li { strong { "Failing Tests" } ": " (summary.failure_count) " failures" }
                li { strong { "Action" } ": Review and fix controller logic, authentication, and authorization" }
            }
        }
    }
}

/// Renders the HTML report and writes it to `output_path`, replacing any
/// existing file.
///
/// # Errors
/// Fails if the file or its parent directory cannot be written.
pub fn generate_html_report(
    summary: &TestRunSummary,
    ctx: &ReportContext,
    output_path: &Path,
) -> Result<()> {
    write_artifact(output_path, &render_html(summary, ctx))
}
