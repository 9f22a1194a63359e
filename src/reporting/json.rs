//! # JSON Export Module / JSON 导出模块
//!
//! Serializes the parsed summary for consumption by other tools.
//!
//! 序列化解析后的摘要，供其他工具使用。

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::core::models::{GroupStats, Percentage, TestRunSummary};
use crate::infra::fs::write_artifact;
use crate::reporting::markdown::ReportContext;

/// The JSON document: the raw summary plus the derived figures shown in the
/// markdown report.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub title: &'a str,
    pub generated_at: String,
    pub summary: &'a TestRunSummary,
    pub passing_count: u64,
    pub passing_percentage: Percentage,
    pub error_percentage: Percentage,
    pub failure_percentage: Percentage,
    pub groups: Vec<GroupStats>,
}

impl<'a> JsonReport<'a> {
    pub fn new(summary: &'a TestRunSummary, ctx: &'a ReportContext) -> Self {
        Self {
            title: &ctx.title,
            generated_at: ctx.generated_at.to_rfc3339(),
            summary,
            passing_count: summary.passing_count(),
            passing_percentage: summary.passing_percentage(),
            error_percentage: summary.error_percentage(),
            failure_percentage: summary.failure_percentage(),
            groups: summary.group_stats(),
        }
    }
}

/// Renders the summary as pretty-printed JSON.
pub fn render_json(summary: &TestRunSummary, ctx: &ReportContext) -> Result<String> {
    serde_json::to_string_pretty(&JsonReport::new(summary, ctx))
        .context("Failed to serialize the report summary")
}

/// Renders the JSON report and writes it to `output_path`.
pub fn generate_json_report(
    summary: &TestRunSummary,
    ctx: &ReportContext,
    output_path: &Path,
) -> Result<()> {
    write_artifact(output_path, &render_json(summary, ctx)?)
}
