//! # Output Parser Module / 输出解析模块
//!
//! Turns the raw console text of a PHPUnit `--testdox` run into a
//! [`TestRunSummary`].
//!
//! Every brittle pattern lives in a small classifier that maps one line to an
//! optional [`LineEvent`]. The events are folded left to right into a
//! [`ParseState`], which carries the "current group" explicitly. Lines that no
//! classifier recognizes are ignored.
//!
//! 将 PHPUnit `--testdox` 运行的原始控制台文本转换为 [`TestRunSummary`]。
//!
//! 每个脆弱的模式都封装在一个小型分类器中，将一行映射为可选的 [`LineEvent`]。
//! 事件按从左到右的顺序折叠进 [`ParseState`]，其中显式保存"当前分组"。
//! 任何分类器都无法识别的行将被忽略。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::models::TestRunSummary;

/// Glyph PHPUnit prints in front of a failing testdox line.
pub const FAIL_MARKER: char = '✘';
/// Glyph PHPUnit prints in front of a passing testdox line.
pub const PASS_MARKER: char = '✔';

const SCHEMA_WARNING_PHRASE: &str = "Schema warning for";
const MISSING_TEMPLATE_PHRASE: &str = "MissingTemplateException";

static RE_SUMMARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Tests: (\d+), Assertions: (\d+), Errors: (\d+), Failures: (\d+)")
        .expect("summary pattern is valid")
});

static RE_WARNINGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"PHPUnit Warnings: (\d+)").expect("warnings pattern is valid"));

static RE_SKIPPED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Skipped: (\d+)").expect("skipped pattern is valid"));

static RE_GROUP_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z][a-zA-Z\s]+Controller)").expect("group header pattern is valid")
});

static RE_SCHEMA_SUBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Schema warning for (\w+)").expect("schema warning pattern is valid")
});

static RE_TEMPLATE_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Template file `([^`]+)`").expect("template pattern is valid"));

/// Outcome of a single testdox line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    Passed,
    Failed,
}

/// A fact recognized on one line of runner output.
/// 在运行器输出的一行中识别出的信息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// A group header; subsequent test lines belong to this group.
    /// 分组标题；后续测试行归属于该分组。
    GroupHeader(String),
    /// A testdox result line, already stripped of its marker glyph.
    /// testdox 结果行，已去除标记符号。
    Test { outcome: TestOutcome, name: String },
    /// A fixture schema warning naming its subject.
    SchemaWarning(String),
    /// A missing template exception naming the template path.
    MissingTemplate(String),
}

/// Recognizes a group header line such as `ProductsController`.
pub fn classify_group_header(line: &str) -> Option<LineEvent> {
    RE_GROUP_HEADER
        .captures(line)
        .map(|caps| LineEvent::GroupHeader(caps[1].trim().to_string()))
}

/// Recognizes a line carrying the failure glyph.
pub fn classify_failing_test(line: &str) -> Option<LineEvent> {
    classify_marked(line, FAIL_MARKER, TestOutcome::Failed)
}

/// Recognizes a line carrying the pass glyph.
pub fn classify_passing_test(line: &str) -> Option<LineEvent> {
    classify_marked(line, PASS_MARKER, TestOutcome::Passed)
}

fn classify_marked(line: &str, marker: char, outcome: TestOutcome) -> Option<LineEvent> {
    if !line.contains(marker) {
        return None;
    }
    let name = line.trim().replace(marker, "").trim().to_string();
    Some(LineEvent::Test { outcome, name })
}

/// Extracts the subject of a `Schema warning for <Subject>` line.
pub fn classify_schema_warning(line: &str) -> Option<LineEvent> {
    if !line.contains(SCHEMA_WARNING_PHRASE) {
        return None;
    }
    RE_SCHEMA_SUBJECT
        .captures(line)
        .map(|caps| LineEvent::SchemaWarning(caps[1].to_string()))
}

/// Extracts the backtick-quoted path of a `MissingTemplateException` line.
pub fn classify_missing_template(line: &str) -> Option<LineEvent> {
    if !line.contains(MISSING_TEMPLATE_PHRASE) {
        return None;
    }
    RE_TEMPLATE_PATH
        .captures(line)
        .map(|caps| LineEvent::MissingTemplate(caps[1].to_string()))
}

/// Classifies one line into zero or more events.
///
/// A group header ends classification of its line. Otherwise every remaining
/// classifier is applied, so a single line may, for example, report both a
/// failing test and a schema warning.
///
/// 将一行分类为零个或多个事件。
///
/// 分组标题会结束该行的分类。否则会应用其余所有分类器，
/// 因此一行可能同时报告一个失败的测试和一个 schema 警告。
pub fn classify_line(line: &str) -> Vec<LineEvent> {
    if let Some(header) = classify_group_header(line) {
        return vec![header];
    }

    let classifiers: [fn(&str) -> Option<LineEvent>; 4] = [
        classify_failing_test,
        classify_passing_test,
        classify_schema_warning,
        classify_missing_template,
    ];

    classifiers
        .iter()
        .filter_map(|classify| classify(line))
        .collect()
}

/// Fold accumulator for the line scan.
/// 行扫描的折叠累加器。
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParseState {
    /// The group named by the most recent header, if any header was seen yet.
    /// 最近一个标题所命名的分组（如果已经出现过标题）。
    pub current_group: Option<String>,
    pub summary: TestRunSummary,
}

impl ParseState {
    /// Applies one event and returns the updated state.
    pub fn apply(mut self, event: LineEvent) -> Self {
        match event {
            LineEvent::GroupHeader(name) => {
                self.current_group = Some(name);
            }
            LineEvent::Test { outcome, name } => {
                // Test lines ahead of the first header have no group and are dropped.
                if let Some(group) = &self.current_group {
                    let bucket = match outcome {
                        TestOutcome::Failed => &mut self.summary.failing_by_group,
                        TestOutcome::Passed => &mut self.summary.passing_by_group,
                    };
                    bucket.entry(group.clone()).or_default().push(name);
                }
            }
            LineEvent::SchemaWarning(subject) => {
                self.summary.schema_warning_subjects.insert(subject);
            }
            LineEvent::MissingTemplate(path) => {
                self.summary.missing_template_paths.insert(path);
            }
        }
        self
    }
}

/// Counts taken from the runner's closing summary lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SummaryCounts {
    pub total_tests: u64,
    pub total_assertions: u64,
    pub error_count: u64,
    pub failure_count: u64,
    pub warning_count: u64,
    pub skipped_count: u64,
    pub summary_line_found: bool,
}

/// Scans the whole text for the summary, warnings and skipped lines.
/// Each pattern is independent and leaves its fields at zero when absent.
///
/// 在整个文本中查找摘要行、警告行和跳过行。
/// 每个模式相互独立，缺失时对应字段保持为零。
pub fn parse_summary_counts(output: &str) -> SummaryCounts {
    let mut counts = SummaryCounts::default();

    if let Some(caps) = RE_SUMMARY.captures(output) {
        counts.total_tests = parse_count(&caps[1]);
        counts.total_assertions = parse_count(&caps[2]);
        counts.error_count = parse_count(&caps[3]);
        counts.failure_count = parse_count(&caps[4]);
        counts.summary_line_found = true;
    }
    if let Some(caps) = RE_WARNINGS.captures(output) {
        counts.warning_count = parse_count(&caps[1]);
    }
    if let Some(caps) = RE_SKIPPED.captures(output) {
        counts.skipped_count = parse_count(&caps[1]);
    }

    counts
}

// Digits-only by construction; only an overflowing value can fail here.
fn parse_count(digits: &str) -> u64 {
    digits.parse().unwrap_or(0)
}

/// Parses raw runner output into a [`TestRunSummary`].
///
/// Never fails: unrecognized or malformed lines are skipped and missing
/// summary fields stay at zero.
///
/// 将原始运行器输出解析为 [`TestRunSummary`]。
///
/// 永远不会失败：无法识别或格式错误的行会被跳过，缺失的摘要字段保持为零。
pub fn parse(output: &str) -> TestRunSummary {
    let counts = parse_summary_counts(output);

    let state = output
        .lines()
        .flat_map(classify_line)
        .fold(ParseState::default(), ParseState::apply);

    TestRunSummary {
        total_tests: counts.total_tests,
        total_assertions: counts.total_assertions,
        error_count: counts.error_count,
        failure_count: counts.failure_count,
        warning_count: counts.warning_count,
        skipped_count: counts.skipped_count,
        summary_line_found: counts.summary_line_found,
        ..state.summary
    }
}
