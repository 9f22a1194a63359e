//! # Data Models Module / 数据模型模块
//!
//! This module defines the data structures produced by parsing one runner
//! invocation: the aggregate `TestRunSummary`, the per-group statistics derived
//! from it, and the `Percentage` type used wherever a ratio is displayed.
//!
//! 此模块定义解析一次运行器调用后产生的数据结构：
//! 聚合的 `TestRunSummary`、由其派生的分组统计，以及用于显示比例的 `Percentage` 类型。

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A percentage that is undefined when its denominator is zero.
/// Displays as `N/A` in that case, otherwise with one decimal and a `%` sign.
///
/// 当分母为零时未定义的百分比。
/// 此时显示为 `N/A`，否则保留一位小数并带 `%` 号。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentage(pub Option<f64>);

impl Percentage {
    /// Computes `part / whole * 100`, or an undefined percentage if `whole` is zero.
    /// 计算 `part / whole * 100`；若 `whole` 为零则返回未定义的百分比。
    pub fn of(part: u64, whole: u64) -> Self {
        if whole == 0 {
            Percentage(None)
        } else {
            Percentage(Some(part as f64 / whole as f64 * 100.0))
        }
    }

    pub fn is_defined(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{:.1}%", value),
            None => write!(f, "N/A"),
        }
    }
}

/// Aggregated facts extracted from the console output of one test run.
///
/// Counts default to zero when their pattern is absent from the output.
/// Group maps keep test names in the order they were first observed; the
/// maps themselves and the two sets are ordered by key so every rendering is
/// deterministic.
///
/// 从一次测试运行的控制台输出中提取的聚合信息。
///
/// 如果输出中没有对应的模式，计数默认为零。
/// 分组映射按首次出现的顺序保存测试名称；映射本身和两个集合按键排序，
/// 从而保证每次渲染结果都是确定的。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRunSummary {
    pub total_tests: u64,
    pub total_assertions: u64,
    pub error_count: u64,
    pub failure_count: u64,
    pub warning_count: u64,
    pub skipped_count: u64,
    /// Failing test names keyed by group (controller) name.
    /// 以分组（控制器）名称为键的失败测试名称。
    pub failing_by_group: BTreeMap<String, Vec<String>>,
    /// Passing test names keyed by group (controller) name.
    /// 以分组（控制器）名称为键的通过测试名称。
    pub passing_by_group: BTreeMap<String, Vec<String>>,
    pub schema_warning_subjects: BTreeSet<String>,
    pub missing_template_paths: BTreeSet<String>,
    /// Whether the `Tests: …, Assertions: …` line was present in the output.
    /// `Tests: …, Assertions: …` 行是否出现在输出中。
    #[serde(default)]
    pub summary_line_found: bool,
}

impl TestRunSummary {
    /// Tests that neither failed nor errored. Saturates at zero because the
    /// upstream counts are trusted verbatim.
    pub fn passing_count(&self) -> u64 {
        self.total_tests
            .saturating_sub(self.error_count)
            .saturating_sub(self.failure_count)
    }

    pub fn passing_percentage(&self) -> Percentage {
        Percentage::of(self.passing_count(), self.total_tests)
    }

    pub fn error_percentage(&self) -> Percentage {
        Percentage::of(self.error_count, self.total_tests)
    }

    pub fn failure_percentage(&self) -> Percentage {
        Percentage::of(self.failure_count, self.total_tests)
    }

    /// Total number of failing marker lines attributed to a group.
    pub fn failing_test_count(&self) -> usize {
        self.failing_by_group.values().map(Vec::len).sum()
    }

    /// Total number of passing marker lines attributed to a group.
    pub fn passing_test_count(&self) -> usize {
        self.passing_by_group.values().map(Vec::len).sum()
    }

    /// Returns `true` when nothing in the output looked like runner output:
    /// no summary line and no group-attributed test lines.
    ///
    /// 当输出中没有任何看起来像运行器输出的内容时返回 `true`：
    /// 既没有摘要行，也没有归属于分组的测试行。
    pub fn is_unrecognized(&self) -> bool {
        !self.summary_line_found
            && self.failing_by_group.is_empty()
            && self.passing_by_group.is_empty()
    }

    /// Statistics for every group seen in the output, sorted by failing count
    /// descending and then by group name ascending.
    ///
    /// 输出中出现的每个分组的统计信息，按失败数降序、再按分组名称升序排序。
    pub fn group_stats(&self) -> Vec<GroupStats> {
        let names: BTreeSet<&String> = self
            .failing_by_group
            .keys()
            .chain(self.passing_by_group.keys())
            .collect();

        let mut stats: Vec<GroupStats> = names
            .into_iter()
            .map(|name| {
                let failing = self.failing_by_group.get(name).map_or(0, Vec::len);
                let passing = self.passing_by_group.get(name).map_or(0, Vec::len);
                GroupStats::new(name.clone(), failing, passing)
            })
            .collect();

        stats.sort_by(|a, b| b.failing.cmp(&a.failing).then_with(|| a.name.cmp(&b.name)));
        stats
    }

    /// Group statistics restricted to groups with at least one failing test.
    pub fn failing_group_stats(&self) -> Vec<GroupStats> {
        self.group_stats()
            .into_iter()
            .filter(|s| s.failing > 0)
            .collect()
    }
}

/// Per-group pass/fail statistics.
/// 每个分组的通过/失败统计。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub name: String,
    pub failing: usize,
    pub passing: usize,
    pub total: usize,
    pub pass_rate: Percentage,
}

impl GroupStats {
    pub fn new(name: String, failing: usize, passing: usize) -> Self {
        let total = failing + passing;
        Self {
            name,
            failing,
            passing,
            total,
            pass_rate: Percentage::of(passing as u64, total as u64),
        }
    }
}
