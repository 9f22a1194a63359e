//! # Markdown Report Unit Tests / Markdown 报告单元测试
//!
//! Tests for the section layout, conditional sections and determinism of the
//! markdown report.
//!
//! 测试 Markdown 报告的章节布局、条件章节以及输出的确定性。

mod common;

use common::{PRODUCTS_LOG, SAMPLE_LOG, fixed_context};
use testdox_report::models::TestRunSummary;
use testdox_report::parser::parse;
use testdox_report::reporting::render_markdown;

#[cfg(test)]
mod layout_tests {
    use super::*;

    #[test]
    fn test_header_and_timestamp() {
        let report = render_markdown(&TestRunSummary::default(), &fixed_context());
        let mut lines = report.lines();

        assert_eq!(lines.next(), Some("# Controller Test Report"));
        assert_eq!(lines.next(), Some("Generated: 2025-06-15 10:30:00"));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(lines.next(), Some("## Executive Summary"));
    }

    #[test]
    fn test_products_scenario_table_row() {
        let report = render_markdown(&parse(PRODUCTS_LOG), &fixed_context());

        assert!(report.contains("- **Total Tests**: 10"));
        assert!(report.contains("- **Total Assertions**: 40"));
        assert!(report.contains("- **Passing**: 7 (70.0%)"));
        assert!(report.contains("- **Errors**: 1 (10.0%)"));
        assert!(report.contains("- **Failures**: 2 (20.0%)"));
        assert!(report.contains("| ProductsController | 2 | 1 | 3 | 33.3% |"));
        assert!(report.contains("### ProductsController\n\n- ✘ testAdd\n- ✘ testDelete\n"));
    }

    #[test]
    fn test_sections_appear_in_order() {
        let report = render_markdown(&parse(SAMPLE_LOG), &fixed_context());

        let headings = [
            "## Executive Summary",
            "## Failing Controllers Summary",
            "## Detailed Failing Tests by Controller",
            "## Fixture Schema Issues",
            "## Missing Templates",
            "## Recommended Action Plan",
        ];
        let positions: Vec<usize> = headings
            .iter()
            .map(|h| report.find(h).unwrap_or_else(|| panic!("missing heading {}", h)))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_table_rows_sorted_by_failures() {
        let report = render_markdown(&parse(SAMPLE_LOG), &fixed_context());

        let products = report
            .find("| Products Controller | 3 | 1 | 4 | 25.0% |")
            .expect("products row");
        let articles = report
            .find("| Articles Controller | 2 | 1 | 3 | 33.3% |")
            .expect("articles row");
        assert!(products < articles);
        assert!(!report.contains("| Users Controller |"));
    }

    #[test]
    fn test_action_plan_counts() {
        let report = render_markdown(&parse(SAMPLE_LOG), &fixed_context());

        assert!(report.contains("- **Affected Fixtures**: 2 fixtures"));
        assert!(report.contains("- **Impact**: Prevents ~2 test errors"));
        assert!(report.contains("- **Missing Templates**: 2 templates"));
        assert!(report.contains("- **Failing Tests**: 3 failures"));
    }
}

#[cfg(test)]
mod conditional_section_tests {
    use super::*;

    #[test]
    fn test_zero_tests_renders_not_applicable() {
        let report = render_markdown(&TestRunSummary::default(), &fixed_context());

        assert!(report.contains("- **Passing**: 0 (N/A)"));
        assert!(report.contains("- **Errors**: 0 (N/A)"));
        assert!(report.contains("- **Failures**: 0 (N/A)"));
    }

    #[test]
    fn test_empty_summary_omits_optional_sections() {
        let report = render_markdown(&TestRunSummary::default(), &fixed_context());

        assert!(!report.contains("## Fixture Schema Issues"));
        assert!(!report.contains("## Missing Templates"));
        assert!(!report.contains("- **Warnings**"));
        assert!(!report.contains("- **Skipped**"));
        // Mandatory sections stay, even when empty.
        assert!(report.contains("## Failing Controllers Summary"));
        assert!(report.contains("## Recommended Action Plan"));
    }

    #[test]
    fn test_warnings_and_skipped_lines_when_positive() {
        let report = render_markdown(&parse(SAMPLE_LOG), &fixed_context());

        assert!(report.contains("- **Warnings**: 1"));
        assert!(report.contains("- **Skipped**: 1"));
    }

    #[test]
    fn test_schema_and_template_lists() {
        let report = render_markdown(&parse(SAMPLE_LOG), &fixed_context());

        assert!(report.contains("- `Articles`\n- `Users`"));
        assert!(report.contains("- `Articles/view.php`\n- `Products/edit.php`"));
    }
}

#[cfg(test)]
mod determinism_tests {
    use super::*;

    #[test]
    fn test_rendering_is_idempotent() {
        let summary = parse(SAMPLE_LOG);
        let ctx = fixed_context();

        assert_eq!(render_markdown(&summary, &ctx), render_markdown(&summary, &ctx));
    }

    #[test]
    fn test_reparsing_gives_identical_report() {
        let ctx = fixed_context();
        let first = render_markdown(&parse(SAMPLE_LOG), &ctx);
        let second = render_markdown(&parse(SAMPLE_LOG), &ctx);

        assert_eq!(first, second);
    }
}
