//! # Reporting Module / 报告模块
//!
//! This module renders a parsed test run in several formats: the markdown
//! report (the primary artifact), an optional HTML page, an optional JSON
//! export, and a colored console digest.
//!
//! 此模块以多种格式渲染解析后的测试运行：Markdown 报告（主要产物）、
//! 可选的 HTML 页面、可选的 JSON 导出，以及彩色的控制台摘要。

pub mod console;
pub mod html;
pub mod json;
pub mod markdown;

// Re-export common reporting functions
pub use console::{print_runner_outcome, print_summary};
pub use html::generate_html_report;
pub use json::generate_json_report;
pub use markdown::{ReportContext, render_markdown};
