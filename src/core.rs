//! # Core Module / 核心模块
//!
//! This module contains the core functionality of testdox-report:
//! configuration, data models, the output parser and runner invocation.
//!
//! 此模块包含 testdox-report 的核心功能：
//! 配置、数据模型、输出解析器以及运行器调用。

pub mod config;
pub mod models;
pub mod parser;
pub mod runner;

// Re-exports
pub use config::ReportConfig;
pub use models::TestRunSummary;
pub use parser::parse;
