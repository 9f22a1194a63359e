//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for testdox-report,
//! namely process execution with output capture and file system helpers.
//!
//! 此模块为 testdox-report 提供基础设施服务，
//! 即带输出捕获的进程执行和文件系统辅助函数。

pub mod command;
pub mod fs;
