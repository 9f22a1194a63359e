//! # File System Operations Module / 文件系统操作模块
//!
//! Helpers for resolving user-supplied paths and writing report artifacts.
//!
//! 用于解析用户提供的路径以及写入报告产物的辅助函数。

use anyhow::{Context, Result};
use rust_i18n::t;
use std::fs;
use std::path::{Path, PathBuf};

/// Expands `~` and environment variables in a path string.
///
/// # Arguments
/// * `raw` - Path as written in the config file or on the command line
///
/// # Returns
/// The expanded path, or an error if a referenced variable is not set
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .with_context(|| t!("path_expand_failed", path = raw).to_string())?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Writes `content` to `path`, replacing any previous file and creating
/// missing parent directories.
///
/// 将 `content` 写入 `path`，替换任何已有文件，并创建缺失的父目录。
pub fn write_artifact(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| t!("create_dir_failed", path = parent.display()).to_string())?;
    }
    fs::write(path, content)
        .with_context(|| t!("write_failed", path = path.display()).to_string())
}

/// Reads a previously saved runner log. Invalid UTF-8 is replaced rather than
/// rejected, matching how live output is captured.
pub fn read_runner_log(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| t!("input_read_failed", path = path.display()).to_string())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
