//! # Command Execution Module / 命令执行模块
//!
//! Spawns a child process and captures its standard output and standard error.
//! Both streams are drained concurrently so neither pipe can fill up and stall
//! the child, then returned as stdout followed by stderr.
//!
//! 派生子进程并捕获其标准输出和标准错误。
//! 两个流被并发读取，避免任一管道写满而阻塞子进程，
//! 最后按先 stdout 后 stderr 的顺序返回。

use colored::*;
use rust_i18n::t;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// How long pipe readers may keep draining once the child has exited or was killed.
const READER_GRACE_PERIOD: Duration = Duration::from_secs(2);

/// How a captured process came to an end.
/// 被捕获的进程的结束方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The process exited on its own. `None` when it was terminated by a signal.
    /// 进程自行退出。被信号终止时为 `None`。
    Exited(Option<i32>),
    /// The process was killed after exceeding its timeout.
    /// 进程因超时被终止。
    TimedOut,
    /// The process was killed because the run was cancelled (Ctrl-C).
    /// 进程因运行被取消（Ctrl-C）而被终止。
    Cancelled,
}

impl ProcessOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessOutcome::Exited(Some(0)))
    }

    fn from_status(status: std::io::Result<ExitStatus>) -> Self {
        ProcessOutcome::Exited(status.ok().and_then(|s| s.code()))
    }
}

/// Everything captured from one process run.
/// 一次进程运行捕获到的全部内容。
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub outcome: ProcessOutcome,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl CapturedOutput {
    /// Standard output followed by standard error, as one text blob.
    /// 标准输出后接标准错误，合并为一段文本。
    pub fn combined(&self) -> String {
        let mut combined = String::with_capacity(self.stdout.len() + self.stderr.len());
        combined.push_str(&self.stdout);
        combined.push_str(&self.stderr);
        combined
    }
}

/// Spawns a command and captures its stdout and stderr.
///
/// A non-zero exit status is not an error: it is reported through
/// [`ProcessOutcome`]. When `timeout` elapses or `cancel` fires, the child is
/// killed and whatever it printed until then is still returned.
///
/// # Errors
/// Returns an error only when the process cannot be spawned or its pipes
/// cannot be attached.
///
/// 派生一个命令并捕获其 stdout 和 stderr。
///
/// 非零退出状态不是错误：它通过 [`ProcessOutcome`] 报告。
/// 当 `timeout` 到期或 `cancel` 触发时，子进程会被终止，
/// 但在此之前它输出的内容仍会被返回。
///
/// # Errors
/// 仅当进程无法派生或无法连接其管道时才返回错误。
pub async fn spawn_and_capture(
    mut cmd: Command,
    timeout: Option<Duration>,
    cancel: CancellationToken,
) -> std::io::Result<CapturedOutput> {
    let start_time = Instant::now();

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| std::io::Error::other(t!("capture_stdout_failed").to_string()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| std::io::Error::other(t!("capture_stderr_failed").to_string()))?;

    // Use shared buffers so bytes read before a kill survive an aborted reader.
    // 使用共享缓冲区，使终止前已读取的字节在读取任务被中止后仍然保留。
    let stdout_buf = Arc::new(Mutex::new(Vec::new()));
    let stderr_buf = Arc::new(Mutex::new(Vec::new()));
    let stdout_handle = tokio::spawn(drain_into(stdout, Arc::clone(&stdout_buf)));
    let stderr_handle = tokio::spawn(drain_into(stderr, Arc::clone(&stderr_buf)));

    let deadline = async {
        match timeout {
            Some(duration) => tokio::time::sleep(duration).await,
            None => std::future::pending::<()>().await,
        }
    };

    let outcome = tokio::select! {
        status = child.wait() => ProcessOutcome::from_status(status),
        _ = deadline => ProcessOutcome::TimedOut,
        _ = cancel.cancelled() => ProcessOutcome::Cancelled,
    };

    if !matches!(outcome, ProcessOutcome::Exited(_)) {
        let _ = child.kill().await;
    }

    // Background processes started by the child may inherit the pipes and
    // keep them open after it is gone, so the readers only get a grace period.
    tokio::join!(
        finish_reader(stdout_handle, READER_GRACE_PERIOD),
        finish_reader(stderr_handle, READER_GRACE_PERIOD),
    );

    let stdout = String::from_utf8_lossy(&stdout_buf.lock().await).into_owned();
    let stderr = String::from_utf8_lossy(&stderr_buf.lock().await).into_owned();

    Ok(CapturedOutput {
        outcome,
        stdout,
        stderr,
        duration: start_time.elapsed(),
    })
}

/// Copies a stream into a shared buffer until EOF or the first I/O error.
async fn drain_into<R: AsyncRead + Unpin>(mut reader: R, buf: Arc<Mutex<Vec<u8>>>) {
    let mut chunk = [0u8; 8192];
    loop {
        match reader.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.lock().await.extend_from_slice(&chunk[..n]),
        }
    }
}

async fn finish_reader(mut handle: JoinHandle<()>, grace: Duration) {
    match tokio::time::timeout(grace, &mut handle).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => eprintln!("{}", t!("join_reader_failed", error = e).yellow()),
        Err(_) => handle.abort(),
    }
}
