use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::RunnerError;

use super::io_pump::{self, LineTap};

const LINE_CHANNEL_CAPACITY: usize = 256;

/// Outcome of a streamed child process run. Immutable once the child exits.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunLiveArgs {
    pub cmd: String,
    pub args: Vec<String>,
    /// Tee every output line (both streams) into this file, appending.
    pub log_file: Option<PathBuf>,
    pub cwd: Option<PathBuf>,
    /// Suppress echoing to the parent's stdout/stderr.
    pub quiet: bool,
}

/// Execute a command, streaming its output live.
///
/// Both streams are drained concurrently; draining them one after the
/// other can deadlock once the child fills the un-read pipe's buffer.
/// Line writes to the log file funnel through a single writer task, so
/// lines from the two streams never interleave mid-line.
pub async fn run_live(args: RunLiveArgs) -> Result<CommandResult, RunnerError> {
    let mut cmd = tokio::process::Command::new(&args.cmd);
    cmd.args(&args.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(cwd) = &args.cwd {
        cmd.current_dir(cwd);
    }

    let mut child = cmd.spawn().map_err(|e| RunnerError::Spawn(e.to_string()))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| RunnerError::Spawn("no stdout".into()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| RunnerError::Spawn("no stderr".into()))?;

    let log = match &args.log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(RunnerError::LogFile)?;
            }
            let file = tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .await
                .map_err(RunnerError::LogFile)?;
            Some(file)
        }
        None => None,
    };

    let (line_tx, line_rx) = mpsc::channel::<LineTap>(LINE_CHANNEL_CAPACITY);
    let out_task = io_pump::pump_stdout(stdout, line_tx.clone(), args.quiet);
    let err_task = io_pump::pump_stderr(stderr, line_tx, args.quiet);
    let writer_task = spawn_log_writer(line_rx, log);

    let status = child.wait().await.map_err(RunnerError::Wait)?;

    let stdout_text = join_pump(out_task, "stdout").await?;
    let stderr_text = join_pump(err_task, "stderr").await?;
    writer_task
        .await
        .map_err(|e| RunnerError::Task(e.to_string()))??;

    Ok(CommandResult {
        code: status.code().unwrap_or(-1),
        stdout: stdout_text,
        stderr: stderr_text,
    })
}

/// Single consumer for both pumps. Each line is appended and flushed as a
/// unit; the channel closes once both pump senders drop.
fn spawn_log_writer(
    mut rx: mpsc::Receiver<LineTap>,
    mut log: Option<tokio::fs::File>,
) -> JoinHandle<Result<(), RunnerError>> {
    tokio::spawn(async move {
        while let Some(tap) = rx.recv().await {
            if let Some(file) = log.as_mut() {
                file.write_all(tap.line.as_bytes())
                    .await
                    .map_err(RunnerError::LogFile)?;
                file.write_all(b"\n").await.map_err(RunnerError::LogFile)?;
                file.flush().await.map_err(RunnerError::LogFile)?;
            }
        }
        Ok(())
    })
}

async fn join_pump(
    task: JoinHandle<Result<String, RunnerError>>,
    label: &'static str,
) -> Result<String, RunnerError> {
    task.await
        .map_err(|e| RunnerError::Task(format!("{label} pump: {e}")))?
}
