use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("runner failed: {0}")]
    Runner(#[from] RunnerError),
    #[error("{0}")]
    Report(#[from] ReportError),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("spawn failed: {0}")]
    Spawn(String),
    #[error("stream io error: {stream} {source}")]
    StreamIo {
        stream: &'static str,
        source: std::io::Error,
    },
    #[error("log file error: {0}")]
    LogFile(#[source] std::io::Error),
    #[error("wait failed: {0}")]
    Wait(#[source] std::io::Error),
    #[error("task join failed: {0}")]
    Task(String),
}

/// Errors surfaced by the PR-comment report command. These map to a
/// user-facing parameter error (exit code 1) at the CLI layer.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("log file not found: {}", .0.display())]
    LogNotFound(PathBuf),
    #[error("log file missing terragrunt-exit-code marker")]
    MissingExitMarker,
    #[error("unexpected exit code marker in log file: {0}")]
    UnknownExitCode(i32),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
