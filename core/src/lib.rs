//! Core logic for `tgops`, a thin wrapper around the terragrunt stack
//! runner: live process streaming with an optional log-file tee, plan-log
//! summarization, and PR-comment report rendering.

pub mod config;
pub mod error;
pub mod report;
pub mod runner;
pub mod summary;

pub use error::{CliError, ReportError, RunnerError};
pub use runner::{run_live, CommandResult, RunLiveArgs, StackRunner};
pub use summary::{summarize_unit_logs, ChangeState, StackDiffs};
