use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::RunnerError;
use crate::summary::EXIT_MARKER_PREFIX;

use super::live::{run_live, CommandResult, RunLiveArgs};

/// Drives the terragrunt stack runner for one stack root.
pub struct StackRunner {
    bin: String,
    stack_root: PathBuf,
}

impl StackRunner {
    pub fn new(stack_root: impl Into<PathBuf>) -> Self {
        Self {
            bin: "terragrunt".to_string(),
            stack_root: stack_root.into(),
        }
    }

    /// Override the runner binary name or path.
    pub fn with_bin(mut self, bin: impl Into<String>) -> Self {
        self.bin = bin.into();
        self
    }

    fn working_dir_arg(&self) -> String {
        format!("--working-dir={}", self.stack_root.display())
    }

    /// Run a detailed-exitcode plan, streaming output and teeing it into
    /// `log_file` when given. With a log file and a non-error exit, the
    /// saved plan is rendered into the same log via `show` (quiet, to
    /// avoid duplicate console lines) and the exit-code sentinel is
    /// appended once, last.
    pub async fn plan(&self, log_file: Option<&Path>) -> Result<CommandResult, RunnerError> {
        if let Some(path) = log_file {
            if path.exists() {
                tokio::fs::remove_file(path)
                    .await
                    .map_err(RunnerError::LogFile)?;
            }
        }

        let plan_args = vec![
            self.working_dir_arg(),
            "stack".into(),
            "run".into(),
            "--".into(),
            "plan".into(),
            "-detailed-exitcode".into(),
            "-out=tofu.plan".into(),
        ];
        debug!(bin = %self.bin, ?plan_args, "running plan");

        let result = run_live(RunLiveArgs {
            cmd: self.bin.clone(),
            args: plan_args,
            log_file: log_file.map(Path::to_path_buf),
            ..Default::default()
        })
        .await?;

        if let Some(path) = log_file {
            if result.code != 1 {
                let show_args = vec![
                    "--no-color".into(),
                    self.working_dir_arg(),
                    "stack".into(),
                    "run".into(),
                    "--".into(),
                    "show".into(),
                    "tofu.plan".into(),
                ];
                run_live(RunLiveArgs {
                    cmd: self.bin.clone(),
                    args: show_args,
                    log_file: Some(path.to_path_buf()),
                    quiet: true,
                    ..Default::default()
                })
                .await?;
                write_exit_marker(path, result.code).await?;
            }
        }

        Ok(result)
    }

    /// Apply the stack, streaming output. No log tee.
    pub async fn apply(&self, non_interactive: bool) -> Result<CommandResult, RunnerError> {
        let mut args = vec![self.working_dir_arg()];
        if non_interactive {
            args.push("--non-interactive".into());
        }
        args.extend(["stack".into(), "run".into(), "--".into(), "apply".into()]);
        debug!(bin = %self.bin, ?args, "running apply");

        run_live(RunLiveArgs {
            cmd: self.bin.clone(),
            args,
            ..Default::default()
        })
        .await
    }
}

/// Append the sentinel line recording the plan's exit code. Written once,
/// after all plan and show output.
async fn write_exit_marker(path: &Path, code: i32) -> Result<(), RunnerError> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(RunnerError::LogFile)?;
    file.write_all(format!("{EXIT_MARKER_PREFIX}{code}\n").as_bytes())
        .await
        .map_err(RunnerError::LogFile)?;
    file.flush().await.map_err(RunnerError::LogFile)?;
    Ok(())
}
