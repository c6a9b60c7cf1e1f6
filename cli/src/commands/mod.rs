use std::path::PathBuf;

use tgops_core::config::AppConfig;
use tgops_core::error::CliError;

pub mod apply;
pub mod plan;
pub mod report;

fn resolve_stack_root(flag: Option<PathBuf>, cfg: &AppConfig) -> Result<PathBuf, CliError> {
    flag.or_else(|| cfg.runner.stack_root.clone().map(Into::into))
        .ok_or_else(|| {
            CliError::Config(
                "stack root not set (use --stack-root, TGOPS_STACK_ROOT, or config)".to_string(),
            )
        })
}
