use tgops_core::config::AppConfig;
use tgops_core::error::CliError;
use tgops_core::runner::StackRunner;

use super::resolve_stack_root;
use crate::cli::ApplyArgs;

/// Apply streams live and propagates the child's exit code verbatim.
pub async fn run(args: ApplyArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let stack_root = resolve_stack_root(args.stack_root, cfg)?;
    let non_interactive = args.non_interactive || cfg.runner.non_interactive;

    let runner = StackRunner::new(stack_root).with_bin(&cfg.runner.terragrunt_bin);
    let result = runner.apply(non_interactive).await?;
    Ok(result.code)
}
