use owo_colors::OwoColorize;

use tgops_core::config::AppConfig;
use tgops_core::error::CliError;
use tgops_core::runner::StackRunner;

use super::resolve_stack_root;
use crate::cli::PlanArgs;

pub async fn run(args: PlanArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let stack_root = resolve_stack_root(args.stack_root, cfg)?;
    let log_file = args
        .log_file
        .or_else(|| cfg.runner.log_file.clone().map(Into::into));

    let runner = StackRunner::new(stack_root).with_bin(&cfg.runner.terragrunt_bin);
    let result = runner.plan(log_file.as_deref()).await?;

    match result.code {
        0 => {
            println!("✅ {}", "Plan is clean: no changes.".green());
            Ok(0)
        }
        2 => {
            println!(
                "⚠️ {}",
                "Plan indicates pending changes. See logs if enabled.".yellow()
            );
            Ok(0)
        }
        _ => {
            // Without a log there is nowhere else to look the error up.
            if log_file.is_none() && !result.stderr.is_empty() {
                eprint!("{}", result.stderr);
            }
            eprintln!(
                "❌ {}",
                "Terragrunt plan failed. Check the output above or logs.".red()
            );
            Ok(1)
        }
    }
}
