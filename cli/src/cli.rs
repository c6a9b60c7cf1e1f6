use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tgops", about = "Terragrunt stack ops: plan, apply, report")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a detailed-exitcode plan for the provided stack.
    Plan(PlanArgs),
    /// Apply the terragrunt stack at the provided path.
    Apply(ApplyArgs),
    /// Parse a plan log and render a summary to post as a GitHub PR comment.
    #[command(name = "plan-github-pr-comment")]
    PlanGithubPrComment(ReportArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct PlanArgs {
    /// Path to the terragrunt stack main directory.
    #[arg(long, env = "TGOPS_STACK_ROOT")]
    pub stack_root: Option<PathBuf>,

    /// Path to write plan + show output and the exit marker to.
    #[arg(long, env = "TGOPS_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ApplyArgs {
    /// Path to the terragrunt stack main directory.
    #[arg(long, env = "TGOPS_STACK_ROOT")]
    pub stack_root: Option<PathBuf>,

    /// If set, pass --non-interactive to the stack runner.
    #[arg(long, env = "TGOPS_NON_INTERACTIVE")]
    pub non_interactive: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ReportArgs {
    /// Path to the generated plan log file.
    #[arg(long, env = "TGOPS_LOG_FILE")]
    pub log_file: PathBuf,

    /// Where to write the generated summary.
    #[arg(long)]
    pub output: PathBuf,
}
