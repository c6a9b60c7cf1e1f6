use tracing::debug;

use tgops_core::error::{CliError, ReportError};
use tgops_core::report::render_pr_comment;
use tgops_core::summary::{parse_exit_marker, summarize_unit_logs};

use crate::cli::ReportArgs;

pub fn run(args: ReportArgs) -> Result<i32, CliError> {
    if !args.log_file.exists() {
        return Err(ReportError::LogNotFound(args.log_file).into());
    }

    let content = std::fs::read_to_string(&args.log_file).map_err(ReportError::Io)?;
    let state = parse_exit_marker(&content)?;
    debug!(?state, "parsed exit marker");
    let diffs = summarize_unit_logs(&args.log_file).map_err(ReportError::Io)?;

    let rendered = render_pr_comment(state, diffs.as_ref());
    std::fs::write(&args.output, rendered).map_err(ReportError::Io)?;
    println!("Wrote GitHub PR comment format to {}", args.output.display());
    Ok(0)
}
