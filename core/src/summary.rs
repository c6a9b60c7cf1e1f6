//! Plan-log summarization: extract per-unit tofu messages from a plan log,
//! classify units as stable or changed, and normalize changed lines for
//! diff-fenced rendering.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use tracing::warn;

use crate::error::ReportError;

/// Sentinel line prefix appended to a plan log after the run completes.
pub const EXIT_MARKER_PREFIX: &str = "terragrunt-exit-code=";

/// Path marker terragrunt prepends to generated unit directories.
const STACK_DIR_MARKER: &str = ".terragrunt-stack/";

static TOFU_REGEX: OnceLock<Regex> = OnceLock::new();

fn tofu_regex() -> &'static Regex {
    TOFU_REGEX.get_or_init(|| {
        Regex::new(r".*\[(?P<module>[^\]]+)\]\s+tofu:\s(?P<message>.*)")
            .expect("TOFU_REGEX is valid")
    })
}

/// Three-way plan outcome, following terragrunt's detailed exit codes:
/// 0 clean, 2 changes pending, anything else an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeState {
    NoChanges,
    HasChanges,
    HasError,
}

/// Per-unit diff summary extracted from a plan log. A unit appears either
/// in `stable` or as a `diffs` key, never both; both collections keep
/// first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StackDiffs {
    pub stable: Vec<String>,
    pub diffs: IndexMap<String, Vec<String>>,
}

/// Adjust diff markers to suit fenced diff blocks: a leading `~` (after
/// whitespace) becomes `!` in place; `+` and `-` already render, so those
/// lines pass through untouched.
fn normalize_diff_line(line: &str) -> String {
    let stripped = line.trim_start();
    if let Some(rest) = stripped.strip_prefix('~') {
        let ws = &line[..line.len() - stripped.len()];
        return format!("{ws}!{rest}");
    }
    line.to_string()
}

/// Group tofu messages by unit from a plan log file. Lines that don't
/// match the tofu pattern are skipped; a matching unit keeps its messages
/// in file order, undeduplicated.
fn collect_unit_entries(log_file: &Path) -> std::io::Result<IndexMap<String, Vec<String>>> {
    let mut entries: IndexMap<String, Vec<String>> = IndexMap::new();
    let reader = BufReader::new(File::open(log_file)?);
    for line in reader.lines() {
        let line = line?;
        let Some(caps) = tofu_regex().captures(&line) else {
            continue;
        };
        let unit = caps["module"].replace(STACK_DIR_MARKER, "");
        entries
            .entry(unit)
            .or_default()
            .push(caps["message"].to_string());
    }
    Ok(entries)
}

/// Produce a unit-by-unit summary from a plan log file, or `None` when the
/// file does not exist (no summary available, not an error).
///
/// A unit counts as stable when any of its messages starts with
/// "no changes" (case-insensitive, leading whitespace ignored), even if
/// other messages describe real changes.
pub fn summarize_unit_logs(log_file: &Path) -> std::io::Result<Option<StackDiffs>> {
    if !log_file.exists() {
        warn!(path = %log_file.display(), "log file missing");
        return Ok(None);
    }

    let grouped = collect_unit_entries(log_file)?;
    let mut summary = StackDiffs::default();

    for (unit, msgs) in grouped {
        if msgs
            .iter()
            .any(|m| m.trim_start().to_lowercase().starts_with("no changes"))
        {
            summary.stable.push(unit);
        } else {
            summary
                .diffs
                .insert(unit, msgs.iter().map(|m| normalize_diff_line(m)).collect());
        }
    }

    Ok(Some(summary))
}

/// Locate the exit-code sentinel line and map it to a [`ChangeState`].
///
/// The sentinel must be matched as a whole line, not a substring: a code
/// of 10 must not read as 1. A missing sentinel or a code outside the
/// 0/1/2 convention is a malformed log.
pub fn parse_exit_marker(content: &str) -> Result<ChangeState, ReportError> {
    let code = content
        .lines()
        .find_map(|l| l.trim().strip_prefix(EXIT_MARKER_PREFIX))
        .ok_or(ReportError::MissingExitMarker)?;
    let code: i32 = code
        .trim()
        .parse()
        .map_err(|_| ReportError::MissingExitMarker)?;
    match code {
        0 => Ok(ChangeState::NoChanges),
        1 => Ok(ChangeState::HasError),
        2 => Ok(ChangeState::HasChanges),
        other => Err(ReportError::UnknownExitCode(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_log(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file
    }

    #[test]
    fn normalizes_tilde_in_place() {
        assert_eq!(normalize_diff_line("~ update"), "! update");
        assert_eq!(normalize_diff_line("  ~ update"), "  ! update");
        assert_eq!(normalize_diff_line("+ add"), "+ add");
        assert_eq!(normalize_diff_line("- drop"), "- drop");
        assert_eq!(normalize_diff_line("plain text"), "plain text");
    }

    #[test]
    fn groups_and_classifies_units() {
        let log = write_log(&[
            "12:00:01 [.terragrunt-stack/unit-a] tofu: No changes. Infrastructure is up-to-date.",
            "12:00:02 [.terragrunt-stack/unit-b] tofu: ~ update resource \"x\"",
            "noise line without a module",
        ]);

        let summary = summarize_unit_logs(log.path()).unwrap().unwrap();
        assert_eq!(summary.stable, vec!["unit-a"]);
        assert_eq!(
            summary.diffs.get("unit-b").unwrap(),
            &vec!["! update resource \"x\"".to_string()]
        );
    }

    #[test]
    fn missing_log_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let summary = summarize_unit_logs(&dir.path().join("absent.log")).unwrap();
        assert!(summary.is_none());
    }

    #[test]
    fn no_matching_lines_yields_empty_summary() {
        let log = write_log(&["just noise", "more noise"]);
        let summary = summarize_unit_logs(log.path()).unwrap().unwrap();
        assert_eq!(summary, StackDiffs::default());
    }

    #[test]
    fn any_no_changes_message_wins_classification() {
        // First-match-wins: a unit mixing a no-changes message with a real
        // change line still counts as stable.
        let log = write_log(&[
            "[unit-c] tofu: no changes",
            "[unit-c] tofu: + add resource y",
        ]);
        let summary = summarize_unit_logs(log.path()).unwrap().unwrap();
        assert_eq!(summary.stable, vec!["unit-c"]);
        assert!(summary.diffs.is_empty());
    }

    #[test]
    fn summarizing_twice_is_idempotent() {
        let log = write_log(&[
            "[unit-a] tofu: No changes.",
            "[unit-b] tofu: ~ update resource \"x\"",
            "[unit-b] tofu: + add resource \"y\"",
        ]);
        let first = summarize_unit_logs(log.path()).unwrap().unwrap();
        let second = summarize_unit_logs(log.path()).unwrap().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn parses_exit_marker_as_whole_line() {
        assert_eq!(
            parse_exit_marker("line\nterragrunt-exit-code=0\n").unwrap(),
            ChangeState::NoChanges
        );
        assert_eq!(
            parse_exit_marker("terragrunt-exit-code=2\n").unwrap(),
            ChangeState::HasChanges
        );
        assert_eq!(
            parse_exit_marker("terragrunt-exit-code=1\n").unwrap(),
            ChangeState::HasError
        );
        assert!(matches!(
            parse_exit_marker("no marker here\n"),
            Err(ReportError::MissingExitMarker)
        ));
        assert!(matches!(
            parse_exit_marker("terragrunt-exit-code=10\n"),
            Err(ReportError::UnknownExitCode(10))
        ));
    }
}
