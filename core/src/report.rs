//! GitHub PR comment rendering for plan summaries.

use std::fmt::Write;

use crate::summary::{ChangeState, StackDiffs};

/// Render the PR comment body for a plan outcome. Pure: clean and error
/// states map to a flat message; a changed state lists stable units and
/// folds each changed unit's lines into a collapsible diff block.
pub fn render_pr_comment(state: ChangeState, diffs: Option<&StackDiffs>) -> String {
    match state {
        ChangeState::NoChanges => "No changes detected.\n".to_string(),
        ChangeState::HasError => "Errors found. See logs.\n".to_string(),
        ChangeState::HasChanges => render_changes(diffs),
    }
}

fn render_changes(diffs: Option<&StackDiffs>) -> String {
    let mut out = String::new();

    out.push_str("Unchanged units:\n\n");
    match diffs.filter(|d| !d.stable.is_empty()) {
        Some(d) => {
            for unit in &d.stable {
                let _ = writeln!(out, "- `{unit}`");
            }
        }
        None => out.push_str("None\n"),
    }

    out.push_str("\nChanged units:\n\n");
    match diffs.filter(|d| !d.diffs.is_empty()) {
        Some(d) => {
            for (unit, lines) in &d.diffs {
                let _ = writeln!(out, "- `{unit}`");
                out.push('\n');
                let _ = writeln!(out, "<details>");
                let _ = writeln!(out, "<summary>Changes to {unit}</summary>");
                out.push('\n');
                out.push_str("```diff\n");
                for line in lines {
                    let _ = writeln!(out, "{line}");
                }
                out.push_str("```\n");
                out.push('\n');
                let _ = writeln!(out, "</details>");
                out.push('\n');
            }
        }
        None => out.push_str("None\n"),
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_state_is_flat_message() {
        assert_eq!(
            render_pr_comment(ChangeState::NoChanges, None),
            "No changes detected.\n"
        );
    }

    #[test]
    fn error_state_is_flat_message() {
        assert_eq!(
            render_pr_comment(ChangeState::HasError, None),
            "Errors found. See logs.\n"
        );
    }

    #[test]
    fn changes_without_summary_render_none_placeholders() {
        let body = render_pr_comment(ChangeState::HasChanges, None);
        assert_eq!(
            body,
            "Unchanged units:\n\nNone\n\nChanged units:\n\nNone\n"
        );
    }

    #[test]
    fn changes_render_stable_list_and_collapsible_diffs() {
        let mut diffs = IndexMap::new();
        diffs.insert(
            "unit-b".to_string(),
            vec!["! update resource \"x\"".to_string()],
        );
        let summary = StackDiffs {
            stable: vec!["unit-a".to_string()],
            diffs,
        };

        let body = render_pr_comment(ChangeState::HasChanges, Some(&summary));

        assert!(body.contains("Unchanged units:\n\n- `unit-a`\n"));
        assert!(body.contains("- `unit-b`"));
        assert!(body.contains("<summary>Changes to unit-b</summary>"));
        assert!(body.contains("```diff\n! update resource \"x\"\n```"));
        assert!(body.contains("</details>"));
    }
}
