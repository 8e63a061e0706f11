use super::{CommandResult, CommandSummary};
use crate::issues::{Issue, Severity};

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    source_files_checked: usize,
    locale_files_checked: usize,
    fatal_errors: bool,
) -> CommandResult {
    issues.sort();

    let parse_error_count = issues
        .iter()
        .filter(|i| matches!(i, Issue::ParseError(_)))
        .count();

    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();

    CommandResult {
        summary,
        error_count,
        warning_count: issues.len() - error_count,
        fatal_errors,
        issues,
        parse_error_count,
        source_files_checked,
        locale_files_checked,
    }
}

/// Result of a command that reports no issues.
pub fn done(summary: CommandSummary) -> CommandResult {
    finish(summary, Vec::new(), 0, 0, false)
}
