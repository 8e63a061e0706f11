//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format. Kept apart from the engine
//! so the library can be used without any terminal output.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    BakeSummary, CommandResult, CommandSummary, InitSummary, ResolveSummary, TransformSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(source_files: usize, locale_files: usize) {
    print_success_to(source_files, locale_files, &mut io::stdout().lock());
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(source_files: usize, locale_files: usize, writer: &mut W) {
    let plural = |n: usize| if n == 1 { "file" } else { "files" };
    let text = if source_files == 0 {
        format!(
            "Checked {} locale {} - no issues found",
            locale_files,
            plural(locale_files)
        )
    } else {
        format!(
            "Checked {} source {}, {} locale {} - no issues found",
            source_files,
            plural(source_files),
            locale_files,
            plural(locale_files)
        )
    };
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), text.green());
}

/// Print a warning about files that could not be parsed.
pub fn print_parse_warning(count: usize, verbose: bool) {
    print_parse_warning_to(count, verbose, &mut io::stderr().lock());
}

/// Print a parse warning to a custom writer.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

pub fn print(result: &CommandResult, verbose: bool) {
    let mut stdout = io::stdout().lock();
    print_to(result, &mut stdout);
    print_parse_warning(result.parse_error_count, verbose);
}

/// Print the whole command output to a custom writer.
pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    report_to(&result.issues, writer);

    match &result.summary {
        CommandSummary::Check => {
            if result.issues.is_empty() {
                print_success_to(
                    result.source_files_checked,
                    result.locale_files_checked,
                    writer,
                );
            }
        }
        CommandSummary::Transform(summary) => {
            if result.error_count == 0 {
                print_transform(summary, writer);
            }
        }
        CommandSummary::Bake(summary) => print_bake(summary, writer),
        CommandSummary::Resolve(summary) => print_resolve(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::Source(ctx) => {
            let (line, col, source_line) = (ctx.line(), ctx.col(), ctx.source_line.as_str());
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                ctx.file_path(),
                line,
                col
            );

            let caret_char = match severity {
                Severity::Error => "^".red(),
                Severity::Warning => "^".yellow(),
            };
            let _ = writeln!(
                writer,
                "{:>width$} {}",
                "",
                "|".blue(),
                width = max_line_width
            );
            let _ = writeln!(
                writer,
                "{:>width$} {} {}",
                line.to_string().blue(),
                "|".blue(),
                source_line,
                width = max_line_width
            );

            // col is 1-based
            let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
            let caret_padding = UnicodeWidthStr::width(prefix.as_str());
            let _ = writeln!(
                writer,
                "{:>width$} {} {:>padding$}{}",
                "",
                "|".blue(),
                "",
                caret_char,
                width = max_line_width,
                padding = caret_padding
            );
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    if !issues.is_empty() {
        let _ = writeln!(
            writer,
            "{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            issues.len(),
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

fn print_transform<W: Write>(summary: &TransformSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Rewrote {} template(s) in {} file(s), copied {} file(s) to {}",
            summary.templates,
            summary.rewritten_files,
            summary.copied_files,
            summary.out_dir.display()
        )
        .green()
    );
    if summary.added_keys > 0 {
        let _ = writeln!(
            writer,
            "  - added {} missing key(s) to locale files",
            summary.added_keys
        );
    }
}

fn print_bake<W: Write>(summary: &BakeSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Baked {} locale(s) ({}) into {}: {} localized, {} copied file(s) each",
            summary.locales.len(),
            summary.locales.join(", "),
            summary.out_dir.display(),
            summary.substituted_files,
            summary.copied_files
        )
        .green()
    );
}

fn print_resolve<W: Write>(summary: &ResolveSummary, writer: &mut W) {
    let _ = writeln!(writer, "{}", summary.text);
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}
