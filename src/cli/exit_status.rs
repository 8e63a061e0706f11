use std::process::ExitCode;

use super::commands::CommandResult;

/// Exit status for CLI commands, following common conventions for linter tools.
///
/// - `Success` (0): Command completed successfully, no issues found
/// - `Failure` (1): Command completed but found issues (errors/warnings)
/// - `Error` (2): Command failed due to internal error (parse error, config error, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed successfully, no issues found.
    Success,
    /// Command completed but found issues (errors/warnings).
    Failure,
    /// Command failed due to internal error (parse error, config error, etc.).
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

impl From<&CommandResult> for ExitStatus {
    fn from(result: &CommandResult) -> Self {
        if result.error_count == 0 {
            ExitStatus::Success
        } else if result.fatal_errors {
            ExitStatus::Error
        } else {
            ExitStatus::Failure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::{CommandSummary, helper::finish};
    use crate::issues::{Issue, MissingKeysIssue, ParseErrorIssue};

    #[test]
    fn exit_code_values() {
        assert_eq!(ExitCode::from(ExitStatus::Success), ExitCode::from(0));
        assert_eq!(ExitCode::from(ExitStatus::Failure), ExitCode::from(1));
        assert_eq!(ExitCode::from(ExitStatus::Error), ExitCode::from(2));
    }

    fn parse_error() -> Issue {
        Issue::ParseError(ParseErrorIssue {
            file_path: "src/a.ts".to_string(),
            error: "Unexpected token".to_string(),
        })
    }

    #[test]
    fn status_from_result() {
        let warning = Issue::MissingKeys(MissingKeysIssue {
            locale: "nl".to_string(),
            file_path: "i18n/nl.json".to_string(),
            keys: vec!["Hi".to_string()],
        });

        let clean = finish(CommandSummary::Check, vec![warning], 1, 1, false);
        assert_eq!(ExitStatus::from(&clean), ExitStatus::Success);

        let failed = finish(CommandSummary::Check, vec![parse_error()], 1, 1, false);
        assert_eq!(ExitStatus::from(&failed), ExitStatus::Failure);

        let aborted = finish(CommandSummary::Check, vec![parse_error()], 1, 1, true);
        assert_eq!(ExitStatus::from(&aborted), ExitStatus::Error);
    }
}
