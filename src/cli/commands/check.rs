use anyhow::Result;

use super::super::args::CheckCommand;
use super::{CommandResult, CommandSummary, helper::finish};
use crate::{
    core::BuildContext,
    issues::Issue,
    rules::{
        check_missing_keys_issues, check_plural_fallbacks_issues, check_unused_keys_issues,
    },
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = BuildContext::new(&cmd.common)?;

    let sources = ctx.sources();
    let mut all_issues: Vec<Issue> = Vec::new();
    all_issues.extend(sources.key_errors.iter().cloned().map(Issue::MultilineKey));
    all_issues.extend(sources.parse_errors.iter().cloned().map(Issue::ParseError));
    all_issues.extend(
        check_plural_fallbacks_issues(&ctx)
            .into_iter()
            .map(Issue::PluralFallback),
    );
    all_issues.extend(
        check_missing_keys_issues(&ctx)
            .into_iter()
            .map(Issue::MissingKeys),
    );
    all_issues.extend(
        check_unused_keys_issues(&ctx)
            .into_iter()
            .map(Issue::UnusedKeys),
    );

    Ok(finish(
        CommandSummary::Check,
        all_issues,
        ctx.files.len(),
        ctx.locale_files().len(),
        false,
    ))
}
