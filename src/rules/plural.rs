//! Plural tables without a `*` entry.
//!
//! A count that matches no tag in such a table renders as empty text.

use crate::{
    core::{BuildContext, Translation, parsers::locale_file::LocaleFile},
    issues::PluralFallbackIssue,
};

pub fn check_plural_fallbacks_issues(ctx: &BuildContext) -> Vec<PluralFallbackIssue> {
    check_plural_fallbacks(ctx.locale_files())
}

pub fn check_plural_fallbacks(locale_files: &[LocaleFile]) -> Vec<PluralFallbackIssue> {
    locale_files
        .iter()
        .flat_map(|file| {
            file.data
                .translations
                .iter()
                .filter(|(_, tr)| matches!(tr, Translation::Plural(p) if p.missing_fallback()))
                .map(|(key, _)| PluralFallbackIssue {
                    locale: file.data.locale.clone(),
                    file_path: file.path.display().to_string(),
                    key: key.clone(),
                })
        })
        .collect()
}
