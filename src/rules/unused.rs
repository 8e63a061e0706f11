//! Unused translation key detection rule.
//!
//! Detects keys a locale file defines that no source uses.

use std::collections::BTreeSet;

use crate::{
    core::{BuildContext, Key, parsers::locale_file::LocaleFile},
    issues::UnusedKeysIssue,
};

pub fn check_unused_keys_issues(ctx: &BuildContext) -> Vec<UnusedKeysIssue> {
    check_unused_keys(ctx.used_keys(), ctx.locale_files())
}

/// One issue per locale defining at least one unused key.
pub fn check_unused_keys(
    used_keys: &BTreeSet<Key>,
    locale_files: &[LocaleFile],
) -> Vec<UnusedKeysIssue> {
    locale_files
        .iter()
        .filter_map(|file| {
            let keys: Vec<Key> = file
                .data
                .translations
                .keys()
                .filter(|key| !used_keys.contains(*key))
                .cloned()
                .collect();
            (!keys.is_empty()).then(|| UnusedKeysIssue {
                locale: file.data.locale.clone(),
                file_path: file.path.display().to_string(),
                keys,
            })
        })
        .collect()
}
