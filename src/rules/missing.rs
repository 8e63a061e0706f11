//! Missing translation key detection rule.
//!
//! A key is missing from a locale when sources use it but the locale file
//! does not define it. Keys defined with an empty translation count as
//! present; they are waiting for a translator.

use std::collections::BTreeSet;

use anyhow::Result;

use crate::{
    core::{BuildContext, Key, Translation, parsers::locale_file::LocaleFile},
    issues::MissingKeysIssue,
};

pub fn check_missing_keys_issues(ctx: &BuildContext) -> Vec<MissingKeysIssue> {
    check_missing_keys(ctx.used_keys(), ctx.locale_files())
}

/// One issue per locale that lacks at least one used key.
pub fn check_missing_keys(
    used_keys: &BTreeSet<Key>,
    locale_files: &[LocaleFile],
) -> Vec<MissingKeysIssue> {
    locale_files
        .iter()
        .filter_map(|file| {
            let keys: Vec<Key> = used_keys
                .iter()
                .filter(|key| !file.data.translations.contains_key(*key))
                .cloned()
                .collect();
            (!keys.is_empty()).then(|| MissingKeysIssue {
                locale: file.data.locale.clone(),
                file_path: file.path.display().to_string(),
                keys,
            })
        })
        .collect()
}

/// Add every missing key with an empty translation and save the affected
/// locale files, keeping each file's indentation. Returns the number of keys
/// added.
pub fn add_missing_keys(locale_files: &[LocaleFile], issues: &[MissingKeysIssue]) -> Result<usize> {
    let mut added = 0;
    for issue in issues {
        let Some(file) = locale_files.iter().find(|f| f.data.locale == issue.locale) else {
            continue;
        };
        let mut file = file.clone();
        for key in &issue.keys {
            if !file.data.translations.contains_key(key) {
                file.data
                    .translations
                    .insert(key.clone(), Translation::text(""));
                added += 1;
            }
        }
        file.save()?;
    }
    Ok(added)
}
