use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};

use super::super::args::BakeCommand;
use super::{BakeSummary, CommandResult, CommandSummary, helper::finish};
use crate::{
    core::{
        BuildContext, Key, Locale,
        file_scanner::{is_script_file, walk_bundle},
        marker_keys, substitute_locales,
    },
    issues::Issue,
    rules::{add_missing_keys, check_missing_keys, check_unused_keys},
};

/// Where one bundle file goes.
enum Target {
    /// Localized: written once per locale, under `<prefix><locale>/<rest>`.
    Localized { prefix: PathBuf, rest: PathBuf },
    /// Outside the assets directory: copied once, unchanged.
    Shared(PathBuf),
}

fn target_for(relative: &Path, assets_dir: Option<&str>) -> Target {
    match assets_dir {
        None => Target::Localized {
            prefix: PathBuf::new(),
            rest: relative.to_path_buf(),
        },
        Some(assets) => match relative.strip_prefix(assets) {
            Ok(rest) => Target::Localized {
                prefix: PathBuf::from(assets),
                rest: rest.to_path_buf(),
            },
            Err(_) => Target::Shared(relative.to_path_buf()),
        },
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::copy(from, to)
        .with_context(|| format!("Failed to copy {} to {}", from.display(), to.display()))?;
    Ok(())
}

pub fn bake(cmd: BakeCommand) -> Result<CommandResult> {
    let ctx = BuildContext::new(&cmd.common)?;

    let locales: Vec<Locale> = if cmd.locale.is_empty() {
        ctx.config.locales.clone()
    } else {
        for locale in &cmd.locale {
            if !ctx.store().contains(locale) {
                bail!("Unknown locale {} (configured: {})", locale, ctx.config.locales.join(", "));
            }
        }
        cmd.locale.clone()
    };

    let files = walk_bundle(&cmd.bundle_dir)
        .with_context(|| format!("Failed to read bundle directory: {}", cmd.bundle_dir.display()))?;

    let assets_dir = ctx.config.assets_dir.as_deref();
    let mut used_keys: BTreeSet<Key> = BTreeSet::new();
    let mut substituted_files = 0;
    let mut copied_files = 0;

    for relative in &files {
        let source = cmd.bundle_dir.join(relative);
        match target_for(relative, assets_dir) {
            Target::Shared(path) => copy_file(&source, &cmd.out_dir.join(path))?,
            Target::Localized { prefix, rest } => {
                let target = |locale: &str| cmd.out_dir.join(&prefix).join(locale).join(&rest);
                if is_script_file(relative) {
                    let code = fs::read_to_string(&source)
                        .with_context(|| format!("Failed to read {}", source.display()))?;
                    used_keys.extend(
                        marker_keys(&code)
                            .with_context(|| format!("Malformed marker call in {}", source.display()))?,
                    );
                    let localized = substitute_locales(&code, &locales, ctx.store())
                        .with_context(|| format!("Malformed marker call in {}", source.display()))?;
                    for (locale, out) in localized {
                        write_file(&target(&locale), &out)?;
                    }
                    substituted_files += 1;
                    if ctx.verbose {
                        eprintln!("Localized {}", relative.display());
                    }
                } else {
                    for locale in &locales {
                        copy_file(&source, &target(locale))?;
                    }
                    copied_files += 1;
                }
            }
        }
    }

    let missing = check_missing_keys(&used_keys, ctx.locale_files());
    if ctx.config.add_missing {
        add_missing_keys(ctx.locale_files(), &missing)?;
    }

    let mut issues: Vec<Issue> = Vec::new();
    issues.extend(missing.into_iter().map(Issue::MissingKeys));
    issues.extend(
        check_unused_keys(&used_keys, ctx.locale_files())
            .into_iter()
            .map(Issue::UnusedKeys),
    );

    let summary = BakeSummary {
        out_dir: cmd.out_dir,
        locales,
        substituted_files,
        copied_files,
    };
    Ok(finish(
        CommandSummary::Bake(summary),
        issues,
        0,
        ctx.locale_files().len(),
        true,
    ))
}
