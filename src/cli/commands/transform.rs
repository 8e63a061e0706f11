use std::{fs, path::Path};

use anyhow::{Context, Result};
use rayon::prelude::*;

use super::super::args::TransformCommand;
use super::{CommandResult, CommandSummary, TransformSummary, helper::finish};
use crate::{
    core::BuildContext,
    issues::Issue,
    rules::{add_missing_keys, check_missing_keys_issues, check_unused_keys_issues},
};

/// Rewrite every scanned source file into `--out-dir`, keeping the tree
/// layout relative to the source root. Files without templates are copied.
///
/// Multi-line keys and unparsable sources abort before anything is written.
pub fn transform(cmd: TransformCommand) -> Result<CommandResult> {
    let ctx = BuildContext::new(&cmd.common)?;
    let sources = ctx.sources();

    if sources.has_errors() {
        let mut issues: Vec<Issue> = Vec::new();
        issues.extend(sources.key_errors.iter().cloned().map(Issue::MultilineKey));
        issues.extend(sources.parse_errors.iter().cloned().map(Issue::ParseError));
        let summary = TransformSummary {
            out_dir: cmd.out_dir,
            rewritten_files: 0,
            copied_files: 0,
            templates: 0,
            added_keys: 0,
        };
        return Ok(finish(
            CommandSummary::Transform(summary),
            issues,
            ctx.files.len(),
            ctx.locale_files().len(),
            true,
        ));
    }

    let base = ctx.scan_root();
    ctx.files
        .par_iter()
        .map(|file_path| {
            let source = Path::new(file_path);
            let relative = source.strip_prefix(&base).unwrap_or(source);
            let target = cmd.out_dir.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            match sources.outputs.get(file_path) {
                Some(output) => fs::write(&target, &output.code),
                None => fs::copy(source, &target).map(|_| ()),
            }
            .with_context(|| format!("Failed to write {}", target.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let missing = check_missing_keys_issues(&ctx);
    let added_keys = if ctx.config.add_missing {
        add_missing_keys(ctx.locale_files(), &missing)?
    } else {
        0
    };

    let mut issues: Vec<Issue> = Vec::new();
    issues.extend(missing.into_iter().map(Issue::MissingKeys));
    issues.extend(
        check_unused_keys_issues(&ctx)
            .into_iter()
            .map(Issue::UnusedKeys),
    );

    let summary = TransformSummary {
        out_dir: cmd.out_dir,
        rewritten_files: sources.outputs.len(),
        copied_files: ctx.files.len() - sources.outputs.len(),
        templates: sources.outputs.values().map(|o| o.rewritten).sum(),
        added_keys,
    };
    Ok(finish(
        CommandSummary::Transform(summary),
        issues,
        ctx.files.len(),
        ctx.locale_files().len(),
        true,
    ))
}
