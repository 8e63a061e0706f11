use std::path::PathBuf;

use crate::{core::Locale, issues::Issue};

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Transform(TransformSummary),
    Bake(BakeSummary),
    Resolve(ResolveSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct TransformSummary {
    pub out_dir: PathBuf,
    /// Files containing at least one rewritten template.
    pub rewritten_files: usize,
    pub copied_files: usize,
    pub templates: usize,
    /// Keys appended to locale files with an empty translation.
    pub added_keys: usize,
}

#[derive(Debug)]
pub struct BakeSummary {
    pub out_dir: PathBuf,
    pub locales: Vec<Locale>,
    /// Script files run through marker substitution, per locale.
    pub substituted_files: usize,
    /// Other files copied unchanged, per locale.
    pub copied_files: usize,
}

#[derive(Debug)]
pub struct ResolveSummary {
    pub locale: Locale,
    pub text: String,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a command.
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// Errors abort the build step (exit 2) instead of failing a check (exit 1).
    pub fatal_errors: bool,
    /// Issues found, sorted. Empty for `resolve` and `init`.
    pub issues: Vec<Issue>,
    /// Number of source files that failed to parse.
    pub parse_error_count: usize,
    pub source_files_checked: usize,
    pub locale_files_checked: usize,
}
