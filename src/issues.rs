//! Issue types reported by `check`, `transform` and `bake`.
//!
//! Each issue is self-contained: the reporter only needs the [`Report`]
//! trait to print it.

use enum_dispatch::enum_dispatch;

use crate::core::{Key, Locale, SourceContext};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MultilineKey,
    MissingKeys,
    UnusedKeys,
    PluralFallback,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MultilineKey => write!(f, "multiline-key"),
            Rule::MissingKeys => write!(f, "missing-keys"),
            Rule::UnusedKeys => write!(f, "unused-keys"),
            Rule::PluralFallback => write!(f, "plural-fallback"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types - Source Code (SourceContext)
// ============================================================

/// Tagged template whose derived key would contain a line break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultilineKeyIssue {
    pub context: SourceContext,
    pub fragments: Vec<String>,
}

impl MultilineKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MultilineKey
    }
}

// ============================================================
// Issue Types - Locale Files
// ============================================================

/// Keys used in sources that a locale file does not define.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKeysIssue {
    pub locale: Locale,
    /// Path of the locale file.
    pub file_path: String,
    /// Sorted.
    pub keys: Vec<Key>,
}

impl MissingKeysIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingKeys
    }
}

/// Keys a locale file defines that no source uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedKeysIssue {
    pub locale: Locale,
    pub file_path: String,
    pub keys: Vec<Key>,
}

impl UnusedKeysIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnusedKeys
    }
}

/// Plural table without a `*` entry; counts matching no tag render empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralFallbackIssue {
    pub locale: Locale,
    pub file_path: String,
    pub key: Key,
}

impl PluralFallbackIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::PluralFallback
    }
}

/// Source file that could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MultilineKey(MultilineKeyIssue),
    MissingKeys(MissingKeysIssue),
    UnusedKeys(UnusedKeysIssue),
    PluralFallback(PluralFallbackIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait
// ============================================================

pub enum ReportLocation<'a> {
    Source(&'a SourceContext),
    File { path: &'a str },
}

#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    fn hint(&self) -> Option<&str> {
        None
    }

    fn details(&self) -> Option<String> {
        None
    }
}

fn quoted_keys(keys: &[Key]) -> String {
    keys.iter()
        .map(|key| format!("{:?}", key))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Report for MultilineKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        "keys cannot contain newlines".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("use a short descriptive key and put the text in the translation")
    }

    fn details(&self) -> Option<String> {
        Some(format!("fragments: {:?}", self.fragments))
    }
}

impl Report for MissingKeysIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        format!("{}: missing {} keys", self.locale, self.keys.len())
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(quoted_keys(&self.keys))
    }
}

impl Report for UnusedKeysIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        format!("{}: unused {} keys", self.locale, self.keys.len())
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(quoted_keys(&self.keys))
    }
}

impl Report for PluralFallbackIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("add a \"*\" entry used when no other tag matches")
    }

    fn details(&self) -> Option<String> {
        Some(format!("plural table in {} has no \"*\" entry", self.locale))
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Sorting
// ============================================================

impl Issue {
    fn sort_file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.file_path(),
            ReportLocation::File { path } => path,
        }
    }

    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.line(),
            ReportLocation::File { .. } => 0,
        }
    }

    fn sort_col(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.col(),
            ReportLocation::File { .. } => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // file_path, line, col, rule, message
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.sort_col().cmp(&other.sort_col()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
