//! Bundle-text substitution.
//!
//! After bundling, generated code still contains marker calls such as
//! `__$LOCALIZE$__("Hello $1", [name])`. For one target locale,
//! [`substitute`] replaces each of them with a literal template expression
//! (`` `Hallo ${name}!` ``), so the shipped bundle performs no lookups.
//!
//! Marker calls are processed from the end of the text towards the start.
//! A marker nested in another marker's arguments therefore sits to the
//! right of its parent and is rewritten first; the parent then sees the
//! already-literal inner expression as an ordinary argument.

mod scanner;

use std::collections::BTreeSet;

use rayon::prelude::*;
use thiserror::Error;

pub use scanner::{Argument, CallScanner, Delimiter, Resume, ScanState, ScannedCall, scan_call};

use super::{
    interpolate::{Segment, Segments, param_at},
    key::Key,
    locale::Locale,
    markers::{LOCALE_SENTINEL, LOCALIZE_FN},
    store::TranslationStore,
    translation::Translation,
};

/// Malformed generated code. These are contract violations of the rewrite
/// step and abort the build.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubstituteError {
    #[error("Unbalanced delimiters in marker call near byte {offset}")]
    Unbalanced { offset: usize },
    #[error("No arguments found for marker call at byte {offset}")]
    NoArguments { offset: usize },
    #[error("Marker call at byte {offset} must start with a double-quoted key, found {found}")]
    InvalidKey { offset: usize, found: String },
    #[error("Marker token left at byte {offset} is not a call")]
    Leftover { offset: usize },
}

/// Replace every marker call in `code` with `locale`'s translation.
pub fn substitute(
    code: &str,
    locale: &str,
    store: &TranslationStore,
) -> Result<String, SubstituteError> {
    let mut code = code.replace(LOCALE_SENTINEL, locale);
    let needle = format!("{}(", LOCALIZE_FN);

    let mut search_end = code.len();
    while let Some(start) = code[..search_end].rfind(&needle) {
        let (end, replacement) = {
            let call = scan_call(&code, start + needle.len())?;
            let replacement = render_call(&call, start, locale, store)?;
            (call.end, replacement)
        };
        code.replace_range(start..end, &replacement);
        search_end = start;
    }
    if let Some(offset) = code.find(LOCALIZE_FN) {
        return Err(SubstituteError::Leftover { offset });
    }
    Ok(code)
}

/// Run [`substitute`] once per locale, in parallel.
pub fn substitute_locales(
    code: &str,
    locales: &[Locale],
    store: &TranslationStore,
) -> Result<Vec<(Locale, String)>, SubstituteError> {
    locales
        .par_iter()
        .map(|locale| substitute(code, locale, store).map(|out| (locale.clone(), out)))
        .collect()
}

/// Keys of every marker call in `code`, including nested ones.
pub fn marker_keys(code: &str) -> Result<BTreeSet<Key>, SubstituteError> {
    let needle = format!("{}(", LOCALIZE_FN);
    let mut keys = BTreeSet::new();
    for (start, _) in code.match_indices(&needle) {
        let call = scan_call(code, start + needle.len())?;
        let (key, _) = call_key(&call, start)?;
        keys.insert(key);
    }
    Ok(keys)
}

fn render_call(
    call: &ScannedCall<'_>,
    offset: usize,
    locale: &str,
    store: &TranslationStore,
) -> Result<String, SubstituteError> {
    let (key, rest) = call_key(call, offset)?;
    let params = call_params(rest);
    let params: Option<Vec<&str>> = params
        .as_ref()
        .map(|params| params.iter().map(String::as_str).collect());

    let translation = store.translation_or_key(locale, &key);
    Ok(translated_expr(&translation, params.as_deref()))
}

/// The key of a marker call and the remaining arguments.
fn call_key<'c, 'a>(
    call: &'c ScannedCall<'a>,
    offset: usize,
) -> Result<(Key, &'c [Argument<'a>]), SubstituteError> {
    let (key_arg, rest) = call
        .args
        .split_first()
        .ok_or(SubstituteError::NoArguments { offset })?;

    let key = match key_arg {
        Argument::Expr(literal) if literal.starts_with('"') => {
            serde_json::from_str::<String>(literal).map_err(|_| SubstituteError::InvalidKey {
                offset,
                found: literal.to_string(),
            })?
        }
        Argument::Expr(other) => {
            return Err(SubstituteError::InvalidKey {
                offset,
                found: other.to_string(),
            });
        }
        Argument::Array(_) => {
            return Err(SubstituteError::InvalidKey {
                offset,
                found: "an array".to_string(),
            });
        }
    };
    Ok((key, rest))
}

/// Parameter expressions of a marker call.
///
/// The usual form passes one array (`"key", [a, b]`). Older generated code
/// passes the parameters directly (`"key", a, b`); both are accepted.
fn call_params(rest: &[Argument<'_>]) -> Option<Vec<String>> {
    match rest {
        [] => None,
        [Argument::Array(elements)] => Some(elements.iter().map(|e| e.to_string()).collect()),
        args => Some(
            args.iter()
                .map(|arg| match arg {
                    Argument::Expr(expr) => expr.to_string(),
                    Argument::Array(elements) => format!("[{}]", elements.join(", ")),
                })
                .collect(),
        ),
    }
}

/// Build the replacement expression for a translation.
///
/// Plural tables are emitted as object literals for runtime interpolation.
/// Text becomes a template literal: with `params`, each `$n` becomes
/// `${<params[n-1]>}` (or nothing when the call site has no such
/// parameter) and `$$` becomes `$`; without `params` the text is kept with
/// its placeholders for a later runtime interpolation.
///
/// ```
/// use i18n_bake::core::substitute::translated_expr;
/// use i18n_bake::core::translation::Translation;
///
/// let tr = Translation::text("Hello $1!");
/// assert_eq!(translated_expr(&tr, Some(&["name"])), "`Hello ${name}!`");
/// assert_eq!(translated_expr(&tr, None), "`Hello $1!`");
/// ```
pub fn translated_expr(translation: &Translation, params: Option<&[&str]>) -> String {
    let text = match translation {
        Translation::Plural(_) => return translation.to_literal(),
        Translation::Text(text) => text,
    };

    let mut out = String::with_capacity(text.len() + 2);
    out.push('`');
    match params {
        None => escape_template(text, &mut out),
        Some(params) => {
            let segments: Vec<Segment<'_>> = Segments::new(text).collect();
            for (i, segment) in segments.iter().enumerate() {
                match segment {
                    Segment::Literal(s) => escape_template(s, &mut out),
                    Segment::Dollar => {
                        let opens_brace = matches!(
                            segments.get(i + 1),
                            Some(Segment::Literal(next)) if next.starts_with('{')
                        );
                        out.push_str(if opens_brace { "\\$" } else { "$" });
                    }
                    Segment::Param(number) => {
                        if let Some(expr) = param_at(params, *number) {
                            out.push_str("${");
                            out.push_str(expr);
                            out.push('}');
                        }
                    }
                }
            }
        }
    }
    out.push('`');
    out
}

/// Append `text` so that it reads back verbatim inside a template literal.
fn escape_template(text: &str, out: &mut String) {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            other => out.push(other),
        }
    }
}
