//! Translation values as stored in locale files.
//!
//! A translation is either a plain string with `$1`..`$9` placeholders (and
//! `$$` for a literal dollar), or a plural table that dispatches on a runtime
//! parameter:
//!
//! ```json
//! {
//!   "0": "There are none",
//!   "1": "There is one",
//!   "2": 1,
//!   "*": "There are $1"
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Tag of the mandatory catch-all entry of a plural table.
pub const FALLBACK_TAG: &str = "*";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranslationFormatError {
    #[error("expected a string or a plural object, found {0}")]
    InvalidTranslation(String),
    #[error("plural tag \"{tag}\" must map to a string, a number or an object, found {found}")]
    InvalidPluralEntry { tag: String, found: String },
}

/// The localized value for a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum Translation {
    Text(String),
    Plural(Plural),
}

/// One entry of a plural table.
#[derive(Debug, Clone, PartialEq)]
pub enum PluralEntry {
    Text(String),
    /// Use the entry stored under this number's tag instead.
    Redirect(Number),
    /// Dispatch again on the next parameter.
    Nested(Plural),
}

/// A dispatch table from ordinal tags to translation variants.
///
/// Entries keep the order they were declared in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Plural {
    entries: Vec<(String, PluralEntry)>,
}

impl Plural {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `tag`.
    pub fn insert(&mut self, tag: impl Into<String>, entry: PluralEntry) {
        let tag = tag.into();
        match self.entries.iter_mut().find(|(t, _)| *t == tag) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((tag, entry)),
        }
    }

    pub fn with(mut self, tag: impl Into<String>, entry: PluralEntry) -> Self {
        self.insert(tag, entry);
        self
    }

    pub fn get(&self, tag: &str) -> Option<&PluralEntry> {
        self.entries
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, entry)| entry)
    }

    pub fn fallback(&self) -> Option<&PluralEntry> {
        self.get(FALLBACK_TAG)
    }

    /// Look up `tag`, using the `*` entry when the tag is absent.
    pub fn select(&self, tag: Option<&str>) -> Option<&PluralEntry> {
        tag.and_then(|t| self.get(t)).or_else(|| self.fallback())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PluralEntry)> {
        self.entries.iter().map(|(tag, entry)| (tag.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether this table, or any table nested in it, lacks a `*` entry.
    pub fn missing_fallback(&self) -> bool {
        self.fallback().is_none()
            || self.entries.iter().any(|(_, entry)| match entry {
                PluralEntry::Nested(inner) => inner.missing_fallback(),
                _ => false,
            })
    }

    fn from_map(map: Map<String, Value>) -> Result<Self, TranslationFormatError> {
        let mut plural = Plural::new();
        for (tag, value) in map {
            let entry = match value {
                Value::String(s) => PluralEntry::Text(s),
                Value::Number(n) => PluralEntry::Redirect(n),
                Value::Object(inner) => PluralEntry::Nested(Plural::from_map(inner)?),
                other => {
                    return Err(TranslationFormatError::InvalidPluralEntry {
                        tag,
                        found: describe(&other).to_string(),
                    });
                }
            };
            plural.entries.push((tag, entry));
        }
        Ok(plural)
    }

    fn to_map(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|(tag, entry)| {
                let value = match entry {
                    PluralEntry::Text(s) => Value::String(s.clone()),
                    PluralEntry::Redirect(n) => Value::Number(n.clone()),
                    PluralEntry::Nested(inner) => Value::Object(inner.to_map()),
                };
                (tag.clone(), value)
            })
            .collect()
    }
}

impl Translation {
    pub fn text(s: impl Into<String>) -> Self {
        Translation::Text(s.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Translation::Text(s) => Some(s),
            Translation::Plural(_) => None,
        }
    }

    pub fn is_plural(&self) -> bool {
        matches!(self, Translation::Plural(_))
    }

    /// Empty strings mark keys that were added but never translated; lookups
    /// skip them and continue down the fallback chain.
    pub fn is_present(&self) -> bool {
        !matches!(self, Translation::Text(s) if s.is_empty())
    }

    /// Compact JSON encoding, as embedded into generated code.
    pub fn to_literal(&self) -> String {
        Value::from(self.clone()).to_string()
    }
}

impl From<&str> for Translation {
    fn from(s: &str) -> Self {
        Translation::Text(s.to_string())
    }
}

impl From<String> for Translation {
    fn from(s: String) -> Self {
        Translation::Text(s)
    }
}

impl From<Plural> for Translation {
    fn from(p: Plural) -> Self {
        Translation::Plural(p)
    }
}

impl TryFrom<Value> for Translation {
    type Error = TranslationFormatError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(Translation::Text(s)),
            Value::Object(map) => Ok(Translation::Plural(Plural::from_map(map)?)),
            other => Err(TranslationFormatError::InvalidTranslation(
                describe(&other).to_string(),
            )),
        }
    }
}

impl From<Translation> for Value {
    fn from(translation: Translation) -> Self {
        match translation {
            Translation::Text(s) => Value::String(s),
            Translation::Plural(p) => Value::Object(p.to_map()),
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
