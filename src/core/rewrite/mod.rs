//! Call-site rewrite rules.
//!
//! A localization tagged template such as `` _`Hello ${name}!` `` becomes a
//! marker call that the bundle substitution later inlines per locale:
//!
//! ```text
//! _`Hello ${name}!`      ->  __$LOCALIZE$__("Hello $1!", [name])
//! plural`${n} items`     ->  __interpolate__(__$LOCALIZE$__("$1 items"), [n])
//! ```
//!
//! Keys that resolve to a plural table in some locale cannot be flattened at
//! build time, so their marker call carries no parameters and the runtime
//! `interpolate` receives them instead.
//!
//! [`transform`] applies these rules to whole source files.

pub mod transform;

use std::{collections::HashSet, fmt};

use serde_json::Value;
use thiserror::Error;

use super::{
    key::{Key, derive_key},
    markers::{INTERPOLATE_FN, LOCALIZE_FN},
    store::TranslationStore,
};

pub use transform::{TransformError, TransformOptions, TransformOutput, transform_source};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RewriteError {
    #[error(
        "Keys cannot contain newlines, use a short descriptive key and a translation instead: {fragments:?}"
    )]
    MultilineKey { fragments: Vec<String> },
}

/// An interpolated expression of a tagged template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateArg {
    /// A string literal, passed as a constant parameter.
    Literal(String),
    /// Any other expression, as source text.
    Expr(String),
}

impl TemplateArg {
    fn to_code(&self) -> String {
        match self {
            TemplateArg::Literal(value) => quote(value),
            TemplateArg::Expr(expr) => expr.clone(),
        }
    }
}

/// The marker call replacing one tagged template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerCall {
    pub key: Key,
    pub args: Vec<String>,
    /// Interpolation is left to the runtime because the key has plural forms.
    pub deferred: bool,
}

impl fmt::Display for MarkerCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = quote(&self.key);
        let args = self.args.join(", ");
        if self.deferred {
            write!(f, "{INTERPOLATE_FN}({LOCALIZE_FN}({key}), [{args}])")
        } else {
            write!(f, "{LOCALIZE_FN}({key}, [{args}])")
        }
    }
}

/// Decides how tagged templates are rewritten.
#[derive(Debug, Clone, Default)]
pub struct RewriteRules {
    plural_keys: HashSet<Key>,
}

impl RewriteRules {
    pub fn new(plural_keys: HashSet<Key>) -> Self {
        Self { plural_keys }
    }

    /// Rules for a store, deferring every key that is plural in any locale.
    pub fn for_store(store: &TranslationStore) -> Self {
        Self::new(store.plural_keys())
    }

    pub fn is_plural(&self, key: &str) -> bool {
        self.plural_keys.contains(key)
    }

    /// Rewrite one tagged template given its cooked fragments and
    /// interpolated expressions.
    pub fn rewrite<S: AsRef<str>>(
        &self,
        fragments: &[S],
        args: &[TemplateArg],
    ) -> Result<MarkerCall, RewriteError> {
        let key = derive_key(fragments);
        if key.contains(['\r', '\n']) {
            return Err(RewriteError::MultilineKey {
                fragments: fragments.iter().map(|f| f.as_ref().to_string()).collect(),
            });
        }
        Ok(MarkerCall {
            deferred: self.is_plural(&key),
            args: args.iter().map(TemplateArg::to_code).collect(),
            key,
        })
    }
}

/// Output of an earlier rewrite carries the runtime interpolation import, so
/// it must not be rewritten again.
pub fn is_rewritten(code: &str) -> bool {
    code.contains(INTERPOLATE_FN)
}

/// A double-quoted JavaScript string literal for `value`.
pub fn quote(value: &str) -> String {
    Value::from(value).to_string()
}
