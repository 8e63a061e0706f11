//! Locale identifiers.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Opaque locale identifier such as `en` or `en_US`.
pub type Locale = String;

static LOCALE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]{2})(?:[_-]([A-Z]{2}))?$").unwrap());

/// Configuration errors around locales. All of them are fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleError {
    #[error("Invalid locale: {0} (does not match xx or xx_XX)")]
    InvalidCode(String),
    #[error("Invalid locale file for {expected} (locale mismatch {found} !== {expected})")]
    Mismatch { expected: String, found: String },
    #[error("Invalid locale file for {locale} (invalid fallback {fallback})")]
    UnknownFallback { locale: String, fallback: String },
    #[error("Circular fallback: {}", .chain.join(" -> "))]
    FallbackCycle { chain: Vec<String> },
    #[error("Unknown locale {0}")]
    UnknownLocale(String),
}

/// The parts of a validated locale code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleCode<'a> {
    pub code: &'a str,
    pub language: &'a str,
    pub region: Option<&'a str>,
}

impl<'a> LocaleCode<'a> {
    /// Validate `code` against the `xx` / `xx_XX` shape (`xx-XX` is accepted too).
    pub fn parse(code: &'a str) -> Result<Self, LocaleError> {
        let captures = LOCALE_REGEX
            .captures(code)
            .ok_or_else(|| LocaleError::InvalidCode(code.to_string()))?;
        let language = captures.get(1).map_or("", |m| m.as_str());
        let region = captures.get(2).map(|m| m.as_str());
        Ok(Self {
            code,
            language,
            region,
        })
    }

    /// Display name used when a locale file does not provide one.
    pub fn default_name(&self) -> String {
        match self.region {
            Some(region) => format!("{} ({})", self.language, region),
            None => self.code.to_string(),
        }
    }
}

/// Pick the first known locale from an `Accept-Language` style header,
/// falling back to `default`.
///
/// ```
/// use i18n_bake::core::locale::guess_locale;
///
/// let known = |l: &str| l == "nl" || l == "en";
/// assert_eq!(guess_locale(Some("fr-FR,nl;q=0.8,en;q=0.5"), known, "en"), "nl");
/// assert_eq!(guess_locale(None, known, "en"), "en");
/// ```
pub fn guess_locale(
    accept_language: Option<&str>,
    is_known: impl Fn(&str) -> bool,
    default: &str,
) -> Locale {
    accept_language
        .into_iter()
        .flat_map(|header| header.split(','))
        .map(|part| part.split(';').next().unwrap_or("").trim())
        .find(|candidate| !candidate.is_empty() && is_known(candidate))
        .unwrap_or(default)
        .to_string()
}
