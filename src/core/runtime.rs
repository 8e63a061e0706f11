//! Runtime translation with an explicit locale context.
//!
//! The [`Localizer`] owns the translation store together with the default
//! and current locale. Hosts create one per process (or per request when
//! locales differ between concurrent requests) and pass it where messages
//! are rendered.

use std::collections::BTreeMap;

use super::{
    interpolate::Param,
    key::{Key, derive_key},
    locale::{Locale, LocaleError, guess_locale},
    store::TranslationStore,
    translation::Translation,
};

#[derive(Debug, Clone)]
pub struct Localizer {
    store: TranslationStore,
    default_locale: Locale,
    current_locale: Option<Locale>,
}

impl Localizer {
    pub fn new(store: TranslationStore, default_locale: impl Into<Locale>) -> Result<Self, LocaleError> {
        let default_locale = default_locale.into();
        if !store.contains(&default_locale) {
            return Err(LocaleError::UnknownLocale(default_locale));
        }
        Ok(Self {
            store,
            default_locale,
            current_locale: None,
        })
    }

    pub fn store(&self) -> &TranslationStore {
        &self.store
    }

    /// The locale used for lookups: the current locale if set, else the default.
    pub fn locale(&self) -> &str {
        self.current_locale
            .as_deref()
            .unwrap_or(&self.default_locale)
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn set_default_locale(&mut self, locale: &str) -> Result<(), LocaleError> {
        self.check_locale(locale)?;
        self.default_locale = locale.to_string();
        Ok(())
    }

    pub fn set_locale(&mut self, locale: &str) -> Result<(), LocaleError> {
        self.check_locale(locale)?;
        self.current_locale = Some(locale.to_string());
        Ok(())
    }

    /// Forget the current locale so lookups use the default again.
    pub fn clear_locale(&mut self) {
        self.current_locale = None;
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.store.locales().map(|data| data.locale.as_str())
    }

    /// Display name of every locale, keyed by locale.
    pub fn locale_names(&self) -> BTreeMap<&str, &str> {
        self.store
            .locales()
            .map(|data| (data.locale.as_str(), data.display_name()))
            .collect()
    }

    /// Translate a template given as its literal fragments.
    pub fn localize<S: AsRef<str>>(&self, fragments: &[S], params: &[Param]) -> String {
        self.localize_key(&derive_key(fragments), params)
    }

    /// Translate with a precomputed key.
    pub fn localize_key(&self, key: &str, params: &[Param]) -> String {
        self.store.resolve(self.locale(), key, params)
    }

    /// Translate in an explicitly given locale.
    pub fn localize_in(&self, locale: &str, key: &str, params: &[Param]) -> String {
        self.store.resolve(locale, key, params)
    }

    /// Merge translations into `locale`, or into the active locale when `None`.
    pub fn load_translations(
        &mut self,
        translations: impl IntoIterator<Item = (Key, Translation)>,
        locale: Option<&str>,
    ) -> Result<(), LocaleError> {
        let locale = locale.unwrap_or(self.locale()).to_string();
        self.store.merge(&locale, translations)
    }

    /// Pick a configured locale from an `Accept-Language` header.
    pub fn guess_locale(&self, accept_language: Option<&str>) -> Locale {
        guess_locale(
            accept_language,
            |candidate| self.store.contains(candidate),
            &self.default_locale,
        )
    }

    fn check_locale(&self, locale: &str) -> Result<(), LocaleError> {
        if self.store.contains(locale) {
            Ok(())
        } else {
            Err(LocaleError::UnknownLocale(locale.to_string()))
        }
    }
}
