//! In-memory translation tables and fallback-chain lookup.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize, Serializer};

use super::{
    interpolate::{Param, interpolate},
    key::Key,
    locale::{Locale, LocaleCode, LocaleError},
    translation::Translation,
};

/// One locale's record, matching the locale JSON file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleData {
    /// The locale key, e.g. `en_US` or `nl`.
    pub locale: Locale,
    /// Locale consulted for keys missing here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Locale>,
    /// Name of the locale in the locale itself, e.g. "Nederlands".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Written ordered case-insensitively, ties in byte order.
    #[serde(default, serialize_with = "serialize_translations")]
    pub translations: BTreeMap<Key, Translation>,
}

fn serialize_translations<S: Serializer>(
    translations: &BTreeMap<Key, Translation>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut entries: Vec<(&Key, &Translation)> = translations.iter().collect();
    entries.sort_by_cached_key(|(key, _)| (key.to_lowercase(), *key));
    serializer.collect_map(entries)
}

impl LocaleData {
    pub fn new(locale: impl Into<Locale>) -> Self {
        Self {
            locale: locale.into(),
            fallback: None,
            name: None,
            translations: BTreeMap::new(),
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<Locale>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_translation(mut self, key: impl Into<Key>, tr: impl Into<Translation>) -> Self {
        self.translations.insert(key.into(), tr.into());
        self
    }

    /// Translation for `key` in this locale only, ignoring untranslated
    /// (empty) entries.
    pub fn get(&self, key: &str) -> Option<&Translation> {
        self.translations.get(key).filter(|tr| tr.is_present())
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.locale)
    }
}

/// Process-wide map of locale to locale data.
///
/// Entries are only ever added: [`TranslationStore::merge`] extends a
/// locale's translations without clearing existing ones.
#[derive(Debug, Clone, Default)]
pub struct TranslationStore {
    locales: BTreeMap<Locale, LocaleData>,
}

impl TranslationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store and validate locale codes and the fallback graph.
    pub fn from_locales(
        locales: impl IntoIterator<Item = LocaleData>,
    ) -> Result<Self, LocaleError> {
        let mut store = Self::new();
        for data in locales {
            store.insert(data);
        }
        store.validate()?;
        Ok(store)
    }

    /// Add or replace a locale without validation.
    pub fn insert(&mut self, data: LocaleData) {
        self.locales.insert(data.locale.clone(), data);
    }

    /// Check every locale code, that every fallback exists, and that the
    /// fallback graph is acyclic.
    pub fn validate(&self) -> Result<(), LocaleError> {
        for data in self.locales.values() {
            LocaleCode::parse(&data.locale)?;
            if let Some(fallback) = &data.fallback
                && !self.locales.contains_key(fallback)
            {
                return Err(LocaleError::UnknownFallback {
                    locale: data.locale.clone(),
                    fallback: fallback.clone(),
                });
            }
        }

        for start in self.locales.keys() {
            let mut chain = vec![start.clone()];
            let mut current = start;
            while let Some(next) = self.locales.get(current).and_then(|d| d.fallback.as_ref()) {
                let seen = chain.contains(next);
                chain.push(next.clone());
                if seen {
                    return Err(LocaleError::FallbackCycle { chain });
                }
                current = next;
            }
        }
        Ok(())
    }

    pub fn get(&self, locale: &str) -> Option<&LocaleData> {
        self.locales.get(locale)
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &LocaleData> {
        self.locales.values()
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Locales consulted for `locale`, in order. Unknown locales end the chain.
    pub fn fallback_chain<'a>(
        &'a self,
        locale: &str,
    ) -> impl Iterator<Item = &'a LocaleData> + use<'a> {
        let mut next = self.locales.get(locale);
        // Bounded so a store that skipped validation cannot loop forever.
        let mut remaining = self.locales.len();
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            remaining -= 1;
            let current = next?;
            next = current
                .fallback
                .as_deref()
                .and_then(|fallback| self.locales.get(fallback));
            Some(current)
        })
    }

    /// First translation of `key` along the fallback chain of `locale`.
    pub fn lookup(&self, locale: &str, key: &str) -> Option<&Translation> {
        self.fallback_chain(locale).find_map(|data| data.get(key))
    }

    /// Translation for `key`, or the key text itself when no locale in the
    /// chain has one.
    pub fn translation_or_key(&self, locale: &str, key: &str) -> Translation {
        self.lookup(locale, key)
            .cloned()
            .unwrap_or_else(|| Translation::text(key))
    }

    /// Runtime lookup: find the translation and interpolate `params`.
    pub fn resolve(&self, locale: &str, key: &str, params: &[Param]) -> String {
        match self.lookup(locale, key) {
            Some(tr) => interpolate(tr, params),
            None => interpolate(&Translation::text(key), params),
        }
    }

    /// Merge translations into an existing locale; existing keys not named in
    /// `translations` are kept.
    pub fn merge(
        &mut self,
        locale: &str,
        translations: impl IntoIterator<Item = (Key, Translation)>,
    ) -> Result<(), LocaleError> {
        let data = self
            .locales
            .get_mut(locale)
            .ok_or_else(|| LocaleError::UnknownLocale(locale.to_string()))?;
        data.translations.extend(translations);
        Ok(())
    }

    /// Keys whose translation is a plural table in any locale.
    pub fn plural_keys(&self) -> HashSet<Key> {
        self.locales
            .values()
            .flat_map(|data| data.translations.iter())
            .filter(|(_, tr)| tr.is_plural())
            .map(|(key, _)| key.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::params;

    fn store() -> TranslationStore {
        TranslationStore::from_locales([
            LocaleData::new("en").with_translation("Hello $1", "Hello $1!"),
            LocaleData::new("en_US")
                .with_fallback("en")
                .with_translation("Color", "Color"),
            LocaleData::new("nl")
                .with_fallback("en")
                .with_translation("Hello $1", "Hallo $1!")
                .with_translation("Color", ""),
        ])
        .unwrap()
    }

    #[test]
    fn test_direct_lookup() {
        assert_eq!(store().resolve("nl", "Hello $1", &params!["wereld"]), "Hallo wereld!");
    }

    #[test]
    fn test_lookup_follows_fallback() {
        assert_eq!(store().resolve("en_US", "Hello $1", &params!["world"]), "Hello world!");
    }

    #[test]
    fn test_missing_key_degrades_to_key_text() {
        assert_eq!(store().resolve("nl", "Bye $1", &params!["x"]), "Bye x");
        assert_eq!(store().resolve("nl", "Price: $$5", &[]), "Price: $5");
    }

    #[test]
    fn test_empty_translation_is_untranslated() {
        let store = store();
        assert_eq!(store.lookup("nl", "Color"), None);
        assert_eq!(store.resolve("nl", "Color", &[]), "Color");
    }

    #[test]
    fn test_unknown_locale_degrades_to_key_text() {
        assert_eq!(store().resolve("fr", "Hello $1", &params!["x"]), "Hello x");
    }

    #[test]
    fn test_fallback_chain_order() {
        let store = store();
        let chain: Vec<&str> = store
            .fallback_chain("en_US")
            .map(|d| d.locale.as_str())
            .collect();
        assert_eq!(chain, vec!["en_US", "en"]);
    }

    #[test]
    fn test_merge_is_additive() {
        let mut store = store();
        store
            .merge("nl", [("Bye".to_string(), Translation::text("Doei"))])
            .unwrap();
        assert_eq!(store.resolve("nl", "Bye", &[]), "Doei");
        assert_eq!(store.resolve("nl", "Hello $1", &params!["x"]), "Hallo x!");
    }

    #[test]
    fn test_merge_into_unknown_locale_fails() {
        let mut store = store();
        let err = store.merge("fr", Vec::<(Key, Translation)>::new()).unwrap_err();
        assert_eq!(err, LocaleError::UnknownLocale("fr".into()));
    }

    #[test]
    fn test_unknown_fallback_rejected() {
        let err = TranslationStore::from_locales([LocaleData::new("nl").with_fallback("de")])
            .unwrap_err();
        assert_eq!(
            err,
            LocaleError::UnknownFallback {
                locale: "nl".into(),
                fallback: "de".into()
            }
        );
    }

    #[test]
    fn test_fallback_cycle_rejected() {
        let err = TranslationStore::from_locales([
            LocaleData::new("de").with_fallback("en"),
            LocaleData::new("en").with_fallback("nl"),
            LocaleData::new("nl").with_fallback("de"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            LocaleError::FallbackCycle {
                chain: vec!["de".into(), "en".into(), "nl".into(), "de".into()]
            }
        );
    }

    #[test]
    fn test_self_fallback_rejected() {
        let result = TranslationStore::from_locales([LocaleData::new("en").with_fallback("en")]);
        assert!(matches!(result, Err(LocaleError::FallbackCycle { .. })));
    }

    #[test]
    fn test_invalid_code_rejected() {
        let result = TranslationStore::from_locales([LocaleData::new("english")]);
        assert_eq!(result.unwrap_err(), LocaleError::InvalidCode("english".into()));
    }

    #[test]
    fn test_plural_keys() {
        let plural: Translation = serde_json::from_value(json!({"*": "many"})).unwrap();
        let store = TranslationStore::from_locales([
            LocaleData::new("en").with_translation("$1 items", plural),
            LocaleData::new("nl").with_translation("Hi", "Hoi"),
        ])
        .unwrap();
        let keys = store.plural_keys();
        assert_eq!(keys.len(), 1);
        assert!(keys.contains("$1 items"));
    }

    #[test]
    fn test_locale_data_file_format() {
        let data: LocaleData = serde_json::from_value(json!({
            "locale": "nl",
            "fallback": "en",
            "translations": {"Hi": "Hoi"}
        }))
        .unwrap();
        assert_eq!(data.fallback.as_deref(), Some("en"));
        assert_eq!(data.display_name(), "nl");

        let out = serde_json::to_value(&data).unwrap();
        assert_eq!(
            out,
            json!({"locale": "nl", "fallback": "en", "translations": {"Hi": "Hoi"}})
        );
    }
}
