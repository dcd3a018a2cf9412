//! Translation catalog: the `{ lang: { key: text } }` document.
//!
//! A catalog is parsed wholesale from one JSON resource and never mutated
//! afterwards. Each load fetches a fresh copy; nothing is cached.

use crate::error::ResourceLoadError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from language code to the key/text table for that language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationCatalog {
    languages: BTreeMap<String, BTreeMap<String, String>>,
}

impl TranslationCatalog {
    /// Parse a catalog from a JSON body.
    ///
    /// # Arguments
    /// * `body` - Raw JSON text
    /// * `origin` - URL or path the body came from, used in error messages
    pub fn from_json(body: &str, origin: &str) -> Result<Self, ResourceLoadError> {
        serde_json::from_str(body).map_err(|source| ResourceLoadError::Malformed {
            origin: origin.to_string(),
            source,
        })
    }

    /// Look up the display text for `key` in `lang`.
    ///
    /// Returns `None` when either the language or the key is absent.
    pub fn lookup(&self, lang: &str, key: &str) -> Option<&str> {
        self.languages
            .get(lang)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }

    pub fn has_language(&self, lang: &str) -> bool {
        self.languages.contains_key(lang)
    }

    /// Language codes present in the catalog, sorted.
    pub fn languages(&self) -> Vec<&str> {
        self.languages.keys().map(String::as_str).collect()
    }

    /// Keys defined for `lang`, sorted. Empty for unknown languages.
    pub fn keys(&self, lang: &str) -> Vec<&str> {
        self.languages
            .get(lang)
            .map(|table| table.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub(crate) fn table(&self, lang: &str) -> Option<&BTreeMap<String, String>> {
        self.languages.get(lang)
    }

    /// Add or replace a single entry. Intended for building catalogs in code.
    pub fn insert(
        &mut self,
        lang: impl Into<String>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.languages
            .entry(lang.into())
            .or_default()
            .insert(key.into(), text.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "en": { "greeting": "Hello", "farewell": "Goodbye" },
        "fr": { "greeting": "Bonjour" }
    }"#;

    #[test]
    fn test_from_json_parses_nested_tables() {
        let catalog = TranslationCatalog::from_json(SAMPLE, "translations.json").unwrap();
        assert_eq!(catalog.languages(), vec!["en", "fr"]);
        assert_eq!(catalog.keys("en"), vec!["farewell", "greeting"]);
    }

    #[test]
    fn test_lookup_found() {
        let catalog = TranslationCatalog::from_json(SAMPLE, "translations.json").unwrap();
        assert_eq!(catalog.lookup("fr", "greeting"), Some("Bonjour"));
    }

    #[test]
    fn test_lookup_missing_key() {
        let catalog = TranslationCatalog::from_json(SAMPLE, "translations.json").unwrap();
        assert_eq!(catalog.lookup("fr", "farewell"), None);
    }

    #[test]
    fn test_lookup_missing_language() {
        let catalog = TranslationCatalog::from_json(SAMPLE, "translations.json").unwrap();
        assert_eq!(catalog.lookup("de", "greeting"), None);
        assert!(!catalog.has_language("de"));
        assert!(catalog.keys("de").is_empty());
    }

    #[test]
    fn test_from_json_rejects_invalid_json() {
        let err = TranslationCatalog::from_json("<html>404</html>", "translations.json")
            .unwrap_err();
        assert!(matches!(err, ResourceLoadError::Malformed { .. }));
    }

    #[test]
    fn test_from_json_rejects_wrong_shape() {
        let err = TranslationCatalog::from_json(r#"{"en": ["Hello"]}"#, "translations.json")
            .unwrap_err();
        assert!(matches!(err, ResourceLoadError::Malformed { .. }));
    }

    #[test]
    fn test_empty_object_is_empty_catalog() {
        let catalog = TranslationCatalog::from_json("{}", "translations.json").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_insert_builds_catalog() {
        let mut catalog = TranslationCatalog::default();
        catalog.insert("es", "greeting", "Hola");
        catalog.insert("es", "greeting", "¡Hola!");
        assert_eq!(catalog.lookup("es", "greeting"), Some("¡Hola!"));
        assert_eq!(catalog.keys("es").len(), 1);
    }
}
