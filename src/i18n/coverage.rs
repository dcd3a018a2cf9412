//! Catalog coverage checks.
//!
//! A language is complete when it defines every key the reference language
//! defines. Gaps are not fatal at runtime (the missing-key policy decides
//! what the page shows) but they are worth reporting before deploying a
//! catalog.

use crate::i18n::TranslationCatalog;
use std::collections::BTreeMap;

/// Per-language key gaps relative to a reference language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    /// Language every other language is compared against
    pub reference: String,

    /// Keys present in the reference but absent in the language
    pub missing: BTreeMap<String, Vec<String>>,

    /// Keys present in the language but absent in the reference
    pub extra: BTreeMap<String, Vec<String>>,

    /// Set when the reference language itself is not in the catalog
    pub reference_absent: bool,
}

impl CoverageReport {
    /// True when every language defines exactly the reference key set.
    pub fn is_complete(&self) -> bool {
        !self.reference_absent && self.missing.is_empty() && self.extra.is_empty()
    }

    /// Missing keys for one language (empty when complete or unknown).
    pub fn missing_for(&self, lang: &str) -> &[String] {
        self.missing.get(lang).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Human-readable findings, one line per language with a gap.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.reference_absent {
            warnings.push(format!(
                "Reference language '{}' is not present in the catalog",
                self.reference
            ));
        }

        for (lang, keys) in &self.missing {
            warnings.push(format!(
                "Language '{}' is missing {} key(s): {:?}",
                lang,
                keys.len(),
                keys
            ));
        }

        for (lang, keys) in &self.extra {
            warnings.push(format!(
                "Language '{}' defines {} key(s) unknown to '{}': {:?}",
                lang,
                keys.len(),
                self.reference,
                keys
            ));
        }

        warnings
    }
}

impl TranslationCatalog {
    /// Compare every language's key set with `reference`.
    pub fn coverage(&self, reference: &str) -> CoverageReport {
        let mut report = CoverageReport {
            reference: reference.to_string(),
            missing: BTreeMap::new(),
            extra: BTreeMap::new(),
            reference_absent: !self.has_language(reference),
        };

        let reference_keys = self.keys(reference);

        for lang in self.languages() {
            if lang == reference {
                continue;
            }
            let Some(table) = self.table(lang) else {
                continue;
            };

            let missing: Vec<String> = reference_keys
                .iter()
                .filter(|key| !table.contains_key(**key))
                .map(|key| key.to_string())
                .collect();
            if !missing.is_empty() {
                report.missing.insert(lang.to_string(), missing);
            }

            if !report.reference_absent {
                let extra: Vec<String> = table
                    .keys()
                    .filter(|key| !reference_keys.contains(&key.as_str()))
                    .cloned()
                    .collect();
                if !extra.is_empty() {
                    report.extra.insert(lang.to_string(), extra);
                }
            }
        }

        report
    }
}
