use crate::i18n::DEFAULT_LANGUAGE;
use crate::source::DEFAULT_CATALOG_PATH;
use crate::switcher::{LoadOrdering, MissingKeyPolicy, SwitcherOptions};
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Catalog
    pub translations_url: String,

    // Storage
    pub storage_path: String,

    // Behavior
    pub default_language: String,
    pub missing_key_policy: MissingKeyPolicy,
    pub close_menu_on_select: bool,
    pub restore_on_load: bool,
    pub load_ordering: LoadOrdering,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Catalog - URL (http/https) or local file path
            translations_url: std::env::var("TRANSLATIONS_URL")
                .unwrap_or_else(|_| DEFAULT_CATALOG_PATH.to_string()),

            // Storage
            storage_path: std::env::var("LANGUAGE_STORE_PATH")
                .unwrap_or_else(|_| "data/local_storage.json".to_string()),

            // Behavior
            default_language: std::env::var("DEFAULT_LANGUAGE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            missing_key_policy: std::env::var("MISSING_KEY_POLICY")
                .unwrap_or_else(|_| "preserve".to_string())
                .parse()
                .context("MISSING_KEY_POLICY is invalid")?,
            close_menu_on_select: parse_bool("CLOSE_MENU_ON_SELECT", true)?,
            restore_on_load: parse_bool("RESTORE_ON_LOAD", true)?,
            load_ordering: std::env::var("LOAD_ORDERING")
                .unwrap_or_else(|_| "latest-request".to_string())
                .parse()
                .context("LOAD_ORDERING is invalid")?,
        })
    }

    pub fn switcher_options(&self) -> SwitcherOptions {
        SwitcherOptions {
            default_language: self.default_language.clone(),
            missing_key_policy: self.missing_key_policy,
            close_menu_on_select: self.close_menu_on_select,
            restore_on_load: self.restore_on_load,
            ordering: self.load_ordering,
        }
    }
}

fn parse_bool(name: &str, default: bool) -> Result<bool> {
    match std::env::var(name) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => anyhow::bail!("{} must be a boolean, got '{}'", name, other),
        },
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 7] = [
        "TRANSLATIONS_URL",
        "LANGUAGE_STORE_PATH",
        "DEFAULT_LANGUAGE",
        "MISSING_KEY_POLICY",
        "CLOSE_MENU_ON_SELECT",
        "RESTORE_ON_LOAD",
        "LOAD_ORDERING",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = Config::from_env().expect("defaults are valid");

        assert_eq!(config.translations_url, "translations.json");
        assert_eq!(config.storage_path, "data/local_storage.json");
        assert_eq!(config.default_language, "en");
        assert_eq!(config.missing_key_policy, MissingKeyPolicy::Preserve);
        assert!(config.close_menu_on_select);
        assert!(config.restore_on_load);
        assert_eq!(config.load_ordering, LoadOrdering::LatestRequestWins);
        assert_eq!(config.switcher_options(), SwitcherOptions::enhanced());
    }

    #[test]
    #[serial]
    fn test_from_env_baseline_variant() {
        clear_env();
        std::env::set_var("MISSING_KEY_POLICY", "blank");
        std::env::set_var("CLOSE_MENU_ON_SELECT", "false");
        std::env::set_var("RESTORE_ON_LOAD", "0");
        std::env::set_var("LOAD_ORDERING", "last-resolved");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.switcher_options(), SwitcherOptions::baseline());
    }

    #[test]
    #[serial]
    fn test_from_env_custom_language_and_paths() {
        clear_env();
        std::env::set_var("TRANSLATIONS_URL", "https://example.com/translations.json");
        std::env::set_var("LANGUAGE_STORE_PATH", "/tmp/storage.json");
        std::env::set_var("DEFAULT_LANGUAGE", "fr");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.translations_url, "https://example.com/translations.json");
        assert_eq!(config.storage_path, "/tmp/storage.json");
        assert_eq!(config.switcher_options().default_language, "fr");
    }

    #[test]
    #[serial]
    fn test_from_env_blank_default_language_falls_back() {
        clear_env();
        std::env::set_var("DEFAULT_LANGUAGE", "  ");
        let config = Config::from_env().unwrap();
        clear_env();
        assert_eq!(config.default_language, "en");
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_policy() {
        clear_env();
        std::env::set_var("MISSING_KEY_POLICY", "erase");
        let err = Config::from_env().unwrap_err();
        clear_env();
        assert!(err.to_string().contains("MISSING_KEY_POLICY"));
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_bool() {
        clear_env();
        std::env::set_var("RESTORE_ON_LOAD", "maybe");
        let err = Config::from_env().unwrap_err();
        clear_env();
        assert!(err.to_string().contains("RESTORE_ON_LOAD"));
    }
}
