//! Translation data: the catalog, its coverage checks, and load metrics.
//!
//! # Architecture
//!
//! - `catalog`: The `{ lang: { key: text } }` document fetched on every load
//! - `coverage`: Per-language key gaps relative to a reference language
//! - `metrics`: Counters for loads and element updates
//!
//! # Example
//!
//! ```rust,ignore
//! use language_switcher::i18n::TranslationCatalog;
//!
//! let catalog = TranslationCatalog::from_json(body, "translations.json")?;
//! let greeting = catalog.lookup("fr", "greeting");
//! let report = catalog.coverage("en");
//! ```

mod catalog;
mod coverage;
mod metrics;

pub use catalog::TranslationCatalog;
pub use coverage::CoverageReport;
pub use metrics::{MetricsReport, SwitcherMetrics};

/// Language applied when storage holds no preference.
pub const DEFAULT_LANGUAGE: &str = "en";
