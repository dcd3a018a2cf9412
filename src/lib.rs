pub mod config;
pub mod dom;
pub mod error;
pub mod i18n;
pub mod source;
pub mod storage;
pub mod switcher;

pub use dom::{Document, NodeId, StaticDocument};
pub use error::ResourceLoadError;
pub use source::{CatalogSource, ConfiguredSource, FileCatalogSource, HttpCatalogSource};
pub use storage::{FileStore, KeyValueStore, MemoryStore, LANGUAGE_KEY};
pub use switcher::{
    ActivationEvent, LanguageSwitcher, LoadOrdering, LoadOutcome, MissingKeyPolicy,
    SwitcherOptions,
};
