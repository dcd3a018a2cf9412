//! The language switcher: menu toggle, translation application, and
//! language persistence over injected document, storage, and catalog
//! capabilities.
//!
//! Loads are fire-and-forget from the caller's point of view:
//! `select_language` and `initialize_language` spawn the fetch on the tokio
//! runtime and return its handle immediately. The document lock is only
//! taken for synchronous reads and writes, never across an await.

use crate::dom::{Document, NodeId};
use crate::i18n::{SwitcherMetrics, TranslationCatalog, DEFAULT_LANGUAGE};
use crate::source::CatalogSource;
use crate::storage::{KeyValueStore, LANGUAGE_KEY};
use anyhow::{anyhow, bail, Result};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

pub const BUTTON_ID: &str = "language-button";
pub const MENU_ID: &str = "language-menu";
pub const HIDDEN_CLASS: &str = "hidden";
pub const TRANSLATE_KEY_ATTR: &str = "data-translate-key";
pub const LANG_ATTR: &str = "data-lang";

/// What happens to an element whose key has no translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingKeyPolicy {
    /// Leave the current text untouched
    Preserve,
    /// Replace the text with the empty string
    Blank,
}

impl FromStr for MissingKeyPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preserve" => Ok(MissingKeyPolicy::Preserve),
            "blank" => Ok(MissingKeyPolicy::Blank),
            other => bail!(
                "Invalid missing key policy '{}': expected 'preserve' or 'blank'",
                other
            ),
        }
    }
}

/// How overlapping loads are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrdering {
    /// Every response is applied; whichever resolves last is visible
    LastResolvedWins,
    /// Responses for anything but the most recent request are discarded
    LatestRequestWins,
}

impl FromStr for LoadOrdering {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-resolved" => Ok(LoadOrdering::LastResolvedWins),
            "latest-request" => Ok(LoadOrdering::LatestRequestWins),
            other => bail!(
                "Invalid load ordering '{}': expected 'last-resolved' or 'latest-request'",
                other
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitcherOptions {
    /// Language applied when storage holds no preference
    pub default_language: String,
    pub missing_key_policy: MissingKeyPolicy,
    /// Hide the menu after a language is chosen
    pub close_menu_on_select: bool,
    /// Apply the stored language from `initialize_language`
    pub restore_on_load: bool,
    pub ordering: LoadOrdering,
}

impl SwitcherOptions {
    /// Closest to the original script: blanks missing keys, menu stays open
    /// after a selection, nothing restored on load, no response ordering.
    ///
    /// One difference remains: a language absent from the catalog blanks
    /// every element here, where the script failed the lookup, logged the
    /// error, and left the text untouched.
    pub fn baseline() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            missing_key_policy: MissingKeyPolicy::Blank,
            close_menu_on_select: false,
            restore_on_load: false,
            ordering: LoadOrdering::LastResolvedWins,
        }
    }

    /// Preserves text on missing keys, closes the menu on selection,
    /// restores the stored language, and discards stale responses.
    pub fn enhanced() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            missing_key_policy: MissingKeyPolicy::Preserve,
            close_menu_on_select: true,
            restore_on_load: true,
            ordering: LoadOrdering::LatestRequestWins,
        }
    }
}

impl Default for SwitcherOptions {
    fn default() -> Self {
        Self::enhanced()
    }
}

/// A user activation (click) on a control, whose default action the
/// switcher may suppress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationEvent {
    default_prevented: bool,
}

impl ActivationEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Result of a single `load_translations` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The catalog was applied to the document
    Applied {
        language: String,
        /// Elements whose text was replaced with a translation
        updated: usize,
        /// Elements with no translation in this language
        missing: usize,
    },
    /// The catalog could not be fetched or parsed; the document is untouched
    Failed { language: String },
    /// A newer request was issued before this one resolved; the document is
    /// untouched
    Superseded { language: String },
}

impl LoadOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, LoadOutcome::Applied { .. })
    }
}

struct Inner<D, S, C> {
    document: Mutex<D>,
    storage: S,
    source: C,
    options: SwitcherOptions,
    latest_request: AtomicU64,
    metrics: SwitcherMetrics,
}

pub struct LanguageSwitcher<D, S, C> {
    inner: Arc<Inner<D, S, C>>,
}

impl<D, S, C> Clone for LanguageSwitcher<D, S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D, S, C> LanguageSwitcher<D, S, C>
where
    D: Document,
    S: KeyValueStore,
    C: CatalogSource,
{
    pub fn new(document: D, storage: S, source: C, options: SwitcherOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                document: Mutex::new(document),
                storage,
                source,
                options,
                latest_request: AtomicU64::new(0),
                metrics: SwitcherMetrics::new(),
            }),
        }
    }

    pub fn options(&self) -> &SwitcherOptions {
        &self.inner.options
    }

    pub fn metrics(&self) -> &SwitcherMetrics {
        &self.inner.metrics
    }

    pub fn storage(&self) -> &S {
        &self.inner.storage
    }

    /// Run `f` with read access to the document.
    pub fn with_document<R>(&self, f: impl FnOnce(&D) -> R) -> R {
        f(&self.document())
    }

    fn document(&self) -> MutexGuard<'_, D> {
        self.inner
            .document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // ==================== Menu ====================

    /// Flip the `hidden` class on the menu. Returns whether the menu is
    /// visible afterwards.
    pub fn toggle_menu(&self) -> Result<bool> {
        let mut doc = self.document();
        let menu = find_menu(&*doc)?;
        let hidden = doc.toggle_class(menu, HIDDEN_CLASS);
        debug!("Language menu is now {}", if hidden { "hidden" } else { "visible" });
        Ok(!hidden)
    }

    pub fn close_menu(&self) -> Result<()> {
        let mut doc = self.document();
        let menu = find_menu(&*doc)?;
        doc.add_class(menu, HIDDEN_CLASS);
        Ok(())
    }

    pub fn is_menu_visible(&self) -> Result<bool> {
        let doc = self.document();
        let menu = find_menu(&*doc)?;
        Ok(!doc.has_class(menu, HIDDEN_CLASS))
    }

    /// Language options inside the menu, as `(element, code)` pairs in
    /// document order.
    pub fn language_options(&self) -> Result<Vec<(NodeId, String)>> {
        let doc = self.document();
        let menu = find_menu(&*doc)?;
        Ok(doc
            .elements_with_attribute(Some(menu), LANG_ATTR)
            .into_iter()
            .filter_map(|node| doc.attribute(node, LANG_ATTR).map(|lang| (node, lang)))
            .collect())
    }

    // ==================== Translation ====================

    /// Fetch the catalog and apply `lang` to every translatable element.
    ///
    /// Never returns an error: fetch failures are logged and reported as
    /// `LoadOutcome::Failed` with the document left as it was.
    pub async fn load_translations(&self, lang: &str) -> LoadOutcome {
        let token = self.next_request();
        self.load_with_token(lang, token).await
    }

    /// Start `load_translations` on the runtime and return immediately.
    ///
    /// The request token is taken before spawning, so request order is call
    /// order regardless of how the runtime schedules the tasks.
    pub fn spawn_load(&self, lang: &str) -> JoinHandle<LoadOutcome> {
        let token = self.next_request();
        let switcher = self.clone();
        let lang = lang.to_string();
        tokio::spawn(async move { switcher.load_with_token(&lang, token).await })
    }

    fn next_request(&self) -> u64 {
        self.inner.latest_request.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn load_with_token(&self, lang: &str, token: u64) -> LoadOutcome {
        self.inner.metrics.record_load_started();
        debug!(
            "Loading '{}' translations from {} (request {})",
            lang,
            self.inner.source.location(),
            token
        );

        match self.inner.source.fetch_catalog().await {
            Ok(catalog) => self.apply_catalog(&catalog, lang, token),
            Err(e) => {
                error!("Error loading translations: {}", e);
                self.inner.metrics.record_load_failed();
                LoadOutcome::Failed {
                    language: lang.to_string(),
                }
            }
        }
    }

    fn apply_catalog(&self, catalog: &TranslationCatalog, lang: &str, token: u64) -> LoadOutcome {
        let mut doc = self.document();

        // Checked under the document lock so a newer response cannot be
        // overwritten by one that was already superseded.
        if self.inner.options.ordering == LoadOrdering::LatestRequestWins
            && self.inner.latest_request.load(Ordering::SeqCst) != token
        {
            debug!("Discarding stale '{}' translations (request {})", lang, token);
            self.inner.metrics.record_load_superseded();
            return LoadOutcome::Superseded {
                language: lang.to_string(),
            };
        }

        if !catalog.has_language(lang) {
            warn!("Translation catalog has no entries for '{}'", lang);
        }

        let mut updated = 0;
        let mut missing = 0;
        for node in doc.elements_with_attribute(None, TRANSLATE_KEY_ATTR) {
            let Some(key) = doc.attribute(node, TRANSLATE_KEY_ATTR) else {
                continue;
            };
            match catalog.lookup(lang, &key) {
                Some(text) => {
                    doc.set_text(node, text);
                    updated += 1;
                }
                None => {
                    missing += 1;
                    if self.inner.options.missing_key_policy == MissingKeyPolicy::Blank {
                        doc.set_text(node, "");
                    }
                }
            }
        }

        self.inner.metrics.record_load_applied(updated, missing);
        info!(
            "Applied '{}' translations: {} updated, {} missing",
            lang, updated, missing
        );

        LoadOutcome::Applied {
            language: lang.to_string(),
            updated,
            missing,
        }
    }

    // ==================== Selection ====================

    /// Handle a user choosing `lang`: suppress the event's default action,
    /// start loading, persist the choice, and close the menu when
    /// configured to.
    pub fn select_language(
        &self,
        event: &mut ActivationEvent,
        lang: &str,
    ) -> JoinHandle<LoadOutcome> {
        event.prevent_default();
        info!("Language selected: {}", lang);

        let handle = self.spawn_load(lang);

        if let Err(e) = self.inner.storage.set(LANGUAGE_KEY, lang) {
            warn!("Failed to persist language '{}': {:#}", lang, e);
        }

        if self.inner.options.close_menu_on_select {
            if let Err(e) = self.close_menu() {
                warn!("Failed to close language menu: {:#}", e);
            }
        }

        handle
    }

    /// Handle activation of a menu option element, reading its `data-lang`.
    ///
    /// Returns `None` (and leaves the event alone) when the element carries
    /// no language code.
    pub fn select_option(
        &self,
        event: &mut ActivationEvent,
        option: NodeId,
    ) -> Option<JoinHandle<LoadOutcome>> {
        let lang = self.document().attribute(option, LANG_ATTR);
        match lang {
            Some(lang) => Some(self.select_language(event, &lang)),
            None => {
                warn!("Language option {:?} has no {} attribute", option, LANG_ATTR);
                None
            }
        }
    }

    /// Route a click on `target`: the language button toggles the menu, a
    /// menu option selects its language, anything else is ignored.
    pub fn handle_click(
        &self,
        event: &mut ActivationEvent,
        target: NodeId,
    ) -> Result<Option<JoinHandle<LoadOutcome>>> {
        let is_button = self.document().element_by_id(BUTTON_ID) == Some(target);
        if is_button {
            self.toggle_menu()?;
            return Ok(None);
        }

        let is_option = self
            .language_options()?
            .iter()
            .any(|(node, _)| *node == target);
        if is_option {
            return Ok(self.select_option(event, target));
        }

        Ok(None)
    }

    // ==================== Startup ====================

    /// The persisted language, or the configured default when none is
    /// stored or storage cannot be read.
    pub fn active_language(&self) -> String {
        match self.inner.storage.get(LANGUAGE_KEY) {
            Ok(Some(lang)) => lang,
            Ok(None) => self.inner.options.default_language.clone(),
            Err(e) => {
                warn!("Failed to read stored language: {:#}", e);
                self.inner.options.default_language.clone()
            }
        }
    }

    /// Apply the stored (or default) language once at startup.
    ///
    /// Returns `None` when `restore_on_load` is disabled.
    pub fn initialize_language(&self) -> Option<JoinHandle<LoadOutcome>> {
        if !self.inner.options.restore_on_load {
            debug!("Language restore on load is disabled");
            return None;
        }

        let lang = self.active_language();
        info!("Restoring language: {}", lang);
        Some(self.spawn_load(&lang))
    }
}

fn find_menu<D: Document>(doc: &D) -> Result<NodeId> {
    doc.element_by_id(MENU_ID)
        .ok_or_else(|| anyhow!("Element #{} not found", MENU_ID))
}
