//! Where translation catalogs come from.
//!
//! Every load calls `fetch_catalog` again; sources never cache. Failures are
//! reported as `ResourceLoadError` and are not retried here.

use crate::error::ResourceLoadError;
use crate::i18n::TranslationCatalog;
use std::future::Future;
use std::path::PathBuf;
use tracing::debug;

/// Path of the catalog relative to the site root.
pub const DEFAULT_CATALOG_PATH: &str = "translations.json";

pub trait CatalogSource: Send + Sync + 'static {
    /// Fetch and parse the full catalog.
    fn fetch_catalog(
        &self,
    ) -> impl Future<Output = Result<TranslationCatalog, ResourceLoadError>> + Send;

    /// URL or path, for log messages.
    fn location(&self) -> &str;
}

/// Fetches the catalog with an HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl CatalogSource for HttpCatalogSource {
    fn fetch_catalog(
        &self,
    ) -> impl Future<Output = Result<TranslationCatalog, ResourceLoadError>> + Send {
        let client = self.client.clone();
        let url = self.url.clone();

        async move {
            debug!("Fetching translation catalog from {}", url);

            let response = client
                .get(&url)
                .send()
                .await
                .map_err(|source| ResourceLoadError::Network {
                    url: url.clone(),
                    source,
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(ResourceLoadError::Status {
                    url,
                    status: status.as_u16(),
                });
            }

            let body = response
                .text()
                .await
                .map_err(|source| ResourceLoadError::Network {
                    url: url.clone(),
                    source,
                })?;

            TranslationCatalog::from_json(&body, &url)
        }
    }

    fn location(&self) -> &str {
        &self.url
    }
}

/// Reads the catalog from a local file, for sites served from disk.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
    display: String,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = path.display().to_string();
        Self { path, display }
    }
}

impl CatalogSource for FileCatalogSource {
    fn fetch_catalog(
        &self,
    ) -> impl Future<Output = Result<TranslationCatalog, ResourceLoadError>> + Send {
        let path = self.path.clone();
        let shown = self.display.clone();

        async move {
            debug!("Reading translation catalog from {}", shown);

            let body = tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| ResourceLoadError::Io {
                    path: shown.clone(),
                    source,
                })?;

            TranslationCatalog::from_json(&body, &shown)
        }
    }

    fn location(&self) -> &str {
        &self.display
    }
}

/// Source picked from a configured location string: `http://` and
/// `https://` locations are fetched, anything else is read from disk.
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Http(HttpCatalogSource),
    File(FileCatalogSource),
}

impl ConfiguredSource {
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            ConfiguredSource::Http(HttpCatalogSource::new(location))
        } else {
            ConfiguredSource::File(FileCatalogSource::new(location))
        }
    }
}

impl CatalogSource for ConfiguredSource {
    fn fetch_catalog(
        &self,
    ) -> impl Future<Output = Result<TranslationCatalog, ResourceLoadError>> + Send {
        let source = self.clone();
        async move {
            match source {
                ConfiguredSource::Http(http) => http.fetch_catalog().await,
                ConfiguredSource::File(file) => file.fetch_catalog().await,
            }
        }
    }

    fn location(&self) -> &str {
        match self {
            ConfiguredSource::Http(http) => http.location(),
            ConfiguredSource::File(file) => file.location(),
        }
    }
}
