use thiserror::Error;

/// Failure to obtain a usable translation catalog.
///
/// Raised by every `CatalogSource` and caught inside
/// `LanguageSwitcher::load_translations`, where it is logged and counted
/// but never surfaced to the page.
#[derive(Debug, Error)]
pub enum ResourceLoadError {
    /// The request never produced a response (DNS, connection refused, ...)
    #[error("failed to fetch {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("fetching {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body was not a `{ lang: { key: text } }` document
    #[error("malformed translation catalog from {origin}: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// A local catalog file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ResourceLoadError {
    /// True for failures where the resource itself does not exist
    /// (HTTP 404 or a missing local file).
    pub fn is_not_found(&self) -> bool {
        match self {
            ResourceLoadError::Status { status, .. } => *status == 404,
            ResourceLoadError::Io { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}
