use std::path::{Path, PathBuf};

use reqwest::{Client, StatusCode};
use tracing::{error, info};
use url::Url;

use crate::error::{Result, ScrapeError};
use crate::parser::document::Document;

const CACHE_PREFIX: &str = "ev_database";
const CACHE_EXTENSION: &str = "html";

/// `(vehicle_id, vehicle_slug)` from the last two path segments of a
/// detail page URL, e.g. `/car/1991/Tesla-Model-3` → `("1991", "Tesla-Model-3")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    pub vehicle_id: String,
    pub vehicle_slug: String,
}

impl CacheKey {
    pub fn from_url(url: &str) -> Result<Self> {
        let segments = path_segments(url)?;
        match segments.as_slice() {
            [.., id, slug] if !id.is_empty() && !slug.is_empty() => Ok(Self {
                vehicle_id: id.clone(),
                vehicle_slug: slug.clone(),
            }),
            _ => Err(invalid_url(url, "expected /<vehicle_id>/<vehicle_slug> at the end of the path")),
        }
    }

    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}.{}",
            CACHE_PREFIX, self.vehicle_id, self.vehicle_slug, CACHE_EXTENSION
        )
    }
}

/// Vehicle name column: the last path segment.
pub fn vehicle_name(url: &str) -> Result<String> {
    path_segments(url)?
        .pop()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| invalid_url(url, "empty last path segment"))
}

fn path_segments(url: &str) -> Result<Vec<String>> {
    let parsed = Url::parse(url).map_err(|e| invalid_url(url, &e.to_string()))?;
    Ok(parsed
        .path_segments()
        .map(|segments| segments.map(str::to_string).collect())
        .unwrap_or_default())
}

fn invalid_url(url: &str, reason: &str) -> ScrapeError {
    ScrapeError::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cache,
    Network,
}

pub struct Resolved {
    pub document: Document,
    pub origin: Origin,
}

/// Loads detail pages from the on-disk cache, fetching and caching them on
/// a miss. A cached page is never fetched again.
pub struct DocumentSource {
    client: Client,
    cache_dir: PathBuf,
}

impl DocumentSource {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self::with_client(cache_dir, Client::new())
    }

    pub fn with_client(cache_dir: impl Into<PathBuf>, client: Client) -> Self {
        Self {
            client,
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_path(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(key.file_name())
    }

    pub async fn resolve(&self, url: &str) -> Result<Resolved> {
        let key = CacheKey::from_url(url)?;
        let path = self.cache_path(&key);

        if path.exists() {
            info!("Reading from file: {}", path.display());
            let content = tokio::fs::read_to_string(&path).await?;
            return Ok(Resolved {
                document: Document::parse(&content),
                origin: Origin::Cache,
            });
        }

        info!("Fetching from internet and saving to file: {}", path.display());
        let document = self.fetch(url).await?;
        self.store(&path, &document.prettify()).await?;
        Ok(Resolved {
            document,
            origin: Origin::Network,
        })
    }

    async fn fetch(&self, url: &str) -> Result<Document> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            error!(%url, %status, "Failed to retrieve data from the website");
            return Err(ScrapeError::FetchFailed {
                url: url.to_string(),
                status,
            });
        }
        let body = response.text().await?;
        Ok(Document::parse(&body))
    }

    async fn store(&self, path: &Path, content: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.cache_dir).await?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

// ── Tests ──
