//! Production catalog service.
//!
//! `ApiClient` reads the item list from the bundled (or an on-disk) catalog
//! and fetches detail records from PokeAPI through the fetch pipeline.

use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::{fetch_json, parse_url, CatalogError};
use crate::models::{CatalogPage, DetailRecord, Item};
use crate::service::CatalogService;

// ============================================================================
// Constants
// ============================================================================

/// Base URL for the detail endpoint; records live at `<base>/<id>`.
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// Name reported in errors for the compiled-in catalog.
const BUNDLED_CATALOG_NAME: &str = "pokemon.json";

/// The first-generation catalog compiled into the binary.
const BUNDLED_CATALOG: &str = include_str!("../../data/pokemon.json");

/// Where the item list comes from.
#[derive(Debug, Clone, Default)]
pub enum CatalogSource {
    /// The catalog compiled into the binary.
    #[default]
    Bundled,
    /// A catalog JSON document on disk.
    File(PathBuf),
}

impl CatalogSource {
    /// Name used in resource errors.
    pub fn name(&self) -> String {
        match self {
            CatalogSource::Bundled => BUNDLED_CATALOG_NAME.to_string(),
            CatalogSource::File(path) => path.display().to_string(),
        }
    }

    async fn read(&self) -> Result<String, CatalogError> {
        match self {
            CatalogSource::Bundled => Ok(BUNDLED_CATALOG.to_string()),
            CatalogSource::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                warn!(path = %path.display(), error = %e, "Failed to read catalog file");
                if e.kind() == ErrorKind::NotFound {
                    CatalogError::ResourceNotFound(self.name())
                } else {
                    CatalogError::ResourceReadFailed(self.name())
                }
            }),
        }
    }
}

/// Catalog service backed by a local catalog and the PokeAPI detail endpoint.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    source: CatalogSource,
}

impl ApiClient {
    /// Create a client against the default base URL and the bundled catalog
    pub fn new() -> Result<Self> {
        Self::with_config(DEFAULT_API_BASE_URL, CatalogSource::Bundled)
    }

    /// Create a client with an explicit detail base URL and catalog source
    pub fn with_config(base_url: impl Into<String>, source: CatalogSource) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pokecache/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_client(client, base_url, source))
    }

    /// Wrap an existing HTTP client, sharing its connection pool
    pub fn with_client(client: Client, base_url: impl Into<String>, source: CatalogSource) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            source,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    fn detail_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), id)
    }
}

#[async_trait]
impl CatalogService for ApiClient {
    async fn list_items(&self) -> Result<Vec<Item>, CatalogError> {
        let contents = self.source.read().await?;
        let page: CatalogPage = serde_json::from_str(&contents).map_err(|e| {
            warn!(catalog = %self.source.name(), error = %e, "Failed to parse catalog");
            CatalogError::ResourceDecodeFailed(self.source.name(), e)
        })?;
        debug!(count = page.count, results = page.results.len(), "Catalog loaded");
        Ok(page.results)
    }

    async fn get_detail(&self, id: i64) -> Result<DetailRecord, CatalogError> {
        let url = parse_url(&self.detail_url(id))?;
        fetch_json(&self.client, url).await
    }
}
