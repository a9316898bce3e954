//! The capability set the controller depends on.

use async_trait::async_trait;

use crate::api::CatalogError;
use crate::models::{DetailRecord, Item};

/// Source of catalog listings and per-item detail records.
///
/// `ApiClient` is the production implementation; tests substitute doubles.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Load the full item list from the local catalog. Never touches the network.
    async fn list_items(&self) -> Result<Vec<Item>, CatalogError>;

    /// Fetch one detail record by id from the remote endpoint.
    async fn get_detail(&self, id: i64) -> Result<DetailRecord, CatalogError>;
}
