//! Network and data-source access.
//!
//! This module provides the fetch pipeline used for every remote read and
//! the `ApiClient`, the production `CatalogService` that reads the bundled
//! catalog and fetches detail records from PokeAPI.

pub mod client;
pub mod error;
pub mod fetch;

pub use client::{ApiClient, CatalogSource, DEFAULT_API_BASE_URL};
pub use error::CatalogError;
pub use fetch::{fetch_json, parse_url};
