//! Core library for pokecache.
//!
//! - `api`: fetch pipeline, error taxonomy and the production `ApiClient`
//! - `service`: the `CatalogService` capability set
//! - `controller`: observable catalog state, search debounce, detail cache
//! - `models`: catalog items and detail records
//! - `cache`: in-memory detail cache
//! - `utils`: formatting and matching helpers

pub mod api;
pub mod cache;
pub mod controller;
pub mod models;
pub mod service;
pub mod utils;

pub use api::{ApiClient, CatalogError, CatalogSource};
pub use controller::{CatalogController, ControllerUpdate};
pub use models::{CatalogPage, DetailRecord, Item};
pub use service::CatalogService;
pub use utils::format_tenths;
