//! In-memory caching of detail records.
//!
//! This module provides the `DetailCache` used by the controller to avoid
//! refetching records. The cache lives for the process lifetime only and is
//! rebuilt on every run.

pub mod detail;

pub use detail::{CachedData, DetailCache};
