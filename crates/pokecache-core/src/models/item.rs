use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_ITEM_KEY: AtomicU64 = AtomicU64::new(1);

/// Opaque, process-unique key for list reconciliation.
///
/// Carries no meaning beyond identity within one run and is never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey(u64);

impl ItemKey {
    pub fn next() -> Self {
        Self(NEXT_ITEM_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ItemKey {
    fn default() -> Self {
        Self::next()
    }
}

/// A catalog listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(skip)]
    pub key: ItemKey,
    pub name: String,
    pub url: String,
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.url == other.url
    }
}

impl Eq for Item {}

impl Item {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key: ItemKey::next(),
            name: name.into(),
            url: url.into(),
        }
    }

    /// Numeric id from the last path segment of `url`, or 0.
    pub fn item_id(&self) -> i64 {
        item_id_from_url(&self.url)
    }

    /// Name with the first letter upper-cased, e.g. "pikachu" -> "Pikachu"
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Parse the trailing numeric path segment of a reference URL.
///
/// A single trailing `/` is ignored. Empty or non-numeric segments yield 0.
pub fn item_id_from_url(url: &str) -> i64 {
    let trimmed = url.strip_suffix('/').unwrap_or(url);
    trimmed
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
        .unwrap_or(0)
}

/// Wire/file format for the bulk item list. `count` is advisory only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub count: u64,
    pub results: Vec<Item>,
}
