//! Generic fetch-and-decode pipeline.
//!
//! Every network read goes through [`fetch_json`]: a single GET, a status
//! check, then a JSON decode into the caller's expected type. Each failure
//! keeps its own [`CatalogError`] variant so callers can tell a dead
//! connection from a 404 from a schema mismatch.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::CatalogError;

/// Parse an absolute URL, classifying failures as [`CatalogError::InvalidUrl`].
pub fn parse_url(raw: &str) -> Result<Url, CatalogError> {
    Url::parse(raw).map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", raw, e)))
}

/// Issue a GET for `url` and decode the body as `T`.
///
/// No retries and no timeout beyond the client's own configuration.
pub async fn fetch_json<T: DeserializeOwned>(client: &Client, url: Url) -> Result<T, CatalogError> {
    debug!(url = %url, "GET");

    let response = client.get(url.clone()).send().await.map_err(|e| {
        warn!(url = %url, error = %e, "Request failed before a response was received");
        CatalogError::InvalidResponse(e.to_string())
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(
            url = %url,
            status = status.as_u16(),
            body = %CatalogError::truncate_body(&body),
            "Non-success status"
        );
        return Err(CatalogError::HttpError(status.as_u16()));
    }

    let bytes = response.bytes().await.map_err(|e| {
        warn!(url = %url, error = %e, "Failed to read response body");
        CatalogError::InvalidResponse(e.to_string())
    })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        warn!(url = %url, error = %e, "Failed to decode response body");
        CatalogError::DecodingError(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_valid() {
        let url = parse_url("https://pokeapi.co/api/v2/pokemon/25").unwrap();
        assert_eq!(url.path(), "/api/v2/pokemon/25");
    }

    #[test]
    fn test_parse_url_invalid() {
        assert!(matches!(parse_url("not a url"), Err(CatalogError::InvalidUrl(_))));
        assert!(matches!(parse_url(""), Err(CatalogError::InvalidUrl(_))));
    }
}
