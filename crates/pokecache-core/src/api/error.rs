use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("HTTP error: status {0}")]
    HttpError(u16),

    #[error("Failed to decode response: {0}")]
    DecodingError(#[source] serde_json::Error),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Failed to read resource: {0}")]
    ResourceReadFailed(String),

    #[error("Failed to decode resource {0}: {1}")]
    ResourceDecodeFailed(String, #[source] serde_json::Error),
}

/// Maximum length for error response bodies in log output
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl CatalogError {
    /// Truncate a response body to avoid logging excessive data
    pub(crate) fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    /// Human-readable message suitable for a dismissible status line.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::InvalidUrl(_) => "Could not build the request address.".to_string(),
            CatalogError::InvalidResponse(_) => {
                "The server could not be reached. Check your connection and try again.".to_string()
            }
            CatalogError::HttpError(404) => "That entry was not found on the server.".to_string(),
            CatalogError::HttpError(429) => {
                "Too many requests - please wait before retrying.".to_string()
            }
            CatalogError::HttpError(code @ 500..=599) => {
                format!("The server had a problem (status {}). Try again later.", code)
            }
            CatalogError::HttpError(code) => format!("The server refused the request (status {}).", code),
            CatalogError::DecodingError(_) => "The server sent data we could not understand.".to_string(),
            CatalogError::ResourceNotFound(name) => format!("Catalog file {} is missing.", name),
            CatalogError::ResourceReadFailed(name) => format!("Catalog file {} could not be read.", name),
            CatalogError::ResourceDecodeFailed(name, _) => {
                format!("Catalog file {} is corrupt.", name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_body_short() {
        assert_eq!(CatalogError::truncate_body("not found"), "not found");
    }

    #[test]
    fn test_truncate_body_long() {
        let body = "x".repeat(600);
        let truncated = CatalogError::truncate_body(&body);
        assert!(truncated.starts_with(&"x".repeat(500)));
        assert!(truncated.ends_with("(truncated, 600 total bytes)"));
    }

    #[test]
    fn test_truncate_body_respects_char_boundary() {
        // 'é' is two bytes, so byte 500 lands mid-character
        let body = format!("a{}", "é".repeat(300));
        let truncated = CatalogError::truncate_body(&body);
        assert!(truncated.contains("truncated"));
    }

    #[test]
    fn test_user_message_http() {
        assert_eq!(
            CatalogError::HttpError(404).user_message(),
            "That entry was not found on the server."
        );
        assert!(CatalogError::HttpError(503).user_message().contains("503"));
        assert!(CatalogError::HttpError(418).user_message().contains("418"));
    }

    #[test]
    fn test_user_message_resource() {
        let msg = CatalogError::ResourceNotFound("pokemon.json".to_string()).user_message();
        assert!(msg.contains("pokemon.json"));
    }

    #[test]
    fn test_display_keeps_status() {
        assert_eq!(CatalogError::HttpError(404).to_string(), "HTTP error: status 404");
    }
}
