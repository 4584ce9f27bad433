/// Errors from the marketplace API layer.
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    /// The marketplace answered 404 for the requested resource.
    #[error("{resource} {id} not found in marketplace")]
    NotFound { resource: &'static str, id: String },

    /// The access token was rejected (401 or 403 from the marketplace).
    #[error("Access token rejected: {0}")]
    Unauthorized(String),

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The marketplace returned another non-2xx status code.
    #[error("Marketplace API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The response body could not be interpreted.
    #[error("Unexpected marketplace response: {0}")]
    Decode(String),
}
