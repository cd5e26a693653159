use async_trait::async_trait;

/// Validates the credentials attached to an incoming request.
///
/// Used by middleware guarding authenticated routes. The validator receives
/// the request parts (headers, method, URI, extensions) rather than the whole
/// request, so bodies that are not `Sync` never get in the way.
#[async_trait]
pub trait AuthValidator: Clone + Send + Sync + 'static {
    /// Data extracted from a valid token and handed to route handlers.
    type Claims: Clone + Send + Sync + 'static;

    /// Typically `http::request::Parts`.
    type RequestParts;

    type Error: std::error::Error + Send + Sync + 'static;

    /// # Errors
    ///
    /// Returns an error if no token is present, or the token is malformed,
    /// wrongly signed or expired.
    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error>;
}
