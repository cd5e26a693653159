use std::sync::Arc;

use async_trait::async_trait;
use axum_extra::extract::CookieJar;
use http::{HeaderMap, header::AUTHORIZATION};
use thiserror::Error;
use vidtube_core::{AccessClaims, AuthValidator, TokenError, TokenIssuer};

use crate::config::ACCESS_TOKEN_COOKIE_NAME;

#[derive(Debug, Error)]
pub enum TokenAuthError {
    #[error("Unauthorized request")]
    MissingToken,
    #[error("Invalid access token")]
    InvalidToken,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl From<TokenError> for TokenAuthError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Invalid => TokenAuthError::InvalidToken,
            TokenError::Unexpected(e) => TokenAuthError::UnexpectedError(e),
        }
    }
}

/// Validates the access token of a request against the issuer's access
/// secret. No storage is consulted.
pub struct AccessTokenValidator<I> {
    token_issuer: Arc<I>,
}

impl<I> AccessTokenValidator<I> {
    pub fn new(token_issuer: Arc<I>) -> Self {
        Self { token_issuer }
    }
}

impl<I> Clone for AccessTokenValidator<I> {
    fn clone(&self) -> Self {
        Self {
            token_issuer: Arc::clone(&self.token_issuer),
        }
    }
}

#[async_trait]
impl<I: TokenIssuer + 'static> AuthValidator for AccessTokenValidator<I> {
    type Claims = AccessClaims;
    type RequestParts = http::request::Parts;
    type Error = TokenAuthError;

    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error> {
        let cookie_jar = CookieJar::from_headers(&parts.headers);
        let token = extract_access_token(&cookie_jar, &parts.headers)?;

        Ok(self.token_issuer.verify_access_token(&token)?)
    }
}

/// The `accessToken` cookie wins over an `Authorization: Bearer` header.
pub fn extract_access_token(jar: &CookieJar, headers: &HeaderMap) -> Result<String, TokenAuthError> {
    if let Some(cookie) = jar.get(ACCESS_TOKEN_COOKIE_NAME) {
        if !cookie.value().is_empty() {
            return Ok(cookie.value().to_owned());
        }
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .ok_or(TokenAuthError::MissingToken)
}
