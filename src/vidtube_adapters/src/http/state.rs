use std::sync::Arc;

use crate::auth::{AccessTokenValidator, JwtTokenIssuer};
use crate::crypto::Argon2CredentialVerifier;

/// Shared state handed to every route.
pub struct AppState<U, M> {
    pub user_store: Arc<U>,
    pub media_store: Arc<M>,
    pub token_issuer: Arc<JwtTokenIssuer>,
    pub credential_verifier: Arc<Argon2CredentialVerifier>,
    pub access_validator: AccessTokenValidator<JwtTokenIssuer>,
    /// Whether session cookies carry the `Secure` attribute.
    pub secure_cookies: bool,
}

impl<U, M> AppState<U, M> {
    pub fn new(user_store: U, media_store: M, token_issuer: JwtTokenIssuer, secure_cookies: bool) -> Self {
        let token_issuer = Arc::new(token_issuer);
        Self {
            user_store: Arc::new(user_store),
            media_store: Arc::new(media_store),
            access_validator: AccessTokenValidator::new(Arc::clone(&token_issuer)),
            token_issuer,
            credential_verifier: Arc::new(Argon2CredentialVerifier),
            secure_cookies,
        }
    }
}

impl<U, M> Clone for AppState<U, M> {
    fn clone(&self) -> Self {
        Self {
            user_store: Arc::clone(&self.user_store),
            media_store: Arc::clone(&self.media_store),
            token_issuer: Arc::clone(&self.token_issuer),
            credential_verifier: Arc::clone(&self.credential_verifier),
            access_validator: self.access_validator.clone(),
            secure_cookies: self.secure_cookies,
        }
    }
}
