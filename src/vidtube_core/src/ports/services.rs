use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    media::{MediaAsset, MediaFile},
    password::{Password, PasswordHash},
    tokens::{AccessClaims, AccessToken, RefreshToken},
    user::UserProfile,
    user_id::UserId,
};

#[derive(Debug, Error)]
pub enum MediaStoreError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),
    #[error("Delete failed: {0}")]
    DeleteFailed(String),
}

/// Port for the external media-hosting service.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, file: MediaFile) -> Result<MediaAsset, MediaStoreError>;
    async fn delete(&self, asset_id: &str) -> Result<(), MediaStoreError>;
}

/// Checks a plaintext password against a stored hash.
///
/// Implementations never fail past this boundary: any internal error is a
/// mismatch.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, candidate: &Password, hash: &PasswordHash) -> bool;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    Invalid,
    #[error("Unexpected token error: {0}")]
    Unexpected(String),
}

/// Mints and verifies signed tokens. Holds no state beyond its configuration.
pub trait TokenIssuer: Send + Sync {
    fn issue_access_token(&self, user: &UserProfile) -> Result<AccessToken, TokenError>;

    fn issue_refresh_token(&self, user_id: &UserId) -> Result<RefreshToken, TokenError>;

    /// Signature and expiry check only; storage is not consulted.
    fn verify_refresh_token(&self, token: &RefreshToken) -> Result<UserId, TokenError>;

    fn verify_access_token(&self, token: &str) -> Result<AccessClaims, TokenError>;
}
