use vidtube_core::{RefreshToken, TokenIssuer, TokenPair, UserStore};

use crate::session::SessionManager;

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("Invalid refresh token")]
    InvalidToken,
}

/// Exchanges a refresh token for a new pair.
pub struct RefreshUseCase<'a, U, I>
where
    U: UserStore,
    I: TokenIssuer,
{
    user_store: &'a U,
    token_issuer: &'a I,
}

impl<'a, U, I> RefreshUseCase<'a, U, I>
where
    U: UserStore,
    I: TokenIssuer,
{
    pub fn new(user_store: &'a U, token_issuer: &'a I) -> Self {
        Self {
            user_store,
            token_issuer,
        }
    }

    /// The presented token must verify and equal the stored one. Every failure
    /// is reported as [`RefreshError::InvalidToken`].
    #[tracing::instrument(name = "RefreshUseCase::execute", skip_all)]
    pub async fn execute(&self, presented: RefreshToken) -> Result<TokenPair, RefreshError> {
        let user_id = self
            .token_issuer
            .verify_refresh_token(&presented)
            .map_err(|e| {
                tracing::warn!(error = %e, "Refresh token failed verification");
                RefreshError::InvalidToken
            })?;

        let sessions = SessionManager::new(self.user_store, self.token_issuer);

        let matches = sessions.matches(&user_id, &presented).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to look up stored refresh token");
            RefreshError::InvalidToken
        })?;
        if !matches {
            tracing::warn!(%user_id, "Refresh token is expired or used");
            return Err(RefreshError::InvalidToken);
        }

        sessions
            .rotate_from(&user_id, &presented)
            .await
            .map_err(|e| {
                tracing::warn!(%user_id, error = %e, "Refresh token rotation failed");
                RefreshError::InvalidToken
            })
    }
}
