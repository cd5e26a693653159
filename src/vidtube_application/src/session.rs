use thiserror::Error;
use vidtube_core::{
    RefreshToken, TokenError, TokenIssuer, TokenPair, UserId, UserProfile, UserStore,
    UserStoreError,
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
    #[error("Refresh token was superseded")]
    Superseded,
}

/// Binds issued refresh tokens to user records.
///
/// A user holds at most one refresh token. Every rotation replaces it, so any
/// previously issued refresh token stops matching.
pub struct SessionManager<'a, U, I>
where
    U: UserStore,
    I: TokenIssuer,
{
    user_store: &'a U,
    token_issuer: &'a I,
}

impl<'a, U, I> SessionManager<'a, U, I>
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

    /// Issues a fresh pair and overwrites the stored refresh token.
    #[tracing::instrument(name = "SessionManager::rotate", skip(self))]
    pub async fn rotate(&self, user_id: &UserId) -> Result<TokenPair, SessionError> {
        let profile = self.user_store.get_profile(user_id).await?;
        let pair = self.issue_pair(&profile)?;

        self.user_store
            .set_refresh_token(user_id, Some(pair.refresh_token.clone()))
            .await?;

        Ok(pair)
    }

    /// Like [`rotate`](Self::rotate), but the stored token is only replaced
    /// while it still equals `presented`.
    ///
    /// Of several rotations racing on the same token, one wins and the others
    /// get [`SessionError::Superseded`].
    #[tracing::instrument(name = "SessionManager::rotate_from", skip(self, presented))]
    pub async fn rotate_from(
        &self,
        user_id: &UserId,
        presented: &RefreshToken,
    ) -> Result<TokenPair, SessionError> {
        let profile = self.user_store.get_profile(user_id).await?;
        let pair = self.issue_pair(&profile)?;

        let swapped = self
            .user_store
            .swap_refresh_token(user_id, presented, pair.refresh_token.clone())
            .await?;

        if !swapped {
            return Err(SessionError::Superseded);
        }

        Ok(pair)
    }

    #[tracing::instrument(name = "SessionManager::invalidate", skip(self))]
    pub async fn invalidate(&self, user_id: &UserId) -> Result<(), SessionError> {
        self.user_store.set_refresh_token(user_id, None).await?;
        Ok(())
    }

    /// A missing user matches nothing.
    #[tracing::instrument(name = "SessionManager::matches", skip(self, presented))]
    pub async fn matches(
        &self,
        user_id: &UserId,
        presented: &RefreshToken,
    ) -> Result<bool, SessionError> {
        match self.user_store.get_user(user_id).await {
            Ok(user) => Ok(user.refresh_token_matches(presented)),
            Err(UserStoreError::UserNotFound) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn issue_pair(&self, profile: &UserProfile) -> Result<TokenPair, SessionError> {
        Ok(TokenPair {
            access_token: self.token_issuer.issue_access_token(profile)?,
            refresh_token: self.token_issuer.issue_refresh_token(&profile.id)?,
        })
    }
}
