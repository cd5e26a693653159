use vidtube_core::{TokenIssuer, UserId, UserStore};

use crate::session::{SessionError, SessionManager};

#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error("Session error: {0}")]
    SessionError(#[from] SessionError),
}

/// Logout use case - clears the stored refresh token
pub struct LogoutUseCase<'a, U, I>
where
    U: UserStore,
    I: TokenIssuer,
{
    user_store: &'a U,
    token_issuer: &'a I,
}

impl<'a, U, I> LogoutUseCase<'a, U, I>
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

    #[tracing::instrument(name = "LogoutUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: UserId) -> Result<(), LogoutError> {
        SessionManager::new(self.user_store, self.token_issuer)
            .invalidate(&user_id)
            .await?;

        Ok(())
    }
}
