use vidtube_core::{
    CredentialVerifier, Email, Password, TokenIssuer, TokenPair, UserProfile, UserStore,
    UserStoreError,
};

use crate::session::{SessionError, SessionManager};

/// Successful login: the sanitized user plus a fresh token pair.
#[derive(Debug)]
pub struct LoginResponse {
    pub user: UserProfile,
    pub tokens: TokenPair,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("User does not exist")]
    UserNotFound,
    #[error("Invalid user credentials")]
    InvalidCredentials,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Session error: {0}")]
    SessionError(#[from] SessionError),
}

impl From<UserStoreError> for LoginError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => LoginError::UserNotFound,
            other => LoginError::UserStoreError(other),
        }
    }
}

/// Login use case - checks credentials and starts a session
pub struct LoginUseCase<'a, U, C, I>
where
    U: UserStore,
    C: CredentialVerifier,
    I: TokenIssuer,
{
    user_store: &'a U,
    credential_verifier: &'a C,
    token_issuer: &'a I,
}

impl<'a, U, C, I> LoginUseCase<'a, U, C, I>
where
    U: UserStore,
    C: CredentialVerifier,
    I: TokenIssuer,
{
    pub fn new(user_store: &'a U, credential_verifier: &'a C, token_issuer: &'a I) -> Self {
        Self {
            user_store,
            credential_verifier,
            token_issuer,
        }
    }

    /// Execute the login use case
    ///
    /// A wrong password issues no tokens and leaves the stored refresh token
    /// untouched.
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<LoginResponse, LoginError> {
        let user = self.user_store.get_user_by_email(&email).await?;

        if !self
            .credential_verifier
            .verify(&password, &user.password_hash)
            .await
        {
            return Err(LoginError::InvalidCredentials);
        }

        let tokens = SessionManager::new(self.user_store, self.token_issuer)
            .rotate(&user.id)
            .await?;
        let user = self.user_store.get_profile(&user.id).await?;

        Ok(LoginResponse { user, tokens })
    }
}
