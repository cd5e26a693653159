use vidtube_core::{CredentialVerifier, Password, UserId, UserStore, UserStoreError};

/// Error types for change password use case
#[derive(Debug, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("Invalid old password")]
    InvalidCredentials,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Change password use case - verifies the old password and stores a new hash
pub struct ChangePasswordUseCase<'a, U, C>
where
    U: UserStore,
    C: CredentialVerifier,
{
    user_store: &'a U,
    credential_verifier: &'a C,
}

impl<'a, U, C> ChangePasswordUseCase<'a, U, C>
where
    U: UserStore,
    C: CredentialVerifier,
{
    pub fn new(user_store: &'a U, credential_verifier: &'a C) -> Self {
        Self {
            user_store,
            credential_verifier,
        }
    }

    #[tracing::instrument(name = "ChangePasswordUseCase::execute", skip(self, old_password, new_password))]
    pub async fn execute(
        &self,
        user_id: UserId,
        old_password: Password,
        new_password: Password,
    ) -> Result<(), ChangePasswordError> {
        let user = self.user_store.get_user(&user_id).await?;

        if !self
            .credential_verifier
            .verify(&old_password, &user.password_hash)
            .await
        {
            return Err(ChangePasswordError::InvalidCredentials);
        }

        self.user_store
            .set_new_password(&user_id, new_password)
            .await?;

        Ok(())
    }
}
