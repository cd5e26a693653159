use vidtube_core::{AccountDetails, UserId, UserProfile, UserStore, UserStoreError};

#[derive(Debug, thiserror::Error)]
pub enum UpdateAccountError {
    #[error("Email is already in use")]
    EmailTaken,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

impl From<UserStoreError> for UpdateAccountError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => UpdateAccountError::EmailTaken,
            other => UpdateAccountError::UserStoreError(other),
        }
    }
}

/// Replaces the full name and email of a user.
pub struct UpdateAccountUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> UpdateAccountUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "UpdateAccountUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        user_id: UserId,
        details: AccountDetails,
    ) -> Result<UserProfile, UpdateAccountError> {
        let current = self.user_store.get_user(&user_id).await?;

        if current.email != details.email && self.user_store.email_exists(&details.email).await? {
            return Err(UpdateAccountError::EmailTaken);
        }

        Ok(self
            .user_store
            .update_account_details(&user_id, details)
            .await?)
    }
}
