use vidtube_core::{MediaStore, UserId, UserStore, UserStoreError};

/// Error types for delete account use case
#[derive(Debug, thiserror::Error)]
pub enum DeleteAccountError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Delete account use case - removes the user, then its media
pub struct DeleteAccountUseCase<'a, U, M>
where
    U: UserStore,
    M: MediaStore,
{
    user_store: &'a U,
    media_store: &'a M,
}

impl<'a, U, M> DeleteAccountUseCase<'a, U, M>
where
    U: UserStore,
    M: MediaStore,
{
    pub fn new(user_store: &'a U, media_store: &'a M) -> Self {
        Self {
            user_store,
            media_store,
        }
    }

    /// Asset deletion is best effort: failures are logged and do not undo the
    /// account removal.
    #[tracing::instrument(name = "DeleteAccountUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: UserId) -> Result<(), DeleteAccountError> {
        let user = self.user_store.delete_user(&user_id).await?;

        let assets = std::iter::once(user.avatar).chain(user.cover_image);
        for asset in assets {
            if let Err(e) = self.media_store.delete(&asset.asset_id).await {
                tracing::warn!(asset_id = %asset.asset_id, error = %e, "Failed to delete asset of removed account");
            }
        }

        Ok(())
    }
}
