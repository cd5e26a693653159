use vidtube_core::{
    MediaAsset, MediaFile, MediaStore, MediaStoreError, UserError, UserId, UserProfile, UserStore,
    UserStoreError,
};

use crate::compensation::{CompensatingAction, Compensations};

/// Which of the user's images is being replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSlot {
    Avatar,
    CoverImage,
}

impl MediaSlot {
    pub fn label(&self) -> &'static str {
        match self {
            MediaSlot::Avatar => "avatar",
            MediaSlot::CoverImage => "cover image",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateMediaError {
    #[error("{0}")]
    Validation(#[from] UserError),
    #[error("Upload failed: {0}")]
    Upload(MediaStoreError),
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Uploads a new avatar or cover image and points the user record at it.
///
/// The previous asset is deleted once the record is updated. If the update
/// fails, the freshly uploaded asset is deleted instead.
pub struct UpdateMediaUseCase<'a, U, M>
where
    U: UserStore,
    M: MediaStore,
{
    user_store: &'a U,
    media_store: &'a M,
}

impl<'a, U, M> UpdateMediaUseCase<'a, U, M>
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

    #[tracing::instrument(name = "UpdateMediaUseCase::execute", skip(self, file))]
    pub async fn execute(
        &self,
        user_id: UserId,
        slot: MediaSlot,
        file: Option<MediaFile>,
    ) -> Result<UserProfile, UpdateMediaError> {
        let file = file.ok_or(UserError::MissingFile(slot.label()))?;
        if file.is_empty() {
            return Err(UserError::EmptyFile(slot.label()).into());
        }

        let uploaded = self
            .media_store
            .upload(file)
            .await
            .map_err(UpdateMediaError::Upload)?;

        let mut compensations = Compensations::new();
        compensations.push(CompensatingAction::DeleteAsset {
            label: slot.label(),
            asset_id: uploaded.asset_id.clone(),
        });

        let previous = match self.store(&user_id, slot, uploaded).await {
            Ok(previous) => previous,
            Err(e) => {
                compensations.unwind(self.user_store, self.media_store).await;
                return Err(e.into());
            }
        };

        if let Some(previous) = previous {
            if let Err(e) = self.media_store.delete(&previous.asset_id).await {
                tracing::warn!(asset_id = %previous.asset_id, error = %e, "Failed to delete replaced asset");
            }
        }

        Ok(self.user_store.get_profile(&user_id).await?)
    }

    async fn store(
        &self,
        user_id: &UserId,
        slot: MediaSlot,
        asset: MediaAsset,
    ) -> Result<Option<MediaAsset>, UserStoreError> {
        match slot {
            MediaSlot::Avatar => self.user_store.set_avatar(user_id, asset).await.map(Some),
            MediaSlot::CoverImage => self.user_store.set_cover_image(user_id, asset).await,
        }
    }
}
