use vidtube_core::{
    CandidateProfile, Email, MediaStore, MediaStoreError, NewUser, RegistrationRequest,
    UserError, UserProfile, UserStore, UserStoreError, Username,
};

use crate::compensation::{CompensatingAction, Compensations};

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("{0}")]
    Validation(#[from] UserError),
    #[error("User with this username already exists")]
    UsernameTaken,
    #[error("User with this email already exists")]
    EmailTaken,
    #[error("User with this username or email already exists")]
    AlreadyExists,
    #[error("Avatar upload failed: {0}")]
    AvatarUpload(MediaStoreError),
    #[error("Cover image upload failed: {0}")]
    CoverImageUpload(MediaStoreError),
    #[error("Failed to persist user: {0}")]
    Persistence(UserStoreError),
}

/// Registration use case.
///
/// Uploads the avatar and optional cover image, then inserts the user. When a
/// later stage fails, everything an earlier stage created is removed again, so
/// a failed registration leaves neither orphaned assets nor a half-created
/// user behind.
pub struct RegisterUseCase<'a, U, M>
where
    U: UserStore,
    M: MediaStore,
{
    user_store: &'a U,
    media_store: &'a M,
}

impl<'a, U, M> RegisterUseCase<'a, U, M>
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

    /// # Returns
    /// The sanitized profile of the created user.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(&self, request: RegistrationRequest) -> Result<UserProfile, RegisterError> {
        let candidate = CandidateProfile::try_from(request)?;

        if self
            .user_store
            .username_exists(&candidate.username)
            .await
            .map_err(RegisterError::Persistence)?
        {
            return Err(RegisterError::UsernameTaken);
        }
        if self
            .user_store
            .email_exists(&candidate.email)
            .await
            .map_err(RegisterError::Persistence)?
        {
            return Err(RegisterError::EmailTaken);
        }

        let mut compensations = Compensations::new();

        let avatar = self
            .media_store
            .upload(candidate.avatar)
            .await
            .map_err(RegisterError::AvatarUpload)?;
        compensations.push(CompensatingAction::DeleteAsset {
            label: "avatar",
            asset_id: avatar.asset_id.clone(),
        });

        let cover_image = match candidate.cover_image {
            Some(file) => match self.media_store.upload(file).await {
                Ok(asset) => {
                    compensations.push(CompensatingAction::DeleteAsset {
                        label: "cover image",
                        asset_id: asset.asset_id.clone(),
                    });
                    Some(asset)
                }
                Err(e) => {
                    compensations.unwind(self.user_store, self.media_store).await;
                    return Err(RegisterError::CoverImageUpload(e));
                }
            },
            None => None,
        };

        let username = candidate.username.clone();
        let email = candidate.email.clone();
        let new_user = NewUser {
            username: candidate.username,
            email: candidate.email,
            full_name: candidate.full_name,
            password: candidate.password,
            avatar,
            cover_image,
        };

        match self.persist(new_user, &mut compensations).await {
            Ok(profile) => {
                tracing::info!(user_id = %profile.id, "User registered");
                Ok(profile)
            }
            Err(e) => {
                tracing::error!(error = %e, "Registration failed after upload, compensating");
                compensations.unwind(self.user_store, self.media_store).await;
                match e {
                    UserStoreError::UserAlreadyExists => {
                        Err(self.identify_conflict(&username, &email).await)
                    }
                    other => Err(RegisterError::Persistence(other)),
                }
            }
        }
    }

    async fn persist(
        &self,
        new_user: NewUser,
        compensations: &mut Compensations,
    ) -> Result<UserProfile, UserStoreError> {
        let user_id = self.user_store.add_user(new_user).await?;
        compensations.push(CompensatingAction::DeleteUser(user_id));

        self.user_store.get_profile(&user_id).await
    }

    /// The insert lost a race with another registration. Looks again to tell
    /// which field collided.
    async fn identify_conflict(&self, username: &Username, email: &Email) -> RegisterError {
        if let Ok(true) = self.user_store.username_exists(username).await {
            return RegisterError::UsernameTaken;
        }
        if let Ok(true) = self.user_store.email_exists(email).await {
            return RegisterError::EmailTaken;
        }
        RegisterError::AlreadyExists
    }
}
