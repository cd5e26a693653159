use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    channel::{ChannelProfile, WatchHistoryEntry},
    email::Email,
    media::MediaAsset,
    password::Password,
    tokens::RefreshToken,
    user::{AccountDetails, NewUser, User, UserProfile},
    user_id::UserId,
    username::Username,
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Persistence port for user records.
///
/// Partial updates (`set_refresh_token`, `swap_refresh_token`,
/// `set_new_password`, `set_avatar`, `set_cover_image`) touch only the named
/// fields and skip whole-record validation.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user, hashing its password first.
    ///
    /// Returns `UserAlreadyExists` when the username or email is taken.
    async fn add_user(&self, user: NewUser) -> Result<UserId, UserStoreError>;

    async fn username_exists(&self, username: &Username) -> Result<bool, UserStoreError>;

    async fn email_exists(&self, email: &Email) -> Result<bool, UserStoreError>;

    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError>;

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError>;

    async fn get_profile(&self, id: &UserId) -> Result<UserProfile, UserStoreError>;

    /// Overwrites the stored refresh token. `None` clears it.
    async fn set_refresh_token(
        &self,
        id: &UserId,
        token: Option<RefreshToken>,
    ) -> Result<(), UserStoreError>;

    /// Replaces the stored refresh token only if it still equals `current`.
    ///
    /// Returns `false` when the stored value differs, and
    /// `UserStoreError::UserNotFound` when there is no user with `id`.
    async fn swap_refresh_token(
        &self,
        id: &UserId,
        current: &RefreshToken,
        next: RefreshToken,
    ) -> Result<bool, UserStoreError>;

    async fn set_new_password(
        &self,
        id: &UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError>;

    async fn update_account_details(
        &self,
        id: &UserId,
        details: AccountDetails,
    ) -> Result<UserProfile, UserStoreError>;

    /// Stores a new avatar and returns the one it replaced.
    async fn set_avatar(&self, id: &UserId, avatar: MediaAsset)
    -> Result<MediaAsset, UserStoreError>;

    /// Stores a new cover image and returns the one it replaced, if any.
    async fn set_cover_image(
        &self,
        id: &UserId,
        cover_image: MediaAsset,
    ) -> Result<Option<MediaAsset>, UserStoreError>;

    async fn channel_profile(
        &self,
        username: &Username,
        viewer: Option<&UserId>,
    ) -> Result<ChannelProfile, UserStoreError>;

    async fn watch_history(&self, id: &UserId) -> Result<Vec<WatchHistoryEntry>, UserStoreError>;

    /// Removes the user and returns the deleted record.
    async fn delete_user(&self, id: &UserId) -> Result<User, UserStoreError>;
}
