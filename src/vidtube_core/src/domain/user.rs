use chrono::{DateTime, Utc};
use secrecy::Secret;
use serde::Serialize;

use super::{
    channel::VideoId,
    email::Email,
    full_name::FullName,
    media::{MediaAsset, MediaFile},
    password::{Password, PasswordHash},
    tokens::RefreshToken,
    user_error::UserError,
    user_id::UserId,
    username::Username,
};

/// A user record as held by the user store.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub full_name: FullName,
    pub password_hash: PasswordHash,
    pub avatar: MediaAsset,
    pub cover_image: Option<MediaAsset>,
    pub refresh_token: Option<RefreshToken>,
    pub watch_history: Vec<VideoId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Sanitized view of the record, without password hash or refresh token.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            avatar: self.avatar.clone(),
            cover_image: self.cover_image.clone(),
            watch_history: self.watch_history.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn refresh_token_matches(&self, presented: &RefreshToken) -> bool {
        self.refresh_token.as_ref() == Some(presented)
    }
}

/// The user as exposed to clients and embedded in access tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub full_name: FullName,
    pub avatar: MediaAsset,
    pub cover_image: Option<MediaAsset>,
    pub watch_history: Vec<VideoId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user about to be inserted. The store hashes `password` before it is
/// persisted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: Email,
    pub full_name: FullName,
    pub password: Password,
    pub avatar: MediaAsset,
    pub cover_image: Option<MediaAsset>,
}

/// Raw registration input. Every field may be absent; presence is checked
/// when converting into a [`CandidateProfile`].
#[derive(Debug, Default)]
pub struct RegistrationRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<Secret<String>>,
    pub avatar: Option<MediaFile>,
    pub cover_image: Option<MediaFile>,
}

#[derive(Debug)]
pub struct CandidateProfile {
    pub full_name: FullName,
    pub email: Email,
    pub username: Username,
    pub password: Password,
    pub avatar: MediaFile,
    pub cover_image: Option<MediaFile>,
}

impl TryFrom<RegistrationRequest> for CandidateProfile {
    type Error = UserError;

    fn try_from(request: RegistrationRequest) -> Result<Self, Self::Error> {
        let full_name = FullName::parse(request.full_name.as_deref().unwrap_or_default())?;
        let email = Email::parse(request.email.as_deref().unwrap_or_default())?;
        let username = Username::parse(request.username.as_deref().unwrap_or_default())?;
        let password = Password::parse(
            request.password.unwrap_or_else(|| Secret::new(String::new())),
            "password",
        )?;

        let avatar = request.avatar.ok_or(UserError::MissingFile("avatar"))?;
        if avatar.is_empty() {
            return Err(UserError::EmptyFile("avatar"));
        }

        // An empty cover image part is treated as "no cover image".
        let cover_image = request.cover_image.filter(|file| !file.is_empty());

        Ok(Self {
            full_name,
            email,
            username,
            password,
            avatar,
            cover_image,
        })
    }
}

/// Validated input for the account details update.
#[derive(Debug, Clone)]
pub struct AccountDetails {
    pub full_name: FullName,
    pub email: Email,
}

impl AccountDetails {
    pub fn parse(full_name: Option<&str>, email: Option<&str>) -> Result<Self, UserError> {
        Ok(Self {
            full_name: FullName::parse(full_name.unwrap_or_default())?,
            email: Email::parse(email.unwrap_or_default())?,
        })
    }
}
