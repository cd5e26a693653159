//! Hand-written port doubles shared by the use-case tests.

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use async_trait::async_trait;
use chrono::Utc;
use secrecy::{ExposeSecret, Secret};
use vidtube_core::{
    AccessClaims, AccessToken, AccountDetails, ChannelProfile, CredentialVerifier, Email,
    FullName, MediaAsset, MediaFile, MediaStore, MediaStoreError, NewUser, Password,
    PasswordHash, RefreshToken, TokenError, TokenIssuer, User, UserId, UserProfile, UserStore,
    UserStoreError, Username, WatchHistoryEntry,
};

pub fn hash_of(password: &Password) -> PasswordHash {
    PasswordHash::new(Secret::new(format!(
        "hashed:{}",
        password.as_ref().expose_secret()
    )))
}

pub fn password(raw: &str) -> Password {
    Password::try_from(Secret::new(raw.to_string())).unwrap()
}

pub fn asset(id: &str) -> MediaAsset {
    MediaAsset {
        url: format!("https://media.test/{id}"),
        asset_id: id.to_string(),
    }
}

pub fn sample_user(username: &str, email: &str, raw_password: &str) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(),
        username: Username::parse(username).unwrap(),
        email: Email::parse(email).unwrap(),
        full_name: FullName::parse("Sample User").unwrap(),
        password_hash: hash_of(&password(raw_password)),
        avatar: asset(&format!("{username}-avatar")),
        cover_image: None,
        refresh_token: None,
        watch_history: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

#[derive(Default)]
pub struct MockUserStore {
    users: Mutex<HashMap<UserId, User>>,
    pub fail_add: AtomicBool,
    pub fail_get_profile: AtomicBool,
    pub fail_update: AtomicBool,
    pub add_calls: AtomicU64,
    /// Inserted right before the next `add_user` runs, as if a concurrent
    /// registration had won.
    pub concurrent_insert: Mutex<Option<User>>,
}

impl MockUserStore {
    pub fn with_user(user: User) -> Self {
        let store = Self::default();
        store.insert(user);
        store
    }

    pub fn insert(&self, user: User) -> UserId {
        let id = user.id;
        self.users.lock().unwrap().insert(id, user);
        id
    }

    pub fn user(&self, id: &UserId) -> Option<User> {
        self.users.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn check_update(&self) -> Result<(), UserStoreError> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(UserStoreError::UnexpectedError("update failed".to_string()));
        }
        Ok(())
    }

    fn with_user_mut<T>(
        &self,
        id: &UserId,
        f: impl FnOnce(&mut User) -> T,
    ) -> Result<T, UserStoreError> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        Ok(f(user))
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn add_user(&self, user: NewUser) -> Result<UserId, UserStoreError> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_add.load(Ordering::SeqCst) {
            return Err(UserStoreError::UnexpectedError("insert failed".to_string()));
        }
        if let Some(winner) = self.concurrent_insert.lock().unwrap().take() {
            self.insert(winner);
        }

        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(UserStoreError::UserAlreadyExists);
        }

        let now = Utc::now();
        let id = UserId::new();
        users.insert(
            id,
            User {
                id,
                username: user.username,
                email: user.email,
                full_name: user.full_name,
                password_hash: hash_of(&user.password),
                avatar: user.avatar,
                cover_image: user.cover_image,
                refresh_token: None,
                watch_history: Vec::new(),
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn username_exists(&self, username: &Username) -> Result<bool, UserStoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| &u.username == username))
    }

    async fn email_exists(&self, email: &Email) -> Result<bool, UserStoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| &u.email == email))
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError> {
        self.user(id).ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|u| &u.email == email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_profile(&self, id: &UserId) -> Result<UserProfile, UserStoreError> {
        if self.fail_get_profile.load(Ordering::SeqCst) {
            return Err(UserStoreError::UnexpectedError("read failed".to_string()));
        }
        self.get_user(id).await.map(|u| u.profile())
    }

    async fn set_refresh_token(
        &self,
        id: &UserId,
        token: Option<RefreshToken>,
    ) -> Result<(), UserStoreError> {
        self.with_user_mut(id, |u| u.refresh_token = token)
    }

    async fn swap_refresh_token(
        &self,
        id: &UserId,
        current: &RefreshToken,
        next: RefreshToken,
    ) -> Result<bool, UserStoreError> {
        self.with_user_mut(id, |u| {
            if u.refresh_token.as_ref() == Some(current) {
                u.refresh_token = Some(next);
                true
            } else {
                false
            }
        })
    }

    async fn set_new_password(
        &self,
        id: &UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        self.check_update()?;
        self.with_user_mut(id, |u| u.password_hash = hash_of(&new_password))
    }

    async fn update_account_details(
        &self,
        id: &UserId,
        details: AccountDetails,
    ) -> Result<UserProfile, UserStoreError> {
        self.check_update()?;
        if self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| u.id != *id && u.email == details.email)
        {
            return Err(UserStoreError::UserAlreadyExists);
        }
        self.with_user_mut(id, |u| {
            u.full_name = details.full_name;
            u.email = details.email;
            u.profile()
        })
    }

    async fn set_avatar(
        &self,
        id: &UserId,
        avatar: MediaAsset,
    ) -> Result<MediaAsset, UserStoreError> {
        self.check_update()?;
        self.with_user_mut(id, |u| std::mem::replace(&mut u.avatar, avatar))
    }

    async fn set_cover_image(
        &self,
        id: &UserId,
        cover_image: MediaAsset,
    ) -> Result<Option<MediaAsset>, UserStoreError> {
        self.check_update()?;
        self.with_user_mut(id, |u| u.cover_image.replace(cover_image))
    }

    async fn channel_profile(
        &self,
        username: &Username,
        _viewer: Option<&UserId>,
    ) -> Result<ChannelProfile, UserStoreError> {
        let users = self.users.lock().unwrap();
        let user = users
            .values()
            .find(|u| &u.username == username)
            .ok_or(UserStoreError::UserNotFound)?;
        Ok(ChannelProfile {
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            cover_image: user.cover_image.clone(),
            subscribers_count: 0,
            channels_subscribed_to_count: 0,
            is_subscribed: false,
        })
    }

    async fn watch_history(&self, id: &UserId) -> Result<Vec<WatchHistoryEntry>, UserStoreError> {
        self.get_user(id).await.map(|_| Vec::new())
    }

    async fn delete_user(&self, id: &UserId) -> Result<User, UserStoreError> {
        self.users
            .lock()
            .unwrap()
            .remove(id)
            .ok_or(UserStoreError::UserNotFound)
    }
}

#[derive(Default)]
pub struct MockMediaStore {
    fail_on: Option<String>,
    pub fail_delete: AtomicBool,
    uploads: Mutex<Vec<MediaAsset>>,
    deletes: Mutex<Vec<String>>,
}

impl MockMediaStore {
    /// Rejects uploads of files with the given name.
    pub fn failing_on(file_name: &str) -> Self {
        Self {
            fail_on: Some(file_name.to_string()),
            ..Self::default()
        }
    }

    pub fn uploads(&self) -> Vec<MediaAsset> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaStore for MockMediaStore {
    async fn upload(&self, file: MediaFile) -> Result<MediaAsset, MediaStoreError> {
        if self.fail_on.as_deref() == Some(file.file_name.as_str()) {
            return Err(MediaStoreError::UploadFailed("rejected".to_string()));
        }
        let mut uploads = self.uploads.lock().unwrap();
        let uploaded = asset(&format!("{}-{}", uploads.len(), file.file_name));
        uploads.push(uploaded.clone());
        Ok(uploaded)
    }

    async fn delete(&self, asset_id: &str) -> Result<(), MediaStoreError> {
        self.deletes.lock().unwrap().push(asset_id.to_string());
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(MediaStoreError::DeleteFailed(asset_id.to_string()));
        }
        Ok(())
    }
}

/// Issues `access:<id>:<n>` and `refresh:<id>:<n>` tokens. Any other refresh
/// token string (for example `expired:<id>`) fails verification.
#[derive(Default)]
pub struct MockTokenIssuer {
    counter: AtomicU64,
}

impl MockTokenIssuer {
    fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst)
    }

    fn parse(token: &str, kind: &str) -> Result<UserId, TokenError> {
        let mut parts = token.split(':');
        match (parts.next(), parts.next()) {
            (Some(prefix), Some(id)) if prefix == kind => {
                id.parse().map_err(|_| TokenError::Invalid)
            }
            _ => Err(TokenError::Invalid),
        }
    }
}

impl TokenIssuer for MockTokenIssuer {
    fn issue_access_token(&self, user: &UserProfile) -> Result<AccessToken, TokenError> {
        Ok(AccessToken::new(format!("access:{}:{}", user.id, self.next())))
    }

    fn issue_refresh_token(&self, user_id: &UserId) -> Result<RefreshToken, TokenError> {
        Ok(RefreshToken::new(format!("refresh:{user_id}:{}", self.next())))
    }

    fn verify_refresh_token(&self, token: &RefreshToken) -> Result<UserId, TokenError> {
        Self::parse(token.as_str(), "refresh")
    }

    fn verify_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let sub = Self::parse(token, "access")?;
        Ok(AccessClaims {
            sub,
            email: String::new(),
            username: String::new(),
            full_name: String::new(),
            jti: token.to_string(),
            iat: 0,
            exp: 0,
        })
    }
}

/// Accepts a password when the stored hash is `hashed:<password>`.
pub struct MockCredentialVerifier;

#[async_trait]
impl CredentialVerifier for MockCredentialVerifier {
    async fn verify(&self, candidate: &Password, hash: &PasswordHash) -> bool {
        hash.as_ref().expose_secret() == hash_of(candidate).as_ref().expose_secret()
    }
}
