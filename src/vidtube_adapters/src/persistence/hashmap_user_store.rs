use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use vidtube_core::{
    AccountDetails, ChannelProfile, Email, MediaAsset, NewUser, Password, RefreshToken, User,
    UserId, UserProfile, UserStore, UserStoreError, Username, Video, VideoId, VideoOwner,
    WatchHistoryEntry,
};

use crate::crypto::compute_password_hash;

#[derive(Default)]
struct Inner {
    users: HashMap<UserId, User>,
    videos: HashMap<VideoId, Video>,
    // (subscriber, channel)
    subscriptions: HashSet<(UserId, UserId)>,
}

/// In-memory user store for local development and tests.
///
/// Also holds the videos and subscriptions that channel profiles and watch
/// history are aggregated from.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    inner: Arc<RwLock<Inner>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_video(
        &self,
        owner: UserId,
        title: impl Into<String>,
        thumbnail_url: impl Into<String>,
    ) -> Result<VideoId, UserStoreError> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&owner) {
            return Err(UserStoreError::UserNotFound);
        }

        let id = VideoId::new();
        inner.videos.insert(
            id,
            Video {
                id,
                owner,
                title: title.into(),
                thumbnail_url: thumbnail_url.into(),
            },
        );
        Ok(id)
    }

    pub async fn subscribe(&self, subscriber: UserId, channel: UserId) -> Result<(), UserStoreError> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&subscriber) || !inner.users.contains_key(&channel) {
            return Err(UserStoreError::UserNotFound);
        }
        inner.subscriptions.insert((subscriber, channel));
        Ok(())
    }

    pub async fn record_watch(&self, user_id: UserId, video_id: VideoId) -> Result<(), UserStoreError> {
        let mut inner = self.inner.write().await;
        if !inner.videos.contains_key(&video_id) {
            return Err(UserStoreError::UnexpectedError(format!(
                "video {video_id} does not exist"
            )));
        }
        let user = inner
            .users
            .get_mut(&user_id)
            .ok_or(UserStoreError::UserNotFound)?;
        user.watch_history.push(video_id);
        Ok(())
    }
}

impl Inner {
    fn user_mut(&mut self, id: &UserId) -> Result<&mut User, UserStoreError> {
        self.users.get_mut(id).ok_or(UserStoreError::UserNotFound)
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, user: NewUser) -> Result<UserId, UserStoreError> {
        let password_hash = compute_password_hash(user.password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let mut inner = self.inner.write().await;
        if inner
            .users
            .values()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(UserStoreError::UserAlreadyExists);
        }

        let now = Utc::now();
        let id = UserId::new();
        inner.users.insert(
            id,
            User {
                id,
                username: user.username,
                email: user.email,
                full_name: user.full_name,
                password_hash,
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
        let inner = self.inner.read().await;
        Ok(inner.users.values().any(|u| &u.username == username))
    }

    async fn email_exists(&self, email: &Email) -> Result<bool, UserStoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().any(|u| &u.email == email))
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError> {
        let inner = self.inner.read().await;
        inner
            .users
            .get(id)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let inner = self.inner.read().await;
        inner
            .users
            .values()
            .find(|u| &u.email == email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_profile(&self, id: &UserId) -> Result<UserProfile, UserStoreError> {
        let inner = self.inner.read().await;
        inner
            .users
            .get(id)
            .map(User::profile)
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn set_refresh_token(
        &self,
        id: &UserId,
        token: Option<RefreshToken>,
    ) -> Result<(), UserStoreError> {
        let mut inner = self.inner.write().await;
        inner.user_mut(id)?.refresh_token = token;
        Ok(())
    }

    async fn swap_refresh_token(
        &self,
        id: &UserId,
        current: &RefreshToken,
        next: RefreshToken,
    ) -> Result<bool, UserStoreError> {
        let mut inner = self.inner.write().await;
        let user = inner.user_mut(id)?;
        if user.refresh_token.as_ref() != Some(current) {
            return Ok(false);
        }
        user.refresh_token = Some(next);
        Ok(true)
    }

    async fn set_new_password(
        &self,
        id: &UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let mut inner = self.inner.write().await;
        let user = inner.user_mut(id)?;
        user.password_hash = password_hash;
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn update_account_details(
        &self,
        id: &UserId,
        details: AccountDetails,
    ) -> Result<UserProfile, UserStoreError> {
        let mut inner = self.inner.write().await;
        if inner
            .users
            .values()
            .any(|u| u.id != *id && u.email == details.email)
        {
            return Err(UserStoreError::UserAlreadyExists);
        }

        let user = inner.user_mut(id)?;
        user.full_name = details.full_name;
        user.email = details.email;
        user.updated_at = Utc::now();
        Ok(user.profile())
    }

    async fn set_avatar(
        &self,
        id: &UserId,
        avatar: MediaAsset,
    ) -> Result<MediaAsset, UserStoreError> {
        let mut inner = self.inner.write().await;
        let user = inner.user_mut(id)?;
        user.updated_at = Utc::now();
        Ok(std::mem::replace(&mut user.avatar, avatar))
    }

    async fn set_cover_image(
        &self,
        id: &UserId,
        cover_image: MediaAsset,
    ) -> Result<Option<MediaAsset>, UserStoreError> {
        let mut inner = self.inner.write().await;
        let user = inner.user_mut(id)?;
        user.updated_at = Utc::now();
        Ok(user.cover_image.replace(cover_image))
    }

    async fn channel_profile(
        &self,
        username: &Username,
        viewer: Option<&UserId>,
    ) -> Result<ChannelProfile, UserStoreError> {
        let inner = self.inner.read().await;
        let channel = inner
            .users
            .values()
            .find(|u| &u.username == username)
            .ok_or(UserStoreError::UserNotFound)?;

        let subscribers_count = inner
            .subscriptions
            .iter()
            .filter(|(_, c)| *c == channel.id)
            .count() as u64;
        let channels_subscribed_to_count = inner
            .subscriptions
            .iter()
            .filter(|(s, _)| *s == channel.id)
            .count() as u64;
        let is_subscribed =
            viewer.is_some_and(|viewer| inner.subscriptions.contains(&(*viewer, channel.id)));

        Ok(ChannelProfile {
            username: channel.username.clone(),
            full_name: channel.full_name.clone(),
            email: channel.email.clone(),
            avatar: channel.avatar.clone(),
            cover_image: channel.cover_image.clone(),
            subscribers_count,
            channels_subscribed_to_count,
            is_subscribed,
        })
    }

    async fn watch_history(&self, id: &UserId) -> Result<Vec<WatchHistoryEntry>, UserStoreError> {
        let inner = self.inner.read().await;
        let user = inner.users.get(id).ok_or(UserStoreError::UserNotFound)?;

        // Videos or owners that no longer exist are skipped.
        Ok(user
            .watch_history
            .iter()
            .filter_map(|video_id| inner.videos.get(video_id))
            .filter_map(|video| {
                let owner = inner.users.get(&video.owner)?;
                Some(WatchHistoryEntry {
                    video_id: video.id,
                    title: video.title.clone(),
                    thumbnail_url: video.thumbnail_url.clone(),
                    owner: VideoOwner {
                        username: owner.username.clone(),
                        full_name: owner.full_name.clone(),
                        avatar_url: owner.avatar.url.clone(),
                    },
                })
            })
            .collect())
    }

    async fn delete_user(&self, id: &UserId) -> Result<User, UserStoreError> {
        let mut inner = self.inner.write().await;
        let user = inner.users.remove(id).ok_or(UserStoreError::UserNotFound)?;
        inner
            .subscriptions
            .retain(|(subscriber, channel)| subscriber != id && channel != id);
        inner.videos.retain(|_, video| video.owner != *id);
        Ok(user)
    }
}
