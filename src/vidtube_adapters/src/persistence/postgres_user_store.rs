use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;
use vidtube_core::{
    AccountDetails, ChannelProfile, Email, FullName, MediaAsset, NewUser, Password, PasswordHash,
    RefreshToken, User, UserId, UserProfile, UserStore, UserStoreError, Username, VideoId,
    VideoOwner, WatchHistoryEntry,
};

use crate::crypto::compute_password_hash;

const USER_COLUMNS: &str = r#"
    id, username, email, full_name, password_hash,
    avatar_url, avatar_asset_id, cover_image_url, cover_image_asset_id,
    refresh_token, created_at, updated_at
"#;

pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresUserStore { pool }
    }

    async fn load_user(&self, row: Option<UserRow>) -> Result<User, UserStoreError> {
        let row = row.ok_or(UserStoreError::UserNotFound)?;
        let watch_history = self.fetch_watch_history_ids(row.id).await?;
        row.into_user(watch_history)
    }

    async fn fetch_watch_history_ids(&self, user_id: Uuid) -> Result<Vec<VideoId>, UserStoreError> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            r#"
                SELECT video_id
                FROM watch_history
                WHERE user_id = $1
                ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(ids.into_iter().map(VideoId::from).collect())
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    full_name: String,
    password_hash: String,
    avatar_url: String,
    avatar_asset_id: String,
    cover_image_url: Option<String>,
    cover_image_asset_id: Option<String>,
    refresh_token: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self, watch_history: Vec<VideoId>) -> Result<User, UserStoreError> {
        Ok(User {
            id: UserId::from(self.id),
            username: Username::parse(&self.username).map_err(unexpected)?,
            email: Email::parse(&self.email).map_err(unexpected)?,
            full_name: FullName::parse(&self.full_name).map_err(unexpected)?,
            password_hash: PasswordHash::new(Secret::new(self.password_hash)),
            avatar: MediaAsset {
                url: self.avatar_url,
                asset_id: self.avatar_asset_id,
            },
            cover_image: media_asset(self.cover_image_url, self.cover_image_asset_id),
            refresh_token: self.refresh_token.map(RefreshToken::new),
            watch_history,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn media_asset(url: Option<String>, asset_id: Option<String>) -> Option<MediaAsset> {
    match (url, asset_id) {
        (Some(url), Some(asset_id)) => Some(MediaAsset { url, asset_id }),
        _ => None,
    }
}

fn unexpected(e: impl std::fmt::Display) -> UserStoreError {
    UserStoreError::UnexpectedError(e.to_string())
}

// Only unique violations (username, email) mean the user exists.
fn map_write_error(e: sqlx::Error) -> UserStoreError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => UserStoreError::UserAlreadyExists,
        _ => UserStoreError::UnexpectedError(e.to_string()),
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: NewUser) -> Result<UserId, UserStoreError> {
        let password_hash = compute_password_hash(user.password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let id = UserId::new();
        let (cover_url, cover_asset_id) = match user.cover_image {
            Some(cover) => (Some(cover.url), Some(cover.asset_id)),
            None => (None, None),
        };

        sqlx::query(
            r#"
                INSERT INTO users (
                    id, username, email, full_name, password_hash,
                    avatar_url, avatar_asset_id, cover_image_url, cover_image_asset_id
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(id.as_uuid())
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.full_name.as_str())
        .bind(password_hash.as_ref().expose_secret())
        .bind(&user.avatar.url)
        .bind(&user.avatar.asset_id)
        .bind(cover_url)
        .bind(cover_asset_id)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(id)
    }

    #[tracing::instrument(name = "Checking username in PostgreSQL", skip_all)]
    async fn username_exists(&self, username: &Username) -> Result<bool, UserStoreError> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
            .bind(username.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)
    }

    #[tracing::instrument(name = "Checking email in PostgreSQL", skip_all)]
    async fn email_exists(&self, email: &Email) -> Result<bool, UserStoreError> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(email.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        self.load_user(row).await
    }

    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        self.load_user(row).await
    }

    async fn get_profile(&self, id: &UserId) -> Result<UserProfile, UserStoreError> {
        self.get_user(id).await.map(|user| user.profile())
    }

    #[tracing::instrument(name = "Set refresh token", skip_all)]
    async fn set_refresh_token(
        &self,
        id: &UserId,
        token: Option<RefreshToken>,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query("UPDATE users SET refresh_token = $1 WHERE id = $2")
            .bind(token.map(RefreshToken::into_string))
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Swap refresh token", skip_all)]
    async fn swap_refresh_token(
        &self,
        id: &UserId,
        current: &RefreshToken,
        next: RefreshToken,
    ) -> Result<bool, UserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET refresh_token = $1
                WHERE id = $2 AND refresh_token = $3
            "#,
        )
        .bind(next.into_string())
        .bind(id.as_uuid())
        .bind(current.as_str())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 1 {
            return Ok(true);
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        if !exists {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(false)
    }

    #[tracing::instrument(name = "Set new password", skip_all)]
    async fn set_new_password(
        &self,
        id: &UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let result = sqlx::query(
            r#"
                UPDATE users
                SET password_hash = $1, updated_at = now()
                WHERE id = $2
            "#,
        )
        .bind(password_hash.as_ref().expose_secret())
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Update account details", skip_all)]
    async fn update_account_details(
        &self,
        id: &UserId,
        details: AccountDetails,
    ) -> Result<UserProfile, UserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET full_name = $1, email = $2, updated_at = now()
                WHERE id = $3
            "#,
        )
        .bind(details.full_name.as_str())
        .bind(details.email.as_str())
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        self.get_profile(id).await
    }

    #[tracing::instrument(name = "Set avatar", skip_all)]
    async fn set_avatar(
        &self,
        id: &UserId,
        avatar: MediaAsset,
    ) -> Result<MediaAsset, UserStoreError> {
        let row: Option<(String, String)> = sqlx::query_as(
            r#"
                UPDATE users AS u
                SET avatar_url = $1, avatar_asset_id = $2, updated_at = now()
                FROM (SELECT id, avatar_url, avatar_asset_id FROM users WHERE id = $3 FOR UPDATE) AS old
                WHERE u.id = old.id
                RETURNING old.avatar_url, old.avatar_asset_id
            "#,
        )
        .bind(avatar.url)
        .bind(avatar.asset_id)
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let (url, asset_id) = row.ok_or(UserStoreError::UserNotFound)?;
        Ok(MediaAsset { url, asset_id })
    }

    #[tracing::instrument(name = "Set cover image", skip_all)]
    async fn set_cover_image(
        &self,
        id: &UserId,
        cover_image: MediaAsset,
    ) -> Result<Option<MediaAsset>, UserStoreError> {
        let row: Option<(Option<String>, Option<String>)> = sqlx::query_as(
            r#"
                UPDATE users AS u
                SET cover_image_url = $1, cover_image_asset_id = $2, updated_at = now()
                FROM (SELECT id, cover_image_url, cover_image_asset_id FROM users WHERE id = $3 FOR UPDATE) AS old
                WHERE u.id = old.id
                RETURNING old.cover_image_url, old.cover_image_asset_id
            "#,
        )
        .bind(cover_image.url)
        .bind(cover_image.asset_id)
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let (url, asset_id) = row.ok_or(UserStoreError::UserNotFound)?;
        Ok(media_asset(url, asset_id))
    }

    #[tracing::instrument(name = "Aggregating channel profile", skip_all)]
    async fn channel_profile(
        &self,
        username: &Username,
        viewer: Option<&UserId>,
    ) -> Result<ChannelProfile, UserStoreError> {
        let row: PgRow = sqlx::query(
            r#"
                SELECT
                    u.username, u.email, u.full_name,
                    u.avatar_url, u.avatar_asset_id, u.cover_image_url, u.cover_image_asset_id,
                    (SELECT COUNT(*) FROM subscriptions s WHERE s.channel_id = u.id) AS subscribers_count,
                    (SELECT COUNT(*) FROM subscriptions s WHERE s.subscriber_id = u.id) AS channels_subscribed_to_count,
                    EXISTS (
                        SELECT 1 FROM subscriptions s
                        WHERE s.channel_id = u.id AND s.subscriber_id = $2
                    ) AS is_subscribed
                FROM users u
                WHERE u.username = $1
            "#,
        )
        .bind(username.as_str())
        .bind(viewer.map(|v| *v.as_uuid()))
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or(UserStoreError::UserNotFound)?;

        let subscribers_count: i64 = row.try_get("subscribers_count").map_err(unexpected)?;
        let channels_subscribed_to_count: i64 = row
            .try_get("channels_subscribed_to_count")
            .map_err(unexpected)?;

        Ok(ChannelProfile {
            username: Username::parse(row.try_get("username").map_err(unexpected)?)
                .map_err(unexpected)?,
            email: Email::parse(row.try_get("email").map_err(unexpected)?).map_err(unexpected)?,
            full_name: FullName::parse(row.try_get("full_name").map_err(unexpected)?)
                .map_err(unexpected)?,
            avatar: MediaAsset {
                url: row.try_get("avatar_url").map_err(unexpected)?,
                asset_id: row.try_get("avatar_asset_id").map_err(unexpected)?,
            },
            cover_image: media_asset(
                row.try_get("cover_image_url").map_err(unexpected)?,
                row.try_get("cover_image_asset_id").map_err(unexpected)?,
            ),
            subscribers_count: subscribers_count.max(0) as u64,
            channels_subscribed_to_count: channels_subscribed_to_count.max(0) as u64,
            is_subscribed: row.try_get("is_subscribed").map_err(unexpected)?,
        })
    }

    #[tracing::instrument(name = "Aggregating watch history", skip_all)]
    async fn watch_history(&self, id: &UserId) -> Result<Vec<WatchHistoryEntry>, UserStoreError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        if !exists {
            return Err(UserStoreError::UserNotFound);
        }

        let rows = sqlx::query(
            r#"
                SELECT v.id AS video_id, v.title, v.thumbnail_url,
                       o.username, o.full_name, o.avatar_url
                FROM watch_history w
                JOIN videos v ON v.id = w.video_id
                JOIN users o ON o.id = v.owner_id
                WHERE w.user_id = $1
                ORDER BY w.id
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        rows.into_iter()
            .map(|row| {
                Ok(WatchHistoryEntry {
                    video_id: VideoId::from(row.try_get::<Uuid, _>("video_id").map_err(unexpected)?),
                    title: row.try_get("title").map_err(unexpected)?,
                    thumbnail_url: row.try_get("thumbnail_url").map_err(unexpected)?,
                    owner: VideoOwner {
                        username: Username::parse(row.try_get("username").map_err(unexpected)?)
                            .map_err(unexpected)?,
                        full_name: FullName::parse(row.try_get("full_name").map_err(unexpected)?)
                            .map_err(unexpected)?,
                        avatar_url: row.try_get("avatar_url").map_err(unexpected)?,
                    },
                })
            })
            .collect()
    }

    #[tracing::instrument(name = "Delete user from user store", skip_all)]
    async fn delete_user(&self, id: &UserId) -> Result<User, UserStoreError> {
        let user = self.get_user(id).await?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(user)
    }
}
