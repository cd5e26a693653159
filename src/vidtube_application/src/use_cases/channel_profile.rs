use vidtube_core::{ChannelProfile, UserId, UserStore, UserStoreError, Username};

#[derive(Debug, thiserror::Error)]
pub enum ChannelProfileError {
    #[error("Channel does not exist")]
    ChannelNotFound,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

impl From<UserStoreError> for ChannelProfileError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => ChannelProfileError::ChannelNotFound,
            other => ChannelProfileError::UserStoreError(other),
        }
    }
}

/// Public channel view of a user, with subscription counts.
pub struct ChannelProfileUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> ChannelProfileUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    /// `viewer` is the authenticated caller, if any. It only affects
    /// `is_subscribed`.
    #[tracing::instrument(name = "ChannelProfileUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        username: Username,
        viewer: Option<UserId>,
    ) -> Result<ChannelProfile, ChannelProfileError> {
        Ok(self
            .user_store
            .channel_profile(&username, viewer.as_ref())
            .await?)
    }
}
