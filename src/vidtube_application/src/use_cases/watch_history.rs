use vidtube_core::{UserId, UserStore, UserStoreError, WatchHistoryEntry};

#[derive(Debug, thiserror::Error)]
pub enum WatchHistoryError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

pub struct WatchHistoryUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> WatchHistoryUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    /// Entries come back in watch order.
    #[tracing::instrument(name = "WatchHistoryUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        user_id: UserId,
    ) -> Result<Vec<WatchHistoryEntry>, WatchHistoryError> {
        Ok(self.user_store.watch_history(&user_id).await?)
    }
}
