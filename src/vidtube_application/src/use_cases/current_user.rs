use vidtube_core::{UserId, UserProfile, UserStore, UserStoreError};

#[derive(Debug, thiserror::Error)]
pub enum CurrentUserError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

pub struct CurrentUserUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> CurrentUserUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "CurrentUserUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: UserId) -> Result<UserProfile, CurrentUserError> {
        Ok(self.user_store.get_profile(&user_id).await?)
    }
}
