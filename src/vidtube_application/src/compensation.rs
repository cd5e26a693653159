use vidtube_core::{MediaStore, UserId, UserStore};

/// An undo step recorded after a side effect succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompensatingAction {
    DeleteAsset {
        label: &'static str,
        asset_id: String,
    },
    DeleteUser(UserId),
}

/// Undo steps for a multi-stage write, replayed newest first.
#[derive(Debug, Default)]
pub struct Compensations {
    actions: Vec<CompensatingAction>,
}

impl Compensations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: CompensatingAction) {
        self.actions.push(action);
    }

    /// Runs every recorded action in reverse order and returns how many
    /// failed. A failing action never stops the ones after it.
    #[tracing::instrument(name = "Compensations::unwind", skip_all, fields(pending = self.actions.len()))]
    pub async fn unwind<U, M>(mut self, user_store: &U, media_store: &M) -> usize
    where
        U: UserStore,
        M: MediaStore,
    {
        let mut failures = 0;

        while let Some(action) = self.actions.pop() {
            match action {
                CompensatingAction::DeleteAsset { label, asset_id } => {
                    match media_store.delete(&asset_id).await {
                        Ok(()) => tracing::info!(label, %asset_id, "Deleted uploaded asset"),
                        Err(e) => {
                            failures += 1;
                            tracing::error!(label, %asset_id, error = %e, "Failed to delete uploaded asset");
                        }
                    }
                }
                CompensatingAction::DeleteUser(user_id) => {
                    match user_store.delete_user(&user_id).await {
                        Ok(_) => tracing::info!(%user_id, "Deleted partially created user"),
                        Err(e) => {
                            failures += 1;
                            tracing::error!(%user_id, error = %e, "Failed to delete partially created user");
                        }
                    }
                }
            }
        }

        failures
    }
}
