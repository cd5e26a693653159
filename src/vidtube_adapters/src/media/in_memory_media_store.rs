use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;
use vidtube_core::{MediaAsset, MediaFile, MediaStore, MediaStoreError};

#[derive(Default)]
struct Inner {
    assets: HashMap<String, MediaAsset>,
    fail_uploads_named: HashSet<String>,
    fail_deletes: bool,
    uploads: usize,
    deleted: Vec<String>,
}

/// Media store that keeps assets in memory.
///
/// Used when no external provider is configured, and by tests, which can
/// make uploads of particular file names fail.
#[derive(Default, Clone)]
pub struct InMemoryMediaStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fail_uploads_named(&self, file_name: impl Into<String>) {
        self.inner
            .write()
            .await
            .fail_uploads_named
            .insert(file_name.into());
    }

    pub async fn fail_deletes(&self, fail: bool) {
        self.inner.write().await.fail_deletes = fail;
    }

    pub async fn contains(&self, asset_id: &str) -> bool {
        self.inner.read().await.assets.contains_key(asset_id)
    }

    pub async fn asset_count(&self) -> usize {
        self.inner.read().await.assets.len()
    }

    pub async fn upload_count(&self) -> usize {
        self.inner.read().await.uploads
    }

    pub async fn deleted(&self) -> Vec<String> {
        self.inner.read().await.deleted.clone()
    }
}

#[async_trait::async_trait]
impl MediaStore for InMemoryMediaStore {
    #[tracing::instrument(name = "Storing media in memory", skip_all, fields(file_name = %file.file_name))]
    async fn upload(&self, file: MediaFile) -> Result<MediaAsset, MediaStoreError> {
        let mut inner = self.inner.write().await;
        if inner.fail_uploads_named.contains(&file.file_name) {
            return Err(MediaStoreError::UploadFailed(format!(
                "upload of {} rejected",
                file.file_name
            )));
        }

        let asset_id = Uuid::new_v4().to_string();
        let asset = MediaAsset {
            url: format!("memory://media/{asset_id}/{}", file.file_name),
            asset_id: asset_id.clone(),
        };
        inner.uploads += 1;
        inner.assets.insert(asset_id, asset.clone());
        Ok(asset)
    }

    #[tracing::instrument(name = "Deleting media from memory", skip(self))]
    async fn delete(&self, asset_id: &str) -> Result<(), MediaStoreError> {
        let mut inner = self.inner.write().await;
        if inner.fail_deletes {
            return Err(MediaStoreError::DeleteFailed(asset_id.to_string()));
        }

        inner.assets.remove(asset_id);
        inner.deleted.push(asset_id.to_string());
        Ok(())
    }
}
