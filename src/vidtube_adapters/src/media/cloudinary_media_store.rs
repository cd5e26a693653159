use chrono::Utc;
use reqwest::{
    Client, Url,
    multipart::{Form, Part},
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use vidtube_core::{MediaAsset, MediaFile, MediaStore, MediaStoreError};

use crate::config::CloudinarySettings;

const SIGNATURE_ALGORITHM: &str = "sha256";

/// Media store backed by the Cloudinary upload API.
pub struct CloudinaryMediaStore {
    http_client: Client,
    base_url: String,
    cloud_name: String,
    api_key: String,
    api_secret: Secret<String>,
}

impl CloudinaryMediaStore {
    pub fn new(
        base_url: String,
        cloud_name: String,
        api_key: String,
        api_secret: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            cloud_name,
            api_key,
            api_secret,
        }
    }

    pub fn from_settings(settings: &CloudinarySettings) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(settings.timeout()).build()?;

        Ok(Self::new(
            settings.base_url.clone(),
            settings.cloud_name.clone(),
            settings.api_key.clone(),
            settings.api_secret.clone(),
            http_client,
        ))
    }

    fn endpoint(&self, action: &str) -> Result<Url, String> {
        let base = Url::parse(&self.base_url).map_err(|e| e.to_string())?;
        base.join(&format!("/v1_1/{}/{action}", self.cloud_name))
            .map_err(|e| e.to_string())
    }
}

/// Signs request parameters: sorted `key=value` pairs joined with `&`,
/// followed by the API secret, hashed with SHA-256.
fn sign(params: &[(&str, &str)], api_secret: &Secret<String>) -> String {
    let mut params = params.to_vec();
    params.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{:x}",
        Sha256::digest(format!("{to_sign}{}", api_secret.expose_secret()).as_bytes())
    )
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[async_trait::async_trait]
impl MediaStore for CloudinaryMediaStore {
    #[tracing::instrument(name = "Uploading media to Cloudinary", skip_all, fields(file_name = %file.file_name, len = file.len()))]
    async fn upload(&self, file: MediaFile) -> Result<MediaAsset, MediaStoreError> {
        let url = self
            .endpoint("image/upload")
            .map_err(MediaStoreError::UploadFailed)?;

        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign(&[("timestamp", timestamp.as_str())], &self.api_secret);

        let mut part = Part::bytes(file.data).file_name(file.file_name);
        if let Some(content_type) = file.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;
        }

        let form = Form::new()
            .part("file", part)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature_algorithm", SIGNATURE_ALGORITHM)
            .text("signature", signature);

        let response: UploadResponse = self
            .http_client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?
            .json()
            .await
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;

        let url = response
            .secure_url
            .or(response.url)
            .ok_or_else(|| MediaStoreError::UploadFailed("response carried no url".to_string()))?;

        tracing::info!(asset_id = %response.public_id, "File uploaded");

        Ok(MediaAsset {
            url,
            asset_id: response.public_id,
        })
    }

    /// Only an `ok` result counts. `not found` means nothing was removed,
    /// for example when the id names no image asset.
    #[tracing::instrument(name = "Deleting media from Cloudinary", skip(self))]
    async fn delete(&self, asset_id: &str) -> Result<(), MediaStoreError> {
        let url = self
            .endpoint("image/destroy")
            .map_err(MediaStoreError::DeleteFailed)?;

        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign(
            &[("public_id", asset_id), ("timestamp", timestamp.as_str())],
            &self.api_secret,
        );

        let params = [
            ("public_id", asset_id),
            ("api_key", self.api_key.as_str()),
            ("timestamp", timestamp.as_str()),
            ("signature_algorithm", SIGNATURE_ALGORITHM),
            ("signature", signature.as_str()),
        ];

        let response: DestroyResponse = self
            .http_client
            .post(url)
            .form(&params)
            .send()
            .await
            .map_err(|e| MediaStoreError::DeleteFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| MediaStoreError::DeleteFailed(e.to_string()))?
            .json()
            .await
            .map_err(|e| MediaStoreError::DeleteFailed(e.to_string()))?;

        match response.result.as_str() {
            "ok" => Ok(()),
            "not found" => Err(MediaStoreError::DeleteFailed(format!(
                "no image asset {asset_id} to destroy"
            ))),
            other => Err(MediaStoreError::DeleteFailed(format!(
                "unexpected destroy result: {other}"
            ))),
        }
    }
}
