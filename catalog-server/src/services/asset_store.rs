//! Asset Store Client
//!
//! Pushes catalog images to the remote asset host and removes them by
//! storage id. Every upload is re-encoded to the fixed web delivery format
//! before it leaves the process, so the host only ever stores one codec.

use std::io::Cursor;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::AppError;

/// Encoding quality for hosted catalog images
const WEB_QUALITY: u8 = 80;

/// Errors from the transform step or the remote host
#[derive(Debug, Error)]
pub enum AssetStoreError {
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Image transform failed: {0}")]
    Transform(String),

    #[error("Asset host error: {0}")]
    Remote(String),

    #[error("Asset not found: {0}")]
    NotFound(String),
}

impl From<AssetStoreError> for AppError {
    fn from(err: AssetStoreError) -> Self {
        match err {
            AssetStoreError::InvalidImage(msg) => AppError::Validation(msg),
            AssetStoreError::NotFound(msg) => AppError::NotFound(msg),
            AssetStoreError::Transform(msg) | AssetStoreError::Remote(msg) => {
                AppError::Upload(msg)
            }
        }
    }
}

/// A stored asset on the remote host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAsset {
    pub url: String,
    pub public_id: String,
}

/// HTTP client for the asset host.
///
/// Requests carry a bounded timeout so a stalled host surfaces as an upload
/// failure instead of hanging the admin request.
#[derive(Clone, Debug)]
pub struct AssetStoreClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl AssetStoreClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build asset host HTTP client");
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Re-encode arbitrary input into the fixed web delivery format
    fn transcode(data: &[u8]) -> Result<Vec<u8>, AssetStoreError> {
        let img = image::load_from_memory(data)
            .map_err(|e| AssetStoreError::InvalidImage(e.to_string()))?;

        let mut buffer = Vec::new();
        {
            let mut cursor = Cursor::new(&mut buffer);
            let rgb_img = img.to_rgb8();
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, WEB_QUALITY);
            rgb_img
                .write_with_encoder(encoder)
                .map_err(|e| AssetStoreError::Transform(e.to_string()))?;
        }

        Ok(buffer)
    }

    /// Transform and push one image; returns the host's URL and storage id
    pub async fn upload(&self, data: &[u8]) -> Result<StoredAsset, AssetStoreError> {
        let encoded = Self::transcode(data)?;
        let size = encoded.len();

        let part = reqwest::multipart::Part::bytes(encoded)
            .file_name("image.jpg")
            .mime_str("image/jpeg")
            .map_err(|e| AssetStoreError::Remote(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let mut request = self
            .http
            .post(format!("{}/upload", self.base_url))
            .multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AssetStoreError::Remote(e.to_string()))?;
        if !response.status().is_success() {
            return Err(AssetStoreError::Remote(format!(
                "Upload returned status {}",
                response.status()
            )));
        }

        let stored: StoredAsset = response
            .json()
            .await
            .map_err(|e| AssetStoreError::Remote(format!("Malformed upload response: {e}")))?;

        tracing::info!(
            public_id = %stored.public_id,
            size = size,
            "Image uploaded to asset host"
        );
        Ok(stored)
    }

    /// Remove a hosted asset by storage id.
    ///
    /// Callers deleting an owning entity must treat failure here as
    /// non-blocking; the record deletion proceeds regardless.
    pub async fn delete(&self, public_id: &str) -> Result<(), AssetStoreError> {
        let mut request = self
            .http
            .delete(format!("{}/assets/{}", self.base_url, public_id));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AssetStoreError::Remote(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AssetStoreError::NotFound(public_id.to_string()));
        }
        if !response.status().is_success() {
            return Err(AssetStoreError::Remote(format!(
                "Delete returned status {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_fixture() -> Vec<u8> {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(4, 4));
        let mut buffer = Vec::new();
        img.write_to(
            &mut Cursor::new(&mut buffer),
            image::ImageFormat::Png,
        )
        .unwrap();
        buffer
    }

    #[test]
    fn transcode_emits_jpeg() {
        let out = AssetStoreClient::transcode(&png_fixture()).unwrap();
        // JPEG SOI marker
        assert_eq!(&out[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn transcode_rejects_garbage() {
        let err = AssetStoreClient::transcode(b"not an image").unwrap_err();
        assert!(matches!(err, AssetStoreError::InvalidImage(_)));
    }
}
