//! Upload/identify client
//!
//! Runs the three-call sequence against the identification API:
//! 1. `GET /get-upload-url` for a presigned write location,
//! 2. `PUT` the photo bytes to that location,
//! 3. `POST /identify` with the object key from step 1.
//!
//! Each call is attempted once. The first failure ends the sequence.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::clients::transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport,
};
use crate::core::config::ClientConfig;
use crate::core::models::{Identification, IdentifyRequest, IdentifyResponse, Photo, UploadTarget};
use crate::errors::{
    ClientError, GENERIC_FAILURE_MESSAGE, IDENTIFY_FALLBACK_MESSAGE, PRESIGN_FALLBACK_MESSAGE,
    UPLOAD_FALLBACK_MESSAGE,
};
use crate::utils::mime::{JPEG_MIME, upload_content_type};

const ACCEPT_JSON: &str = "application/json";

/// Pulls a human-readable message out of an error body.
///
/// The API answers either with a bare JSON string or with an object carrying a
/// `message` field. Anything else (including non-JSON bodies) yields `None`.
#[must_use]
pub fn extract_server_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let message = match &value {
        Value::String(s) => s.clone(),
        Value::Object(map) => map.get("message")?.as_str()?.to_string(),
        _ => return None,
    };

    if message.trim().is_empty() {
        None
    } else {
        Some(message)
    }
}

/// URL with the query removed, for logging presigned locations.
fn redacted(url: &Url) -> String {
    let mut copy = url.clone();
    copy.set_query(None);
    copy.to_string()
}

pub struct IdentifyClient {
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
}

impl IdentifyClient {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Uploads the photo and asks the API to identify it.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] of the first step that failed. A successful
    /// identify response without a plant is [`ClientError::NoPlantFound`].
    pub async fn identify(&self, photo: &Photo) -> Result<Identification, ClientError> {
        info!(
            "Identifying plant from {} ({} bytes)",
            photo.file_name,
            photo.size()
        );

        let target = self.request_upload_target(&photo.file_name).await?;
        self.upload_photo(photo, &target).await?;
        let plant = self.identify_uploaded(&target.key).await?;

        info!("Identified {} as {}", photo.file_name, plant.name);
        Ok(plant)
    }

    /// # Errors
    ///
    /// [`ClientError::PresignFailed`] on a non-success status, an unreadable
    /// body, or a transport failure.
    pub async fn request_upload_target(
        &self,
        file_name: &str,
    ) -> Result<UploadTarget, ClientError> {
        let mut url = self.config.upload_url_endpoint()?;
        url.query_pairs_mut()
            .append_pair("filename", file_name)
            .append_pair("contentType", JPEG_MIME);

        let request = HttpRequest::new(HttpMethod::Get, url).header("Accept", ACCEPT_JSON);
        let response = self
            .send(request, || {
                ClientError::PresignFailed(PRESIGN_FALLBACK_MESSAGE.to_string())
            })
            .await?;

        if !response.is_success() {
            warn!("Upload URL request failed with status {}", response.status);
            let message = extract_server_message(&response.body)
                .unwrap_or_else(|| PRESIGN_FALLBACK_MESSAGE.to_string());
            return Err(ClientError::PresignFailed(message));
        }

        let target: UploadTarget = serde_json::from_slice(&response.body).map_err(|e| {
            warn!("Upload URL response was not a valid target: {}", e);
            ClientError::PresignFailed(PRESIGN_FALLBACK_MESSAGE.to_string())
        })?;

        debug!("Obtained upload target for key {}", target.key);
        Ok(target)
    }

    /// # Errors
    ///
    /// [`ClientError::UploadFailed`] unless storage answers with a 2xx status.
    pub async fn upload_photo(
        &self,
        photo: &Photo,
        target: &UploadTarget,
    ) -> Result<(), ClientError> {
        let url = self.config.resolve_upload_url(&target.url).map_err(|e| {
            warn!("Unusable upload URL: {}", e);
            ClientError::UploadFailed(UPLOAD_FALLBACK_MESSAGE.to_string())
        })?;
        let content_type = upload_content_type(&photo.content_type, &photo.file_name);

        debug!("Uploading {} to {}", photo.file_name, redacted(&url));
        let request = HttpRequest::new(HttpMethod::Put, url)
            .header("Content-Type", &content_type)
            .body(photo.bytes().to_vec());

        let response = self
            .send(request, || {
                ClientError::UploadFailed(UPLOAD_FALLBACK_MESSAGE.to_string())
            })
            .await?;

        if !response.is_success() {
            warn!("Photo upload failed with status {}", response.status);
            return Err(ClientError::UploadFailed(UPLOAD_FALLBACK_MESSAGE.to_string()));
        }

        Ok(())
    }

    /// # Errors
    ///
    /// [`ClientError::IdentifyFailed`] on a non-success status,
    /// [`ClientError::NoPlantFound`] when the payload has no plant, and
    /// [`ClientError::Unknown`] when the plant cannot be read.
    pub async fn identify_uploaded(&self, key: &str) -> Result<Identification, ClientError> {
        let url = self.config.identify_endpoint()?;
        let body = serde_json::to_vec(&IdentifyRequest { plant: key })?;

        let request = HttpRequest::new(HttpMethod::Post, url)
            .header("Accept", ACCEPT_JSON)
            .header("Content-Type", ACCEPT_JSON)
            .body(body);

        let response = self
            .send(request, || {
                ClientError::IdentifyFailed(IDENTIFY_FALLBACK_MESSAGE.to_string())
            })
            .await?;

        if !response.is_success() {
            warn!("Identify request failed with status {}", response.status);
            let message = extract_server_message(&response.body)
                .unwrap_or_else(|| IDENTIFY_FALLBACK_MESSAGE.to_string());
            return Err(ClientError::IdentifyFailed(message));
        }

        #[cfg(feature = "debug-logs")]
        debug!(
            "Identify response body: {}",
            String::from_utf8_lossy(&response.body)
        );

        let body: Value = serde_json::from_slice(&response.body)?;
        // Any JSON without an object `result.plant` is "no plant", whatever its shape.
        let payload: IdentifyResponse = serde_json::from_value(body).unwrap_or_default();
        let Some(raw_plant) = payload.plant() else {
            if let Some(message) = payload.message() {
                info!("Identify response had no plant: {}", message);
            }
            return Err(ClientError::NoPlantFound);
        };

        let plant: Identification = serde_json::from_value(raw_plant.clone())?;
        if plant.watering_frequency_days == 0 {
            warn!("Identify response had a zero watering interval");
            return Err(ClientError::Unknown(GENERIC_FAILURE_MESSAGE.to_string()));
        }

        Ok(plant)
    }

    async fn send(
        &self,
        request: HttpRequest,
        on_transport_error: impl FnOnce() -> ClientError,
    ) -> Result<HttpResponse, ClientError> {
        let method = request.method;
        self.transport.send(request).await.map_err(|e| {
            warn!("{:?} request failed before a response: {}", method, e);
            on_transport_error()
        })
    }
}
