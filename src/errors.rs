use thiserror::Error;

use crate::validation::MAX_FILE_SIZE_MB;

/// Generic message shown when a failure carries nothing more specific.
pub const GENERIC_FAILURE_MESSAGE: &str = "We were unable to identify your plant. Try again.";

pub const PRESIGN_FALLBACK_MESSAGE: &str = "Something went wrong while obtaining presigned URL.";
pub const UPLOAD_FALLBACK_MESSAGE: &str = "Something went wrong while uploading your photo.";
pub const IDENTIFY_FALLBACK_MESSAGE: &str = "Something went wrong while identifying the plant.";

/// Local file checks. These never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please choose a JPG image file.")]
    InvalidFileType,

    #[error("Please choose a JPG image smaller than {max_mb}MB.")]
    FileTooLarge { max_mb: u64 },
}

impl ValidationError {
    #[must_use]
    pub fn too_large() -> Self {
        ValidationError::FileTooLarge {
            max_mb: MAX_FILE_SIZE_MB,
        }
    }
}

/// Failures of the upload/identify workflow, one kind per step.
///
/// The string payloads are already user-facing; raw transport errors are
/// folded into them at the client boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{0}")]
    PresignFailed(String),

    #[error("{0}")]
    UploadFailed(String),

    #[error("{0}")]
    IdentifyFailed(String),

    #[error("No plant identified in the response.")]
    NoPlantFound,

    #[error("{0}")]
    Unknown(String),
}

impl ClientError {
    /// Message for display, falling back to the generic one when empty.
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        tracing::warn!("Unclassified HTTP error: {}", error);
        ClientError::Unknown(GENERIC_FAILURE_MESSAGE.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        tracing::warn!("Malformed identification payload: {}", error);
        ClientError::Unknown(GENERIC_FAILURE_MESSAGE.to_string())
    }
}

/// Rejections raised by the upload controller itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("An identification request is already in progress.")]
    Busy,

    #[error("Choose a JPG photo to identify your plant.")]
    NoSelection,

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid URL in configuration: {0}")]
    InvalidUrl(String),
}

impl From<url::ParseError> for ConfigError {
    fn from(error: url::ParseError) -> Self {
        ConfigError::InvalidUrl(error.to_string())
    }
}

impl From<ConfigError> for ClientError {
    fn from(error: ConfigError) -> Self {
        tracing::error!("Identify client misconfigured: {}", error);
        ClientError::Unknown(GENERIC_FAILURE_MESSAGE.to_string())
    }
}
