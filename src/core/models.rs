use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ValidationError;

/// A photo picked by the user: raw bytes plus what the picker told us about it.
#[derive(Clone, PartialEq, Eq)]
pub struct Photo {
    pub file_name: String,
    /// Declared MIME type, possibly empty when the picker could not tell.
    pub content_type: String,
    bytes: Arc<[u8]>,
}

impl Photo {
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// # Errors
    ///
    /// See [`crate::validation::validate_photo`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        crate::validation::validate_photo(&self.content_type, &self.file_name, self.size())
    }
}

// Keep file contents out of logs.
impl fmt::Debug for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Photo")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Single-use write location returned by `GET /get-upload-url`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadTarget {
    pub url: String,
    pub key: String,
}

/// Care metadata for an identified plant. Field names are the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identification {
    pub name: String,
    pub scientific_name: String,
    pub sunlight_preference: String,
    pub watering_frequency_days: u32,
    pub current_condition: String,
    pub care_notes: String,
}

impl Identification {
    #[must_use]
    pub fn watering_label(&self) -> String {
        format!("Every {} days", self.watering_frequency_days)
    }
}

#[derive(Debug, Serialize)]
pub struct IdentifyRequest<'a> {
    pub plant: &'a str,
}

/// Body of `POST /identify`. Both fields are kept as raw JSON: any reply
/// without an object `result.plant` means no plant was found, and only a
/// present plant is held to the [`Identification`] shape.
#[derive(Debug, Default, Deserialize)]
pub struct IdentifyResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

impl IdentifyResponse {
    #[must_use]
    pub fn plant(&self) -> Option<&Value> {
        self.result
            .as_ref()
            .and_then(|r| r.get("plant"))
            .filter(|v| !v.is_null())
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().and_then(Value::as_str)
    }
}
