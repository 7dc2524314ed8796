//! Upload policy for plant photos.

use crate::errors::ValidationError;
use crate::utils::mime::{canonicalize_mime, has_jpeg_extension};

pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/pjpeg"];

pub const MAX_FILE_SIZE_MB: u64 = 8;
pub const MAX_FILE_SIZE_BYTES: u64 = MAX_FILE_SIZE_MB * 1024 * 1024;

#[must_use]
pub fn is_allowed_mime(mime: &str) -> bool {
    let canonical = canonicalize_mime(mime);
    !canonical.is_empty() && ALLOWED_MIME_TYPES.contains(&canonical.as_str())
}

/// Decides whether a picked file may be uploaded.
///
/// Oversize files are rejected before the type is looked at. A file passes the
/// type check if its MIME type is an allowed JPEG type or, for pickers that
/// omit or mislabel the type, if its name ends in `.jpg`/`.jpeg`.
///
/// # Errors
///
/// `FileTooLarge` above [`MAX_FILE_SIZE_BYTES`], `InvalidFileType` otherwise.
pub fn validate_photo(mime: &str, file_name: &str, size: u64) -> Result<(), ValidationError> {
    if size > MAX_FILE_SIZE_BYTES {
        return Err(ValidationError::too_large());
    }

    if is_allowed_mime(mime) || has_jpeg_extension(file_name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFileType)
    }
}
