//! MIME utilities shared across modules

use std::sync::LazyLock;

use regex::Regex;

static JPEG_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.jpe?g$").expect("static regex compile"));

pub const JPEG_MIME: &str = "image/jpeg";

/// Lowercases a MIME type, strips parameters and folds `image/jpg` into
/// `image/jpeg`.
#[must_use]
pub fn canonicalize_mime(mime: &str) -> String {
    let main = mime
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    match main.as_str() {
        "image/jpg" => JPEG_MIME.to_string(),
        other => other.to_string(),
    }
}

/// Returns whether the filename ends in `.jpg` or `.jpeg`, any case.
#[must_use]
pub fn has_jpeg_extension(file_name: &str) -> bool {
    JPEG_EXTENSION.is_match(file_name)
}

/// Content type to send with the upload: the declared one when present,
/// otherwise a guess from the filename, otherwise JPEG.
#[must_use]
pub fn upload_content_type(declared: &str, file_name: &str) -> String {
    if !declared.trim().is_empty() {
        return declared.trim().to_string();
    }

    mime_guess::from_path(file_name)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| JPEG_MIME.to_string())
}
