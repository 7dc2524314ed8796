use crate::core::models::{Identification, Photo};
use crate::upload::preview::PreviewHandle;

/// The photo currently chosen in the form, with its live preview.
#[derive(Debug)]
pub struct Selection {
    pub photo: Photo,
    pub preview: PreviewHandle,
}

/// Where the form is. Each variant carries exactly the data valid in it, so a
/// result without a photo or an upload without a selection cannot be built.
#[derive(Debug, Default)]
pub enum UploadState {
    #[default]
    Empty,
    Selected(Selection),
    Uploading(Selection),
    Succeeded {
        selection: Selection,
        result: Identification,
    },
    /// `selection` is kept after a failed request so the user can retry, and
    /// is `None` after a rejected pick or a submit with nothing chosen.
    Failed {
        selection: Option<Selection>,
        message: String,
    },
}

impl UploadState {
    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            UploadState::Empty => None,
            UploadState::Selected(selection) | UploadState::Uploading(selection) => Some(selection),
            UploadState::Succeeded { selection, .. } => Some(selection),
            UploadState::Failed { selection, .. } => selection.as_ref(),
        }
    }

    #[must_use]
    pub fn is_uploading(&self) -> bool {
        matches!(self, UploadState::Uploading(_))
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            UploadState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<&Identification> {
        match self {
            UploadState::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            UploadState::Empty => "empty",
            UploadState::Selected(_) => "selected",
            UploadState::Uploading(_) => "uploading",
            UploadState::Succeeded { .. } => "succeeded",
            UploadState::Failed { .. } => "failed",
        }
    }
}
