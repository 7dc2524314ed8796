//! Upload state controller
//!
//! Owns the form's [`UploadState`] and drives it from user events: picking a
//! file, submitting, resetting. A submission is split into
//! [`UploadController::begin_submit`] and [`UploadController::finish_submit`]
//! so a host can render the uploading state while the request is in flight;
//! [`UploadController::submit`] runs both around one `identify` call.
//!
//! Requests cannot be cancelled. While uploading, new picks and resets are
//! rejected with [`ControllerError::Busy`] and leave the state untouched.

use std::mem;
use std::sync::Arc;

use tracing::{info, warn};

use crate::clients::IdentifyClient;
use crate::core::models::{Identification, Photo};
use crate::errors::{ClientError, ControllerError};
use crate::upload::preview::{PreviewHandle, PreviewRegistry};
use crate::upload::state::{Selection, UploadState};

/// The host's file input control.
pub trait FilePicker: Send + Sync {
    /// Opens the picker dialog.
    fn open(&self);

    /// Clears the control's value so the same file can be picked again.
    fn clear(&self);
}

/// Picker for hosts without a file input control.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPicker;

impl FilePicker for NoopPicker {
    fn open(&self) {}
    fn clear(&self) {}
}

pub struct UploadController {
    state: UploadState,
    previews: Arc<dyn PreviewRegistry>,
    picker: Arc<dyn FilePicker>,
}

impl UploadController {
    #[must_use]
    pub fn new(previews: Arc<dyn PreviewRegistry>, picker: Arc<dyn FilePicker>) -> Self {
        Self {
            state: UploadState::Empty,
            previews,
            picker,
        }
    }

    #[must_use]
    pub fn state(&self) -> &UploadState {
        &self.state
    }

    #[must_use]
    pub fn preview_url(&self) -> Option<&str> {
        self.state.selection().map(|s| s.preview.url())
    }

    #[must_use]
    pub fn selected_file_name(&self) -> Option<&str> {
        self.state.selection().map(|s| s.photo.file_name.as_str())
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.state.selection().is_some()
    }

    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.state.is_uploading()
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.state.error_message()
    }

    #[must_use]
    pub fn result(&self) -> Option<&Identification> {
        self.state.result()
    }

    pub fn open_file_picker(&self) {
        self.picker.open();
    }

    /// Handles a pick from the file input. `None` means the dialog was
    /// dismissed and changes nothing.
    ///
    /// A valid photo replaces any previous selection, its preview and any
    /// result in one step. An invalid one moves to `Failed` with no selection.
    ///
    /// # Errors
    ///
    /// [`ControllerError::Busy`] while uploading, [`ControllerError::Invalid`]
    /// when the photo fails validation.
    pub fn select(&mut self, photo: Option<Photo>) -> Result<(), ControllerError> {
        let Some(photo) = photo else {
            return Ok(());
        };

        if self.state.is_uploading() {
            warn!("Ignoring selection of {} while uploading", photo.file_name);
            return Err(ControllerError::Busy);
        }

        if let Err(e) = photo.validate() {
            info!("Rejected {}: {}", photo.file_name, e);
            self.state = UploadState::Failed {
                selection: None,
                message: e.to_string(),
            };
            self.picker.clear();
            return Err(e.into());
        }

        let preview = PreviewHandle::create(&self.previews, &photo);
        // Dropping the previous state here revokes its preview.
        self.state = UploadState::Selected(Selection { photo, preview });
        Ok(())
    }

    /// Moves a selected photo into `Uploading` and returns it for sending.
    ///
    /// # Errors
    ///
    /// [`ControllerError::Busy`] if a request is already in flight.
    /// [`ControllerError::NoSelection`] if no photo is chosen; the form then
    /// shows that message.
    pub fn begin_submit(&mut self) -> Result<Photo, ControllerError> {
        match mem::take(&mut self.state) {
            UploadState::Uploading(selection) => {
                self.state = UploadState::Uploading(selection);
                Err(ControllerError::Busy)
            }
            UploadState::Selected(selection)
            | UploadState::Succeeded { selection, .. }
            | UploadState::Failed {
                selection: Some(selection),
                ..
            } => {
                let photo = selection.photo.clone();
                info!("Submitting {}", photo.file_name);
                self.state = UploadState::Uploading(selection);
                Ok(photo)
            }
            UploadState::Empty | UploadState::Failed { selection: None, .. } => {
                self.state = UploadState::Failed {
                    selection: None,
                    message: ControllerError::NoSelection.to_string(),
                };
                Err(ControllerError::NoSelection)
            }
        }
    }

    /// Applies the outcome of the request started by [`Self::begin_submit`].
    /// Outside `Uploading` the outcome is stale and dropped.
    pub fn finish_submit(&mut self, outcome: Result<Identification, ClientError>) {
        match mem::take(&mut self.state) {
            UploadState::Uploading(selection) => {
                self.state = match outcome {
                    Ok(result) => UploadState::Succeeded { selection, result },
                    Err(e) => {
                        warn!("Identification of {} failed: {:?}", selection.photo.file_name, e);
                        UploadState::Failed {
                            selection: Some(selection),
                            message: e.user_message(),
                        }
                    }
                };
            }
            other => {
                warn!("Dropping identify outcome received in {} state", other.label());
                self.state = other;
            }
        }
    }

    /// Runs a full submission against `client`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::begin_submit`]. Request failures are not errors here;
    /// they land in the `Failed` state.
    pub async fn submit(&mut self, client: &IdentifyClient) -> Result<(), ControllerError> {
        let photo = self.begin_submit()?;
        let outcome = client.identify(&photo).await;
        self.finish_submit(outcome);
        Ok(())
    }

    /// Clears the form back to `Empty`. Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// [`ControllerError::Busy`] while uploading.
    pub fn reset(&mut self) -> Result<(), ControllerError> {
        if self.state.is_uploading() {
            warn!("Ignoring reset while uploading");
            return Err(ControllerError::Busy);
        }

        self.state = UploadState::Empty;
        self.picker.clear();
        Ok(())
    }
}
