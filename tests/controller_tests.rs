mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::{ScriptedTransport, client, happy_path, jpeg, monstera};
use plant_identify::core::models::Photo;
use plant_identify::errors::{ClientError, ControllerError, ValidationError};
use plant_identify::upload::{FilePicker, InMemoryPreviews, UploadController, UploadState};
use plant_identify::validation::MAX_FILE_SIZE_BYTES;
use serde_json::json;

#[derive(Default)]
struct RecordingPicker {
    opened: AtomicUsize,
    cleared: AtomicUsize,
}

impl FilePicker for RecordingPicker {
    fn open(&self) {
        self.opened.fetch_add(1, Ordering::SeqCst);
    }

    fn clear(&self) {
        self.cleared.fetch_add(1, Ordering::SeqCst);
    }
}

struct Harness {
    form: UploadController,
    previews: Arc<InMemoryPreviews>,
    picker: Arc<RecordingPicker>,
}

fn harness() -> Harness {
    let previews = Arc::new(InMemoryPreviews::new());
    let picker = Arc::new(RecordingPicker::default());
    let form = UploadController::new(previews.clone(), picker.clone());
    Harness {
        form,
        previews,
        picker,
    }
}

#[tokio::test]
async fn end_to_end_success() {
    let mut h = harness();
    let transport = happy_path();

    h.form.select(Some(jpeg("leaf.jpg", 2 * 1024 * 1024))).unwrap();
    h.form.submit(&client(&transport)).await.unwrap();

    assert!(matches!(h.form.state(), UploadState::Succeeded { .. }));
    assert_eq!(h.form.result(), Some(&monstera()));
    assert_eq!(h.form.error_message(), None);
    assert!(!h.form.is_uploading());
    assert_eq!(transport.requests().len(), 3);
}

#[test]
fn png_is_rejected_without_network() {
    let mut h = harness();
    let transport = ScriptedTransport::new();

    let err = h
        .form
        .select(Some(Photo::new("photo.png", "image/png", vec![0; 64])))
        .unwrap_err();

    assert_eq!(err, ControllerError::Invalid(ValidationError::InvalidFileType));
    assert_eq!(h.form.error_message(), Some("Please choose a JPG image file."));
    assert!(!h.form.has_selection());
    assert!(transport.requests().is_empty());
    assert_eq!(h.picker.cleared.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn presign_failure_lands_in_failed_with_server_message() {
    let mut h = harness();
    let transport = ScriptedTransport::new().reply(500, json!({ "message": "Bucket offline" }));

    h.form.select(Some(jpeg("leaf.jpg", 100))).unwrap();
    h.form.submit(&client(&transport)).await.unwrap();

    assert_eq!(h.form.error_message(), Some("Bucket offline"));
    assert!(h.form.result().is_none());
    // The photo stays selected so the user can try again.
    assert_eq!(h.form.selected_file_name(), Some("leaf.jpg"));
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn empty_identify_payload_is_failure_not_success() {
    let mut h = harness();
    let transport = ScriptedTransport::new()
        .reply(200, json!({ "url": "https://store/x", "key": "k1" }))
        .reply_raw(200, Vec::new())
        .reply(200, json!({}));

    h.form.select(Some(jpeg("leaf.jpg", 100))).unwrap();
    h.form.submit(&client(&transport)).await.unwrap();

    assert!(matches!(h.form.state(), UploadState::Failed { .. }));
    assert_eq!(
        h.form.error_message(),
        Some(ClientError::NoPlantFound.to_string().as_str())
    );
}

#[tokio::test]
async fn retry_after_failure_succeeds() {
    let mut h = harness();
    h.form.select(Some(jpeg("leaf.jpg", 100))).unwrap();

    let failing = ScriptedTransport::new().reply(500, json!({}));
    h.form.submit(&client(&failing)).await.unwrap();
    assert!(h.form.error_message().is_some());

    h.form.submit(&client(&happy_path())).await.unwrap();
    assert_eq!(h.form.result(), Some(&monstera()));
    assert_eq!(h.form.error_message(), None);
}

#[tokio::test]
async fn submit_without_selection_sets_message() {
    let mut h = harness();
    let transport = ScriptedTransport::new();

    let err = h.form.submit(&client(&transport)).await.unwrap_err();

    assert_eq!(err, ControllerError::NoSelection);
    assert_eq!(
        h.form.error_message(),
        Some("Choose a JPG photo to identify your plant.")
    );
    assert!(!h.form.is_uploading());
    assert!(transport.requests().is_empty());
}

#[test]
fn oversize_jpeg_is_rejected() {
    let mut h = harness();
    let big = jpeg("huge.jpg", MAX_FILE_SIZE_BYTES as usize + 1);

    let err = h.form.select(Some(big)).unwrap_err();

    assert_eq!(err, ControllerError::Invalid(ValidationError::FileTooLarge { max_mb: 8 }));
    assert_eq!(
        h.form.error_message(),
        Some("Please choose a JPG image smaller than 8MB.")
    );
}

#[test]
fn invalid_pick_clears_previous_selection_and_preview() {
    let mut h = harness();
    h.form.select(Some(jpeg("leaf.jpg", 100))).unwrap();
    assert_eq!(h.previews.live_count(), 1);

    let _ = h.form.select(Some(Photo::new("notes.txt", "text/plain", vec![1])));

    assert!(!h.form.has_selection());
    assert!(h.form.preview_url().is_none());
    assert_eq!(h.previews.live_count(), 0);
}

#[test]
fn second_selection_replaces_first() {
    let mut h = harness();
    h.form.select(Some(jpeg("first.jpg", 100))).unwrap();
    let first_preview = h.form.preview_url().unwrap().to_string();

    h.form.select(Some(jpeg("second.jpeg", 100))).unwrap();

    assert_eq!(h.form.selected_file_name(), Some("second.jpeg"));
    let second_preview = h.form.preview_url().unwrap().to_string();
    assert_ne!(first_preview, second_preview);
    assert!(!h.previews.is_live(&first_preview));
    assert!(h.previews.is_live(&second_preview));
    assert_eq!(h.previews.live_count(), 1);
}

#[tokio::test]
async fn new_selection_clears_stale_result() {
    let mut h = harness();
    h.form.select(Some(jpeg("leaf.jpg", 100))).unwrap();
    h.form.submit(&client(&happy_path())).await.unwrap();
    assert!(h.form.result().is_some());

    h.form.select(Some(jpeg("other.jpg", 100))).unwrap();

    assert!(h.form.result().is_none());
    assert!(matches!(h.form.state(), UploadState::Selected(_)));
}

#[tokio::test]
async fn reset_is_idempotent() {
    let mut h = harness();
    h.form.select(Some(jpeg("leaf.jpg", 100))).unwrap();
    h.form.submit(&client(&happy_path())).await.unwrap();

    h.form.reset().unwrap();
    assert!(matches!(h.form.state(), UploadState::Empty));
    h.form.reset().unwrap();

    assert!(matches!(h.form.state(), UploadState::Empty));
    assert!(h.form.preview_url().is_none());
    assert!(h.form.result().is_none());
    assert!(h.form.error_message().is_none());
    assert_eq!(h.previews.live_count(), 0);
    assert_eq!(h.picker.cleared.load(Ordering::SeqCst), 2);
}

#[test]
fn uploading_rejects_selection_and_reset() {
    let mut h = harness();
    h.form.select(Some(jpeg("leaf.jpg", 100))).unwrap();
    h.form.begin_submit().unwrap();

    assert_eq!(
        h.form.select(Some(jpeg("other.jpg", 100))),
        Err(ControllerError::Busy)
    );
    assert_eq!(h.form.reset(), Err(ControllerError::Busy));
    assert_eq!(h.form.selected_file_name(), Some("leaf.jpg"));
    assert!(h.form.is_uploading());

    h.form.finish_submit(Ok(monstera()));
    assert_eq!(h.form.result(), Some(&monstera()));
}

#[test]
fn dropping_controller_releases_preview() {
    let mut h = harness();
    h.form.select(Some(jpeg("leaf.jpg", 100))).unwrap();
    assert_eq!(h.previews.live_count(), 1);

    let previews = h.previews.clone();
    drop(h);

    assert_eq!(previews.live_count(), 0);
}

#[test]
fn open_file_picker_delegates_to_control() {
    let h = harness();
    h.form.open_file_picker();
    assert_eq!(h.picker.opened.load(Ordering::SeqCst), 1);
}
