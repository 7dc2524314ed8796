//! Upload form state: selection, preview lifetime and submission.

pub mod controller;
pub mod preview;
pub mod state;

pub use controller::{FilePicker, NoopPicker, UploadController};
pub use preview::{InMemoryPreviews, PreviewHandle, PreviewRegistry};
pub use state::{Selection, UploadState};
