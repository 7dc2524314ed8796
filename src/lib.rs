//! Plant identification upload client.
//!
//! Lets a user pick a JPEG photo of a plant, uploads it to object storage via
//! a presigned URL, asks the identification API about it and exposes the
//! returned care details to the host UI.
//!
//! # Architecture
//!
//! - `validation` gates picked files (JPEG only, 8 MiB max)
//! - `clients` runs the three-step upload/identify sequence over `reqwest`
//! - `upload` holds the form state machine and preview lifetimes
//! - `views` and `page` render that state as a JSON view tree
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use plant_identify::clients::IdentifyClient;
//! use plant_identify::core::config::ClientConfig;
//! use plant_identify::core::models::Photo;
//! use plant_identify::upload::{InMemoryPreviews, NoopPicker, UploadController};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     plant_identify::setup_logging();
//!
//!     let client = IdentifyClient::new(ClientConfig::from_env()?);
//!     let mut form = UploadController::new(
//!         Arc::new(InMemoryPreviews::new()),
//!         Arc::new(NoopPicker),
//!     );
//!
//!     let bytes = std::fs::read("leaf.jpg")?;
//!     form.select(Some(Photo::new("leaf.jpg", "image/jpeg", bytes)))?;
//!     form.submit(&client).await?;
//!
//!     match (form.result(), form.error_message()) {
//!         (Some(plant), _) => println!("{}: {}", plant.name, plant.watering_label()),
//!         (None, Some(message)) => println!("{message}"),
//!         _ => {}
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod clients;
pub mod core;
pub mod errors;
pub mod page;
pub mod upload;
pub mod utils;
pub mod validation;
pub mod views;

/// Configure structured logging with JSON output.
///
/// Hosts call this once at startup; a second call is a no-op.
///
/// # Example
///
/// ```
/// plant_identify::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
