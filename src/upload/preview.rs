//! Local preview references for selected photos.
//!
//! A preview is an object URL the host can point an `<img>` (or equivalent)
//! at. Hosts create them through a [`PreviewRegistry`]; the crate wraps each
//! one in a [`PreviewHandle`] that revokes it when dropped, so a replaced or
//! discarded selection never leaks its preview.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::debug;
use uuid::Uuid;

use crate::core::models::Photo;

pub trait PreviewRegistry: Send + Sync {
    /// Creates a preview reference for the photo and returns its URL.
    fn create(&self, photo: &Photo) -> String;

    /// Releases a reference previously returned by [`PreviewRegistry::create`].
    fn revoke(&self, url: &str);
}

/// Owned preview reference. Revoked exactly once, on drop.
pub struct PreviewHandle {
    url: String,
    registry: Arc<dyn PreviewRegistry>,
}

impl PreviewHandle {
    #[must_use]
    pub fn create(registry: &Arc<dyn PreviewRegistry>, photo: &Photo) -> Self {
        let url = registry.create(photo);
        debug!("Created preview {} for {}", url, photo.file_name);
        Self {
            url,
            registry: Arc::clone(registry),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        debug!("Revoking preview {}", self.url);
        self.registry.revoke(&self.url);
    }
}

impl fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PreviewHandle").field(&self.url).finish()
    }
}

/// Registry that hands out `blob:` style URLs and tracks which are live.
#[derive(Debug, Default)]
pub struct InMemoryPreviews {
    live: Mutex<HashSet<String>>,
}

impl InMemoryPreviews {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.lock().map(|live| live.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_live(&self, url: &str) -> bool {
        self.live
            .lock()
            .map(|live| live.contains(url))
            .unwrap_or(false)
    }
}

impl PreviewRegistry for InMemoryPreviews {
    fn create(&self, _photo: &Photo) -> String {
        let url = format!("blob:preview/{}", Uuid::new_v4());
        if let Ok(mut live) = self.live.lock() {
            live.insert(url.clone());
        }
        url
    }

    fn revoke(&self, url: &str) {
        if let Ok(mut live) = self.live.lock() {
            live.remove(url);
        }
    }
}
