//! Application state

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::client::{ApiClient, CredentialStore, ReqwestTransport};
use crate::config::ShopfrontConfig;
use crate::uploads::{ImageBatch, PendingImage};

/// Shared state for the axum router
///
/// Holds the configuration, the upstream API client (with its credential
/// store), and the per-product staged image batches.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ShopfrontConfig>,
    api: ApiClient<ReqwestTransport>,
    batches: Arc<RwLock<HashMap<String, ImageBatch>>>,
}

impl AppState {
    /// Build state from configuration
    #[must_use]
    pub fn new(config: ShopfrontConfig) -> Self {
        let transport = ReqwestTransport::new(config.api.base_url.clone());
        let api = ApiClient::new(transport, CredentialStore::new());
        Self {
            config: Arc::new(config),
            api,
            batches: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Configuration reference
    #[must_use]
    pub fn config(&self) -> &ShopfrontConfig {
        &self.config
    }

    /// Upstream API client
    #[must_use]
    pub const fn api(&self) -> &ApiClient<ReqwestTransport> {
        &self.api
    }

    /// Stage selected images for a product
    pub fn stage_images(&self, product_id: &str, images: Vec<PendingImage>) {
        self.batches
            .write()
            .entry(product_id.to_string())
            .or_default()
            .extend(images);
    }

    /// Remove one staged image by index; `false` when out of range
    pub fn remove_staged_image(&self, product_id: &str, index: usize) -> bool {
        self.batches
            .write()
            .get_mut(product_id)
            .and_then(|batch| batch.remove(index))
            .is_some()
    }

    /// Snapshot of the staged batch for a product
    ///
    /// The snapshot is uploaded outside the lock; call
    /// [`Self::discard_uploaded`] with the snapshot length once the upload
    /// succeeded.
    #[must_use]
    pub fn batch_snapshot(&self, product_id: &str) -> ImageBatch {
        self.batches
            .read()
            .get(product_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Drop the first `count` staged images for a product after upload
    ///
    /// Images staged after the uploaded snapshot was taken stay pending.
    pub fn discard_uploaded(&self, product_id: &str, count: usize) {
        let mut batches = self.batches.write();
        if let Some(batch) = batches.get_mut(product_id) {
            batch.discard_first(count);
            if batch.is_empty() {
                batches.remove(product_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> PendingImage {
        PendingImage::new(name, "image/png", b"x".to_vec())
    }

    #[test]
    fn test_stage_and_remove() {
        let state = AppState::new(ShopfrontConfig::default());
        state.stage_images("42", vec![image("a.png"), image("b.png"), image("c.png")]);

        assert!(state.remove_staged_image("42", 1));
        let snapshot = state.batch_snapshot("42");
        let names: Vec<&str> = snapshot.iter().map(|i| i.filename.as_str()).collect();
        assert_eq!(names, vec!["a.png", "c.png"]);

        assert!(!state.remove_staged_image("42", 9));
        assert!(!state.remove_staged_image("other", 0));
    }

    #[test]
    fn test_discard_uploaded_drops_entry_when_empty() {
        let state = AppState::new(ShopfrontConfig::default());
        state.stage_images("42", vec![image("a.png")]);
        state.discard_uploaded("42", 1);
        assert!(state.batch_snapshot("42").is_empty());
    }

    #[test]
    fn test_discard_uploaded_keeps_images_staged_after_snapshot() {
        let state = AppState::new(ShopfrontConfig::default());
        state.stage_images("42", vec![image("a.png"), image("b.png")]);
        let snapshot = state.batch_snapshot("42");

        // Another selection lands while the snapshot is being uploaded
        state.stage_images("42", vec![image("late.png")]);

        state.discard_uploaded("42", snapshot.len());
        let names: Vec<String> = state
            .batch_snapshot("42")
            .iter()
            .map(|i| i.filename.clone())
            .collect();
        assert_eq!(names, vec!["late.png"]);
    }

    #[test]
    fn test_clones_share_batches() {
        let state = AppState::new(ShopfrontConfig::default());
        let clone = state.clone();
        clone.stage_images("42", vec![image("a.png")]);
        assert_eq!(state.batch_snapshot("42").len(), 1);
    }
}
