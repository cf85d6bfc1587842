use super::types::{PropertyQuery, UploadFile};
use crate::error::Result;
use crate::models::{Media, Property};
use async_trait::async_trait;
use std::sync::RwLock;

/// Listing and media endpoints the search pages and the wizard depend on.
/// The REST client is the production implementation; tests swap in fakes.
#[async_trait]
pub trait ListingBackend: Send + Sync {
    async fn list_properties(&self, query: &PropertyQuery) -> Result<Vec<Property>>;

    async fn get_property(&self, id: &str) -> Result<Property>;

    /// Returns the stored record, including its new id
    async fn create_property(&self, property: &Property) -> Result<Property>;

    async fn update_property(&self, id: &str, property: &Property) -> Result<Property>;

    async fn set_property_active(&self, id: &str, active: bool) -> Result<()>;

    async fn delete_property(&self, id: &str) -> Result<()>;

    async fn list_media(&self, property_id: &str) -> Result<Vec<Media>>;

    async fn upload_media(&self, property_id: &str, file: &UploadFile) -> Result<Media>;

    async fn delete_media(&self, property_id: &str, media_id: &str) -> Result<()>;

    async fn update_media_order(&self, property_id: &str, media_id: &str, display_order: i32) -> Result<()>;

    /// Registers an external video link as a media item
    async fn add_video_url(&self, property_id: &str, video_url: &str) -> Result<Media>;
}

/// Source of the bearer token sent on authenticated calls
pub trait CredentialProvider: Send + Sync {
    fn token(&self) -> Option<String>;

    fn store(&self, token: &str);

    fn clear(&self);
}

/// Keeps the token for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    token: RwLock<Option<String>>,
}

impl MemoryCredentials {
    pub fn new(token: Option<String>) -> Self {
        Self { token: RwLock::new(token) }
    }
}

impl CredentialProvider for MemoryCredentials {
    fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    fn store(&self, token: &str) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_credentials_store_and_clear() {
        let creds = MemoryCredentials::default();
        assert!(creds.token().is_none());
        creds.store("abc");
        assert_eq!(creds.token().as_deref(), Some("abc"));
        creds.clear();
        assert!(creds.token().is_none());
    }
}
