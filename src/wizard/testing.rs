use super::Notifier;
use crate::api::{ListingBackend, PropertyQuery, UploadFile};
use crate::error::{DeskError, Result};
use crate::models::{ListingState, Media, MediaKind, Property};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct State {
    next_id: u32,
    properties: HashMap<String, Property>,
    media: HashMap<String, Vec<Media>>,
    calls: Vec<String>,
    order_calls: Vec<(String, i32)>,
    uploaded: Vec<String>,
    fail_creates: bool,
    fail_deletes: bool,
    fail_orders: HashSet<String>,
    fail_uploads: HashSet<String>,
    fail_video_urls: bool,
}

/// In-memory backend recording every call
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<State>,
}

impl FakeBackend {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn seed(&self, mut property: Property, media: Vec<Media>) -> Property {
        let mut state = self.lock();
        state.next_id += 1;
        let id = format!("p{}", state.next_id);
        property.id = Some(id.clone());
        state.properties.insert(id.clone(), property.clone());
        state.media.insert(id, media);
        property
    }

    pub fn property(&self, id: &str) -> Property {
        self.lock().properties.get(id).cloned().unwrap()
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn order_calls(&self) -> Vec<(String, i32)> {
        self.lock().order_calls.clone()
    }

    pub fn uploaded_names(&self) -> Vec<String> {
        self.lock().uploaded.clone()
    }

    pub fn fail_creates(&self, fail: bool) {
        self.lock().fail_creates = fail;
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.lock().fail_deletes = fail;
    }

    pub fn fail_order_updates_for(&self, media_id: &str) {
        self.lock().fail_orders.insert(media_id.to_string());
    }

    pub fn fail_uploads_for(&self, file_name: &str) {
        self.lock().fail_uploads.insert(file_name.to_string());
    }

    pub fn fail_video_urls(&self, fail: bool) {
        self.lock().fail_video_urls = fail;
    }
}

fn server_error() -> DeskError {
    DeskError::Backend { status: 500, message: "Erro interno".to_string() }
}

#[async_trait]
impl ListingBackend for FakeBackend {
    async fn list_properties(&self, _query: &PropertyQuery) -> Result<Vec<Property>> {
        let mut state = self.lock();
        state.calls.push("list_properties".to_string());
        Ok(state.properties.values().cloned().collect())
    }

    async fn get_property(&self, id: &str) -> Result<Property> {
        let mut state = self.lock();
        state.calls.push(format!("get_property {id}"));
        state.properties.get(id).cloned().ok_or_else(|| DeskError::Backend {
            status: 404,
            message: "Imóvel não encontrado".to_string(),
        })
    }

    async fn create_property(&self, property: &Property) -> Result<Property> {
        let mut state = self.lock();
        state.calls.push("create_property".to_string());
        if state.fail_creates {
            return Err(server_error());
        }
        state.next_id += 1;
        let id = format!("p{}", state.next_id);
        let mut stored = property.clone();
        stored.id = Some(id.clone());
        state.properties.insert(id.clone(), stored.clone());
        state.media.insert(id, Vec::new());
        Ok(stored)
    }

    async fn update_property(&self, id: &str, property: &Property) -> Result<Property> {
        let mut state = self.lock();
        state.calls.push(format!("update_property {id}"));
        let mut stored = property.clone();
        stored.id = Some(id.to_string());
        state.properties.insert(id.to_string(), stored.clone());
        Ok(stored)
    }

    async fn set_property_active(&self, id: &str, active: bool) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(format!("set_property_active {id} {active}"));
        let property = state.properties.get_mut(id).ok_or_else(server_error)?;
        property.state = if active { ListingState::Published } else { ListingState::Draft };
        Ok(())
    }

    async fn delete_property(&self, id: &str) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(format!("delete_property {id}"));
        state.properties.remove(id);
        Ok(())
    }

    async fn list_media(&self, property_id: &str) -> Result<Vec<Media>> {
        let mut state = self.lock();
        state.calls.push(format!("list_media {property_id}"));
        Ok(state.media.get(property_id).cloned().unwrap_or_default())
    }

    async fn upload_media(&self, property_id: &str, file: &UploadFile) -> Result<Media> {
        let mut state = self.lock();
        state.calls.push(format!("upload_media {property_id}"));
        if state.fail_uploads.contains(&file.file_name) {
            return Err(server_error());
        }
        state.uploaded.push(file.file_name.clone());
        let entries = state.media.entry(property_id.to_string()).or_default();
        let media = Media {
            id: format!("{property_id}-m{}", entries.len()),
            url: format!("https://cdn.example.com/{}", file.file_name),
            kind: MediaKind::Image,
            display_order: entries.len() as i32,
        };
        entries.push(media.clone());
        Ok(media)
    }

    async fn delete_media(&self, property_id: &str, media_id: &str) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(format!("delete_media {property_id} {media_id}"));
        if state.fail_deletes {
            return Err(server_error());
        }
        if let Some(entries) = state.media.get_mut(property_id) {
            entries.retain(|m| m.id != media_id);
        }
        Ok(())
    }

    async fn update_media_order(&self, property_id: &str, media_id: &str, display_order: i32) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(format!("update_media_order {property_id} {media_id}"));
        state.order_calls.push((media_id.to_string(), display_order));
        if state.fail_orders.contains(media_id) {
            return Err(server_error());
        }
        Ok(())
    }

    async fn add_video_url(&self, property_id: &str, video_url: &str) -> Result<Media> {
        let mut state = self.lock();
        state.calls.push(format!("add_video_url {property_id}"));
        if state.fail_video_urls {
            return Err(server_error());
        }
        let entries = state.media.entry(property_id.to_string()).or_default();
        let media = Media {
            id: format!("{property_id}-v{}", entries.len()),
            url: video_url.to_string(),
            kind: MediaKind::Video,
            display_order: entries.len() as i32,
        };
        entries.push(media.clone());
        Ok(media)
    }
}

/// Collects notifications for assertions
#[derive(Default)]
pub struct RecordingNotifier {
    successes: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn warning(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}
