//! Two-stage property creation/edit flow.
//!
//! A new listing is created as a draft the moment the wizard opens, so media
//! uploaded in the first stage attaches to a real id. The info stage saves
//! the details and publishes the listing once it has at least one media item.
//!
//! Reordering is optimistic: the local list is updated first and is the
//! source of truth; the per-item order updates sent afterwards are best
//! effort and a failure is only logged.

pub mod form;
pub mod media;
pub mod notify;
pub mod video;

#[cfg(test)]
pub(crate) mod testing;

use crate::api::{ListingBackend, UploadFile};
use crate::error::{DeskError, Result};
use crate::models::{ListingState, Media, MediaKind, Property, Purpose};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub use form::{characteristic_catalog, PropertyForm};
pub use media::{move_item, validate_files, MediaStaging, StagedMedia};
pub use notify::{LogNotifier, Notifier};
pub use video::{classify_video_url, VideoSource};

/// Id prefix of videos attached before the listing had an id
const LOCAL_VIDEO_PREFIX: &str = "local-video-";

/// Steps of the new-listing flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStage {
    Media,
    Info,
}

/// Tabs of the edit flow; both save independently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTab {
    Info,
    Media,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardMode {
    Create(WizardStage),
    Edit(EditTab),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Media stage submitted; nothing was sent
    Advanced,
    Saved { id: String, state: ListingState },
}

/// Result of the server sync after a reorder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReorderReport {
    pub moved: bool,
    pub synced: usize,
    pub failed: Vec<String>,
}

pub struct PropertyWizard {
    backend: Arc<dyn ListingBackend>,
    notifier: Arc<dyn Notifier>,
    mode: WizardMode,
    property_id: Option<String>,
    /// State of the record as loaded, kept for edits
    loaded_state: ListingState,
    form: PropertyForm,
    media: MediaStaging,
    videos: Vec<Media>,
}

impl PropertyWizard {
    /// Opens the wizard for a new listing, creating the draft record right away.
    ///
    /// If the draft cannot be created the wizard still opens; files are then
    /// kept locally and uploaded after the final save creates the record.
    pub async fn open_new(backend: Arc<dyn ListingBackend>, notifier: Arc<dyn Notifier>) -> Self {
        let property_id = create_draft(backend.as_ref(), notifier.as_ref()).await;

        Self {
            backend,
            notifier,
            mode: WizardMode::Create(WizardStage::Media),
            property_id,
            loaded_state: ListingState::Draft,
            form: PropertyForm::default(),
            media: MediaStaging::default(),
            videos: Vec::new(),
        }
    }

    /// Opens an existing listing, loading its current media from the backend
    pub async fn open_existing(
        backend: Arc<dyn ListingBackend>,
        notifier: Arc<dyn Notifier>,
        property: Property,
    ) -> Self {
        let mut all_media: Vec<Media> = property
            .media
            .iter()
            .chain(property.videos.iter())
            .cloned()
            .collect();

        if let Some(id) = property.id.as_deref() {
            match backend.list_media(id).await {
                Ok(media) => all_media = media,
                Err(e) => warn!("Failed to load media for {}: {}", id, e),
            }
        }

        let (videos, images): (Vec<Media>, Vec<Media>) =
            all_media.into_iter().partition(|m| m.kind == MediaKind::Video);

        Self {
            backend,
            notifier,
            mode: WizardMode::Edit(EditTab::Media),
            form: PropertyForm::from_property(&property),
            property_id: property.id,
            loaded_state: property.state,
            media: MediaStaging::from_media(images),
            videos,
        }
    }

    pub fn mode(&self) -> WizardMode {
        self.mode
    }

    pub fn property_id(&self) -> Option<&str> {
        self.property_id.as_deref()
    }

    pub fn form(&self) -> &PropertyForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PropertyForm {
        &mut self.form
    }

    pub fn media(&self) -> &MediaStaging {
        &self.media
    }

    pub fn videos(&self) -> &[Media] {
        &self.videos
    }

    pub fn set_purpose(&mut self, purpose: Purpose) {
        self.form.set_purpose(purpose);
    }

    /// Switches tabs in the edit flow. Returns false in the create flow.
    pub fn select_tab(&mut self, tab: EditTab) -> bool {
        match self.mode {
            WizardMode::Edit(_) => {
                self.mode = WizardMode::Edit(tab);
                true
            }
            WizardMode::Create(_) => false,
        }
    }

    /// Leaves the media stage of the create flow
    pub fn continue_to_info(&mut self) {
        if let WizardMode::Create(WizardStage::Media) = self.mode {
            self.mode = WizardMode::Create(WizardStage::Info);
        }
    }

    pub fn back_to_media(&mut self) {
        if let WizardMode::Create(WizardStage::Info) = self.mode {
            self.mode = WizardMode::Create(WizardStage::Media);
        }
    }

    /// Clears everything entered.
    ///
    /// A new-listing wizard discards its draft and starts over with a fresh
    /// one, so it is ready for uploads again. An edit wizard keeps its id.
    pub async fn reset(&mut self) {
        self.form = PropertyForm::default();
        self.media = MediaStaging::default();
        self.videos.clear();

        if let WizardMode::Create(_) = self.mode {
            self.mode = WizardMode::Create(WizardStage::Media);
            if let Some(old) = self.property_id.take() {
                if let Err(e) = self.backend.delete_property(&old).await {
                    warn!("Failed to discard draft listing {}: {}", old, e);
                }
            }
            self.property_id = create_draft(self.backend.as_ref(), self.notifier.as_ref()).await;
        }
    }

    fn report(&self, err: DeskError) -> DeskError {
        self.notifier.error(&err.user_message());
        err
    }

    /// Uploads picked images, or stages them locally when there is no id yet.
    ///
    /// Uploads run one by one; the first failure stops the batch and keeps
    /// whatever already made it.
    pub async fn add_files(&mut self, files: Vec<UploadFile>) -> Result<()> {
        validate_files(&files).map_err(|e| self.report(e))?;

        let Some(property_id) = self.property_id.clone() else {
            for file in files {
                self.media.push_local(file);
            }
            return Ok(());
        };

        for file in &files {
            match self.backend.upload_media(&property_id, file).await {
                Ok(mut media) => {
                    media.display_order = self.media.next_order();
                    self.media.push(StagedMedia::Persisted(media));
                }
                Err(e) => {
                    warn!("Upload of {} failed: {}", file.file_name, e);
                    return Err(self.report(e));
                }
            }
        }
        info!("Uploaded {} file(s) to {}", files.len(), property_id);
        Ok(())
    }

    /// Removes a media item; stored items are deleted on the backend first
    pub async fn remove_media(&mut self, media_id: &str) -> Result<()> {
        let Some(entry) = self.media.get(media_id) else {
            return Ok(());
        };

        if let (StagedMedia::Persisted(media), Some(property_id)) = (entry, self.property_id.as_deref()) {
            if let Err(e) = self.backend.delete_media(property_id, &media.id).await {
                warn!("Failed to delete media {}: {}", media.id, e);
                return Err(self.report(e));
            }
        }

        self.media.remove(media_id);
        Ok(())
    }

    pub fn drag_start(&mut self, index: usize) {
        self.media.drag_start(index);
    }

    pub fn drag_over(&mut self, index: usize) {
        self.media.drag_over(index);
    }

    pub fn drag_end(&mut self) {
        self.media.drag_end();
    }

    /// Finishes a drag: reorders locally, then pushes each stored item's new order
    pub async fn drop_at(&mut self, target: usize) -> ReorderReport {
        if !self.media.drop_at(target) {
            return ReorderReport::default();
        }
        self.sync_order().await
    }

    pub async fn move_up(&mut self, index: usize) -> ReorderReport {
        if index == 0 || !self.media.move_to(index, index - 1) {
            return ReorderReport::default();
        }
        self.sync_order().await
    }

    pub async fn move_down(&mut self, index: usize) -> ReorderReport {
        if index + 1 >= self.media.len() || !self.media.move_to(index, index + 1) {
            return ReorderReport::default();
        }
        self.sync_order().await
    }

    /// One sequential call per stored item. Failures are logged, never rolled back.
    async fn sync_order(&self) -> ReorderReport {
        let mut report = ReorderReport {
            moved: true,
            ..ReorderReport::default()
        };
        let Some(property_id) = self.property_id.as_deref() else {
            return report;
        };

        for (media_id, order) in self.media.persisted_orders() {
            match self.backend.update_media_order(property_id, &media_id, order).await {
                Ok(()) => report.synced += 1,
                Err(e) => {
                    warn!("Order update for media {} failed: {}", media_id, e);
                    report.failed.push(media_id);
                }
            }
        }
        report
    }

    /// Attaches a pasted video link. YouTube links are stored in embeddable form.
    pub async fn add_video_url(&mut self, raw: &str) -> Result<VideoSource> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(self.report(DeskError::Validation("Informe a URL do vídeo".to_string())));
        }
        let source = classify_video_url(raw);

        let media = match self.property_id.as_deref() {
            Some(property_id) => self
                .backend
                .add_video_url(property_id, source.url())
                .await
                .map_err(|e| self.report(e))?,
            None => Media {
                id: format!("{LOCAL_VIDEO_PREFIX}{}", self.videos.len()),
                url: source.url().to_string(),
                kind: MediaKind::Video,
                display_order: self.videos.len() as i32,
            },
        };

        let mut videos = self.videos.clone();
        videos.push(media);
        self.videos = videos;
        Ok(source)
    }

    pub async fn remove_video(&mut self, index: usize) -> Result<()> {
        let Some(video) = self.videos.get(index) else {
            return Ok(());
        };

        if let (Some(property_id), false) = (self.property_id.as_deref(), video.id.starts_with(LOCAL_VIDEO_PREFIX)) {
            if let Err(e) = self.backend.delete_media(property_id, &video.id).await {
                warn!("Failed to delete video {}: {}", video.id, e);
                return Err(self.report(e));
            }
        }

        self.videos = self
            .videos
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, v)| v.clone())
            .collect();
        Ok(())
    }

    /// Submits the current step.
    ///
    /// In the create flow the media stage only advances. The info stage
    /// validates, saves, uploads any locally staged files and publishes the
    /// listing when it has media; without media it stays a draft and the
    /// caller is warned.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        if let WizardMode::Create(WizardStage::Media) = self.mode {
            self.continue_to_info();
            return Ok(SubmitOutcome::Advanced);
        }

        let mut property = self.form.validate().map_err(|e| self.report(e))?;
        let creating = matches!(self.mode, WizardMode::Create(_));
        property.state = if creating {
            ListingState::Draft
        } else {
            self.loaded_state
        };
        property.media = self.media.persisted_media();
        property.videos = self.videos.clone();

        let id = match self.property_id.clone() {
            Some(id) => {
                self.backend
                    .update_property(&id, &property)
                    .await
                    .map_err(|e| self.report(e))?;
                id
            }
            None => {
                let created = self
                    .backend
                    .create_property(&property)
                    .await
                    .map_err(|e| self.report(e))?;
                let id = created.id.ok_or_else(|| {
                    self.report(DeskError::Validation("Backend não retornou o id do imóvel".to_string()))
                })?;
                self.property_id = Some(id.clone());
                id
            }
        };

        self.flush_staged(&id).await;

        if !creating {
            self.notifier.success("Imóvel salvo com sucesso");
            return Ok(SubmitOutcome::Saved { id, state: self.loaded_state });
        }

        let has_media = self.media.has_persisted()
            || self.videos.iter().any(|v| !v.id.starts_with(LOCAL_VIDEO_PREFIX));
        if !has_media {
            self.notifier
                .warning("Imóvel salvo como rascunho: adicione ao menos uma mídia para publicá-lo");
            return Ok(SubmitOutcome::Saved { id, state: ListingState::Draft });
        }

        self.backend
            .set_property_active(&id, true)
            .await
            .map_err(|e| self.report(e))?;
        info!("Published listing {}", id);
        self.notifier.success("Imóvel publicado com sucesso");
        Ok(SubmitOutcome::Saved { id, state: ListingState::Published })
    }

    /// Sends media attached before the listing had an id, keeping list order
    async fn flush_staged(&mut self, property_id: &str) {
        let mut videos = Vec::with_capacity(self.videos.len());
        for video in &self.videos {
            if !video.id.starts_with(LOCAL_VIDEO_PREFIX) {
                videos.push(video.clone());
                continue;
            }
            match self.backend.add_video_url(property_id, &video.url).await {
                Ok(stored) => videos.push(stored),
                Err(e) => {
                    warn!("Failed to attach video {}: {}", video.url, e);
                    self.notifier.error(&e.user_message());
                    videos.push(video.clone());
                }
            }
        }
        self.videos = videos;

        let pending = self.media.pending_uploads();
        if pending.is_empty() {
            return;
        }

        for (temp_id, file) in pending {
            match self.backend.upload_media(property_id, &file).await {
                Ok(mut media) => {
                    if let Some(entry) = self.media.get(&temp_id) {
                        media.display_order = entry.display_order();
                    }
                    self.media.replace(&temp_id, StagedMedia::Persisted(media));
                }
                Err(e) => {
                    warn!("Upload of staged file {} failed: {}", file.file_name, e);
                    self.notifier.error(&e.user_message());
                }
            }
        }
        self.sync_order().await;
    }
}

/// Creates the placeholder record a new listing starts from
async fn create_draft(backend: &dyn ListingBackend, notifier: &dyn Notifier) -> Option<String> {
    match backend.create_property(&Property::placeholder()).await {
        Ok(draft) => {
            debug!("Created draft listing {:?}", draft.id);
            draft.id
        }
        Err(e) => {
            warn!("Failed to create draft listing: {}", e);
            notifier.error(&e.user_message());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{FakeBackend, RecordingNotifier};
    use super::*;
    use crate::models::Condition;
    use crate::wizard::media::image;

    fn jpeg(name: &str) -> UploadFile {
        UploadFile::new(name, "image/jpeg", vec![0xFF, 0xD8, 0xFF])
    }

    async fn new_wizard(backend: &Arc<FakeBackend>) -> (PropertyWizard, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let wizard = PropertyWizard::open_new(backend.clone(), notifier.clone()).await;
        (wizard, notifier)
    }

    fn fill_info(wizard: &mut PropertyWizard) {
        let form = wizard.form_mut();
        form.title = "Apartamento no Sudoeste".to_string();
        form.city = "Brasília".to_string();
        form.set_price("75000000");
    }

    #[tokio::test]
    async fn opening_creates_draft_id_before_any_upload() {
        let backend = Arc::new(FakeBackend::default());
        let (wizard, _) = new_wizard(&backend).await;

        assert!(wizard.property_id().is_some());
        assert!(wizard.media().is_empty());
        assert_eq!(wizard.mode(), WizardMode::Create(WizardStage::Media));
        let draft = backend.property(wizard.property_id().unwrap());
        assert_eq!(draft.state, ListingState::Draft);
    }

    #[tokio::test]
    async fn media_stage_submit_only_advances() {
        let backend = Arc::new(FakeBackend::default());
        let (mut wizard, _) = new_wizard(&backend).await;
        let calls_before = backend.calls().len();

        assert_eq!(wizard.submit().await.unwrap(), SubmitOutcome::Advanced);
        assert_eq!(wizard.mode(), WizardMode::Create(WizardStage::Info));
        assert_eq!(backend.calls().len(), calls_before);
    }

    #[tokio::test]
    async fn publishes_when_media_exists() {
        let backend = Arc::new(FakeBackend::default());
        let (mut wizard, notifier) = new_wizard(&backend).await;
        wizard.add_files(vec![jpeg("sala.jpg"), jpeg("quarto.jpg")]).await.unwrap();
        wizard.submit().await.unwrap();
        fill_info(&mut wizard);

        let outcome = wizard.submit().await.unwrap();
        let id = wizard.property_id().unwrap().to_string();
        assert_eq!(outcome, SubmitOutcome::Saved { id: id.clone(), state: ListingState::Published });
        let stored = backend.property(&id);
        assert!(stored.is_active());
        assert_eq!(stored.title, "Apartamento no Sudoeste");
        assert_eq!(stored.price, Some(750_000.0));
        assert!(notifier.warnings().is_empty());
    }

    #[tokio::test]
    async fn stays_draft_and_warns_without_media() {
        let backend = Arc::new(FakeBackend::default());
        let (mut wizard, notifier) = new_wizard(&backend).await;
        wizard.continue_to_info();
        fill_info(&mut wizard);

        let outcome = wizard.submit().await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Saved { state: ListingState::Draft, .. }));
        assert!(!backend.property(wizard.property_id().unwrap()).is_active());
        assert_eq!(notifier.warnings().len(), 1);
    }

    #[tokio::test]
    async fn validation_blocks_before_network() {
        let backend = Arc::new(FakeBackend::default());
        let (mut wizard, notifier) = new_wizard(&backend).await;
        wizard.continue_to_info();
        let calls_before = backend.calls().len();

        let err = wizard.submit().await.unwrap_err();
        assert!(matches!(err, DeskError::Validation(_)));
        assert_eq!(backend.calls().len(), calls_before);
        assert_eq!(notifier.errors().len(), 1);
    }

    #[tokio::test]
    async fn reorder_is_optimistic_and_tolerates_sync_failures() {
        let backend = Arc::new(FakeBackend::default());
        let property = backend.seed(
            Property { title: "Casa".to_string(), city: "Gama".to_string(), ..Property::default() },
            vec![image("a", 0), image("b", 1), image("c", 2)],
        );
        backend.fail_order_updates_for("c");
        let notifier = Arc::new(RecordingNotifier::default());
        let mut wizard = PropertyWizard::open_existing(backend.clone(), notifier.clone(), property).await;

        wizard.drag_start(0);
        wizard.drag_over(2);
        let report = wizard.drop_at(2).await;

        let ids: Vec<_> = wizard.media().items().iter().map(StagedMedia::id).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert!(report.moved);
        assert_eq!(report.synced, 2);
        assert_eq!(report.failed, vec!["c".to_string()]);
        assert_eq!(
            backend.order_calls(),
            vec![("b".to_string(), 0), ("c".to_string(), 1), ("a".to_string(), 2)]
        );
        assert!(notifier.errors().is_empty());
    }

    #[tokio::test]
    async fn failed_delete_keeps_local_state() {
        let backend = Arc::new(FakeBackend::default());
        let (mut wizard, notifier) = new_wizard(&backend).await;
        wizard.add_files(vec![jpeg("fachada.jpg")]).await.unwrap();
        let media_id = wizard.media().items()[0].id().to_string();

        backend.fail_deletes(true);
        assert!(wizard.remove_media(&media_id).await.is_err());
        assert_eq!(wizard.media().len(), 1);
        assert_eq!(notifier.errors(), vec!["Erro interno".to_string()]);

        backend.fail_deletes(false);
        wizard.remove_media(&media_id).await.unwrap();
        assert!(wizard.media().is_empty());
    }

    #[tokio::test]
    async fn separate_picks_without_a_draft_both_survive_the_save() {
        let backend = Arc::new(FakeBackend::default());
        backend.fail_creates(true);
        let (mut wizard, _) = new_wizard(&backend).await;

        wizard.add_files(vec![jpeg("a.jpg")]).await.unwrap();
        wizard.add_files(vec![jpeg("b.jpg")]).await.unwrap();
        let temp_ids: Vec<_> = wizard.media().items().iter().map(|m| m.id().to_string()).collect();
        assert_ne!(temp_ids[0], temp_ids[1]);

        backend.fail_creates(false);
        wizard.continue_to_info();
        fill_info(&mut wizard);
        wizard.submit().await.unwrap();

        assert_eq!(backend.uploaded_names(), vec!["a.jpg".to_string(), "b.jpg".to_string()]);
        let urls: Vec<_> = wizard.media().items().iter().map(StagedMedia::url).collect();
        assert_eq!(
            urls,
            vec!["https://cdn.example.com/a.jpg", "https://cdn.example.com/b.jpg"]
        );
        let synced: Vec<_> = backend.order_calls().into_iter().map(|(id, _)| id).collect();
        assert_eq!(synced.len(), 2);
        assert_ne!(synced[0], synced[1]);
    }

    #[tokio::test]
    async fn failed_upload_stops_the_batch_and_keeps_earlier_files() {
        let backend = Arc::new(FakeBackend::default());
        let (mut wizard, notifier) = new_wizard(&backend).await;
        backend.fail_uploads_for("quarto.jpg");

        let err = wizard
            .add_files(vec![jpeg("sala.jpg"), jpeg("quarto.jpg"), jpeg("cozinha.jpg")])
            .await
            .unwrap_err();

        assert!(matches!(err, DeskError::Backend { status: 500, .. }));
        assert_eq!(wizard.media().len(), 1);
        assert_eq!(wizard.media().items()[0].url(), "https://cdn.example.com/sala.jpg");
        assert_eq!(backend.uploaded_names(), vec!["sala.jpg".to_string()]);
        assert_eq!(notifier.errors(), vec!["Erro interno".to_string()]);
    }

    #[tokio::test]
    async fn rejected_video_url_leaves_videos_untouched() {
        let backend = Arc::new(FakeBackend::default());
        let (mut wizard, notifier) = new_wizard(&backend).await;
        wizard.add_video_url("https://cdn.example.com/tour.mp4").await.unwrap();
        let before = wizard.videos().to_vec();

        backend.fail_video_urls(true);
        assert!(wizard.add_video_url("https://youtu.be/dQw4w9WgXcQ").await.is_err());

        assert_eq!(wizard.videos(), before.as_slice());
        assert_eq!(notifier.errors().len(), 1);
    }

    #[tokio::test]
    async fn reset_replaces_the_draft() {
        let backend = Arc::new(FakeBackend::default());
        let (mut wizard, _) = new_wizard(&backend).await;
        wizard.add_files(vec![jpeg("sala.jpg")]).await.unwrap();
        wizard.continue_to_info();
        let old = wizard.property_id().unwrap().to_string();

        wizard.reset().await;

        let new = wizard.property_id().unwrap().to_string();
        assert_ne!(old, new);
        assert!(wizard.media().is_empty());
        assert_eq!(wizard.mode(), WizardMode::Create(WizardStage::Media));
        assert!(backend.calls().contains(&format!("delete_property {old}")));
        assert_eq!(backend.property(&new).title, "Novo Imóvel");
    }

    #[tokio::test]
    async fn rejected_batch_uploads_nothing() {
        let backend = Arc::new(FakeBackend::default());
        let (mut wizard, notifier) = new_wizard(&backend).await;
        let pdf = UploadFile::new("planta.pdf", "application/pdf", vec![1]);

        assert!(wizard.add_files(vec![jpeg("ok.jpg"), pdf]).await.is_err());
        assert!(wizard.media().is_empty());
        assert_eq!(notifier.errors().len(), 1);
    }

    #[tokio::test]
    async fn stages_locally_when_draft_creation_failed_then_flushes() {
        let backend = Arc::new(FakeBackend::default());
        backend.fail_creates(true);
        let (mut wizard, _) = new_wizard(&backend).await;
        assert!(wizard.property_id().is_none());

        wizard.add_files(vec![jpeg("a.jpg"), jpeg("b.jpg")]).await.unwrap();
        assert!(wizard.media().items().iter().all(|m| !m.is_persisted()));
        wizard.drag_start(1);
        wizard.drop_at(0).await;

        backend.fail_creates(false);
        wizard.submit().await.unwrap();
        fill_info(&mut wizard);
        let outcome = wizard.submit().await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Saved { state: ListingState::Published, .. }));
        assert!(wizard.media().items().iter().all(StagedMedia::is_persisted));
        let names = backend.uploaded_names();
        assert_eq!(names, vec!["b.jpg".to_string(), "a.jpg".to_string()]);
    }

    #[tokio::test]
    async fn youtube_links_are_stored_embeddable() {
        let backend = Arc::new(FakeBackend::default());
        let (mut wizard, _) = new_wizard(&backend).await;

        let source = wizard.add_video_url(" https://youtu.be/abc123XYZ_- ").await.unwrap();
        assert!(source.is_embed());
        assert_eq!(wizard.videos()[0].url, "https://www.youtube.com/embed/abc123XYZ_-");

        let source = wizard.add_video_url("https://cdn.example.com/tour.mp4").await.unwrap();
        assert_eq!(source, VideoSource::Direct("https://cdn.example.com/tour.mp4".to_string()));
        assert_eq!(wizard.videos().len(), 2);

        wizard.remove_video(0).await.unwrap();
        assert_eq!(wizard.videos().len(), 1);
    }

    #[tokio::test]
    async fn videos_added_before_the_draft_exists_are_attached_on_save() {
        let backend = Arc::new(FakeBackend::default());
        backend.fail_creates(true);
        let (mut wizard, _) = new_wizard(&backend).await;
        wizard.add_video_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").await.unwrap();
        assert!(wizard.videos()[0].id.starts_with(LOCAL_VIDEO_PREFIX));

        backend.fail_creates(false);
        wizard.continue_to_info();
        fill_info(&mut wizard);
        let outcome = wizard.submit().await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Saved { state: ListingState::Published, .. }));
        let id = wizard.property_id().unwrap().to_string();
        assert!(backend.calls().contains(&format!("add_video_url {id}")));
        assert!(!wizard.videos()[0].id.starts_with(LOCAL_VIDEO_PREFIX));
    }

    #[tokio::test]
    async fn edit_keeps_published_state_and_switches_tabs() {
        let backend = Arc::new(FakeBackend::default());
        let property = backend.seed(
            Property {
                title: "Cobertura".to_string(),
                city: "Brasília".to_string(),
                purpose: Some(Purpose::Sale),
                condition: Some(Condition::Used),
                state: ListingState::Published,
                ..Property::default()
            },
            vec![image("x", 0)],
        );
        let notifier = Arc::new(RecordingNotifier::default());
        let mut wizard = PropertyWizard::open_existing(backend.clone(), notifier.clone(), property).await;

        assert_eq!(wizard.mode(), WizardMode::Edit(EditTab::Media));
        assert!(wizard.select_tab(EditTab::Info));
        wizard.set_purpose(Purpose::Launch);
        assert_eq!(wizard.form().condition(), Condition::OffPlan);

        let outcome = wizard.submit().await.unwrap();
        let id = wizard.property_id().unwrap().to_string();
        assert_eq!(outcome, SubmitOutcome::Saved { id: id.clone(), state: ListingState::Published });
        let stored = backend.property(&id);
        assert!(stored.is_active());
        assert_eq!(stored.condition, Some(Condition::OffPlan));
        assert_eq!(notifier.successes().len(), 1);
    }

    #[tokio::test]
    async fn move_helpers_share_the_reorder_path() {
        let backend = Arc::new(FakeBackend::default());
        let property = backend.seed(
            Property { title: "Loja".to_string(), city: "Gama".to_string(), ..Property::default() },
            vec![image("a", 0), image("b", 1)],
        );
        let notifier = Arc::new(RecordingNotifier::default());
        let mut wizard = PropertyWizard::open_existing(backend.clone(), notifier, property).await;

        assert!(!wizard.move_up(0).await.moved);
        assert!(!wizard.move_down(1).await.moved);
        let report = wizard.move_down(0).await;
        assert!(report.moved);
        let ids: Vec<_> = wizard.media().items().iter().map(StagedMedia::id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
