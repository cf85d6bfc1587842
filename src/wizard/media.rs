use crate::api::UploadFile;
use crate::error::{DeskError, Result};
use crate::models::Media;

pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// One row of the wizard's media list
#[derive(Debug, Clone, PartialEq)]
pub enum StagedMedia {
    /// Stored by the backend
    Persisted(Media),
    /// Picked before the listing had an id; uploaded on save
    Local {
        temp_id: String,
        preview_url: String,
        file: UploadFile,
        display_order: i32,
    },
}

impl StagedMedia {
    pub fn id(&self) -> &str {
        match self {
            StagedMedia::Persisted(media) => &media.id,
            StagedMedia::Local { temp_id, .. } => temp_id,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            StagedMedia::Persisted(media) => &media.url,
            StagedMedia::Local { preview_url, .. } => preview_url,
        }
    }

    pub fn display_order(&self) -> i32 {
        match self {
            StagedMedia::Persisted(media) => media.display_order,
            StagedMedia::Local { display_order, .. } => *display_order,
        }
    }

    fn set_display_order(&mut self, order: i32) {
        match self {
            StagedMedia::Persisted(media) => media.display_order = order,
            StagedMedia::Local { display_order, .. } => *display_order = order,
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, StagedMedia::Persisted(_))
    }
}

/// Rejects the whole batch if any file is too large or not an image
pub fn validate_files(files: &[UploadFile]) -> Result<()> {
    for file in files {
        if file.size() > MAX_IMAGE_BYTES {
            return Err(DeskError::Validation(format!(
                "Arquivo {} é muito grande (máx: 10MB)",
                file.file_name
            )));
        }
        if !ALLOWED_IMAGE_TYPES.contains(&file.content_type.as_str()) {
            return Err(DeskError::Validation(format!(
                "Tipo de arquivo não suportado: {}",
                file.file_name
            )));
        }
    }
    Ok(())
}

/// Removes the item at `from` and reinserts it at `to`, returning a new list.
/// Out-of-range `from` leaves the order unchanged; `to` is clamped.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut next = items.to_vec();
    if from >= next.len() {
        return next;
    }
    let item = next.remove(from);
    let to = to.min(next.len());
    next.insert(to, item);
    next
}

/// Ordered media list plus the drag-and-drop cursor.
///
/// Every change replaces the list wholesale; positions are the display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaStaging {
    items: Vec<StagedMedia>,
    dragged: Option<usize>,
    drag_over: Option<usize>,
    /// Sequence for local temp ids; never reused within one staging list
    next_temp: u64,
}

impl MediaStaging {
    pub fn from_media(media: Vec<Media>) -> Self {
        let mut media = media;
        media.sort_by_key(|m| m.display_order);
        Self {
            items: media.into_iter().map(StagedMedia::Persisted).collect(),
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[StagedMedia] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_persisted(&self) -> bool {
        self.items.iter().any(StagedMedia::is_persisted)
    }

    pub fn next_order(&self) -> i32 {
        self.items.len() as i32
    }

    pub fn get(&self, id: &str) -> Option<&StagedMedia> {
        self.items.iter().find(|m| m.id() == id)
    }

    pub fn push(&mut self, entry: StagedMedia) {
        let mut next = self.items.clone();
        next.push(entry);
        self.items = next;
    }

    /// Appends a file picked before the listing had an id, returning its temp id
    pub fn push_local(&mut self, file: UploadFile) -> String {
        self.next_temp += 1;
        let temp_id = format!("temp-{}", self.next_temp);
        let entry = StagedMedia::Local {
            preview_url: format!("local://{}/{}", temp_id, file.file_name),
            temp_id: temp_id.clone(),
            file,
            display_order: self.next_order(),
        };
        self.push(entry);
        temp_id
    }

    /// Swaps one entry for another in place, e.g. a local file for its upload
    pub fn replace(&mut self, id: &str, entry: StagedMedia) {
        self.items = self
            .items
            .iter()
            .map(|m| if m.id() == id { entry.clone() } else { m.clone() })
            .collect();
    }

    pub fn remove(&mut self, id: &str) -> Option<StagedMedia> {
        let removed = self.get(id).cloned()?;
        self.items = self.items.iter().filter(|m| m.id() != id).cloned().collect();
        Some(removed)
    }

    pub fn dragged(&self) -> Option<usize> {
        self.dragged
    }

    pub fn drag_over_index(&self) -> Option<usize> {
        self.drag_over
    }

    pub fn drag_start(&mut self, index: usize) {
        if index < self.items.len() {
            self.dragged = Some(index);
        }
    }

    /// Marks the candidate drop target. Hovering the source itself clears it.
    pub fn drag_over(&mut self, index: usize) {
        self.drag_over = match self.dragged {
            Some(source) if source != index && index < self.items.len() => Some(index),
            _ => None,
        };
    }

    pub fn drag_end(&mut self) {
        self.dragged = None;
        self.drag_over = None;
    }

    /// Completes a drag. Returns true if the order changed.
    /// A target past the end is ignored, as it is while hovering.
    pub fn drop_at(&mut self, target: usize) -> bool {
        let source = self.dragged;
        self.drag_end();
        match source {
            Some(source) if source != target && target < self.items.len() => self.move_to(source, target),
            _ => false,
        }
    }

    /// Splice-moves one entry and re-sequences every display order
    pub fn move_to(&mut self, from: usize, to: usize) -> bool {
        if from >= self.items.len() || from == to {
            return false;
        }
        let mut next = move_item(&self.items, from, to);
        for (idx, entry) in next.iter_mut().enumerate() {
            entry.set_display_order(idx as i32);
        }
        self.items = next;
        true
    }

    /// `(media_id, display_order)` for each stored item, in list order
    pub fn persisted_orders(&self) -> Vec<(String, i32)> {
        self.items
            .iter()
            .filter_map(|m| match m {
                StagedMedia::Persisted(media) => Some((media.id.clone(), media.display_order)),
                StagedMedia::Local { .. } => None,
            })
            .collect()
    }

    /// Files still waiting for an upload, with their temp ids
    pub fn pending_uploads(&self) -> Vec<(String, UploadFile)> {
        self.items
            .iter()
            .filter_map(|m| match m {
                StagedMedia::Local { temp_id, file, .. } => Some((temp_id.clone(), file.clone())),
                StagedMedia::Persisted(_) => None,
            })
            .collect()
    }

    pub fn persisted_media(&self) -> Vec<Media> {
        self.items
            .iter()
            .filter_map(|m| match m {
                StagedMedia::Persisted(media) => Some(media.clone()),
                StagedMedia::Local { .. } => None,
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) fn image(id: &str, order: i32) -> Media {
    Media {
        id: id.to_string(),
        url: format!("https://cdn.example.com/{id}.jpg"),
        kind: crate::models::MediaKind::Image,
        display_order: order,
    }
}
