use crate::search::FilterState;
use serde::{Deserialize, Serialize};

/// Server-side filters for `GET /properties`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PropertyQuery {
    /// Only published (or only draft) listings
    pub active: Option<bool>,
    /// Unit type
    pub kind: Option<String>,
    /// Condition in backend spelling
    pub status: Option<String>,
    pub limit: Option<u32>,
}

impl PropertyQuery {
    /// What the public site asks for: published listings only
    pub fn published() -> Self {
        Self {
            active: Some(true),
            ..Self::default()
        }
    }

    /// Everything, as the admin table loads it
    pub fn admin() -> Self {
        Self {
            limit: Some(1000),
            ..Self::default()
        }
    }

    /// Pushes the filters the backend understands; the rest run locally
    pub fn from_filters(filters: &FilterState) -> Self {
        Self {
            active: Some(true),
            kind: filters.kind_filter().map(str::to_string),
            status: filters.status_filter().map(str::to_string),
            limit: None,
        }
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(kind) = &self.kind {
            pairs.push(("type", kind.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        if let Some(active) = self.active {
            pairs.push(("active", active.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// A file picked by the admin, held in memory until it is uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordRequest<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaOrderRequest {
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoUrlRequest<'a> {
    pub video_url: &'a str,
}
