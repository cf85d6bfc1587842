use url::Url;

const YOUTUBE_HOSTS: &[&str] = &["youtube.com", "www.youtube.com", "m.youtube.com"];

/// How a pasted video link should be played back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Rewritten to an iframe-embeddable player URL
    Embed(String),
    /// Used as-is as a video element source
    Direct(String),
}

impl VideoSource {
    pub fn url(&self) -> &str {
        match self {
            VideoSource::Embed(url) | VideoSource::Direct(url) => url,
        }
    }

    pub fn is_embed(&self) -> bool {
        matches!(self, VideoSource::Embed(_))
    }
}

/// Recognizes YouTube watch, short-link, shorts and embed URLs; everything
/// else is treated as a direct file URL.
pub fn classify_video_url(raw: &str) -> VideoSource {
    let trimmed = raw.trim();
    match youtube_id(trimmed) {
        Some(id) => VideoSource::Embed(format!("https://www.youtube.com/embed/{id}")),
        None => VideoSource::Direct(trimmed.to_string()),
    }
}

fn youtube_id(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    let host = url.host_str()?.to_lowercase();
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let id = if host == "youtu.be" {
        segments.next().map(str::to_string)
    } else if YOUTUBE_HOSTS.contains(&host.as_str()) {
        match segments.next() {
            Some("watch") => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            Some("shorts") | Some("embed") | Some("live") => segments.next().map(str::to_string),
            _ => None,
        }
    } else {
        None
    };

    id.filter(|id| is_video_id(id))
}

fn is_video_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
