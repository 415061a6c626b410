//! Locations of precomputed media resources
//!
//! All resources share the layout `{base}/{kind}/{task?}/{config?}/{file}`.

/// Kinds of media served next to the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    PointCloud,
    Code,
    Image(usize),
}

impl MediaKind {
    fn directory(self) -> &'static str {
        match self {
            MediaKind::PointCloud => "pcd",
            MediaKind::Code => "code",
            MediaKind::Image(_) => "images",
        }
    }

    fn file_name(self) -> String {
        match self {
            MediaKind::PointCloud => "precomputed.json".to_string(),
            MediaKind::Code => "generated_code.py".to_string(),
            MediaKind::Image(index) => format!("detection_img_{index}.png"),
        }
    }
}

/// Builds media URLs below a fixed base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLocator {
    base: String,
}

impl MediaLocator {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// URL of a resource, optionally scoped by task and configuration
    pub fn url(&self, kind: MediaKind, task: Option<&str>, config: Option<&str>) -> String {
        let file = kind.file_name();
        let mut segments = vec![kind.directory()];
        segments.extend(task);
        segments.extend(config);
        segments.push(&file);
        join_url(&self.base, &segments)
    }

    /// Fallback point cloud shown when a request fails
    pub fn pcd_url(&self, task: Option<&str>, config: Option<&str>) -> String {
        self.url(MediaKind::PointCloud, task, config)
    }

    pub fn code_url(&self, task: Option<&str>, config: Option<&str>) -> String {
        self.url(MediaKind::Code, task, config)
    }

    /// Detection image URL; `cache_bust` appends a `?t=` query so refreshed
    /// images bypass caches
    pub fn image_url(
        &self,
        index: usize,
        task: Option<&str>,
        config: Option<&str>,
        cache_bust: Option<u64>,
    ) -> String {
        let url = self.url(MediaKind::Image(index), task, config);
        match cache_bust {
            Some(stamp) => format!("{url}?t={stamp}"),
            None => url,
        }
    }
}

/// Join path segments onto a base without doubling or dropping slashes
pub fn join_url(base: &str, segments: &[&str]) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    for segment in segments {
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            continue;
        }
        url.push('/');
        url.push_str(segment);
    }
    url
}
