use crate::view_model::ClientViewModel;

/// Size label shown before the first progress frame.
pub const SIZE_PENDING_LABEL: &str = "...";
/// Size label when the server does not know the total.
pub const SIZE_UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadStatus {
    pub url: String,
    pub size_label: String,
    pub progress: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientState {
    keywords: Vec<String>,
    urls: Vec<String>,
    urls_visible: bool,
    saved: Vec<String>,
    download: Option<DownloadStatus>,
    error: Option<String>,
    dirty: bool,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ClientViewModel {
        ClientViewModel {
            keywords: self.keywords.clone(),
            urls: if self.urls_visible {
                self.urls.clone()
            } else {
                Vec::new()
            },
            saved: self.saved.clone(),
            download: self.download.clone(),
            error: self.error.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_downloading(&self) -> bool {
        self.download.is_some()
    }

    pub(crate) fn set_keywords(&mut self, keywords: Vec<String>) {
        self.keywords = keywords;
        self.dirty = true;
    }

    pub(crate) fn show_urls(&mut self, urls: Vec<String>) {
        self.urls = urls;
        self.urls_visible = true;
        self.dirty = true;
    }

    pub(crate) fn set_saved(&mut self, saved: Vec<String>) {
        self.saved = saved;
        self.dirty = true;
    }

    pub(crate) fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.dirty = true;
    }

    pub(crate) fn hide_error(&mut self) {
        if self.error.take().is_some() {
            self.dirty = true;
        }
    }

    pub(crate) fn begin_download(&mut self, url: String) {
        self.urls_visible = false;
        self.download = Some(DownloadStatus {
            url,
            size_label: SIZE_PENDING_LABEL.to_string(),
            progress: 0,
        });
        self.dirty = true;
    }

    pub(crate) fn apply_progress(&mut self, size: Option<u64>, progress: u8) {
        if let Some(status) = self.download.as_mut() {
            status.size_label = match size {
                Some(total) if total > 0 => total.to_string(),
                _ => SIZE_UNKNOWN_LABEL.to_string(),
            };
            status.progress = progress;
            self.dirty = true;
        }
    }

    /// Clears the active download, handing back its URL.
    pub(crate) fn end_download(&mut self) -> Option<String> {
        let ended = self.download.take().map(|status| status.url);
        if ended.is_some() {
            self.dirty = true;
        }
        ended
    }
}
