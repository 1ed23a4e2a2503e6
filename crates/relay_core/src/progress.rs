use crate::ProgressEvent;

/// Whole-percent progress, `0` when the total is unknown or zero.
pub fn percent(downloaded: u64, size: Option<u64>) -> u8 {
    match size {
        Some(total) if total > 0 => {
            let ratio = (downloaded as f64 / total as f64) * 100.0;
            ratio.round().min(100.0) as u8
        }
        _ => 0,
    }
}

/// Byte counter for one transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DownloadProgress {
    size: Option<u64>,
    downloaded: u64,
}

impl DownloadProgress {
    pub fn new(size: Option<u64>) -> Self {
        Self {
            size,
            downloaded: 0,
        }
    }

    /// Account for one received chunk and describe the new position.
    pub fn record(&mut self, chunk_len: usize) -> ProgressEvent {
        self.downloaded = self.downloaded.saturating_add(chunk_len as u64);
        ProgressEvent {
            size: self.size,
            downloaded: self.downloaded,
            progress: percent(self.downloaded, self.size),
        }
    }

    pub fn downloaded(&self) -> u64 {
        self.downloaded
    }
}
