use crate::DownloadStatus;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientViewModel {
    pub keywords: Vec<String>,
    /// Empty while hidden.
    pub urls: Vec<String>,
    pub saved: Vec<String>,
    pub download: Option<DownloadStatus>,
    pub error: Option<String>,
    pub dirty: bool,
}
