#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchUrls { keyword: String },
    StartDownload { url: String },
    /// Persist the saved-download marker for `url`.
    SaveRecord { url: String },
    /// Offer the downloaded content to the user as a file.
    DeliverContent { content: String },
}
