#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Keyword list fetched from the server.
    KeywordsLoaded(Vec<String>),
    /// User submitted a keyword search.
    SearchSubmitted(String),
    /// URL list for the last searched keyword.
    UrlsLoaded(Vec<String>),
    /// Server answered 404 for the searched keyword.
    KeywordNotFound,
    /// User picked a URL to download.
    DownloadRequested(String),
    /// A progress frame arrived.
    DownloadProgress { size: Option<u64>, progress: u8 },
    /// The completion frame arrived.
    DownloadCompleted { content: String },
    /// The download could not start, or upstream failed mid-stream.
    DownloadFailed(String),
    /// URLs of previously completed downloads.
    SavedRecordsLoaded(Vec<String>),
    /// A non-download request (keywords, urls) failed.
    RequestFailed(String),
    /// User dismissed the error message.
    ErrorDismissed,
}
