use crate::{ClientState, Effect, Msg};

const EMPTY_KEYWORD_MESSAGE: &str = "Enter a keyword";
const KEYWORD_NOT_FOUND_MESSAGE: &str = "Keyword not found";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ClientState, msg: Msg) -> (ClientState, Vec<Effect>) {
    let effects = match msg {
        Msg::KeywordsLoaded(keywords) => {
            state.set_keywords(keywords);
            Vec::new()
        }
        Msg::SearchSubmitted(keyword) => {
            state.hide_error();
            let keyword = keyword.trim().to_string();
            if keyword.is_empty() {
                state.show_error(EMPTY_KEYWORD_MESSAGE);
                Vec::new()
            } else {
                vec![Effect::FetchUrls { keyword }]
            }
        }
        Msg::UrlsLoaded(urls) => {
            state.show_urls(urls);
            Vec::new()
        }
        Msg::KeywordNotFound => {
            state.show_error(KEYWORD_NOT_FOUND_MESSAGE);
            Vec::new()
        }
        Msg::DownloadRequested(url) => {
            // One download at a time.
            if state.is_downloading() {
                return (state, Vec::new());
            }
            state.hide_error();
            state.begin_download(url.clone());
            vec![Effect::StartDownload { url }]
        }
        Msg::DownloadProgress { size, progress } => {
            state.apply_progress(size, progress);
            Vec::new()
        }
        Msg::DownloadCompleted { content } => match state.end_download() {
            Some(url) => vec![
                Effect::SaveRecord { url },
                Effect::DeliverContent { content },
            ],
            None => Vec::new(),
        },
        Msg::DownloadFailed(message) => {
            state.end_download();
            state.show_error(format!("Failed to download content: {message}"));
            Vec::new()
        }
        Msg::SavedRecordsLoaded(urls) => {
            state.set_saved(urls);
            Vec::new()
        }
        Msg::RequestFailed(message) => {
            state.show_error(message);
            Vec::new()
        }
        Msg::ErrorDismissed => {
            state.hide_error();
            Vec::new()
        }
    };

    (state, effects)
}
