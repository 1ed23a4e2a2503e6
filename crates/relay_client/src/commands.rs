use clap::Subcommand;
use relay_core::{Effect, Msg};
use relay_logging::{relay_info, relay_warn};

use crate::api::{ApiClient, UrlLookup};
use crate::session::ClientSession;

#[derive(Subcommand)]
pub enum Commands {
    /// List the keywords the server knows
    Keywords,
    /// Show the URLs stored for a keyword
    Urls { keyword: String },
    /// Download a URL through the relay with live progress
    Download { url: String },
    /// List URLs of completed downloads
    Saved,
}

pub async fn run(command: Commands, api: &ApiClient, session: &mut ClientSession) {
    match command {
        Commands::Keywords => match api.keywords().await {
            Ok(keywords) => {
                session.dispatch(Msg::KeywordsLoaded(keywords));
                for keyword in session.view().keywords {
                    println!("{keyword}");
                }
            }
            Err(err) => {
                session.dispatch(Msg::RequestFailed(format!("Failed to fetch keywords: {err}")));
            }
        },
        Commands::Urls { keyword } => {
            let effects = session.dispatch(Msg::SearchSubmitted(keyword));
            run_effects(effects, api, session).await;
            for url in session.view().urls {
                println!("{url}");
            }
        }
        Commands::Download { url } => {
            let effects = session.dispatch(Msg::DownloadRequested(url));
            run_effects(effects, api, session).await;
            for path in session.delivered() {
                println!("Saved to {}", path.display());
            }
        }
        Commands::Saved => {
            let saved = session.saved_urls();
            session.dispatch(Msg::SavedRecordsLoaded(saved));
            for url in session.view().saved {
                println!("{url}");
            }
        }
    }
}

async fn run_effects(effects: Vec<Effect>, api: &ApiClient, session: &mut ClientSession) {
    for effect in effects {
        match effect {
            Effect::FetchUrls { keyword } => {
                let msg = match api.urls(&keyword).await {
                    Ok(UrlLookup::Found(urls)) => Msg::UrlsLoaded(urls),
                    Ok(UrlLookup::NotFound) => Msg::KeywordNotFound,
                    Err(err) => Msg::RequestFailed(format!("Failed to fetch URLs: {err}")),
                };
                session.dispatch(msg);
            }
            Effect::StartDownload { url } => {
                relay_info!("Downloading {}", url);
                match api.download(&url, session).await {
                    Ok(summary) => {
                        relay_info!(
                            "Stream closed: {} frames, {} malformed",
                            summary.frames,
                            summary.malformed
                        );
                        if !summary.terminated {
                            relay_warn!("Stream for {} ended without a terminal frame", url);
                            session.dispatch(Msg::DownloadFailed(
                                "stream ended before completion".to_string(),
                            ));
                        }
                    }
                    Err(err) => {
                        session.dispatch(Msg::DownloadFailed(err.to_string()));
                    }
                }
            }
            // Local effects are executed inside the session.
            Effect::SaveRecord { .. } | Effect::DeliverContent { .. } => {}
        }
    }
}
