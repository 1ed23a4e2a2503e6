use std::path::PathBuf;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use relay_core::{update, ClientState, ClientViewModel, Effect, Msg, StreamEvent};
use relay_engine::{deliver_content, EventHandler, RecordStore};
use relay_logging::{relay_error, relay_info};

/// Client state plus the collaborators its local effects need.
///
/// Local effects (saving the record, delivering the file) run inside
/// [`ClientSession::dispatch`]; effects that need the network are handed
/// back to the caller.
pub struct ClientSession {
    state: ClientState,
    records: RecordStore,
    output_dir: PathBuf,
    delivered: Vec<PathBuf>,
    bar: Option<ProgressBar>,
    show_progress: bool,
}

impl ClientSession {
    pub fn new(records: RecordStore, output_dir: PathBuf) -> Self {
        Self {
            state: ClientState::new(),
            records,
            output_dir,
            delivered: Vec::new(),
            bar: None,
            show_progress: true,
        }
    }

    /// Disable the terminal progress bar.
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let (state, effects) = update(std::mem::take(&mut self.state), msg);
        self.state = state;

        let mut pending = Vec::new();
        for effect in effects {
            match effect {
                Effect::SaveRecord { url } => {
                    if let Err(err) = self.records.mark_saved(&url) {
                        relay_error!("Failed to save record for {}: {}", url, err);
                        pending.extend(self.dispatch(Msg::RequestFailed(format!(
                            "Failed to save record: {err}"
                        ))));
                    }
                }
                Effect::DeliverContent { content } => {
                    match deliver_content(&self.output_dir, &content, Utc::now()) {
                        Ok(path) => {
                            relay_info!("Saved download to {:?}", path);
                            self.delivered.push(path);
                        }
                        Err(err) => {
                            relay_error!("Failed to deliver content: {}", err);
                            pending.extend(self.dispatch(Msg::RequestFailed(format!(
                                "Failed to save file: {err}"
                            ))));
                        }
                    }
                }
                Effect::FetchUrls { .. } | Effect::StartDownload { .. } => pending.push(effect),
            }
        }

        if self.state.consume_dirty() {
            self.render();
        }
        pending
    }

    pub fn view(&self) -> ClientViewModel {
        self.state.view()
    }

    pub fn saved_urls(&self) -> Vec<String> {
        self.records.keys()
    }

    pub fn delivered(&self) -> &[PathBuf] {
        &self.delivered
    }

    fn render(&mut self) {
        if !self.show_progress {
            return;
        }
        match self.state.view().download {
            Some(status) => {
                let bar = self.bar.get_or_insert_with(|| {
                    let bar = ProgressBar::new(100);
                    if let Ok(style) =
                        ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>3}% size: {msg}")
                    {
                        bar.set_style(style);
                    }
                    bar
                });
                bar.set_position(u64::from(status.progress));
                bar.set_message(status.size_label);
            }
            None => {
                if let Some(bar) = self.bar.take() {
                    bar.finish_and_clear();
                }
            }
        }
    }
}

impl EventHandler for ClientSession {
    fn on_event(&mut self, event: StreamEvent) {
        let msg = match event {
            StreamEvent::Progress(progress) => Msg::DownloadProgress {
                size: progress.size,
                progress: progress.progress,
            },
            StreamEvent::Completed { content } => Msg::DownloadCompleted { content },
            StreamEvent::Error { error } => Msg::DownloadFailed(error),
        };
        // Stream events never produce network effects.
        self.dispatch(msg);
    }
}
