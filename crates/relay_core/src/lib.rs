//! Relay core: wire protocol, frame decoding and the pure client state machine.
mod catalog;
mod effect;
mod framing;
mod msg;
mod progress;
mod state;
mod update;
mod view_model;
mod wire;

pub use catalog::{CatalogError, KeywordCatalog};
pub use effect::Effect;
pub use framing::{FrameDecoder, FrameError};
pub use msg::Msg;
pub use progress::{percent, DownloadProgress};
pub use state::{ClientState, DownloadStatus, SIZE_PENDING_LABEL, SIZE_UNKNOWN_LABEL};
pub use update::update;
pub use view_model::ClientViewModel;
pub use wire::{encode_frame, ErrorPayload, ProgressEvent, StreamEvent};
