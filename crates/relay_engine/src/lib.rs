//! Relay engine: upstream fetching, frame relaying and client-side stream IO.
mod artifact;
mod decode;
mod fetch;
mod persist;
mod reader;
mod records;
mod relay;
mod types;

pub use artifact::{artifact_filename, deliver_content};
pub use decode::{decode_body, DecodedBody};
pub use fetch::{Fetcher, ReqwestFetcher, RelaySettings, Transport};
pub use persist::{ensure_output_dir, write_atomic, PersistError};
pub use reader::{read_events, EventHandler, ReadError, ReadSummary};
pub use records::{RecordStore, SAVED_MARKER};
pub use relay::{await_first_chunk, relay_frames, FrameStream};
pub use types::{BodyStream, FailureKind, RelayError, UpstreamBody};
