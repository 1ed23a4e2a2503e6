use std::pin::Pin;

use bytes::Bytes;
use futures_util::{stream, Stream, StreamExt};
use relay_core::{encode_frame, DownloadProgress, StreamEvent};
use relay_logging::{relay_info, relay_warn};

use crate::{decode_body, BodyStream, FailureKind, RelayError, UpstreamBody};

/// Downstream frames, one `Bytes` per event.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<Bytes, RelayError>> + Send>>;

/// Per-download state, owned by the frame stream and dropped with it.
struct RelayState {
    chunks: BodyStream,
    content_type: Option<String>,
    progress: DownloadProgress,
    // The full body is held until the upstream ends; there is no size cap.
    body: Vec<u8>,
    finished: bool,
}

/// Wait for the first upstream item and put it back in front of the body.
///
/// A failure here has not produced any downstream bytes yet, so callers can
/// still answer it with a plain error response instead of a frame.
pub async fn await_first_chunk(mut upstream: UpstreamBody) -> Result<UpstreamBody, RelayError> {
    let first = match upstream.chunks.next().await {
        Some(Err(err)) => {
            relay_warn!("Upstream failed before any data: {}", err);
            return Err(err);
        }
        Some(Ok(chunk)) => Some(Ok(chunk)),
        None => None,
    };
    let rest = upstream.chunks;
    upstream.chunks = Box::pin(stream::iter(first).chain(rest));
    Ok(upstream)
}

/// Turn an open upstream body into the framed progress protocol.
///
/// Every upstream chunk yields one progress frame immediately. A normal end
/// yields one `completed` frame carrying the decoded body; an upstream error
/// yields one terminal `error` frame. Nothing follows a terminal frame.
pub fn relay_frames(upstream: UpstreamBody) -> FrameStream {
    let state = RelayState {
        progress: DownloadProgress::new(upstream.size),
        chunks: upstream.chunks,
        content_type: upstream.content_type,
        body: Vec::new(),
        finished: false,
    };

    Box::pin(stream::unfold(state, |mut state| async move {
        if state.finished {
            return None;
        }
        let event = match state.chunks.next().await {
            Some(Ok(chunk)) => {
                state.body.extend_from_slice(&chunk);
                StreamEvent::Progress(state.progress.record(chunk.len()))
            }
            Some(Err(err)) => {
                relay_warn!(
                    "Upstream failed after {} bytes: {}",
                    state.progress.downloaded(),
                    err
                );
                state.finished = true;
                StreamEvent::Error {
                    error: format!("Failed to fetch content. Error: {}", err.message),
                }
            }
            None => {
                state.finished = true;
                let body = std::mem::take(&mut state.body);
                let decoded = decode_body(&body, state.content_type.as_deref());
                if decoded.had_errors {
                    relay_warn!(
                        "Body is not clean {}; invalid sequences were replaced",
                        decoded.encoding_label
                    );
                }
                relay_info!(
                    "Relay completed: {} bytes, encoding {}",
                    state.progress.downloaded(),
                    decoded.encoding_label
                );
                StreamEvent::Completed {
                    content: decoded.text,
                }
            }
        };

        let frame = match encode_frame(&event) {
            Ok(frame) => Ok(Bytes::from(frame)),
            Err(err) => {
                state.finished = true;
                Err(RelayError::new(FailureKind::Encode, err.to_string()))
            }
        };
        Some((frame, state))
    }))
}
