use std::fmt::Display;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use relay_core::{FrameDecoder, FrameError, StreamEvent};
use relay_logging::{relay_trace, relay_warn};
use thiserror::Error;

/// Receives each decoded event once, in stream order.
pub trait EventHandler {
    fn on_event(&mut self, event: StreamEvent);

    /// A frame that is not valid event JSON. Reading continues afterwards.
    fn on_malformed_frame(&mut self, error: &FrameError) {
        relay_warn!("Error parsing JSON frame: {}", error);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadSummary {
    /// Frames dispatched to the handler.
    pub frames: usize,
    pub malformed: usize,
    /// A `completed` or `error` frame was dispatched.
    pub terminated: bool,
    /// Bytes after the last newline, discarded at end of stream.
    pub dropped_tail_bytes: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadError {
    #[error("stream read failed after {frames} frames: {message}")]
    Transport { frames: usize, message: String },
}

/// Drive a downstream byte stream through the frame decoder until it ends.
///
/// An unterminated final frame is not dispatched; its length is reported in
/// [`ReadSummary::dropped_tail_bytes`].
pub async fn read_events<S, E>(
    body: S,
    handler: &mut dyn EventHandler,
) -> Result<ReadSummary, ReadError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Display,
{
    let mut body = std::pin::pin!(body);
    let mut decoder = FrameDecoder::new();
    let mut summary = ReadSummary::default();

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|err| ReadError::Transport {
            frames: summary.frames,
            message: err.to_string(),
        })?;
        relay_trace!("Read {} bytes", chunk.len());
        decoder.push(&chunk);

        while let Some(frame) = decoder.next_frame() {
            match frame {
                Ok(event) => {
                    summary.frames += 1;
                    summary.terminated |= event.is_terminal();
                    handler.on_event(event);
                }
                Err(err) => {
                    summary.malformed += 1;
                    handler.on_malformed_frame(&err);
                }
            }
        }
    }

    let pending = decoder.pending_len();
    if let Some(tail) = decoder.finish() {
        summary.dropped_tail_bytes = pending;
        relay_warn!(
            "Stream ended with {} bytes of unterminated frame; dropped: {:?}",
            pending,
            tail
        );
    }
    Ok(summary)
}
