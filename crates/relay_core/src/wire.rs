use serde::{Deserialize, Serialize};

/// One event of the download stream, tagged by its `status` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StreamEvent {
    Progress(ProgressEvent),
    /// Terminal event of a successful transfer.
    Completed { content: String },
    /// Terminal event when upstream fails after streaming began.
    Error { error: String },
}

impl StreamEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StreamEvent::Progress(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Declared upstream length; `null` on the wire when unknown.
    pub size: Option<u64>,
    /// Cumulative bytes received so far.
    pub downloaded: u64,
    /// Whole percent in `0..=100`.
    pub progress: u8,
}

/// Non-streamed JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl ErrorPayload {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Serialize an event as one frame: compact JSON followed by a single `\n`.
pub fn encode_frame(event: &StreamEvent) -> Result<Vec<u8>, serde_json::Error> {
    let mut frame = serde_json::to_vec(event)?;
    frame.push(b'\n');
    Ok(frame)
}
