use thiserror::Error;

use crate::StreamEvent;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("malformed frame {frame:?}: {message}")]
    Malformed { frame: String, message: String },
}

/// Incremental splitter for newline-delimited event frames.
///
/// Bytes are appended with [`FrameDecoder::push`] and complete frames are
/// pulled with [`FrameDecoder::next_frame`]. Frames are cut on the `\n` byte
/// before any text decoding, so a UTF-8 sequence split across reads is
/// reassembled intact. Every byte is scanned once; the consumed prefix is
/// discarded when a scan runs out of newlines.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buf: Vec<u8>,
    /// Start of the frame currently being assembled.
    cut: usize,
    /// Position from which the next newline search starts.
    scan_from: usize,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Next complete, non-blank frame, parsed. `None` means more bytes are needed.
    pub fn next_frame(&mut self) -> Option<Result<StreamEvent, FrameError>> {
        loop {
            let Some(offset) = self.buf[self.scan_from..].iter().position(|b| *b == b'\n') else {
                self.compact();
                return None;
            };
            let end = self.scan_from + offset;
            let text = String::from_utf8_lossy(&self.buf[self.cut..end]).into_owned();
            self.cut = end + 1;
            self.scan_from = self.cut;

            let line = text.trim();
            if line.is_empty() {
                continue;
            }
            return Some(parse_frame(line));
        }
    }

    /// Bytes held for a frame whose newline has not arrived yet.
    pub fn pending_len(&self) -> usize {
        self.buf.len() - self.cut
    }

    /// Ends decoding and hands back the unterminated tail, if any.
    ///
    /// The tail is never parsed as a frame.
    pub fn finish(self) -> Option<String> {
        let tail = &self.buf[self.cut..];
        if tail.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(tail).into_owned())
        }
    }

    fn compact(&mut self) {
        if self.cut > 0 {
            self.buf.drain(..self.cut);
            self.cut = 0;
        }
        self.scan_from = self.buf.len();
    }
}

fn parse_frame(line: &str) -> Result<StreamEvent, FrameError> {
    serde_json::from_str(line).map_err(|err| FrameError::Malformed {
        frame: line.to_string(),
        message: err.to_string(),
    })
}
