//! Request body reader
//!
//! Reads exactly the declared number of bytes from the input stream, never
//! more, under a deadline. A stream that closes early or stalls past the
//! deadline yields whatever arrived, tagged with how the read ended.

use std::borrow::Cow;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::{timeout_at, Instant};

use super::enhanced_error::{stream_operation_error, EnhancedError};

/// Characters shown before the body preview is cut off
pub const PREVIEW_LIMIT: usize = 500;

const READ_CHUNK: usize = 8 * 1024;

/// How a body read ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyOutcome {
    /// All declared bytes arrived
    Complete,
    /// The stream closed before the declared length
    Truncated { expected: usize, received: usize },
    /// The deadline passed before the declared length
    TimedOut { expected: usize, received: usize },
}

impl BodyOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            BodyOutcome::Complete => "complete",
            BodyOutcome::Truncated { .. } => "truncated",
            BodyOutcome::TimedOut { .. } => "timed_out",
        }
    }
}

/// Body bytes read from the input stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    bytes: Vec<u8>,
    outcome: BodyOutcome,
}

impl RequestBody {
    pub fn new(bytes: Vec<u8>, outcome: BodyOutcome) -> Self {
        Self { bytes, outcome }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn outcome(&self) -> BodyOutcome {
        self.outcome
    }

    /// Body as text; invalid UTF-8 sequences become U+FFFD
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// A possibly shortened view of the body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyPreview<'a> {
    pub shown: &'a str,
    /// Characters left out of `shown`
    pub omitted: usize,
}

impl<'a> BodyPreview<'a> {
    /// Keep the first `limit` characters of `text`
    pub fn of(text: &'a str, limit: usize) -> Self {
        match text.char_indices().nth(limit) {
            Some((cut, _)) => Self {
                shown: &text[..cut],
                omitted: text[cut..].chars().count(),
            },
            None => Self { shown: text, omitted: 0 },
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.omitted > 0
    }
}

/// Read up to `expected` bytes from `reader`, giving up at `deadline_after`
pub async fn read_body<R>(
    reader: R,
    expected: usize,
    deadline_after: Duration,
) -> Result<RequestBody, EnhancedError>
where
    R: AsyncRead + Unpin,
{
    let mut limited = reader.take(expected as u64);
    let mut bytes = Vec::with_capacity(expected.min(64 * 1024));
    let mut chunk = [0u8; READ_CHUNK];
    let deadline = Instant::now() + deadline_after;

    while bytes.len() < expected {
        let read = match timeout_at(deadline, limited.read(&mut chunk)).await {
            Ok(result) => result.map_err(|e| stream_operation_error("read_body", "stdin", e))?,
            Err(_) => {
                let received = bytes.len();
                log::warn!(
                    "body read timed out after {:?} ({} of {} bytes)",
                    deadline_after,
                    received,
                    expected
                );
                return Ok(RequestBody::new(bytes, BodyOutcome::TimedOut { expected, received }));
            }
        };

        if read == 0 {
            log::warn!("body stream closed early ({} of {} bytes)", bytes.len(), expected);
            let received = bytes.len();
            return Ok(RequestBody::new(bytes, BodyOutcome::Truncated { expected, received }));
        }
        bytes.extend_from_slice(&chunk[..read]);
    }

    log::debug!("read {} body bytes", bytes.len());
    Ok(RequestBody::new(bytes, BodyOutcome::Complete))
}
