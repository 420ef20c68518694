//! Incremental request-head reader.

use bytes::BytesMut;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;

use crate::http::parser::{HEADER_TERMINATOR, find_headers_end};

const READ_CHUNK: usize = 1024;

/// Result of filling the request buffer.
#[derive(Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The buffer holds a full header block plus whatever followed it.
    Complete(BytesMut),
    /// Capacity or attempt budget ran out before the terminator arrived.
    Incomplete,
    /// The peer closed or the socket failed; nothing should be written back.
    PeerClosed,
}

#[derive(Debug, Clone, Copy)]
pub struct ReadLimits {
    pub max_bytes: usize,
    pub max_attempts: usize,
    /// Idle deadline applied to each read.
    pub read_timeout: Option<Duration>,
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            max_bytes: 8192,
            max_attempts: 32,
            read_timeout: Some(Duration::from_secs(5)),
        }
    }
}

/// Reads from `stream` until the header terminator shows up or a limit is hit.
///
/// The buffer never grows past `limits.max_bytes`. A read deadline that
/// expires with bytes already buffered counts as `Incomplete`; one that
/// expires on a silent connection counts as `PeerClosed`.
pub async fn read_request<S>(stream: &mut S, limits: ReadLimits) -> ReadOutcome
where
    S: AsyncRead + Unpin,
{
    let mut buffer = BytesMut::with_capacity(limits.max_bytes.min(4096));
    let mut temp = [0u8; READ_CHUNK];

    for attempt in 1..=limits.max_attempts {
        let want = READ_CHUNK.min(limits.max_bytes - buffer.len());

        let read = match limits.read_timeout {
            Some(deadline) => match timeout(deadline, stream.read(&mut temp[..want])).await {
                Ok(res) => res,
                Err(_) => {
                    tracing::debug!(attempt, buffered = buffer.len(), "read deadline expired");
                    return if buffer.is_empty() {
                        ReadOutcome::PeerClosed
                    } else {
                        ReadOutcome::Incomplete
                    };
                }
            },
            None => stream.read(&mut temp[..want]).await,
        };

        let n = match read {
            Ok(0) => return ReadOutcome::PeerClosed,
            Ok(n) => n,
            Err(e) => {
                tracing::debug!(error = %e, "read failed");
                return ReadOutcome::PeerClosed;
            }
        };

        // Only the tail that could complete a terminator needs rescanning.
        let scan_from = buffer.len().saturating_sub(HEADER_TERMINATOR.len() - 1);
        buffer.extend_from_slice(&temp[..n]);

        if find_headers_end(&buffer[scan_from..]).is_some() {
            return ReadOutcome::Complete(buffer);
        }

        if buffer.len() >= limits.max_bytes {
            tracing::debug!(buffered = buffer.len(), "request head exceeds buffer cap");
            return ReadOutcome::Incomplete;
        }
    }

    tracing::debug!(attempts = limits.max_attempts, "read attempt budget exhausted");
    ReadOutcome::Incomplete
}
