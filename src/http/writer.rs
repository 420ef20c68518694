use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Serializes the status line and header block, including the blank line.
pub fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128);

    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    buf.extend_from_slice(b"\r\n");
    buf
}

/// Writes one response: the head in a single buffer, then the body.
#[derive(Debug)]
pub struct ResponseWriter {
    head: Vec<u8>,
    body: Vec<u8>,
    written: usize,
    write_timeout: Option<Duration>,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        Self {
            head: serialize_head(&response),
            body: response.body,
            written: 0,
            write_timeout: None,
        }
    }

    pub fn with_write_timeout(mut self, write_timeout: Option<Duration>) -> Self {
        self.write_timeout = write_timeout;
        self
    }

    /// Body bytes sent so far.
    pub fn body_written(&self) -> usize {
        self.written
    }

    pub async fn write_to_stream<S>(&mut self, stream: &mut S) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        let deadline = self.write_timeout;
        with_deadline(deadline, stream.write_all(&self.head)).await?;

        while self.written < self.body.len() {
            let n = with_deadline(deadline, stream.write(&self.body[self.written..])).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        with_deadline(deadline, stream.flush()).await?;
        Ok(())
    }
}

async fn with_deadline<F, T>(deadline: Option<Duration>, fut: F) -> anyhow::Result<T>
where
    F: Future<Output = std::io::Result<T>>,
{
    match deadline {
        Some(d) => Ok(timeout(d, fut)
            .await
            .map_err(|_| anyhow::anyhow!("write timed out"))??),
        None => Ok(fut.await?),
    }
}
