use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::config::Config;
use crate::http::error::RequestError;
use crate::http::handler::StaticHandler;
use crate::http::parser::{ParseError, parse_http_request};
use crate::http::reader::{ReadLimits, ReadOutcome, read_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// Per-connection limits shared by every connection of a server.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionSettings {
    pub read: ReadLimits,
    pub write_timeout: Option<Duration>,
}

impl From<&Config> for ConnectionSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            read: ReadLimits {
                max_bytes: cfg.max_request_bytes,
                max_attempts: cfg.max_read_attempts,
                read_timeout: Some(cfg.read_timeout()),
            },
            write_timeout: Some(cfg.write_timeout()),
        }
    }
}

/// Serves exactly one request on `stream`, then closes it.
pub async fn handle<S>(stream: S, handler: Arc<StaticHandler>, settings: ConnectionSettings)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    Connection::new(stream, handler, settings).run().await
}

pub struct Connection<S> {
    stream: S,
    handler: Arc<StaticHandler>,
    settings: ConnectionSettings,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, handler: Arc<StaticHandler>, settings: ConnectionSettings) -> Self {
        Self {
            stream,
            handler,
            settings,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection to completion. The stream is shut down on every path.
    pub async fn run(mut self) {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await {
                        Ok(req) => ConnectionState::Processing(req),
                        Err(e) => self.respond_with_error(None, e),
                    };
                }

                ConnectionState::Processing(req) => {
                    self.state = match self.handler.handle(&req).await {
                        Ok(response) => {
                            tracing::info!(
                                method = req.method.as_str(),
                                target = %req.target,
                                status = response.status.as_u16(),
                                bytes = response.content_length().unwrap_or(0),
                                "request served"
                            );
                            self.writing(response)
                        }
                        Err(e) => self.respond_with_error(Some(&req), e),
                    };
                }

                ConnectionState::Writing(mut writer) => {
                    if let Err(e) = writer.write_to_stream(&mut self.stream).await {
                        tracing::debug!(
                            error = %e,
                            body_written = writer.body_written(),
                            "response aborted"
                        );
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => break,
            }
        }

        let _ = self.stream.shutdown().await;
    }

    async fn read_request(&mut self) -> Result<Request, RequestError> {
        match read_request(&mut self.stream, self.settings.read).await {
            ReadOutcome::Complete(buf) => parse_http_request(&buf).map_err(|e| match e {
                ParseError::Incomplete => RequestError::Incomplete,
                ParseError::MalformedRequestLine => RequestError::MalformedRequestLine,
            }),
            ReadOutcome::Incomplete => Err(RequestError::Incomplete),
            ReadOutcome::PeerClosed => Err(RequestError::Transport),
        }
    }

    fn respond_with_error(&self, req: Option<&Request>, err: RequestError) -> ConnectionState {
        let Some(response) = err.to_response() else {
            tracing::debug!("connection closed before a request arrived");
            return ConnectionState::Closed;
        };

        match req {
            Some(req) => tracing::info!(
                method = req.method.as_str(),
                target = %req.target,
                status = response.status.as_u16(),
                error = %err,
                "request rejected"
            ),
            None => tracing::info!(
                status = response.status.as_u16(),
                error = %err,
                "request rejected"
            ),
        }

        self.writing(response)
    }

    fn writing(&self, response: Response) -> ConnectionState {
        ConnectionState::Writing(
            ResponseWriter::new(response).with_write_timeout(self.settings.write_timeout),
        )
    }
}
