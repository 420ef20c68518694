//! Per-request failures and the response each one maps to.

use std::fmt;

use crate::http::response::{Response, StatusCode};

/// Every variant is terminal for the request it occurred in.
#[derive(Debug)]
pub enum RequestError {
    /// Peer closed, timed out or the socket failed. Nothing is sent back.
    Transport,
    /// No header terminator within the buffer cap or attempt budget.
    Incomplete,
    /// Request line is not exactly three tokens.
    MalformedRequestLine,
    /// HTTP/1.1 request without a `Host:` header.
    MissingHost,
    /// Method other than GET/HEAD.
    Method,
    /// Version other than HTTP/1.0 or HTTP/1.1.
    Version,
    /// Target contains `..` or is nested too deep.
    Path,
    /// The resolved file could not be opened or is not a regular file.
    Resource(std::io::Error),
    /// The file opened but could not be read.
    ResourceRead(std::io::Error),
    /// No memory for the body buffer.
    ResourceLimit,
}

impl RequestError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RequestError::Transport => None,
            RequestError::Incomplete
            | RequestError::MalformedRequestLine
            | RequestError::MissingHost => Some(StatusCode::BadRequest),
            RequestError::Method => Some(StatusCode::MethodNotAllowed),
            RequestError::Version => Some(StatusCode::HttpVersionNotSupported),
            RequestError::Path => Some(StatusCode::Forbidden),
            RequestError::Resource(_) => Some(StatusCode::NotFound),
            RequestError::ResourceRead(_) | RequestError::ResourceLimit => {
                Some(StatusCode::InternalServerError)
            }
        }
    }

    fn message(&self) -> &'static str {
        match self {
            RequestError::Transport => "",
            RequestError::Incomplete => "Incomplete HTTP request.",
            RequestError::MalformedRequestLine => "Malformed request line.",
            RequestError::MissingHost => "Host header is required.",
            RequestError::Method => "Supported methods: GET, HEAD.",
            RequestError::Version => "",
            RequestError::Path => "Invalid path.",
            RequestError::Resource(_) => "The requested file was not found.",
            RequestError::ResourceRead(_) => "The requested file could not be read.",
            RequestError::ResourceLimit => "Memory allocation failed.",
        }
    }

    /// The response to send for this error, or `None` when the peer is gone.
    pub fn to_response(&self) -> Option<Response> {
        self.status()
            .map(|status| Response::error(status, self.message()))
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Transport => write!(f, "connection closed by peer"),
            RequestError::Incomplete => write!(f, "incomplete request head"),
            RequestError::MalformedRequestLine => write!(f, "malformed request line"),
            RequestError::MissingHost => write!(f, "missing Host header"),
            RequestError::Method => write!(f, "unsupported method"),
            RequestError::Version => write!(f, "unsupported HTTP version"),
            RequestError::Path => write!(f, "rejected request path"),
            RequestError::Resource(e) => write!(f, "cannot open resource: {}", e),
            RequestError::ResourceRead(e) => write!(f, "cannot read resource: {}", e),
            RequestError::ResourceLimit => write!(f, "body allocation failed"),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Resource(e) | RequestError::ResourceRead(e) => Some(e),
            _ => None,
        }
    }
}
