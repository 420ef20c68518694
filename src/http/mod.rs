//! HTTP protocol implementation.
//!
//! This module serves static files over HTTP/1.0 and HTTP/1.1, one request
//! per connection.
//!
//! # Architecture
//!
//! - **`reader`**: Fills a bounded buffer until the header terminator arrives
//! - **`parser`**: Splits the request line and detects the `Host` header
//! - **`request`**: Parsed request value object
//! - **`handler`**: Validates the request and prepares the file response
//! - **`path`**: Traversal guard and target-to-file mapping
//! - **`mime`**: MIME type detection based on file extensions
//! - **`error`**: Request failures and the response each one maps to
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`connection`**: The per-connection state machine
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Buffer the request head
//!        └──────┬──────┘
//!               │ Request parsed          ─── peer gone ──┐
//!               ▼                                         │
//!        ┌──────────────────┐                             │
//!        │   Processing     │ ← Validate, open, read file │
//!        └──────┬───────────┘                             │
//!               │ Response ready (or error response)      │
//!               ▼                                         │
//!        ┌──────────────────┐                             │
//!        │    Writing       │ ← Head, then body           │
//!        └──────┬───────────┘                             │
//!               ▼                                         │
//!        ┌──────────────────┐                             │
//!        │     Closed       │ ◄───────────────────────────┘
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use pageserve::http::connection::{handle, ConnectionSettings};
//! use pageserve::http::handler::StaticHandler;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let handler = Arc::new(StaticHandler::new("."));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let handler = handler.clone();
//!         tokio::spawn(handle(socket, handler, ConnectionSettings::default()));
//!     }
//! }
//! ```

pub mod connection;
pub mod error;
pub mod handler;
pub mod mime;
pub mod parser;
pub mod path;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;
