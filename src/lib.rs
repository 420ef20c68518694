//! pageserve - static file HTTP server
//!
//! Core library for request handling and the connection listener.

pub mod config;
pub mod http;
pub mod server;
