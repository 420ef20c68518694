//! Request processing: validation, file resolution and response preparation.
//!
//! The response, including the full GET body, is prepared before any byte is
//! written, so a failure while reading the file can still turn into a clean
//! 500 instead of a broken 200.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::http::error::RequestError;
use crate::http::mime::content_type;
use crate::http::path::{is_safe_target, resolve, resource_name};
use crate::http::request::{Method, Request, Version};
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Serves files from a single directory.
#[derive(Debug, Clone)]
pub struct StaticHandler {
    root: PathBuf,
}

impl StaticHandler {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Produces the response for a parsed request.
    pub async fn handle(&self, request: &Request) -> Result<Response, RequestError> {
        validate(request)?;

        let path = resolve(&self.root, &request.target);
        let (mut file, len) = open_resource(&path).await?;

        let builder = ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", content_type(resource_name(&request.target)));

        let response = match request.method {
            Method::HEAD => builder.header("Content-Length", len.to_string()).build(),
            _ => builder.body(read_body(&mut file, len).await?).build(),
        };

        tracing::trace!(path = %path.display(), len, "resource prepared");
        Ok(response)
    }
}

/// Rejects requests that must not reach the filesystem.
///
/// Checks run in a fixed order: method, version, Host header, path.
pub fn validate(request: &Request) -> Result<(), RequestError> {
    if !matches!(request.method, Method::GET | Method::HEAD) {
        return Err(RequestError::Method);
    }
    if request.version == Version::Unsupported {
        return Err(RequestError::Version);
    }
    if request.version.requires_host() && !request.has_host {
        return Err(RequestError::MissingHost);
    }
    if !is_safe_target(&request.target) {
        return Err(RequestError::Path);
    }
    Ok(())
}

async fn open_resource(path: &Path) -> Result<(File, u64), RequestError> {
    let mut file = File::open(path).await.map_err(RequestError::Resource)?;

    let metadata = file.metadata().await.map_err(RequestError::Resource)?;
    if !metadata.is_file() {
        return Err(RequestError::Resource(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }

    let len = file
        .seek(SeekFrom::End(0))
        .await
        .map_err(RequestError::Resource)?;
    file.rewind().await.map_err(RequestError::Resource)?;

    Ok((file, len))
}

/// Reads at most `len` bytes; the returned length is what `Content-Length` reports.
async fn read_body(file: &mut File, len: u64) -> Result<Vec<u8>, RequestError> {
    let capacity = usize::try_from(len).map_err(|_| RequestError::ResourceLimit)?;

    let mut body = Vec::new();
    body.try_reserve_exact(capacity)
        .map_err(|_| RequestError::ResourceLimit)?;

    file.take(len)
        .read_to_end(&mut body)
        .await
        .map_err(RequestError::ResourceRead)?;

    Ok(body)
}
