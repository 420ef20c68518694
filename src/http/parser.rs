use crate::http::request::Request;

pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// No `\r\n\r\n` in the buffer
    Incomplete,
    /// The request line is not exactly `METHOD TARGET VERSION`
    MalformedRequestLine,
}

/// Parses the request line and header facts out of a buffered request head.
///
/// Bytes past the header terminator are ignored.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    let headers_end = find_headers_end(buf).ok_or(ParseError::Incomplete)?;
    let head = &buf[..headers_end + 2];

    let line_end = head
        .iter()
        .position(|&b| b == b'\n')
        .ok_or(ParseError::MalformedRequestLine)?;
    let request_line = std::str::from_utf8(&head[..line_end])
        .map_err(|_| ParseError::MalformedRequestLine)?;

    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ParseError::MalformedRequestLine);
    };

    Ok(Request::from_tokens(method, target, version, has_host_header(head)))
}

pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER_TERMINATOR.len())
        .position(|w| w == HEADER_TERMINATOR)
}

/// A `Host:` header counts only at the start of a line, never inside the request line.
fn has_host_header(head: &[u8]) -> bool {
    head.windows(6).any(|w| w == b"\nHost:")
}
