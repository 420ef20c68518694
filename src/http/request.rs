/// Longest method token kept by the parser.
pub const MAX_METHOD_LEN: usize = 9;
/// Longest request target kept by the parser.
pub const MAX_TARGET_LEN: usize = 255;
/// Longest version token kept by the parser.
pub const MAX_VERSION_LEN: usize = 9;

/// HTTP request methods.
///
/// Only GET and HEAD are served. Every other verb parses to `Unsupported`
/// and is answered with 405 Method Not Allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
    Unsupported,
}

impl Method {
    /// Parses an HTTP method token. Matching is case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use pageserve::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::GET);
    /// assert_eq!(Method::from_token("get"), Method::Unsupported);
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            _ => Method::Unsupported,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::Unsupported => "UNSUPPORTED",
        }
    }
}

/// HTTP protocol versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    Http10,
    Http11,
    Unsupported,
}

impl Version {
    pub fn from_token(s: &str) -> Self {
        match s {
            "HTTP/1.0" => Version::Http10,
            "HTTP/1.1" => Version::Http11,
            _ => Version::Unsupported,
        }
    }

    /// Whether requests of this version must carry a `Host` header.
    pub fn requires_host(&self) -> bool {
        matches!(self, Version::Http11)
    }
}

/// A parsed request line plus the header facts the server cares about.
///
/// Immutable once built; lives for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method (GET, HEAD or unsupported)
    pub method: Method,
    /// The request target exactly as sent (e.g., "/index.html"), length-bounded
    pub target: String,
    pub version: Version,
    /// Whether a `Host:` header line is present
    pub has_host: bool,
}

impl Request {
    /// Builds a request from raw request-line tokens.
    ///
    /// Tokens longer than their limit are truncated rather than rejected.
    pub fn from_tokens(method: &str, target: &str, version: &str, has_host: bool) -> Self {
        Self {
            method: Method::from_token(bounded(method, MAX_METHOD_LEN)),
            target: bounded(target, MAX_TARGET_LEN).to_string(),
            version: Version::from_token(bounded(version, MAX_VERSION_LEN)),
            has_host,
        }
    }
}

/// Cuts `token` to at most `max` characters.
fn bounded(token: &str, max: usize) -> &str {
    match token.char_indices().nth(max) {
        Some((idx, _)) => &token[..idx],
        None => token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_tokens_are_truncated() {
        let target = format!("/{}", "a".repeat(400));
        let req = Request::from_tokens("GETGETGETGET", &target, "HTTP/1.1", true);

        assert_eq!(req.method, Method::Unsupported);
        assert_eq!(req.target.chars().count(), MAX_TARGET_LEN);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(bounded("ééé", 2), "éé");
        assert_eq!(bounded("abc", 9), "abc");
    }

    #[test]
    fn only_http11_requires_host() {
        assert!(Version::Http11.requires_host());
        assert!(!Version::Http10.requires_host());
    }
}
