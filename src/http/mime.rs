/// Content type used when no extension matches.
pub const DEFAULT_MIME: &str = "application/octet-stream";

/// Known extensions, longest suffix first so that `.htm` never shadows `.html`.
const MIME_TYPES: &[(&str, &str)] = &[
    (".html", "text/html"),
    (".jpeg", "image/jpeg"),
    (".json", "application/json"),
    (".htm", "text/html"),
    (".txt", "text/plain"),
    (".jpg", "image/jpeg"),
    (".png", "image/png"),
    (".css", "text/css"),
    (".pdf", "application/pdf"),
    (".js", "application/javascript"),
];

/// Returns the MIME type for a file name based on its extension.
///
/// # Example
///
/// ```
/// # use pageserve::http::mime::content_type;
/// assert_eq!(content_type("style.css"), "text/css");
/// assert_eq!(content_type("archive.tar"), "application/octet-stream");
/// ```
pub fn content_type(name: &str) -> &'static str {
    MIME_TYPES
        .iter()
        .find(|(suffix, _)| has_suffix(name, suffix))
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_MIME)
}

fn has_suffix(name: &str, suffix: &str) -> bool {
    name.len() >= suffix.len()
        && name.as_bytes()[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
}
