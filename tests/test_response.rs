use pageserve::http::error::RequestError;
use pageserve::http::response::{Response, ResponseBuilder, StatusCode};
use pageserve::http::writer::{ResponseWriter, serialize_head};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::Forbidden.as_u16(), 403);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
    assert_eq!(StatusCode::HttpVersionNotSupported.as_u16(), 505);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::Forbidden.reason_phrase(), "Forbidden");
    assert_eq!(
        StatusCode::HttpVersionNotSupported.reason_phrase(),
        "HTTP Version Not Supported"
    );
}

#[test]
fn test_response_builder_header_order() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/css")
        .body(b"body {}".to_vec())
        .build();

    let names: Vec<&str> = response.headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, ["Content-Length", "Content-Type", "Connection"]);
    assert_eq!(response.header("Content-Length"), Some("7"));
    assert_eq!(response.header("connection"), Some("close"));
}

#[test]
fn test_response_builder_preserves_explicit_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "4096")
        .build();

    assert!(response.body.is_empty());
    assert_eq!(response.content_length(), Some(4096));
}

#[test]
fn test_response_builder_replaces_header() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .header("content-type", "text/html")
        .build();

    assert_eq!(response.headers.len(), 3);
    assert_eq!(response.header("Content-Type"), Some("text/html"));
}

#[test]
fn test_response_builder_forces_connection_close() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Connection", "keep-alive")
        .build();

    assert_eq!(response.header("Connection"), Some("close"));
}

#[test]
fn test_error_response_has_matching_length() {
    let response = Response::error(StatusCode::Forbidden, "Invalid path.");

    assert_eq!(response.body, b"Invalid path.".to_vec());
    assert_eq!(response.content_length(), Some(13));
    assert_eq!(response.header("Content-Type"), Some("text/plain"));
}

#[test]
fn test_request_error_mapping() {
    let cases = [
        (RequestError::Incomplete, StatusCode::BadRequest),
        (RequestError::MalformedRequestLine, StatusCode::BadRequest),
        (RequestError::MissingHost, StatusCode::BadRequest),
        (RequestError::Method, StatusCode::MethodNotAllowed),
        (RequestError::Version, StatusCode::HttpVersionNotSupported),
        (RequestError::Path, StatusCode::Forbidden),
        (
            RequestError::Resource(std::io::ErrorKind::NotFound.into()),
            StatusCode::NotFound,
        ),
        (RequestError::ResourceLimit, StatusCode::InternalServerError),
    ];

    for (err, status) in cases {
        let response = err.to_response().unwrap();
        assert_eq!(response.status, status);
        assert_eq!(response.content_length(), Some(response.body.len() as u64));
    }
}

#[test]
fn test_serialize_head() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/html")
        .body(b"<p>hi</p>".to_vec())
        .build();

    let head = serialize_head(&response);
    assert_eq!(
        head,
        b"HTTP/1.1 200 OK\r\nContent-Length: 9\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n"
            .to_vec()
    );
}

#[tokio::test]
async fn test_writer_sends_head_then_body() {
    let response = Response::error(StatusCode::NotFound, "gone");
    let expected_len = serialize_head(&response).len() + response.body.len();
    let mut writer = ResponseWriter::new(response);

    let mut out = Vec::new();
    writer.write_to_stream(&mut out).await.unwrap();

    assert_eq!(out.len(), expected_len);
    assert!(out.starts_with(b"HTTP/1.1 404 Not Found\r\n"));
    assert!(out.ends_with(b"\r\n\r\ngone"));
    assert_eq!(writer.body_written(), 4);
}
