use pageserve::http::error::RequestError;
use pageserve::http::handler::StaticHandler;
use pageserve::http::request::Request;
use pageserve::http::response::StatusCode;
use std::fs;

fn get(target: &str) -> Request {
    Request::from_tokens("GET", target, "HTTP/1.1", true)
}

fn site() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), b"<h1>home</h1>").unwrap();
    fs::write(dir.path().join("style.css"), b"p{color:0}").unwrap();
    fs::write(dir.path().join("blob.bin"), [0u8, 1, 2, 255]).unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("docs").join("a.txt"), b"nested").unwrap();
    dir
}

#[tokio::test]
async fn test_get_serves_file_bytes() {
    let dir = site();
    let handler = StaticHandler::new(dir.path());

    let resp = handler.handle(&get("/style.css")).await.unwrap();

    assert_eq!(resp.status, StatusCode::Ok);
    assert_eq!(resp.header("Content-Type"), Some("text/css"));
    assert_eq!(resp.content_length(), Some(10));
    assert_eq!(resp.body, b"p{color:0}".to_vec());
}

#[tokio::test]
async fn test_root_serves_index() {
    let dir = site();
    let handler = StaticHandler::new(dir.path());

    let root = handler.handle(&get("/")).await.unwrap();
    let index = handler.handle(&get("/index.html")).await.unwrap();

    assert_eq!(root.body, index.body);
    assert_eq!(root.header("Content-Type"), Some("text/html"));
}

#[tokio::test]
async fn test_head_has_length_but_no_body() {
    let dir = site();
    let handler = StaticHandler::new(dir.path());

    let req = Request::from_tokens("HEAD", "/index.html", "HTTP/1.0", false);
    let resp = handler.handle(&req).await.unwrap();

    assert_eq!(resp.status, StatusCode::Ok);
    assert!(resp.body.is_empty());
    assert_eq!(resp.content_length(), Some(13));
}

#[tokio::test]
async fn test_unknown_extension_is_octet_stream() {
    let dir = site();
    let handler = StaticHandler::new(dir.path());

    let resp = handler.handle(&get("/blob.bin")).await.unwrap();

    assert_eq!(resp.header("Content-Type"), Some("application/octet-stream"));
    assert_eq!(resp.body, vec![0u8, 1, 2, 255]);
}

#[tokio::test]
async fn test_nested_file_within_depth() {
    let dir = site();
    let handler = StaticHandler::new(dir.path());

    let resp = handler.handle(&get("/docs/a.txt")).await.unwrap();
    assert_eq!(resp.body, b"nested".to_vec());
    assert_eq!(resp.header("Content-Type"), Some("text/plain"));
}

#[tokio::test]
async fn test_missing_file_is_resource_error() {
    let dir = site();
    let handler = StaticHandler::new(dir.path());

    let err = handler.handle(&get("/missing.txt")).await.unwrap_err();
    assert!(matches!(err, RequestError::Resource(_)));
    assert_eq!(err.status(), Some(StatusCode::NotFound));
}

#[tokio::test]
async fn test_directory_is_not_served() {
    let dir = site();
    let handler = StaticHandler::new(dir.path());

    let err = handler.handle(&get("/docs")).await.unwrap_err();
    assert!(matches!(err, RequestError::Resource(_)));
}

#[tokio::test]
async fn test_empty_file() {
    let dir = site();
    fs::write(dir.path().join("empty.txt"), b"").unwrap();
    let handler = StaticHandler::new(dir.path());

    let resp = handler.handle(&get("/empty.txt")).await.unwrap();
    assert_eq!(resp.content_length(), Some(0));
    assert!(resp.body.is_empty());
}

#[tokio::test]
async fn test_traversal_never_reaches_filesystem() {
    let dir = site();
    // A file the traversal would land on if it were followed
    fs::write(dir.path().join("secret"), b"x").unwrap();
    let handler = StaticHandler::new(dir.path().join("docs"));

    let err = handler.handle(&get("/../secret")).await.unwrap_err();
    assert!(matches!(err, RequestError::Path));
}

#[tokio::test]
async fn test_double_slash_cannot_leave_root() {
    let dir = site();
    let handler = StaticHandler::new(dir.path());

    // Both name an absolute path once the leading slash is stripped
    for target in ["//etc", "//style.css"] {
        let err = handler.handle(&get(target)).await.unwrap_err();
        assert!(matches!(err, RequestError::Path));
        assert_eq!(err.status(), Some(StatusCode::Forbidden));
    }
}
