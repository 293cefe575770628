use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// Router serving only the static fallback, over a throwaway site dir.
fn static_app(dir: &std::path::Path) -> Router {
    Router::new().fallback_service(ServeDir::new(dir))
}

#[tokio::test]
async fn test_root_serves_landing_page() {
    let site = tempfile::tempdir().unwrap();
    std::fs::write(
        site.path().join("index.html"),
        "<html><body>Studio Landing</body></html>",
    )
    .unwrap();

    let app = static_app(site.path());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap_or(""))
        .unwrap_or("");
    assert!(
        content_type.contains("text/html"),
        "Expected HTML content type, got: {}",
        content_type
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body_str = String::from_utf8_lossy(&body);
    assert!(body_str.contains("Studio Landing"));
}

#[tokio::test]
async fn test_other_files_served_verbatim() {
    let site = tempfile::tempdir().unwrap();
    std::fs::write(site.path().join("index.html"), "<html></html>").unwrap();
    std::fs::write(site.path().join("style.css"), "body { margin: 0; }").unwrap();

    let app = static_app(site.path());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/style.css")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"body { margin: 0; }");
}

#[tokio::test]
async fn test_unknown_path_returns_404() {
    let site = tempfile::tempdir().unwrap();
    std::fs::write(site.path().join("index.html"), "<html></html>").unwrap();

    let app = static_app(site.path());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/no-such-file.js")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
