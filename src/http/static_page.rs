//! Static page serving.
//!
//! # Responsibilities
//! - Serve the configured HTML asset on root GET
//! - Map read failures to a generic 500
//!
//! # Design Decisions
//! - The file is read per request; no caching, no ETag (a single local
//!   page, and the relay keeps no state)
//! - Read failures log the reason; the caller only sees generic text

use std::path::Path;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Body sent when the asset cannot be read.
pub const READ_ERROR_BODY: &str = "Error loading page";

/// Serve the static HTML asset from disk.
pub async fn serve_page(path: &Path) -> Response {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            (StatusCode::OK, [(header::CONTENT_TYPE, "text/html")], bytes).into_response()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read static page");
            (StatusCode::INTERNAL_SERVER_ERROR, READ_ERROR_BODY).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_serves_exact_file_bytes() {
        let path = std::env::temp_dir().join(format!("cors-relay-page-{}.html", std::process::id()));
        let content = b"<html><body>hi</body></html>";
        std::fs::File::create(&path)
            .unwrap()
            .write_all(content)
            .unwrap();

        let response = serve_page(&path).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html"
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], content);

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_missing_file_is_500() {
        let response = serve_page(Path::new("definitely-not-here.html")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], READ_ERROR_BODY.as_bytes());
    }
}
