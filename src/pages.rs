//! Handlers serving the two static pages.
//!
//! The participant and admin documents live under `static/` and are read from
//! disk per request, so they can be tweaked without a rebuild. All client-side
//! polling and rendering logic lives in those files.

use axum::{
    body::Body,
    http::{header, Response, StatusCode},
    response::IntoResponse,
};

async fn serve_html(path: &str) -> Response<Body> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
            .body(Body::from(content))
            .unwrap(),
        Err(e) => {
            tracing::error!("Failed to read {path}: {e}");
            Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Body::from("Page not found"))
                .unwrap()
        }
    }
}

/// Handler to serve the participant page
pub async fn serve_index() -> impl IntoResponse {
    serve_html("static/index.html").await
}

/// Handler to serve the admin panel (unauthenticated on purpose)
pub async fn serve_admin() -> impl IntoResponse {
    serve_html("static/admin.html").await
}
