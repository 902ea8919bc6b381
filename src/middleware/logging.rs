//! Logging middleware

use std::time::Instant;

use axum::{
    body::Body,
    extract::Request,
    http::{header::ALLOW, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{debug, info, warn};

/// Allow value of a response, `-` when the route does not emit one.
fn allow_of(response: &Response) -> &str {
    response
        .headers()
        .get(ALLOW)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
}

/// Logs each request together with the Allow header sent back
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    let allow = allow_of(&response);
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    match status {
        s if s.is_server_error() => warn!(
            method = %method,
            path = %path,
            status = s.as_u16(),
            allow,
            duration_ms = %duration_ms,
            "Request failed"
        ),
        StatusCode::METHOD_NOT_ALLOWED => info!(
            method = %method,
            path = %path,
            allow,
            duration_ms = %duration_ms,
            "Method not allowed"
        ),
        s if s.is_client_error() => debug!(
            method = %method,
            path = %path,
            status = s.as_u16(),
            allow,
            duration_ms = %duration_ms,
            "Request rejected"
        ),
        s => info!(
            method = %method,
            path = %path,
            status = s.as_u16(),
            allow,
            duration_ms = %duration_ms,
            "Request completed"
        ),
    }

    response
}
