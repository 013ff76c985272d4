//! Request id and access logging middleware

use axum::{
    extract::Request,
    http::{HeaderValue, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

/// Request ID header name
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Id of the request being served, stored in request extensions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub String);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reuse the caller's request id or mint one, and echo it on the response
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let header = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .and_then(|s| HeaderValue::from_str(s).ok().map(|v| (s.to_string(), v)));

    let (request_id, header_value) = match header {
        Some(pair) => pair,
        None => {
            let id = Uuid::new_v4().to_string();
            let value = HeaderValue::from_str(&id).unwrap_or_else(|_| HeaderValue::from_static("unknown"));
            (id, value)
        }
    };

    request.extensions_mut().insert(RequestId(request_id));

    let mut response = next.run(request).await;
    response.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    response
}

/// Part of the API a request is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Kiosk,
    Admin,
    System,
}

impl Surface {
    pub fn for_path(path: &str) -> Self {
        if path.starts_with("/api/kiosk") {
            Surface::Kiosk
        } else if path.starts_with("/api/admin") {
            Surface::Admin
        } else {
            Surface::System
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Surface::Kiosk => "kiosk",
            Surface::Admin => "admin",
            Surface::System => "system",
        }
    }
}

/// Access log entry, emitted at a level matching the status class
struct AccessLog {
    request_id: String,
    method: Method,
    path: String,
    surface: Surface,
    started: Instant,
}

impl AccessLog {
    fn completed(&self, status: StatusCode) {
        let status_code = status.as_u16();
        let duration_ms = self.started.elapsed().as_millis() as u64;
        let surface = self.surface.as_str();
        let (request_id, method, path) = (&self.request_id, &self.method, &self.path);

        if status.is_server_error() {
            tracing::error!(%request_id, %method, %path, surface, status = status_code, duration_ms, "Request failed");
        } else if status.is_client_error() {
            tracing::warn!(%request_id, %method, %path, surface, status = status_code, duration_ms, "Request rejected");
        } else {
            tracing::info!(%request_id, %method, %path, surface, status = status_code, duration_ms, "Request completed");
        }
    }
}

pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let log = AccessLog {
        request_id: request
            .extensions()
            .get::<RequestId>()
            .map(|id| id.0.clone())
            .unwrap_or_else(|| "unknown".to_string()),
        method: request.method().clone(),
        surface: Surface::for_path(&path),
        path,
        started: Instant::now(),
    };

    let response = next.run(request).await;
    log.completed(response.status());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_display() {
        assert_eq!(RequestId("req-7".to_string()).to_string(), "req-7");
    }

    #[test]
    fn test_surface_for_path() {
        assert_eq!(Surface::for_path("/api/kiosk/feedback"), Surface::Kiosk);
        assert_eq!(Surface::for_path("/api/admin/dashboard"), Surface::Admin);
        assert_eq!(Surface::for_path("/health").as_str(), "system");
    }
}
