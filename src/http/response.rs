//! HTTP response building module
//!
//! Every body the API sends is JSON; errors and confirmations use `{"message": ...}`.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, SERVER};
use hyper::{Response, StatusCode};
use serde::Serialize;

const JSON: &str = "application/json; charset=utf-8";

/// Serialize `body` as a JSON response
pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(body) {
        Ok(json) => Response::builder()
            .status(status)
            .header("Content-Type", JSON)
            .body(Full::new(Bytes::from(json)))
            .unwrap_or_else(|e| {
                log_build_error(status.as_str(), &e);
                Response::new(Full::new(Bytes::new()))
            }),
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            message_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
        }
    }
}

/// `{"message": ...}` response
pub fn message_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "message": message }).to_string();
    Response::builder()
        .status(status)
        .header("Content-Type", JSON)
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 response for paths outside the API
pub fn build_404_response() -> Response<Full<Bytes>> {
    message_response(StatusCode::NOT_FOUND, "Route not found.")
}

/// Build 405 Method Not Allowed response listing the methods the path accepts
pub fn build_405_response(allow: &str) -> Response<Full<Bytes>> {
    let mut response = message_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed.");
    if let Ok(value) = HeaderValue::from_str(allow) {
        response.headers_mut().insert("Allow", value);
    }
    response
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    message_response(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large.")
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", "GET, POST, PUT, DELETE, OPTIONS");

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Liveness probe body
pub fn build_health_response() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &serde_json::json!({ "status": "ok" }))
}

/// Headers added to every response on the way out
pub fn apply_common_headers(
    response: &mut Response<Full<Bytes>>,
    server_name: &str,
    enable_cors: bool,
) {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(server_name) {
        headers.insert(SERVER, value);
    }
    if enable_cors {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    }
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_message_response() {
        let response = message_response(StatusCode::BAD_REQUEST, "nope");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["Content-Type"], JSON);
        assert_eq!(body_json(response).await, serde_json::json!({"message": "nope"}));
    }

    #[tokio::test]
    async fn test_json_response_array() {
        let response = json_response(StatusCode::OK, &[1, 2, 3]);
        assert_eq!(body_json(response).await, serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn test_405_lists_allowed_methods() {
        let response = build_405_response("GET, POST, OPTIONS");
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()["Allow"], "GET, POST, OPTIONS");
    }

    #[test]
    fn test_preflight_with_and_without_cors() {
        let open = build_options_response(true);
        assert_eq!(open.status(), StatusCode::NO_CONTENT);
        assert!(open.headers().contains_key("Access-Control-Allow-Methods"));

        let closed = build_options_response(false);
        assert!(!closed.headers().contains_key("Access-Control-Allow-Methods"));
    }

    #[test]
    fn test_common_headers() {
        let mut response = build_404_response();
        apply_common_headers(&mut response, "taskboard/0.1", true);
        assert_eq!(response.headers()[SERVER], "taskboard/0.1");
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
