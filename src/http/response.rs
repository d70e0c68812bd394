//! HTTP response building module
//!
//! Builders for the handful of response shapes the demo handlers produce.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, ALLOW, CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use hyper::{Response, StatusCode};

pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Body of the router's fallback 404
pub const NOT_FOUND_BODY: &str = "404 page not found\n";
/// Body of the router's fallback 405
pub const METHOD_NOT_ALLOWED_BODY: &str = "Method Not Allowed\n";

/// Build plain text response
pub fn build_text_response(status: StatusCode, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    build_response(status, TEXT_CONTENT_TYPE, body.into())
}

/// Build JSON response from already encoded bytes
pub fn build_json_response(status: StatusCode, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    build_response(status, JSON_CONTENT_TYPE, body.into())
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(allow: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header(CONTENT_TYPE, TEXT_CONTENT_TYPE)
        .header(ALLOW, allow)
        .body(Full::new(Bytes::from(METHOD_NOT_ALLOWED_BODY)))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from(METHOD_NOT_ALLOWED_BODY)))
        })
}

/// Build 301 Moved Permanently response pointing at `location`
///
/// GET and HEAD answers carry a small HTML link to the new location; other
/// methods get an empty body.
pub fn build_redirect_response(location: &str, with_body: bool) -> Response<Full<Bytes>> {
    let location = hex_escape_non_ascii(location);
    let mut builder = Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header(LOCATION, location.as_str());

    let body = if with_body {
        builder = builder.header(CONTENT_TYPE, HTML_CONTENT_TYPE);
        format!(
            "<a href=\"{}\">Moved Permanently</a>.\n\n",
            html_escape(&location)
        )
    } else {
        String::new()
    };

    builder
        .header(CONTENT_LENGTH, body.len())
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Percent-encode every byte outside ASCII so the value is a valid header
fn hex_escape_non_ascii(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii() {
            escaped.push(char::from(byte));
        } else {
            escaped.push_str(&format!("%{byte:02X}"));
        }
    }
    escaped
}

fn html_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Drop the body of a GET response answered for a HEAD request
///
/// `Content-Length` keeps the size the GET body would have had.
pub fn into_head_response(response: Response<Full<Bytes>>) -> Response<Full<Bytes>> {
    let (mut parts, _) = response.into_parts();
    if !parts.headers.contains_key(CONTENT_LENGTH) {
        parts.headers.insert(CONTENT_LENGTH, HeaderValue::from(0u64));
    }
    Response::from_parts(parts, Full::new(Bytes::new()))
}

fn build_response(status: StatusCode, content_type: &str, body: Bytes) -> Response<Full<Bytes>> {
    let content_length = body.len();
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_text_response() {
        let resp = build_text_response(StatusCode::OK, "hello");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], TEXT_CONTENT_TYPE);
        assert_eq!(resp.headers()[CONTENT_LENGTH], "5");
        assert_eq!(body_string(resp).await, "hello");
    }

    #[tokio::test]
    async fn test_405_carries_allow() {
        let resp = build_405_response("GET, HEAD");
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()[ALLOW], "GET, HEAD");
        assert_eq!(body_string(resp).await, METHOD_NOT_ALLOWED_BODY);
    }

    #[tokio::test]
    async fn test_redirect_with_link_body() {
        let resp = build_redirect_response("/getjson?user_id=7", true);
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()[LOCATION], "/getjson?user_id=7");
        assert_eq!(resp.headers()[CONTENT_TYPE], HTML_CONTENT_TYPE);
        assert_eq!(
            body_string(resp).await,
            "<a href=\"/getjson?user_id=7\">Moved Permanently</a>.\n\n"
        );
    }

    #[tokio::test]
    async fn test_redirect_without_body() {
        let resp = build_redirect_response("/login", false);
        assert_eq!(resp.headers()[LOCATION], "/login");
        assert!(resp.headers().get(CONTENT_TYPE).is_none());
        assert_eq!(body_string(resp).await, "");
    }

    #[test]
    fn test_redirect_location_escaping() {
        assert_eq!(hex_escape_non_ascii("/caf\u{e9}"), "/caf%C3%A9");
        assert_eq!(html_escape("/a?b=1&c=\"2\""), "/a?b=1&amp;c=&#34;2&#34;");
    }

    #[tokio::test]
    async fn test_head_response_keeps_length() {
        let resp = into_head_response(build_json_response(StatusCode::OK, "{\"a\":1}"));
        assert_eq!(resp.headers()[CONTENT_LENGTH], "7");
        assert_eq!(resp.headers()[CONTENT_TYPE], JSON_CONTENT_TYPE);
        assert_eq!(body_string(resp).await, "");
    }
}
