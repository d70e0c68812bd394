//! Demo endpoint handlers
//!
//! Each handler performs one illustrative I/O operation and writes a fixed
//! or echoed body. Decode failures on `POST /` and `POST /login` keep status
//! 200; `/jsonshit` switches to 500.

use std::fmt::Display;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, HeaderValue, AUTHORIZATION, HOST, USER_AGENT};
use hyper::{Request, Response, StatusCode};
use serde_json::{Map, Value};

use super::body::{
    decode_record, read_body, Credentials, DecodeError, ProfileSubmission, Record,
};
use crate::fixtures::Fixtures;
use crate::http::{build_json_response, build_text_response};
use crate::logger;

/// `GET /`
pub fn root<B>(req: &Request<B>, fixtures: &Fixtures) -> Response<Full<Bytes>> {
    logger::log_backend("processing htp request...");
    logger::log_backend(&format!(
        "--- request data ---\nHost:{}\nUser agent:{}",
        request_host(req),
        header_or_empty(req, &USER_AGENT),
    ));
    build_text_response(StatusCode::OK, fixtures.root_greeting.clone())
}

/// `POST /` - decode a profile submission and echo its username
pub async fn profile<B>(req: Request<B>, fixtures: &Fixtures) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Display,
{
    logger::log_backend(&format!(
        "user auth token -> {}",
        header_or_empty(&req, &AUTHORIZATION)
    ));

    let submission: ProfileSubmission = match decode_body(req).await {
        Ok(s) => s,
        Err(e) => {
            logger::log_error(&e.to_string());
            return build_text_response(StatusCode::OK, fixtures.decode_failure_body.clone());
        }
    };

    logger::log_backend(&format!(
        "------\nrequest body -> \n{}\n{}\n{}\n{}\n{}\n------",
        submission.username,
        submission.user_id,
        submission.file_number,
        submission.title,
        submission.description,
    ));
    build_text_response(StatusCode::OK, submission.username)
}

/// `POST /login` - decode credentials, hand out the fixed token
pub async fn login<B>(req: Request<B>, fixtures: &Fixtures) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Display,
{
    let credentials: Credentials = match decode_body(req).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&e.to_string());
            return build_text_response(StatusCode::OK, fixtures.decode_failure_body.clone());
        }
    };

    logger::log_backend(&format!(
        "Received login data -> username: {}; password {};",
        credentials.username, credentials.password
    ));

    let mut response = build_text_response(StatusCode::OK, credentials.username);
    match HeaderValue::from_str(&fixtures.auth_token) {
        Ok(token) => {
            response.headers_mut().insert(AUTHORIZATION, token);
        }
        Err(e) => logger::log_error(&format!("Auth token is not a valid header value: {e}")),
    }
    response
}

/// `POST /jsonshit` - log the posted object, answer with the fixed payload
pub async fn json_echo<B>(req: Request<B>, fixtures: &Fixtures) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Display,
{
    let (received, decode_failed) = match decode_body::<Map<String, Value>, B>(req).await {
        Ok(map) => (map, false),
        Err(e) => {
            logger::log_error(&e.to_string());
            (Map::new(), true)
        }
    };

    logger::log_backend(&format!(
        "Received json request data -> {}",
        Value::Object(received)
    ));
    logger::log_backend("json_echo is doing the json response");

    if !decode_failed {
        return fixed_payload_response(fixtures);
    }

    // The failure text and the payload share one 500 body
    let payload = serde_json::to_vec(&fixtures.payload).unwrap_or_else(|e| {
        logger::log_error(&e.to_string());
        fixtures.encode_failure_body.clone().into_bytes()
    });
    let mut body = fixtures.json_decode_failure_body.clone().into_bytes();
    body.extend_from_slice(&payload);
    build_text_response(StatusCode::INTERNAL_SERVER_ERROR, body)
}

/// `GET /doshit` - echo the Authorization header
pub fn auth_echo<B>(req: &Request<B>) -> Response<Full<Bytes>> {
    let token = header_or_empty(req, &AUTHORIZATION);
    logger::log_backend(&format!("user auth token -> {token}"));
    build_text_response(StatusCode::OK, format!("auth token sent -> {token}"))
}

/// `GET /getjson` - the fixed payload
pub fn get_json(fixtures: &Fixtures) -> Response<Full<Bytes>> {
    logger::log_backend("get_json is doing the GET json response");
    fixed_payload_response(fixtures)
}

/// `GET /querytest` - echo the `user_id` query parameter
pub fn query_test<B>(req: &Request<B>) -> Response<Full<Bytes>> {
    let user_id = query_param(req.uri().query(), "user_id").unwrap_or_default();
    logger::log_backend(&format!("User id from query params -> {user_id}"));
    build_text_response(StatusCode::OK, format!("user id -> {user_id}\n"))
}

fn fixed_payload_response(fixtures: &Fixtures) -> Response<Full<Bytes>> {
    match serde_json::to_vec(&fixtures.payload) {
        Ok(json) => build_json_response(StatusCode::OK, json),
        Err(e) => {
            logger::log_error(&e.to_string());
            build_text_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                fixtures.encode_failure_body.clone(),
            )
        }
    }
}

async fn decode_body<T, B>(req: Request<B>) -> Result<T, DecodeError>
where
    T: Record,
    B: Body<Data = Bytes>,
    B::Error: Display,
{
    let bytes = read_body(req.into_body()).await?;
    decode_record(&bytes)
}

/// First value of a header, empty when absent
fn header_or_empty<B>(req: &Request<B>, name: &HeaderName) -> String {
    req.headers()
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default()
}

/// Host header, falling back to the URI authority
fn request_host<B>(req: &Request<B>) -> String {
    let host = header_or_empty(req, &HOST);
    if host.is_empty() {
        req.uri()
            .authority()
            .map(ToString::to_string)
            .unwrap_or_default()
    } else {
        host
    }
}

/// First percent-decoded value of `key` in a query string
pub fn query_param(query: Option<&str>, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FixedPayload;
    use http_body_util::BodyExt;

    fn post(path: &str, body: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method("POST")
            .uri(path)
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap()
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_login_uses_configured_token() {
        let fixtures = Fixtures {
            auth_token: "swapped-token".to_string(),
            ..Fixtures::default()
        };
        let req = post("/login", r#"{"username":"carol","password":"pw"}"#);
        let resp = login(req, &fixtures).await;
        assert_eq!(resp.headers()[AUTHORIZATION], "swapped-token");
        assert_eq!(body_string(resp).await, "carol");
    }

    #[tokio::test]
    async fn test_login_invalid_token_skips_header() {
        let fixtures = Fixtures {
            auth_token: "bad\ntoken".to_string(),
            ..Fixtures::default()
        };
        let resp = login(post("/login", r#"{"username":"carol"}"#), &fixtures).await;
        assert!(resp.headers().get(AUTHORIZATION).is_none());
        assert_eq!(body_string(resp).await, "carol");
    }

    #[tokio::test]
    async fn test_profile_decode_failure_keeps_200() {
        let resp = profile(post("/", "{oops"), &Fixtures::default()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "something went wrong");
    }

    #[tokio::test]
    async fn test_json_echo_decode_failure_appends_payload() {
        let resp = json_echo(post("/jsonshit", "not json"), &Fixtures::default()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_string(resp).await,
            r#"sometheng went wronig{"username":"fluffy","password":"totallysecurepassword","user_id":42069}"#
        );
    }

    #[tokio::test]
    async fn test_get_json_uses_configured_payload() {
        let fixtures = Fixtures {
            payload: FixedPayload {
                username: "other".to_string(),
                password: "pw".to_string(),
                user_id: 1,
            },
            ..Fixtures::default()
        };
        let resp = get_json(&fixtures);
        assert_eq!(
            body_string(resp).await,
            r#"{"username":"other","password":"pw","user_id":1}"#
        );
    }

    #[tokio::test]
    async fn test_root_uses_configured_greeting() {
        let fixtures = Fixtures {
            root_greeting: "hi".to_string(),
            ..Fixtures::default()
        };
        let req = Request::builder().uri("/").body(()).unwrap();
        assert_eq!(body_string(root(&req, &fixtures)).await, "hi");
    }

    #[test]
    fn test_query_param() {
        assert_eq!(query_param(Some("user_id=7"), "user_id").as_deref(), Some("7"));
        assert_eq!(
            query_param(Some("a=1&user_id=a%20b&user_id=2"), "user_id").as_deref(),
            Some("a b")
        );
        assert_eq!(query_param(Some("user_id=x+y"), "user_id").as_deref(), Some("x y"));
        assert_eq!(query_param(Some("other=1"), "user_id"), None);
        assert_eq!(query_param(None, "user_id"), None);
    }

    #[test]
    fn test_request_host_falls_back_to_authority() {
        let req = Request::builder()
            .uri("http://example.test:8888/")
            .body(())
            .unwrap();
        assert_eq!(request_host(&req), "example.test:8888");

        let req = Request::builder()
            .uri("/")
            .header("Host", "localhost:8888")
            .body(())
            .unwrap();
        assert_eq!(request_host(&req), "localhost:8888");
    }
}
