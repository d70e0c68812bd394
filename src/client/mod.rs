//! `htp` client
//!
//! A small HTTP client for poking at the backend: remembers a base URL and
//! the auth token handed out by `/login`, then sends authenticated requests
//! and pretty-prints JSON answers.

pub mod error;
pub mod payload;
pub mod store;

pub use error::ClientError;
pub use store::StateStore;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::{Method, Request, Response, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde_json::{json, Value};

use crate::http::response::JSON_CONTENT_TYPE;

type HttpClient = Client<HttpConnector, Full<Bytes>>;

pub struct HtpClient {
    store: StateStore,
    http: HttpClient,
}

impl HtpClient {
    pub fn new(store: StateStore) -> Self {
        let http = Client::builder(TokioExecutor::new()).build_http();
        Self { store, http }
    }

    pub const fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn set_base_url(&self, url: &str) -> Result<(), ClientError> {
        self.store.set_base_url(url)?;
        Ok(())
    }

    /// POST the credentials to `/login` and keep the returned token
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ClientError> {
        let base = self.base_url()?;
        let body = json!({ "username": username, "password": password });

        let request = Request::builder()
            .method(Method::POST)
            .uri(build_uri(&base, "/login")?)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(Full::new(Bytes::from(body.to_string())))?;

        let response = self.send(request).await?;
        let token = response
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or(ClientError::NoAuthHeader)?;

        self.store.set_auth_token(&token)?;
        Ok(token)
    }

    /// Send an authenticated request and return the text to print
    ///
    /// `data` holds `key=value` pairs and only becomes a body for POST.
    pub async fn send_request(
        &self,
        method: &str,
        path: &str,
        data: &[String],
        fields: Option<&str>,
    ) -> Result<String, ClientError> {
        let base = self.base_url()?;
        let token = self
            .store
            .auth_token()?
            .ok_or(ClientError::MissingToken)?;

        let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
            .map_err(|_| ClientError::InvalidMethod(method.to_string()))?;

        let body = if method == Method::POST && !data.is_empty() {
            let object = payload::parse_key_value_pairs(data)?;
            Bytes::from(Value::Object(object).to_string())
        } else {
            Bytes::new()
        };

        let request = Request::builder()
            .method(method)
            .uri(build_uri(&base, path)?)
            .header(AUTHORIZATION, token)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(Full::new(body))?;

        let response = self.send(request).await?;
        let bytes = response.into_body().collect().await?.to_bytes();
        let text = String::from_utf8_lossy(&bytes);

        Ok(payload::render_response(&text, fields))
    }

    fn base_url(&self) -> Result<String, ClientError> {
        self.store.base_url()?.ok_or(ClientError::MissingBaseUrl)
    }

    /// Perform the request; 4xx and 5xx answers become `HttpStatus` errors
    async fn send(
        &self,
        request: Request<Full<Bytes>>,
    ) -> Result<Response<hyper::body::Incoming>, ClientError> {
        let response = self.http.request(request).await?;
        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(ClientError::HttpStatus {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }
        Ok(response)
    }
}

/// Base URL and path are joined as plain strings
fn build_uri(base: &str, path: &str) -> Result<Uri, ClientError> {
    let url = format!("{base}{path}");
    url.parse::<Uri>().map_err(|e| ClientError::InvalidUrl {
        reason: e.to_string(),
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_uri_concatenates() {
        let uri = build_uri("http://127.0.0.1:8888", "/querytest?user_id=7").unwrap();
        assert_eq!(uri.host(), Some("127.0.0.1"));
        assert_eq!(uri.port_u16(), Some(8888));
        assert_eq!(uri.path(), "/querytest");
        assert_eq!(uri.query(), Some("user_id=7"));
    }

    #[test]
    fn test_build_uri_rejects_garbage() {
        assert!(matches!(
            build_uri("not a url", "/"),
            Err(ClientError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn test_login_requires_base_url() {
        let tmp = tempfile::tempdir().unwrap();
        let client = HtpClient::new(StateStore::new(tmp.path()));
        let err = client.login("fluffy", "pw").await.unwrap_err();
        assert!(matches!(err, ClientError::MissingBaseUrl));
    }

    #[tokio::test]
    async fn test_request_requires_token() {
        let tmp = tempfile::tempdir().unwrap();
        let client = HtpClient::new(StateStore::new(tmp.path()));
        client.set_base_url("http://127.0.0.1:1").unwrap();
        let err = client
            .send_request("GET", "/", &[], None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "auth  token not found. login first");
    }

    #[tokio::test]
    async fn test_invalid_method() {
        let tmp = tempfile::tempdir().unwrap();
        let client = HtpClient::new(StateStore::new(tmp.path()));
        client.set_base_url("http://127.0.0.1:1").unwrap();
        client.store().set_auth_token("tok").unwrap();
        let err = client
            .send_request("GE T", "/", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidMethod(_)));
    }
}
