//! Backend and `htp` client talking over a real socket

use std::sync::Arc;

use tokio::sync::oneshot;

use htp_testbed::client::{ClientError, HtpClient, StateStore};
use htp_testbed::config::{AppState, Config};
use htp_testbed::server::{create_listener, start_server_loop};

struct Running {
    base_url: String,
    stop: oneshot::Sender<()>,
    server: tokio::task::JoinHandle<usize>,
}

async fn start_backend() -> Running {
    let mut cfg = Config::default();
    cfg.logging.access_log = false;

    let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(AppState::new(&cfg));

    let (stop, stopped) = oneshot::channel::<()>();
    let shutdown = async move {
        let _ = stopped.await;
        "test finished".to_string()
    };
    let server = tokio::spawn(start_server_loop(listener, state, shutdown));

    Running {
        base_url: format!("http://{addr}"),
        stop,
        server,
    }
}

#[tokio::test]
async fn test_login_then_authenticated_requests() {
    let backend = start_backend().await;
    let tmp = tempfile::tempdir().unwrap();
    let client = HtpClient::new(StateStore::new(tmp.path()));

    client.set_base_url(&backend.base_url).unwrap();
    let token = client.login("fluffy", "pw").await.unwrap();
    assert_eq!(token, "thisisanauthtoken");
    assert_eq!(
        client.store().auth_token().unwrap().as_deref(),
        Some("thisisanauthtoken")
    );

    let echoed = client.send_request("get", "/doshit", &[], None).await.unwrap();
    assert_eq!(echoed, "auth token sent -> thisisanauthtoken");

    let filtered = client
        .send_request("GET", "/getjson", &[], Some("user_id,missing"))
        .await
        .unwrap();
    assert_eq!(filtered, "{\n  \"user_id\": 42069,\n  \"missing\": null\n}");

    let query = client
        .send_request("GET", "/querytest?user_id=a%20b", &[], None)
        .await
        .unwrap();
    assert_eq!(query, "user id -> a b\n");

    let data = vec!["username=someone".to_string(), "user_id=3".to_string()];
    let fixed = client
        .send_request("POST", "/jsonshit", &data, Some("username"))
        .await
        .unwrap();
    assert_eq!(fixed, "{\n  \"username\": \"fluffy\"\n}");

    let profile = vec!["username=ziggy".to_string()];
    let name = client.send_request("POST", "/", &profile, None).await.unwrap();
    assert_eq!(name, "ziggy");

    backend.stop.send(()).unwrap();
    backend.server.await.unwrap();
}

#[tokio::test]
async fn test_error_statuses_surface_as_http_errors() {
    let backend = start_backend().await;
    let tmp = tempfile::tempdir().unwrap();
    let client = HtpClient::new(StateStore::new(tmp.path()));
    client.set_base_url(&backend.base_url).unwrap();
    client.store().set_auth_token("tok").unwrap();

    let err = client
        .send_request("PUT", "/login", &[], None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTPError: 405 Method Not Allowed");

    // POST without --data sends an empty body, which /jsonshit rejects
    let err = client
        .send_request("POST", "/jsonshit", &[], None)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::HttpStatus { code: 500, .. }));

    backend.stop.send(()).unwrap();
    backend.server.await.unwrap();
}

#[tokio::test]
async fn test_unreachable_server_is_url_error() {
    // Grab a free port, then close it again
    let addr = {
        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        listener.local_addr().unwrap()
    };

    let tmp = tempfile::tempdir().unwrap();
    let client = HtpClient::new(StateStore::new(tmp.path()));
    client.set_base_url(&format!("http://{addr}")).unwrap();

    let err = client.login("fluffy", "pw").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert!(err.to_string().starts_with("URLError: "));
}
