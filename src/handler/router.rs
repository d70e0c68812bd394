//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: header logging, route matching,
//! dispatch to the demo handlers and access logging.

use std::convert::Infallible;
use std::fmt::Display;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};

use super::demo;
use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::{match_route, Endpoint, RouteMatch};

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Display,
{
    let mut access_entry = state
        .access_log_enabled()
        .then(|| AccessLogEntry::from_request(remote_addr, &req));

    logger::log_headers(req.headers(), state.config.logging.show_headers);

    let is_head = req.method() == Method::HEAD;
    let route = match_route(&state.routes, req.method(), req.uri().path());
    let response = match route {
        RouteMatch::Found(endpoint) => dispatch(endpoint, req, &state).await,
        RouteMatch::Redirect(path) => {
            let location = match req.uri().query() {
                Some(query) => format!("{path}?{query}"),
                None => path,
            };
            let with_body = req.method() == Method::GET || is_head;
            http::build_redirect_response(&location, with_body)
        }
        RouteMatch::MethodNotAllowed(allow) => http::build_405_response(&allow),
        RouteMatch::NotFound => http::build_404_response(),
    };
    let response = if is_head {
        http::into_head_response(response)
    } else {
        response
    };

    if let Some(entry) = access_entry.as_mut() {
        let body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.complete(response.status().as_u16(), body_bytes);
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Dispatch to the handler behind an endpoint
async fn dispatch<B>(
    endpoint: Endpoint,
    req: Request<B>,
    state: &AppState,
) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Display,
{
    let fixtures = &state.fixtures;
    match endpoint {
        Endpoint::Root => demo::root(&req, fixtures),
        Endpoint::Profile => demo::profile(req, fixtures).await,
        Endpoint::Login => demo::login(req, fixtures).await,
        Endpoint::JsonEcho => demo::json_echo(req, fixtures).await,
        Endpoint::AuthEcho => demo::auth_echo(&req),
        Endpoint::GetJson => demo::get_json(fixtures),
        Endpoint::QueryTest => demo::query_test(&req),
    }
}
