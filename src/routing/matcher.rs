//! Route matching module
//!
//! Picks the most specific route for a method + path and decides between
//! 404 and 405 when nothing fits. Non-canonical paths are redirected to
//! their cleaned form before any route is considered.

use hyper::Method;

use super::table::{Endpoint, Route, RouteTable};

/// Outcome of matching a request against a `RouteTable`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    Found(Endpoint),
    /// Path is not canonical; carries the cleaned path to redirect to
    Redirect(String),
    /// Path is known but not for this method; carries the `Allow` header value
    MethodNotAllowed(String),
    NotFound,
}

/// Find the endpoint for a request
pub fn match_route(table: &RouteTable, method: &Method, path: &str) -> RouteMatch {
    if *method != Method::CONNECT {
        let cleaned = clean_path(path);
        if cleaned != path {
            return RouteMatch::Redirect(cleaned);
        }
    }

    let path_matches: Vec<&Route> = table
        .routes()
        .iter()
        .filter(|route| route.pattern.matches(path))
        .collect();

    if path_matches.is_empty() {
        return RouteMatch::NotFound;
    }

    let best = path_matches
        .iter()
        .filter(|route| method_matches(&route.method, method))
        .max_by_key(|route| route.pattern.specificity());

    match best {
        Some(route) => RouteMatch::Found(route.endpoint),
        None => RouteMatch::MethodNotAllowed(allow_header(&path_matches)),
    }
}

/// Canonical form of a request path
///
/// Always rooted, repeated slashes collapsed, `.` and `..` segments resolved
/// lexically (`..` never climbs above `/`). A trailing slash survives unless
/// the result is `/` itself.
pub fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut cleaned = format!("/{}", segments.join("/"));
    if path.ends_with('/') && cleaned != "/" {
        cleaned.push('/');
    }
    cleaned
}

/// GET routes answer HEAD as well
fn method_matches(route_method: &Method, request_method: &Method) -> bool {
    route_method == request_method
        || (*route_method == Method::GET && *request_method == Method::HEAD)
}

/// Sorted, de-duplicated method list for the `Allow` header
fn allow_header(routes: &[&Route]) -> String {
    let mut methods: Vec<&str> = Vec::new();
    for route in routes {
        methods.push(route.method.as_str());
        if route.method == Method::GET {
            methods.push("HEAD");
        }
    }
    methods.sort_unstable();
    methods.dedup();
    methods.join(", ")
}
