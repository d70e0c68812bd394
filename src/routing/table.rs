//! Route table module
//!
//! Declares the demo endpoints and the pattern table that reaches them.

use hyper::Method;

/// Demo endpoints, one per handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /` - fixed greeting
    Root,
    /// `POST /` - profile submission echo
    Profile,
    /// `POST /login` - credentials + auth header
    Login,
    /// `POST /jsonshit` - JSON in, fixed JSON out
    JsonEcho,
    /// `GET /doshit` - Authorization header echo
    AuthEcho,
    /// `GET /getjson` - fixed JSON out
    GetJson,
    /// `GET /querytest` - `user_id` query echo
    QueryTest,
}

/// Path side of a route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// Matches exactly this path
    Exact(String),
    /// Matches every path starting with this prefix (always ends in `/`)
    Subtree(String),
}

impl PathPattern {
    /// Parse a pattern: a trailing slash makes it a subtree
    pub fn parse(pattern: &str) -> Self {
        if pattern.ends_with('/') {
            Self::Subtree(pattern.to_string())
        } else {
            Self::Exact(pattern.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Exact(p) | Self::Subtree(p) => p,
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(p) => path == p,
            Self::Subtree(prefix) => path.starts_with(prefix.as_str()),
        }
    }

    /// Ordering key, higher is more specific
    pub fn specificity(&self) -> (u8, usize) {
        match self {
            Self::Exact(p) => (1, p.len()),
            Self::Subtree(prefix) => (0, prefix.len()),
        }
    }
}

/// A single method + pattern -> endpoint binding
#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub pattern: PathPattern,
    pub endpoint: Endpoint,
}

/// Ordered collection of routes
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub const fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// The seven demo routes
    pub fn demo() -> Self {
        Self::new()
            .route(Method::GET, "/", Endpoint::Root)
            .route(Method::POST, "/", Endpoint::Profile)
            .route(Method::POST, "/login", Endpoint::Login)
            .route(Method::POST, "/jsonshit", Endpoint::JsonEcho)
            .route(Method::GET, "/doshit", Endpoint::AuthEcho)
            .route(Method::GET, "/getjson", Endpoint::GetJson)
            .route(Method::GET, "/querytest", Endpoint::QueryTest)
    }

    #[must_use]
    pub fn route(mut self, method: Method, pattern: &str, endpoint: Endpoint) -> Self {
        self.routes.push(Route {
            method,
            pattern: PathPattern::parse(pattern),
            endpoint,
        });
        self
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pattern() {
        assert_eq!(PathPattern::parse("/"), PathPattern::Subtree("/".to_string()));
        assert_eq!(
            PathPattern::parse("/login"),
            PathPattern::Exact("/login".to_string())
        );
        assert_eq!(
            PathPattern::parse("/static/"),
            PathPattern::Subtree("/static/".to_string())
        );
    }

    #[test]
    fn test_subtree_matches_descendants() {
        let pattern = PathPattern::parse("/static/");
        assert!(pattern.matches("/static/"));
        assert!(pattern.matches("/static/app.css"));
        assert!(!pattern.matches("/static"));
        assert!(!pattern.matches("/other"));
    }

    #[test]
    fn test_exact_beats_subtree() {
        let exact = PathPattern::parse("/a");
        let root = PathPattern::parse("/");
        let deep = PathPattern::parse("/a/b/");
        assert!(exact.specificity() > root.specificity());
        assert!(exact.specificity() > deep.specificity());
        assert!(deep.specificity() > root.specificity());
    }

    #[test]
    fn test_demo_table_has_seven_routes() {
        assert_eq!(RouteTable::demo().routes().len(), 7);
    }
}
