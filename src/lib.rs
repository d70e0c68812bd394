//! Demo HTTP backend for exercising headers, JSON bodies, response headers
//! and query parameters, plus the `htp` client that drives it.

pub mod client;
pub mod config;
pub mod fixtures;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
