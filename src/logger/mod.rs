//! Logger module
//!
//! Provides logging utilities for the demo backend including:
//! - Server lifecycle logging
//! - `[ BACKEND ]` diagnostics emitted by the handlers
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use crate::routing::RouteTable;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
pub fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
pub fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, routes: &RouteTable) {
    write_info("[ BACKEND ] starting backend...");
    write_info(&format!("Listening on: http://{addr}"));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(max_conn) = config.performance.max_connections {
        write_info(&format!("Max connections: {max_conn}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("Routes:");
    for route in routes.routes() {
        write_info(&format!("  - {} {}", route.method, route.pattern.as_str()));
    }
}

/// Handler diagnostic line
pub fn log_backend(message: &str) {
    write_info(&format!("[ BACKEND ] {message}"));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    log_error(&format!("Failed to serve connection: {err:?}"));
}

/// Error line, used for decode failures among others
pub fn log_error(message: &str) {
    write_error(&error_line(message));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[ WARN ] {message}"));
}

fn error_line(message: &str) -> String {
    format!("[ ERROR ] {message}")
}

pub fn log_headers(headers: &hyper::HeaderMap, show: bool) {
    if !show {
        return;
    }
    write_info(&format!("[Headers] Count: {}", headers.len()));
    for (name, value) in headers {
        write_info(&format!("  {name}: {}", value.to_str().unwrap_or("<binary>")));
    }
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}

pub fn log_shutdown(reason: &str) {
    write_info(&format!("[ BACKEND ] shutting down ({reason})"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_line_tag() {
        assert_eq!(error_line("EOF"), "[ ERROR ] EOF");
    }
}
