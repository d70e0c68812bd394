//! Client error types

use std::error::Error as StdError;

/// Everything that can stop an `htp` command
///
/// The `Display` text is what the CLI prints before exiting with status 1.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("base url not set. Set it using --set-base-url")]
    MissingBaseUrl,

    #[error("auth  token not found. login first")]
    MissingToken,

    #[error("login failed-> no auth header?")]
    NoAuthHeader,

    #[error("invalid data pair '{0}', expected key=value")]
    InvalidPair(String),

    #[error("invalid HTTP method '{0}'")]
    InvalidMethod(String),

    #[error("URLError: invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Server answered with a 4xx/5xx status
    #[error("HTTPError: {code} {reason}")]
    HttpStatus { code: u16, reason: String },

    #[error("URLError: {}", error_chain(.0))]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("URLError: {}", error_chain(.0))]
    Body(#[from] hyper::Error),

    #[error("failed to build request: {0}")]
    Request(#[from] hyper::http::Error),

    #[error("state directory error: {0}")]
    Io(#[from] std::io::Error),
}

/// Join an error with all of its sources
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
