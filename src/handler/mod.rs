//! Request handler module
//!
//! Request routing dispatch, body decoding and the demo endpoint handlers.

pub mod body;
pub mod demo;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
