//! HTTP protocol layer module
//!
//! Response builders shared by the router and the demo handlers.

pub mod response;

// Re-export commonly used items
pub use response::{
    build_404_response, build_405_response, build_json_response, build_redirect_response,
    build_text_response, into_head_response,
};
