//! Routing module
//!
//! Maps a method + path pair onto one demo endpoint. Matching rules:
//! - Patterns are either exact paths or subtrees (a prefix ending in `/`)
//! - Exact patterns beat subtrees, longer subtrees beat shorter ones
//! - A GET pattern also answers HEAD
//! - Paths that are not canonical (`//x`, `/a/../b`) redirect to the cleaned
//!   path instead of matching
//! - A path claimed only by patterns of other methods is a 405, an unclaimed
//!   path is a 404

mod matcher;
mod table;

pub use matcher::{clean_path, match_route, RouteMatch};
pub use table::{Endpoint, PathPattern, Route, RouteTable};
