//! Fixed payloads, tokens and body strings served by the demo handlers
//!
//! Every literal the handlers write lives here as a named constant. The
//! `Fixtures` struct carries them at runtime so a config file or a test can
//! swap any of them out.

use serde::{Deserialize, Serialize};

/// Body written by `GET /`
pub const ROOT_GREETING: &str = "htp yeet";
/// Token placed in the `Authorization` response header after a login
pub const AUTH_TOKEN: &str = "thisisanauthtoken";
/// Body written when a profile or credentials body fails to decode
pub const DECODE_FAILURE_BODY: &str = "something went wrong";
/// Body prefix written when `/jsonshit` fails to decode its input
pub const JSON_DECODE_FAILURE_BODY: &str = "sometheng went wronig";
/// Body written when the fixed JSON payload fails to encode
pub const ENCODE_FAILURE_BODY: &str = "shit failed";

pub const FIXED_USERNAME: &str = "fluffy";
pub const FIXED_PASSWORD: &str = "totallysecurepassword";
pub const FIXED_USER_ID: i64 = 42069;

/// The constant object returned by `/jsonshit` and `/getjson`
///
/// Field order is the serialization order.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FixedPayload {
    pub username: String,
    pub password: String,
    pub user_id: i64,
}

impl Default for FixedPayload {
    fn default() -> Self {
        Self {
            username: FIXED_USERNAME.to_string(),
            password: FIXED_PASSWORD.to_string(),
            user_id: FIXED_USER_ID,
        }
    }
}

/// Runtime copy of every fixed value, loaded from the `[fixtures]` section
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Fixtures {
    pub root_greeting: String,
    pub auth_token: String,
    pub decode_failure_body: String,
    pub json_decode_failure_body: String,
    pub encode_failure_body: String,
    pub payload: FixedPayload,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            root_greeting: ROOT_GREETING.to_string(),
            auth_token: AUTH_TOKEN.to_string(),
            decode_failure_body: DECODE_FAILURE_BODY.to_string(),
            json_decode_failure_body: JSON_DECODE_FAILURE_BODY.to_string(),
            encode_failure_body: ENCODE_FAILURE_BODY.to_string(),
            payload: FixedPayload::default(),
        }
    }
}
