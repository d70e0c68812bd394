//! Request body decoding
//!
//! Decoding follows a streaming JSON decoder: only the first JSON value in the
//! body counts, anything after it is ignored, and an empty body is an error.
//! Records accept `null` (all fields empty) or an object; missing and `null`
//! fields decode to empty strings. Object keys find their field ignoring
//! case, and an exact spelling wins over a case-folded one.

use http_body_util::BodyExt;
use hyper::body::{Body, Bytes};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fmt::Display;

/// Why a request body could not be decoded
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to read request body: {0}")]
    Read(String),
    /// Body held no JSON value at all
    #[error("EOF")]
    Empty,
    #[error("cannot decode {0} into an object")]
    NotAnObject(&'static str),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// "profile submission" posted to `POST /`
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ProfileSubmission {
    #[serde(deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub user_id: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub file_number: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
}

/// Credentials posted to `POST /login`
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Credentials {
    #[serde(deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
}

/// A JSON object shape that can be decoded from a request body
pub trait Record: DeserializeOwned + Default {
    /// Declared field names; empty means keys are taken as they come
    const FIELDS: &'static [&'static str] = &[];
}

impl Record for ProfileSubmission {
    const FIELDS: &'static [&'static str] =
        &["username", "user_id", "file_number", "title", "description"];
}

impl Record for Credentials {
    const FIELDS: &'static [&'static str] = &["username", "password"];
}

impl Record for Map<String, Value> {}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read the whole body into memory
pub async fn read_body<B>(body: B) -> Result<Bytes, DecodeError>
where
    B: Body<Data = Bytes>,
    B::Error: Display,
{
    body.collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .map_err(|e| DecodeError::Read(e.to_string()))
}

/// Decode the first JSON value in `bytes`
pub fn decode_first(bytes: &[u8]) -> Result<Value, DecodeError> {
    let mut values = serde_json::Deserializer::from_slice(bytes).into_iter::<Value>();
    match values.next() {
        Some(value) => Ok(value?),
        None => Err(DecodeError::Empty),
    }
}

/// Decode a record (or JSON object map) from the first JSON value in `bytes`
pub fn decode_record<T: Record>(bytes: &[u8]) -> Result<T, DecodeError> {
    match decode_first(bytes)? {
        Value::Null => Ok(T::default()),
        Value::Object(object) => Ok(serde_json::from_value(Value::Object(
            canonical_keys(object, T::FIELDS),
        ))?),
        other => Err(DecodeError::NotAnObject(json_kind(&other))),
    }
}

/// Rename keys to the field they address
///
/// Keys are visited in order, so when two keys land on the same field the
/// later one wins. Keys matching no field are left alone.
fn canonical_keys(object: Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
    if fields.is_empty() {
        return object;
    }

    object
        .into_iter()
        .map(|(key, value)| {
            let field = fields
                .iter()
                .find(|field| **field == key)
                .or_else(|| fields.iter().find(|field| fold_eq(field, &key)));
            match field {
                Some(field) => ((*field).to_string(), value),
                None => (key, value),
            }
        })
        .collect()
}

fn fold_eq(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
