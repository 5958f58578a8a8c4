//! Tolerant and strict lookups over schema-less JSON documents.
//!
//! Installer, modpack and launcher documents are third-party formats, so they
//! are handled as plain [`Value`]s. Optional fields go through [`element`],
//! which yields `null` for anything absent; required fields go through the
//! `require_*` helpers, which name the offending document on failure.

use serde_json::{ Map, Value };

use crate::error::{ ConvertError, Result };

static NULL: Value = Value::Null;

/// Where a document came from, used to pick the right error variant.
#[derive(Debug, Clone, Copy)]
pub enum Origin<'a> {
  /// Bundled with the converter.
  Template(&'static str),
  /// Supplied by the user (installer or modpack).
  Document(&'a str),
}

impl Origin<'_> {
  pub fn error(&self, reason: impl Into<String>) -> ConvertError {
    match self {
      Origin::Template(template) => ConvertError::MalformedTemplate { template: *template, reason: reason.into() },
      Origin::Document(document) => ConvertError::malformed(*document, reason),
    }
  }
}

/// Returns the member `key` of `value`, or `null` if `value` is not an object
/// or has no such member.
pub fn element<'a>(value: &'a Value, key: &str) -> &'a Value {
  value.get(key).unwrap_or(&NULL)
}

/// Follows `keys` through nested objects, yielding `null` as soon as a step is absent.
pub fn element_path<'a>(value: &'a Value, keys: &[&str]) -> &'a Value {
  keys.iter().fold(value, |current, key| element(current, key))
}

pub fn require_str<'a>(value: &'a Value, key: &str, origin: Origin) -> Result<&'a str> {
  element(value, key).as_str().ok_or_else(|| origin.error(format!("'{key}' is missing or not a string")))
}

pub fn require_array<'a>(value: &'a Value, key: &str, origin: Origin) -> Result<&'a Vec<Value>> {
  element(value, key).as_array().ok_or_else(|| origin.error(format!("'{key}' is missing or not an array")))
}

pub fn require_array_mut<'a>(value: &'a mut Value, key: &str, origin: Origin) -> Result<&'a mut Vec<Value>> {
  value
    .get_mut(key)
    .and_then(Value::as_array_mut)
    .ok_or_else(|| origin.error(format!("'{key}' is missing or not an array")))
}

pub fn require_object_mut<'a>(value: &'a mut Value, what: &str, origin: Origin) -> Result<&'a mut Map<String, Value>> {
  value.as_object_mut().ok_or_else(|| origin.error(format!("{what} is not an object")))
}
