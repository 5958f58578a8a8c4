//! Launcher documents bundled with the converter. Each conversion parses a
//! fresh copy and edits it in memory; only the edited copy is written out.

pub mod instance;
pub mod patch;

use serde_json::Value;

use crate::error::{ ConvertError, Result };

pub const MINECRAFT_UID: &str = "net.minecraft";

fn parse(template: &'static str, text: &str) -> Result<Value> {
  let document: Value = serde_json::from_str(text)
    .map_err(|err| ConvertError::MalformedTemplate { template, reason: err.to_string() })?;
  if !document.is_object() {
    return Err(ConvertError::MalformedTemplate { template, reason: "not a JSON object".into() });
  }
  Ok(document)
}

/// Compact JSON, field order as in the template.
pub fn to_bytes(document: &Value) -> Result<Vec<u8>> {
  Ok(serde_json::to_vec(document)?)
}
