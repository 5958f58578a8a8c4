use std::path::Path;

use serde_json::Value;

use crate::{
  error::{ ConvertError, Result },
  json::element_path,
  reader,
  resolve::INSTALLER_VERSION_ENTRY,
};

pub const MC_VERSION_FLAG: &str = "--fml.mcVersion";
pub const FORGE_VERSION_FLAG: &str = "--fml.forgeVersion";

/// The `arguments.game` tokens of an installer's version document, in order.
///
/// Flags and values are not paired up front: the value of a flag is simply
/// the token after it, so unrelated flags may appear anywhere in the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentTable(Vec<String>);

impl ArgumentTable {
  /// Collects `arguments.game` from an installer document. A missing section
  /// yields an empty table; non-string tokens are rendered as JSON text.
  pub fn from_installer(installer: &Value) -> Self {
    let tokens = element_path(installer, &["arguments", "game"])
      .as_array()
      .map(|game| {
        game
          .iter()
          .map(|token| match token {
            Value::String(s) => s.clone(),
            other => other.to_string(),
          })
          .collect()
      })
      .unwrap_or_default();
    Self(tokens)
  }

  pub fn tokens(&self) -> &[String] {
    &self.0
  }

  pub fn into_inner(self) -> Vec<String> {
    self.0
  }

  /// The token right after the first occurrence of `flag`.
  pub fn value_following(&self, flag: &str) -> Option<&str> {
    let index = self.0.iter().position(|token| token == flag)?;
    self.0.get(index + 1).map(String::as_str)
  }

  pub fn require(&self, flag: &str) -> Result<&str> {
    self.value_following(flag).ok_or_else(|| ConvertError::MissingArgument { flag: flag.to_string() })
  }
}

impl From<Vec<String>> for ArgumentTable {
  fn from(tokens: Vec<String>) -> Self {
    Self(tokens)
  }
}

/// The additional game arguments an installer declares, read straight from its `version.json`.
pub fn extra_args(installer_path: impl AsRef<Path>) -> Result<Vec<String>> {
  let installer = reader::read_json(installer_path, INSTALLER_VERSION_ENTRY)?;
  Ok(ArgumentTable::from_installer(&installer).into_inner())
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn keeps_token_order() {
    let installer = json!({
      "arguments": {
        "game": ["--launchTarget", "forgeclient", "--fml.forgeVersion", "47.2.0", "--fml.mcVersion", "1.20.1"]
      }
    });
    let table = ArgumentTable::from_installer(&installer);
    assert_eq!(table.tokens().len(), 6);
    assert_eq!(table.tokens()[0], "--launchTarget");
    assert_eq!(table.value_following(MC_VERSION_FLAG), Some("1.20.1"));
    assert_eq!(table.value_following(FORGE_VERSION_FLAG), Some("47.2.0"));
    assert_eq!(table.value_following("--launchTarget"), Some("forgeclient"));
  }

  #[test]
  fn missing_section_is_empty() {
    assert!(ArgumentTable::from_installer(&json!({})).tokens().is_empty());
    assert!(ArgumentTable::from_installer(&json!({ "arguments": {} })).tokens().is_empty());
    assert!(ArgumentTable::from_installer(&json!({ "arguments": { "game": null } })).tokens().is_empty());
  }

  #[test]
  fn lookups_fail_only_when_asked() {
    let table = ArgumentTable::from(vec!["--fml.mcVersion".to_string()]);
    assert_eq!(table.value_following("--fml.mcVersion"), None);
    let err = table.require(FORGE_VERSION_FLAG).unwrap_err();
    assert!(matches!(err, ConvertError::MissingArgument { ref flag } if flag == FORGE_VERSION_FLAG));
  }
}
