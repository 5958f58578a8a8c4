use log::debug;
use serde_json::Value;

use super::{ parse, MINECRAFT_UID };
use crate::{
  error::Result,
  json::{ element, require_array_mut, Origin },
  types::VersionTriple,
};

pub const TEMPLATE_NAME: &str = "mmc-pack.json";
const TEMPLATE: &str = include_str!("../../templates/mmc-pack.json");

pub fn load() -> Result<Value> {
  parse(TEMPLATE_NAME, TEMPLATE)
}

/// Pins the Minecraft component to the resolved version. Components without
/// a version (Forge itself, for one) are left alone.
pub fn transform(mut pack: Value, versions: &VersionTriple) -> Result<Value> {
  for component in require_array_mut(&mut pack, "components", Origin::Template(TEMPLATE_NAME))? {
    let pinned = element(component, "uid").as_str() == Some(MINECRAFT_UID) && !element(component, "version").is_null();
    if !pinned {
      continue;
    }
    if let Some(component) = component.as_object_mut() {
      debug!("Pinning {MINECRAFT_UID} to {}", versions.minecraft_version);
      component.insert("version".into(), versions.minecraft_version.clone().into());
    }
  }
  Ok(pack)
}

pub fn build(versions: &VersionTriple) -> Result<Value> {
  transform(load()?, versions)
}
