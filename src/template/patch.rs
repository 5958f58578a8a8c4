use log::{ debug, warn };
use serde_json::{ json, Value };

use super::{ parse, MINECRAFT_UID };
use crate::{
  error::Result,
  json::{ element, element_path, require_array, require_array_mut, require_object_mut, Origin },
  resolve::INSTALLER_VERSION_ENTRY,
  types::{ VersionTriple, WrapperIdentity },
};

pub const TEMPLATE_NAME: &str = "patches/net.minecraftforge.json";
const TEMPLATE: &str = include_str!("../../templates/patches/net.minecraftforge.json");

pub const WRAPPER_NAME_PREFIX: &str = "io.github.zekerzhayard:ForgeWrapper:";
pub const WRAPPER_FILENAME_FIELD: &str = "MMC-filename";
pub const MODPACK_LOCATOR_NAME: &str = "cpw.mods.forge:cursepacklocator:1.2.0";
pub const FORGE_MAVEN: &str = "https://files.minecraftforge.net/maven/";

const ORIGIN: Origin<'static> = Origin::Template(TEMPLATE_NAME);

/// The edited patch plus the wrapper file name its own library entry expects.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
  pub document: Value,
  pub wrapper: WrapperIdentity,
}

pub fn load() -> Result<Value> {
  parse(TEMPLATE_NAME, TEMPLATE)
}

/// Finds the wrapper's own library entry and returns its file name marker.
pub fn wrapper_identity(patch: &Value) -> Result<WrapperIdentity> {
  let libraries = require_array(patch, "libraries", ORIGIN)?;
  let wrapper = libraries
    .iter()
    .find(|library| element(library, "name").as_str().is_some_and(|name| name.starts_with(WRAPPER_NAME_PREFIX)))
    .ok_or_else(|| ORIGIN.error(format!("no library named {WRAPPER_NAME_PREFIX}*")))?;
  let file_name = element(wrapper, WRAPPER_FILENAME_FIELD)
    .as_str()
    .ok_or_else(|| ORIGIN.error(format!("wrapper library has no '{WRAPPER_FILENAME_FIELD}'")))?;
  Ok(WrapperIdentity(file_name.to_string()))
}

/// Copies the installer's libraries with the main Forge jar pointed at its
/// `-launcher.jar` variant. Only the exact resolved version is rewritten.
pub fn installer_libraries(installer: &Value, versions: &VersionTriple) -> Result<Vec<Value>> {
  let forge_path = versions.forge_artifact_path();
  let mut libraries = require_array(installer, "libraries", Origin::Document(INSTALLER_VERSION_ENTRY))?.clone();

  for library in &mut libraries {
    let path = element_path(library, &["downloads", "artifact", "path"]);
    let Some(path) = path.as_str() else {
      warn!("Installer library {} has no artifact path", element(library, "name"));
      continue;
    };
    if path != forge_path {
      continue;
    }
    let url = format!("{FORGE_MAVEN}{}", path.replace(".jar", "-launcher.jar"));
    if let Some(artifact) = library.pointer_mut("/downloads/artifact").and_then(Value::as_object_mut) {
      debug!("Pointing {forge_path} at {url}");
      artifact.insert("url".into(), url.into());
    }
  }
  Ok(libraries)
}

pub fn transform(mut patch: Value, installer: &Value, versions: &VersionTriple, with_modpack: bool) -> Result<Patch> {
  let wrapper = wrapper_identity(&patch)?;
  let installer_libraries = installer_libraries(installer, versions)?;

  let libraries = require_array_mut(&mut patch, "libraries", ORIGIN)?;
  if with_modpack {
    libraries.push(json!({ "name": MODPACK_LOCATOR_NAME, "url": FORGE_MAVEN }));
  }
  libraries.extend(installer_libraries);

  require_object_mut(&mut patch, "patch", ORIGIN)?.insert("version".into(), versions.forge_version.clone().into());

  for requirement in require_array_mut(&mut patch, "requires", ORIGIN)? {
    if element(requirement, "uid").as_str() != Some(MINECRAFT_UID) {
      continue;
    }
    require_object_mut(requirement, "requirement", ORIGIN)?
      .insert("equals".into(), versions.minecraft_version.clone().into());
  }

  Ok(Patch { document: patch, wrapper })
}

pub fn build(installer: &Value, versions: &VersionTriple, with_modpack: bool) -> Result<Patch> {
  transform(load()?, installer, versions, with_modpack)
}
