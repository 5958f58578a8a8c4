//! Works out which Minecraft and Forge versions an instance targets, either
//! from a Forge installer or from a CurseForge modpack manifest.

use std::path::{ Path, PathBuf };

use log::{ debug, info };
use serde_json::Value;

use crate::{
  args::{ ArgumentTable, FORGE_VERSION_FLAG, MC_VERSION_FLAG },
  download::Downloader,
  error::{ ConvertError, Result },
  json::{ element, require_array, require_str, Origin },
  reader,
  types::VersionTriple,
};

pub const INSTALLER_VERSION_ENTRY: &str = "version.json";
pub const MODPACK_MANIFEST_ENTRY: &str = "manifest.json";
pub const FORGE_LOADER_PREFIX: &str = "forge-";
pub const FORGE_INSTALLER_URL: &str =
  "https://files.minecraftforge.net/maven/net/minecraftforge/forge/{mcVersion}-{forgeVersion}/forge-{mcVersion}-{forgeVersion}-installer.jar";
const INSTALLER_SUFFIX: &str = "-installer.jar";

/// An installer whose versions are known.
#[derive(Debug, Clone)]
pub struct ResolvedInstaller {
  pub path: PathBuf,
  pub document: Value,
  pub arguments: ArgumentTable,
  pub versions: VersionTriple,
  pub instance_name: String,
}

/// The loader a modpack manifest asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModpackTarget {
  pub minecraft_version: String,
  pub forge_version: String,
  pub name: String,
  pub version: String,
}

impl ModpackTarget {
  pub fn from_manifest(manifest: &Value, path: &Path) -> Result<Self> {
    let origin = Origin::Document(MODPACK_MANIFEST_ENTRY);
    let minecraft = element(manifest, "minecraft");
    let minecraft_version = require_str(minecraft, "version", origin)?.to_string();

    let mut forge_version = None;
    for loader in require_array(minecraft, "modLoaders", origin)? {
      let id = require_str(loader, "id", origin)?;
      if let Some(version) = id.strip_prefix(FORGE_LOADER_PREFIX) {
        forge_version = Some(version.to_string());
        break;
      }
    }
    let forge_version = forge_version.ok_or_else(|| ConvertError::UnresolvableModpack {
      path: path.to_path_buf(),
      prefix: FORGE_LOADER_PREFIX,
    })?;

    Ok(Self {
      minecraft_version,
      forge_version,
      name: require_str(manifest, "name", origin)?.to_string(),
      version: require_str(manifest, "version", origin)?.to_string(),
    })
  }

  pub fn installer_url(&self) -> String {
    installer_url(&self.minecraft_version, &self.forge_version)
  }

  /// `{name}-{version}-installer.jar`
  pub fn installer_file_name(&self) -> String {
    format!("{}-{}{INSTALLER_SUFFIX}", self.name, self.version)
  }
}

pub fn installer_url(minecraft_version: &str, forge_version: &str) -> String {
  FORGE_INSTALLER_URL.replace("{mcVersion}", minecraft_version).replace("{forgeVersion}", forge_version)
}

/// Reads the Minecraft and Forge versions out of an installer's `arguments.game`.
pub fn versions_from(arguments: &ArgumentTable) -> Result<VersionTriple> {
  let minecraft_version = arguments.require(MC_VERSION_FLAG)?;
  let forge_version = arguments.require(FORGE_VERSION_FLAG)?;
  Ok(VersionTriple::new(minecraft_version, forge_version))
}

/// Direct mode: the instance is named after the full Forge version.
pub fn resolve_installer(path: impl AsRef<Path>) -> Result<ResolvedInstaller> {
  let mut installer = load_installer(path.as_ref())?;
  installer.instance_name = installer.versions.full_version.clone();
  Ok(installer)
}

/// Manifest mode: downloads the matching installer into `temp_dir`. The
/// instance is named after the downloaded file, minus `-installer.jar`.
pub fn resolve_modpack(
  modpack: impl AsRef<Path>,
  temp_dir: impl AsRef<Path>,
  downloader: &mut dyn Downloader,
) -> Result<ResolvedInstaller> {
  let modpack = modpack.as_ref();
  let manifest = reader::read_json(modpack, MODPACK_MANIFEST_ENTRY)?;
  let target = ModpackTarget::from_manifest(&manifest, modpack)?;
  info!(
    "Modpack {} {} targets Minecraft {} with Forge {}",
    target.name,
    target.version,
    target.minecraft_version,
    target.forge_version
  );

  let file_name = target.installer_file_name();
  let installer_path = temp_dir.as_ref().join(&file_name);
  downloader.download(&target.installer_url(), &installer_path)?;

  let mut installer = load_installer(&installer_path)?;
  installer.instance_name = file_name.strip_suffix(INSTALLER_SUFFIX).unwrap_or(&file_name).to_string();
  Ok(installer)
}

fn load_installer(path: &Path) -> Result<ResolvedInstaller> {
  let document = reader::read_json(path, INSTALLER_VERSION_ENTRY)?;
  let arguments = ArgumentTable::from_installer(&document);
  let versions = versions_from(&arguments)?;
  debug!("Installer {} is {}", path.display(), versions.full_version);
  Ok(ResolvedInstaller {
    path: path.to_path_buf(),
    document,
    arguments,
    instance_name: String::new(),
    versions,
  })
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn finds_versions_among_other_flags() {
    let arguments = ArgumentTable::from(
      ["--launchTarget", "fmlclient", "--fml.forgeVersion", "47.2.0", "--fml.mcVersion", "1.20.1", "--fml.mcpVersion", "20230612.114412"]
        .map(String::from)
        .to_vec(),
    );
    assert_eq!(versions_from(&arguments).unwrap(), VersionTriple::new("1.20.1", "47.2.0"));
  }

  #[test]
  fn missing_flag_fails() {
    let arguments = ArgumentTable::from(vec!["--fml.mcVersion".to_string(), "1.20.1".to_string()]);
    assert!(matches!(versions_from(&arguments), Err(ConvertError::MissingArgument { .. })));
  }

  #[test]
  fn reads_modpack_target() {
    let manifest = json!({
      "minecraft": {
        "version": "1.19.2",
        "modLoaders": [{ "id": "fabric-0.14.0" }, { "id": "forge-43.2.0", "primary": true }]
      },
      "name": "MyPack",
      "version": "1.0"
    });
    let target = ModpackTarget::from_manifest(&manifest, Path::new("pack.zip")).unwrap();
    assert_eq!(target.forge_version, "43.2.0");
    assert_eq!(target.installer_file_name(), "MyPack-1.0-installer.jar");
    assert_eq!(
      target.installer_url(),
      "https://files.minecraftforge.net/maven/net/minecraftforge/forge/1.19.2-43.2.0/forge-1.19.2-43.2.0-installer.jar"
    );
  }

  #[test]
  fn modpack_without_forge_is_unresolvable() {
    let manifest = json!({
      "minecraft": { "version": "1.19.2", "modLoaders": [{ "id": "fabric-0.14.0" }] },
      "name": "MyPack",
      "version": "1.0"
    });
    let err = ModpackTarget::from_manifest(&manifest, Path::new("pack.zip")).unwrap_err();
    assert!(matches!(err, ConvertError::UnresolvableModpack { prefix: FORGE_LOADER_PREFIX, .. }));
  }

  #[test]
  fn modpack_without_minecraft_is_malformed() {
    let err = ModpackTarget::from_manifest(&json!({ "name": "MyPack" }), Path::new("pack.zip")).unwrap_err();
    assert!(matches!(err, ConvertError::MalformedDocument { .. }));
  }
}
