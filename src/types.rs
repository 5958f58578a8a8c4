use std::path::{ Path, PathBuf };

use serde::{ Deserialize, Serialize };

/// The Minecraft and Forge versions an instance is built for.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct VersionTriple {
  pub minecraft_version: String,
  pub forge_version: String,
  pub full_version: String,
}

impl VersionTriple {
  pub fn new(minecraft_version: impl Into<String>, forge_version: impl Into<String>) -> Self {
    let minecraft_version = minecraft_version.into();
    let forge_version = forge_version.into();
    let full_version = format!("forge-{minecraft_version}-{forge_version}");
    Self { minecraft_version, forge_version, full_version }
  }

  /// `net/minecraftforge/forge/{mc}-{forge}/forge-{mc}-{forge}.jar`
  pub fn forge_artifact_path(&self) -> String {
    format!(
      "net/minecraftforge/forge/{mc}-{forge}/forge-{mc}-{forge}.jar",
      mc = self.minecraft_version,
      forge = self.forge_version
    )
  }

  pub fn installer_file_name(&self) -> String {
    format!("{}-installer.jar", self.full_version)
  }
}

/// File name the wrapper archive must have inside `<instance>/libraries`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct WrapperIdentity(pub String);

impl WrapperIdentity {
  pub fn file_name(&self) -> &str {
    &self.0
  }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", content = "path", rename_all = "camelCase")]
pub enum InstallerSource {
  /// A Forge installer jar.
  Installer(PathBuf),
  /// A CurseForge modpack; the installer is downloaded from its manifest.
  Modpack(PathBuf),
}

impl InstallerSource {
  pub fn modpack(&self) -> Option<&Path> {
    match self {
      InstallerSource::Modpack(path) => Some(path),
      InstallerSource::Installer(_) => None,
    }
  }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConvertOptions {
  pub source: InstallerSource,
  pub target_dir: PathBuf,
  /// Archive copied into `<instance>/libraries`; the running executable when unset.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub wrapper_path: Option<PathBuf>,
  /// Where downloaded installers are stored; the system temp dir when unset.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub temp_dir: Option<PathBuf>,
}

impl ConvertOptions {
  pub fn new(source: InstallerSource, target_dir: impl Into<PathBuf>) -> Self {
    Self { source, target_dir: target_dir.into(), wrapper_path: None, temp_dir: None }
  }

  pub fn wrapper_path(mut self, path: impl Into<PathBuf>) -> Self {
    self.wrapper_path = Some(path.into());
    self
  }

  pub fn temp_dir(mut self, path: impl Into<PathBuf>) -> Self {
    self.temp_dir = Some(path.into());
    self
  }
}

/// What a conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
  pub versions: VersionTriple,
  pub instance_name: String,
  pub instance_dir: PathBuf,
  pub wrapper: WrapperIdentity,
}
