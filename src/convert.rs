use std::{
  env,
  fs::{ self, create_dir_all },
  path::{ Path, PathBuf },
};

use log::{ debug, info };

use crate::{
  download::Downloader,
  error::{ ConvertError, Result },
  reader::ArchiveReader,
  resolve::{ resolve_installer, resolve_modpack },
  template::{ self, instance, patch },
  types::{ ConvertOptions, Conversion, InstallerSource },
};

pub const PACK_FILE: &str = "mmc-pack.json";
pub const INSTANCE_CONFIG_FILE: &str = "instance.cfg";
pub const PATCH_FILE: &str = "net.minecraftforge.json";
pub const MINECRAFT_DIR: &str = ".minecraft";
pub const WRAPPER_DIR: &str = ".forgewrapper";

/*
  Instance layout:
  <instance>/
    - mmc-pack.json
    - instance.cfg
    - libraries/<wrapper>
    - patches/net.minecraftforge.json
    - .minecraft/
      - .forgewrapper/forge-<mc>-<forge>-installer.jar
      - ...                  // modpack entries, if any
*/

/// Builds a MultiMC instance under `options.target_dir`.
///
/// Nothing is written until the versions are resolved and both documents are
/// built. A failure after that leaves whatever was already written in place.
pub fn convert(options: &ConvertOptions, downloader: &mut dyn Downloader) -> Result<Conversion> {
  let modpack = options.source.modpack();
  let installer = match &options.source {
    InstallerSource::Installer(path) => resolve_installer(path)?,
    InstallerSource::Modpack(path) => {
      let temp_dir = options.temp_dir.clone().unwrap_or_else(env::temp_dir);
      resolve_modpack(path, temp_dir, downloader)?
    }
  };
  let versions = &installer.versions;
  info!("Converting {} into instance '{}'", versions.full_version, installer.instance_name);

  let pack = instance::build(versions)?;
  let patch = patch::build(&installer.document, versions, modpack.is_some())?;
  let wrapper_source = match &options.wrapper_path {
    Some(path) => path.clone(),
    None => env::current_exe().map_err(ConvertError::io("<current executable>"))?,
  };

  let instance_dir = options.target_dir.join(&installer.instance_name);
  let libraries_dir = instance_dir.join("libraries");
  let patches_dir = instance_dir.join("patches");
  let minecraft_dir = instance_dir.join(MINECRAFT_DIR);
  let wrapper_dir = minecraft_dir.join(WRAPPER_DIR);
  for dir in [&instance_dir, &libraries_dir, &patches_dir, &wrapper_dir] {
    create_dir_all(dir).map_err(ConvertError::io(dir))?;
  }

  write(instance_dir.join(PACK_FILE), template::to_bytes(&pack)?)?;
  write(instance_dir.join(INSTANCE_CONFIG_FILE), instance_config(&installer.instance_name))?;
  copy(&wrapper_source, libraries_dir.join(patch.wrapper.file_name()))?;
  write(patches_dir.join(PATCH_FILE), template::to_bytes(&patch.document)?)?;
  copy(&installer.path, wrapper_dir.join(versions.installer_file_name()))?;

  if let Some(modpack) = modpack {
    info!("Extracting modpack {} into {}", modpack.display(), minecraft_dir.display());
    let extracted = ArchiveReader::open(modpack)?.extract_all(&minecraft_dir)?;
    debug!("Extracted {extracted} modpack files");
  }

  info!("Instance written to {}", instance_dir.display());
  Ok(Conversion {
    versions: installer.versions.clone(),
    instance_name: installer.instance_name.clone(),
    instance_dir,
    wrapper: patch.wrapper,
  })
}

pub fn instance_config(instance_name: &str) -> String {
  format!("InstanceType=OneSix\nname={instance_name}")
}

fn write(path: PathBuf, contents: impl AsRef<[u8]>) -> Result<()> {
  debug!("Writing {}", path.display());
  fs::write(&path, contents).map_err(ConvertError::io(path))
}

/// Copies `from` over `to`. Copying a file onto itself is a no-op.
fn copy(from: &Path, to: PathBuf) -> Result<()> {
  if let (Ok(a), Ok(b)) = (fs::canonicalize(from), fs::canonicalize(&to)) {
    if a == b {
      return Ok(());
    }
  }
  debug!("Copying {} to {}", from.display(), to.display());
  fs::copy(from, &to).map_err(ConvertError::io(from))?;
  Ok(())
}
