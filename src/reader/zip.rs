use std::{
  fs::{ create_dir_all, File },
  io::{ copy, Read, Seek },
  path::{ Path, PathBuf },
};

use log::debug;
use path_clean::clean;
use serde_json::Value;
use zip::{ result::ZipError, ZipArchive };

use crate::error::{ ConvertError, Result };

pub struct ArchiveReader<T: Read + Seek> {
  archive: ZipArchive<T>,
  path: PathBuf,
}

impl ArchiveReader<File> {
  pub fn open(file_path: impl AsRef<Path>) -> Result<Self> {
    let path = file_path.as_ref().to_path_buf();
    let file = File::open(&path).map_err(ConvertError::io(&path))?;
    Self::new(file, path)
  }
}

impl<T: Read + Seek> ArchiveReader<T> {
  /// Wraps an already opened archive; `path` is only used to identify it in errors.
  pub fn new(reader: T, path: impl Into<PathBuf>) -> Result<Self> {
    let path = path.into();
    match ZipArchive::new(reader) {
      Ok(archive) => Ok(Self { archive, path }),
      Err(source) => Err(ConvertError::Archive { path, source }),
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Parses the entry named exactly `entry` as a UTF-8 JSON document.
  pub fn read_json(&mut self, entry: &str) -> Result<Value> {
    let file = match self.archive.by_name(entry) {
      Ok(file) => file,
      Err(ZipError::FileNotFound) => {
        return Err(ConvertError::InvalidArchive { path: self.path.clone(), entry: entry.to_string() });
      }
      Err(source) => return Err(ConvertError::Archive { path: self.path.clone(), source }),
    };
    serde_json::from_reader(file).map_err(|source| ConvertError::Parse {
      path: self.path.clone(),
      entry: entry.to_string(),
      source,
    })
  }

  /// Extracts every entry below `target`, replacing files that already exist.
  /// Returns the number of files written.
  pub fn extract_all(&mut self, target: impl AsRef<Path>) -> Result<usize> {
    let target = clean(target.as_ref());
    let mut extracted = 0;

    for i in 0..self.archive.len() {
      let mut file = self.archive.by_index(i).map_err(|source| ConvertError::Archive {
        path: self.path.clone(),
        source,
      })?;
      let relative = clean_zip_path(file.name()).map_err(|_| ConvertError::InvalidArchive {
        path: self.path.clone(),
        entry: file.name().to_string(),
      })?;
      if relative.is_empty() {
        continue;
      }

      let target_path = target.join(relative.trim_end_matches('/'));
      if file.is_dir() {
        create_dir_all(&target_path).map_err(ConvertError::io(&target_path))?;
        continue;
      }
      if let Some(parent) = target_path.parent() {
        create_dir_all(parent).map_err(ConvertError::io(parent))?;
      }
      debug!("Extracting {} to {}", file.name(), target_path.display());
      let mut target_file = File::create(&target_path).map_err(ConvertError::io(&target_path))?;
      copy(&mut file, &mut target_file).map_err(ConvertError::io(&target_path))?;
      extracted += 1;
    }
    Ok(extracted)
  }
}

/// Opens `path`, parses `entry` and closes the archive again.
pub fn read_json(path: impl AsRef<Path>, entry: &str) -> Result<Value> {
  ArchiveReader::open(path)?.read_json(entry)
}

/// Normalizes a zip entry name to forward slashes without `.` segments,
/// refusing names that climb out of the archive root.
fn clean_zip_path<T: AsRef<str>>(path: T) -> std::result::Result<String, String> {
  let path = path.as_ref().replace('\\', "/");

  let mut out = vec![];
  for part in path.split('/') {
    if part.is_empty() || part == "." {
      continue;
    }
    if part == ".." {
      if out.pop().is_none() {
        return Err("Path out of bounds!".into());
      }
    } else {
      out.push(part);
    }
  }
  let mut out_path = out.join("/");
  if path.ends_with('/') && !out_path.is_empty() {
    out_path.push('/');
  }
  Ok(out_path)
}

#[cfg(test)]
mod tests {
  use std::io::{ Cursor, Write };

  use zip::{ write::FileOptions, ZipWriter };

  use super::*;

  fn archive(entries: &[(&str, &str)]) -> ArchiveReader<Cursor<Vec<u8>>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
      if name.ends_with('/') {
        writer.add_directory(*name, FileOptions::default()).unwrap();
      } else {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
      }
    }
    let cursor = writer.finish().unwrap();
    ArchiveReader::new(Cursor::new(cursor.into_inner()), "test.zip").unwrap()
  }

  #[test]
  fn reads_named_entry() {
    let mut reader = archive(&[("version.json", r#"{"id":"forge"}"#)]);
    assert_eq!(reader.read_json("version.json").unwrap()["id"], "forge");
  }

  #[test]
  fn missing_entry_is_invalid_archive() {
    let mut reader = archive(&[("install_profile.json", "{}")]);
    let err = reader.read_json("version.json").unwrap_err();
    assert!(matches!(err, ConvertError::InvalidArchive { ref path, ref entry }
      if path == Path::new("test.zip") && entry == "version.json"));
  }

  #[test]
  fn broken_json_is_a_parse_error() {
    let mut reader = archive(&[("version.json", "{ not json")]);
    assert!(matches!(reader.read_json("version.json"), Err(ConvertError::Parse { .. })));
  }

  #[test]
  fn not_a_zip_is_an_archive_error() {
    let result = ArchiveReader::new(Cursor::new(b"plain text".to_vec()), "plain.txt");
    assert!(matches!(result, Err(ConvertError::Archive { .. })));
  }

  #[test]
  fn extracts_nested_entries_and_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("config")).unwrap();
    std::fs::write(dir.path().join("config/a.toml"), "old contents that are longer").unwrap();

    let mut reader = archive(&[
      ("manifest.json", "{}"),
      ("overrides/", ""),
      ("overrides/mods/a.jar", "jar"),
      ("config/a.toml", "new"),
    ]);
    assert_eq!(reader.extract_all(dir.path()).unwrap(), 3);
    assert!(dir.path().join("overrides").is_dir());
    assert_eq!(std::fs::read_to_string(dir.path().join("overrides/mods/a.jar")).unwrap(), "jar");
    assert_eq!(std::fs::read_to_string(dir.path().join("config/a.toml")).unwrap(), "new");
  }

  #[test]
  fn refuses_entries_outside_target() {
    let dir = tempfile::tempdir().unwrap();
    let mut reader = archive(&[("../escape.txt", "nope")]);
    assert!(matches!(reader.extract_all(dir.path().join("inner")), Err(ConvertError::InvalidArchive { .. })));
    assert!(!dir.path().join("escape.txt").exists());
  }

  #[test]
  fn cleans_zip_paths() {
    assert_eq!(clean_zip_path("a/./b//c.txt").unwrap(), "a/b/c.txt");
    assert_eq!(clean_zip_path("a\\b\\").unwrap(), "a/b/");
    assert_eq!(clean_zip_path("a/../b").unwrap(), "b");
    assert!(clean_zip_path("../b").is_err());
  }
}
