use std::{ io, path::PathBuf };

use zip::result::ZipError;

pub type StdError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
  #[error("The archive {} is invalid: entry '{entry}' not found", path.display())]
  InvalidArchive {
    path: PathBuf,
    entry: String,
  },
  #[error("Error opening archive {}: {source}", path.display())]
  Archive {
    path: PathBuf,
    source: ZipError,
  },
  #[error("Error parsing '{entry}' in {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    entry: String,
    source: serde_json::Error,
  },
  #[error("Malformed document {document}: {reason}")]
  MalformedDocument {
    document: String,
    reason: String,
  },
  #[error("Malformed template {template}: {reason}")]
  MalformedTemplate {
    template: &'static str,
    reason: String,
  },
  #[error("Missing required argument '{flag}'")]
  MissingArgument {
    flag: String,
  },
  #[error("The modpack {} is invalid: no mod loader starting with '{prefix}'", path.display())]
  UnresolvableModpack {
    path: PathBuf,
    prefix: &'static str,
  },
  #[error("Download from {url} failed: {source}")]
  Download {
    url: String,
    source: StdError,
  },
  #[error("IO error at {}: {source}", path.display())]
  Io {
    path: PathBuf,
    source: io::Error,
  },
  #[error("Error serializing document: {0}")]
  Serialize(#[from] serde_json::Error),
}

impl ConvertError {
  pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
    let path = path.into();
    move |source| ConvertError::Io { path, source }
  }

  pub(crate) fn malformed(document: impl Into<String>, reason: impl Into<String>) -> Self {
    ConvertError::MalformedDocument { document: document.into(), reason: reason.into() }
  }
}
