use std::path::Path;

use crate::error::Result;

/// Fetches `url` into `destination`, replacing whatever is there.
pub trait Downloader {
  fn download(&mut self, url: &str, destination: &Path) -> Result<()>;
}

impl<F: FnMut(&str, &Path) -> Result<()>> Downloader for F {
  fn download(&mut self, url: &str, destination: &Path) -> Result<()> {
    self(url, destination)
  }
}

#[cfg(feature = "download")]
pub use self::http::HttpDownloader;

#[cfg(feature = "download")]
mod http {
  use std::{ fs::{ create_dir_all, File }, io::copy, path::Path };

  use log::{ debug, info };

  use super::Downloader;
  use crate::error::{ ConvertError, Result, StdError };

  /// Blocking HTTP downloader. No retries, no timeout beyond the agent defaults.
  #[derive(Debug, Default, Clone, Copy)]
  pub struct HttpDownloader;

  impl Downloader for HttpDownloader {
    fn download(&mut self, url: &str, destination: &Path) -> Result<()> {
      info!("Downloading {url} to {}", destination.display());
      let failed = |source: StdError| ConvertError::Download {
        url: url.to_string(),
        source,
      };

      if let Some(parent) = destination.parent() {
        create_dir_all(parent).map_err(ConvertError::io(parent))?;
      }
      let response = ureq::get(url).call().map_err(|e| failed(Box::new(e)))?;
      let mut body = response.into_body().into_reader();
      let mut file = File::create(destination).map_err(ConvertError::io(destination))?;
      let size = copy(&mut body, &mut file).map_err(|e| failed(Box::new(e)))?;
      debug!("Downloaded {size} bytes from {url}");
      Ok(())
    }
  }
}
