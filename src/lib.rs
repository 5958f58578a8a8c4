//! Turns a Forge installer, or a CurseForge modpack that names one, into a
//! MultiMC instance that launches Forge through ForgeWrapper.

pub mod args;
pub mod convert;
pub mod download;
pub mod error;
pub mod json;
pub mod reader;
pub mod resolve;
pub mod template;
pub mod types;

pub use args::extra_args;
pub use convert::convert;
#[cfg(feature = "download")]
pub use download::HttpDownloader;
pub use download::Downloader;
pub use error::{ ConvertError, Result };
pub use types::{ ConvertOptions, Conversion, InstallerSource, VersionTriple, WrapperIdentity };
