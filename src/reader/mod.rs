pub mod zip;

pub use self::zip::{ read_json, ArchiveReader };
