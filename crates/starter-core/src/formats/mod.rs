//! Template archive formats.

pub mod common;
pub mod zip;

pub use self::zip::ZipExtractor;
