//! Helpers for building template archives in tests.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;
use std::path::Path;

use zip::write::SimpleFileOptions;

/// Builder for in-memory ZIP archives shaped like repository snapshots.
///
/// # Examples
///
/// ```
/// use starter_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_directory("proj-main/")
///     .add_file("proj-main/README.md", b"# TEMPLATE")
///     .build();
/// assert!(!zip_data.is_empty());
/// ```
pub struct ZipTestBuilder {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a deflate-compressed file with mode 0o644.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_file_with_mode(path, data, 0o644)
    }

    /// Adds a deflate-compressed file with a custom mode.
    #[must_use]
    pub fn add_file_with_mode(mut self, path: &str, data: &[u8], mode: u32) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .unix_permissions(mode);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a stored (uncompressed) file with mode 0o644.
    #[must_use]
    pub fn add_stored_file(mut self, path: &str, data: &[u8]) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .unix_permissions(0o644);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory record.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    /// Adds a symlink record pointing at `target`.
    #[must_use]
    pub fn add_symlink(mut self, path: &str, target: &str) -> Self {
        let options = SimpleFileOptions::default();
        self.zip.add_symlink(path, target, options).unwrap();
        self
    }

    /// Finishes the archive and returns its bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }

    /// Finishes the archive and writes it to `path`.
    pub fn write_to(self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, self.build()).unwrap();
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns a small gostarter-style snapshot used across tests.
///
/// Layout under `gostarter-master/`: a README, a `go.mod`, a Go source file
/// with every token flavor, a binary file and an empty directory.
#[must_use]
pub fn sample_template() -> Vec<u8> {
    ZipTestBuilder::new()
        .add_directory("gostarter-master/")
        .add_file(
            "gostarter-master/README.md",
            b"# gostarter\n\nSet GOSTARTER_PORT to change the port.\n",
        )
        .add_file(
            "gostarter-master/go.mod",
            b"module github.com/bingoohuang/gostarter\n\ngo 1.21\n",
        )
        .add_directory("gostarter-master/cmd/")
        .add_file(
            "gostarter-master/cmd/main.go",
            b"package main\n\nimport \"github.com/bingoohuang/gostarter/pkg\"\n\nconst env = \"GOSTARTER_HOME\"\n",
        )
        .add_file_with_mode("gostarter-master/bin/tool", SAMPLE_BINARY, 0o755)
        .add_file("gostarter-master/assets/logo.png", b"gostarter logo bytes")
        .add_directory("gostarter-master/empty/")
        .build()
}

/// Binary payload stored under `bin/tool` in [`sample_template`].
pub const SAMPLE_BINARY: &[u8] = &[0x7f, b'E', b'L', b'F', 0, 0xff, 0xfe, b'g', b'o'];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_builder() {
        let zip_data = ZipTestBuilder::new()
            .add_file("file.txt", b"content")
            .add_stored_file("raw.txt", b"raw")
            .add_directory("dir/")
            .add_symlink("link", "file.txt")
            .build();
        let archive = zip::ZipArchive::new(Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.len(), 4);
    }

    #[test]
    fn test_sample_template_has_single_root() {
        let archive = zip::ZipArchive::new(Cursor::new(sample_template())).unwrap();
        assert!(
            archive
                .file_names()
                .all(|name| name.starts_with("gostarter-master/"))
        );
    }
}
