//! Filesystem writers shared by the extractor.
//!
//! Both helpers take a [`SafePath`], so nothing reaches the disk without
//! passing the containment check first.

use std::fs::File;
use std::fs::create_dir_all;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;

use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::types::DestDir;
use crate::types::SafePath;

/// Mode applied to files whose archive record carries no unix permissions.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Writes one file entry and returns the number of bytes written.
///
/// Parent directories are created as needed and an existing file is
/// truncated. The output is buffered (64KB) and flushed before returning;
/// the file handle is closed when this function returns, on success and on
/// error alike.
///
/// On Unix the permission bits of `mode` (or [`DEFAULT_FILE_MODE`]) are
/// applied after the content is written.
///
/// # Errors
///
/// Returns an error if directory creation, file creation, the copy, or the
/// permission update fails.
pub fn write_file<R: Read>(
    reader: &mut R,
    safe_path: &SafePath,
    dest: &DestDir,
    mode: Option<u32>,
    copy_buffer: &mut CopyBuffer,
) -> Result<u64> {
    let output_path = dest.join(safe_path);

    if let Some(parent) = output_path.parent() {
        create_dir_all(parent)?;
    }

    let output_file = File::create(&output_path)?;
    let mut buffered_writer = BufWriter::with_capacity(64 * 1024, output_file);
    let bytes_written = copy_with_buffer(reader, &mut buffered_writer, copy_buffer)?;
    buffered_writer.flush()?;
    drop(buffered_writer);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions =
            std::fs::Permissions::from_mode(mode.map_or(DEFAULT_FILE_MODE, |m| m & 0o777));
        std::fs::set_permissions(&output_path, permissions)?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    Ok(bytes_written)
}

/// Creates a directory entry (and its parents).
///
/// Idempotent: an existing directory is not an error. Directory modes from
/// the archive are not applied, so a read-only directory record cannot block
/// the files that follow it.
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub fn create_directory(safe_path: &SafePath, dest: &DestDir) -> Result<()> {
    create_dir_all(dest.join(safe_path))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn create_test_dest() -> (TempDir, DestDir) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let dest = DestDir::new(temp.path().to_path_buf()).expect("failed to create dest");
        (temp, dest)
    }

    #[test]
    fn test_write_file_creates_parents() {
        let (_temp, dest) = create_test_dest();
        let safe = SafePath::validate("a/b/c.txt", &dest).unwrap();

        let written = write_file(
            &mut Cursor::new(b"hello"),
            &safe,
            &dest,
            None,
            &mut CopyBuffer::new(),
        )
        .unwrap();

        assert_eq!(written, 5);
        assert_eq!(std::fs::read(dest.join(&safe)).unwrap(), b"hello");
    }

    #[test]
    fn test_write_file_truncates_existing() {
        let (_temp, dest) = create_test_dest();
        let safe = SafePath::validate("file.txt", &dest).unwrap();
        std::fs::write(dest.join(&safe), b"a much longer previous content").unwrap();

        write_file(
            &mut Cursor::new(b"new"),
            &safe,
            &dest,
            None,
            &mut CopyBuffer::new(),
        )
        .unwrap();

        assert_eq!(std::fs::read(dest.join(&safe)).unwrap(), b"new");
    }

    #[test]
    #[cfg(unix)]
    fn test_write_file_applies_mode() {
        use std::os::unix::fs::PermissionsExt;

        let (_temp, dest) = create_test_dest();
        let exec = SafePath::validate("bin/run.sh", &dest).unwrap();
        let plain = SafePath::validate("notes.txt", &dest).unwrap();
        let mut buffer = CopyBuffer::new();

        write_file(&mut Cursor::new(b"#!/bin/sh"), &exec, &dest, Some(0o100_755), &mut buffer)
            .unwrap();
        write_file(&mut Cursor::new(b"x"), &plain, &dest, None, &mut buffer).unwrap();

        let mode = |p: &SafePath| {
            std::fs::metadata(dest.join(p)).unwrap().permissions().mode() & 0o777
        };
        assert_eq!(mode(&exec), 0o755);
        assert_eq!(mode(&plain), 0o644);
    }

    #[test]
    fn test_create_directory_idempotent() {
        let (_temp, dest) = create_test_dest();
        let safe = SafePath::validate("cmd/server", &dest).unwrap();

        create_directory(&safe, &dest).unwrap();
        create_directory(&safe, &dest).unwrap();

        assert!(dest.join(&safe).is_dir());
    }
}
