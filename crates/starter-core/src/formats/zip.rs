//! ZIP template extraction.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::path::Path;
use std::time::Instant;

use tracing::debug;
use tracing::trace;

use crate::Interceptor;
use crate::Result;
use crate::ScaffoldReport;
use crate::StarterError;
use crate::config::RootPrefix;
use crate::copy::CopyBuffer;
use crate::report::ProgressCallback;
use crate::types::DestDir;
use crate::types::EntryType;
use crate::types::SafePath;

use super::common::create_directory;
use super::common::write_file;

/// Extracts a repository-snapshot zip into a destination directory.
///
/// Entries are processed in central-directory order. For each one the root
/// prefix is stripped, the remaining name goes through [`SafePath`]
/// validation, and files either stream straight to disk or, when the
/// interceptor matches their name, are read whole, rewritten and written.
/// The first error aborts the extraction; files already written stay.
///
/// # Examples
///
/// ```no_run
/// use starter_core::Interceptor;
/// use starter_core::NoopProgress;
/// use starter_core::config::RootPrefix;
/// use starter_core::config::TemplateConfig;
/// use starter_core::formats::ZipExtractor;
/// use starter_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut extractor = ZipExtractor::open("master.zip")?;
/// let dest = DestDir::create("/tmp/myapp")?;
/// let interceptor = Interceptor::for_package(&TemplateConfig::default(), "myapp");
///
/// let report = extractor.extract(
///     &dest,
///     &RootPrefix::fixed("gostarter-master"),
///     &interceptor,
///     &mut NoopProgress,
/// )?;
/// println!("{} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ZipExtractor<R> {
    archive: zip::ZipArchive<R>,
}

impl ZipExtractor<BufReader<File>> {
    /// Opens the archive at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be opened and `InvalidArchive` if it
    /// is not a zip archive.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> ZipExtractor<R> {
    /// Wraps an already-open reader.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArchive` if the reader does not contain a zip
    /// archive.
    pub fn new(reader: R) -> Result<Self> {
        let archive = zip::ZipArchive::new(reader).map_err(|e| match e {
            zip::result::ZipError::Io(io) => StarterError::Io(io),
            other => StarterError::InvalidArchive(format!("failed to open ZIP archive: {other}")),
        })?;
        Ok(Self { archive })
    }

    /// Returns the single top-level directory shared by every entry.
    ///
    /// `None` when the archive is empty, an entry sits at the top level, or
    /// entries live under different top-level directories.
    #[must_use]
    pub fn detect_root_prefix(&self) -> Option<String> {
        let mut root: Option<&str> = None;
        for name in self.archive.file_names() {
            let (top, _) = name.split_once('/')?;
            if top.is_empty() {
                return None;
            }
            match root {
                None => root = Some(top),
                Some(existing) if existing == top => {}
                Some(_) => return None,
            }
        }
        root.map(ToString::to_string)
    }

    /// Turns a prefix policy into the concrete prefix for this archive.
    #[must_use]
    pub fn resolve_root_prefix(&self, root_prefix: &RootPrefix) -> Option<String> {
        match root_prefix {
            RootPrefix::Fixed(prefix) => Some(prefix.clone()),
            RootPrefix::Detect => {
                let detected = self.detect_root_prefix();
                debug!(prefix = ?detected, "detected archive root directory");
                detected
            }
            RootPrefix::None => None,
        }
    }

    /// Extracts every entry under `dest`.
    ///
    /// # Errors
    ///
    /// Returns the first failure: `IllegalPath` for an entry escaping
    /// `dest`, `InvalidArchive` for an unreadable record, `Io` for any
    /// filesystem error.
    pub fn extract(
        &mut self,
        dest: &DestDir,
        root_prefix: &RootPrefix,
        interceptor: &Interceptor,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ScaffoldReport> {
        let start = Instant::now();
        let prefix = self.resolve_root_prefix(root_prefix);
        let total = self.archive.len();
        let mut report = ScaffoldReport::new();
        let mut copy_buffer = CopyBuffer::new();

        for index in 0..total {
            let mut entry = self.archive.by_index(index)?;

            let raw_name = entry.name().to_string();
            let name = strip_root(&raw_name, prefix.as_deref());
            if name.is_empty() {
                continue;
            }

            let safe_path = SafePath::validate(name, dest)?;
            let mode = entry.unix_mode();
            progress.on_entry_start(safe_path.as_path(), total, index + 1);

            match EntryType::classify(name, mode) {
                EntryType::Directory => {
                    trace!(path = %safe_path.as_path().display(), "creating directory");
                    create_directory(&safe_path, dest)?;
                    report.directories_created += 1;
                }
                EntryType::Symlink => {
                    debug!(entry = %raw_name, "skipping symlink entry");
                    report.entries_skipped += 1;
                    report.add_warning(format!("symlink not extracted: {name}"));
                }
                EntryType::File => {
                    let bytes = if interceptor.matches(name) {
                        trace!(path = %safe_path.as_path().display(), "rewriting file");
                        let mut content = Vec::new();
                        entry.read_to_end(&mut content)?;
                        let rewritten = interceptor.intercept(&content);
                        report.files_rewritten += 1;
                        write_file(
                            &mut rewritten.as_slice(),
                            &safe_path,
                            dest,
                            mode,
                            &mut copy_buffer,
                        )?
                    } else {
                        trace!(path = %safe_path.as_path().display(), "copying file");
                        write_file(&mut entry, &safe_path, dest, mode, &mut copy_buffer)?
                    };
                    report.files_extracted += 1;
                    report.bytes_written += bytes;
                    progress.on_bytes_written(bytes);
                }
            }

            progress.on_entry_complete(safe_path.as_path());
        }

        report.duration = start.elapsed();
        progress.on_complete();
        Ok(report)
    }
}

/// Removes `prefix/` from the front of `name`.
///
/// Names outside the prefix are returned unchanged; the prefix directory
/// record itself becomes empty.
fn strip_root<'a>(name: &'a str, prefix: Option<&str>) -> &'a str {
    prefix
        .and_then(|p| name.strip_prefix(p))
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(name)
}
