//! Archive entry type enumeration.

/// File-type bits of a unix mode.
const S_IFMT: u32 = 0o170_000;
/// Symbolic link file type.
const S_IFLNK: u32 = 0o120_000;
/// Directory file type.
const S_IFDIR: u32 = 0o040_000;

/// Type of an entry in a template archive.
///
/// # Examples
///
/// ```
/// use starter_core::types::EntryType;
///
/// assert_eq!(EntryType::classify("cmd/", None), EntryType::Directory);
/// assert_eq!(EntryType::classify("README.md", Some(0o100_644)), EntryType::File);
/// assert_eq!(EntryType::classify("latest", Some(0o120_777)), EntryType::Symlink);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// Regular file entry.
    File,

    /// Directory entry.
    Directory,

    /// Symbolic link entry. Never materialized by the extractor.
    Symlink,
}

impl EntryType {
    /// Classifies an entry from its name and optional unix mode.
    ///
    /// A trailing `/` or a directory mode marks a directory, the symlink
    /// file type marks a symlink, anything else is a regular file.
    #[must_use]
    pub fn classify(name: &str, unix_mode: Option<u32>) -> Self {
        let file_type = unix_mode.map(|mode| mode & S_IFMT);
        if name.ends_with('/') || file_type == Some(S_IFDIR) {
            Self::Directory
        } else if file_type == Some(S_IFLNK) {
            Self::Symlink
        } else {
            Self::File
        }
    }

    /// Returns `true` if this is a regular file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Returns `true` if this is a symlink.
    #[must_use]
    pub const fn is_symlink(&self) -> bool {
        matches!(self, Self::Symlink)
    }
}
