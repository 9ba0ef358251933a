//! Type-safe wrappers used during extraction.
//!
//! A path only reaches the filesystem as a [`SafePath`] joined onto a
//! [`DestDir`], and both can only be obtained through validating
//! constructors.

pub mod dest_dir;
pub mod entry_type;
pub mod safe_path;

pub use dest_dir::DestDir;
pub use entry_type::EntryType;
pub use safe_path::SafePath;
