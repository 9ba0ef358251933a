//! Entry names that passed the path-containment check.

use crate::Result;
use crate::StarterError;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use super::DestDir;

/// A relative path that resolves inside a [`DestDir`].
///
/// `SafePath` can ONLY be constructed through [`SafePath::validate`]; there
/// is no `From<PathBuf>`. Holding one means:
/// - the name was normalized lexically (`.` dropped, `name/..` collapsed)
///   without climbing above the destination root,
/// - it is neither absolute nor prefixed by a root or drive,
/// - it is not the destination root itself,
/// - the nearest existing ancestor of the joined path canonicalizes inside
///   the destination, so a symlink already on disk cannot redirect writes.
///
/// # Examples
///
/// ```no_run
/// use starter_core::types::DestDir;
/// use starter_core::types::SafePath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::create("/tmp/myapp")?;
///
/// let safe = SafePath::validate("cmd/main.go", &dest)?;
/// assert_eq!(safe.as_path(), std::path::Path::new("cmd/main.go"));
///
/// assert!(SafePath::validate("../evil", &dest).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath(PathBuf);

impl SafePath {
    /// Validates an archive entry name (with the root prefix already
    /// stripped) against `dest`.
    ///
    /// # Errors
    ///
    /// Returns `IllegalPath` carrying the would-be destination path when the
    /// name escapes or equals the root, and `Io` if an existing ancestor
    /// cannot be inspected.
    pub fn validate(name: &str, dest: &DestDir) -> Result<Self> {
        let illegal = || StarterError::IllegalPath {
            path: dest.join_path(Path::new(name)),
        };

        if name.contains('\0') {
            return Err(illegal());
        }

        let mut normalized = PathBuf::new();
        for component in Path::new(name).components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if !normalized.pop() {
                        return Err(illegal());
                    }
                }
                Component::RootDir | Component::Prefix(_) => return Err(illegal()),
            }
        }

        if normalized.as_os_str().is_empty() {
            return Err(illegal());
        }

        let resolved = dest.as_path().join(&normalized);
        if !resolved.starts_with(dest.as_path()) {
            return Err(illegal());
        }

        check_existing_ancestor(&resolved, dest).map_err(|err| match err {
            StarterError::IllegalPath { .. } => illegal(),
            other => other,
        })?;

        Ok(Self(normalized))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

/// Canonicalizes the deepest existing ancestor of `resolved` (itself
/// included) and requires it to stay under `dest`.
fn check_existing_ancestor(resolved: &Path, dest: &DestDir) -> Result<()> {
    for ancestor in resolved.ancestors() {
        match ancestor.canonicalize() {
            Ok(canonical) => {
                if canonical.starts_with(dest.as_path()) {
                    return Ok(());
                }
                return Err(StarterError::IllegalPath {
                    path: resolved.to_path_buf(),
                });
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // A dangling symlink would be followed on create.
                if std::fs::symlink_metadata(ancestor).is_ok() {
                    return Err(StarterError::IllegalPath {
                        path: resolved.to_path_buf(),
                    });
                }
            }
            Err(e) => {
                return Err(StarterError::Io(std::io::Error::new(
                    e.kind(),
                    format!("failed to canonicalize {}: {e}", ancestor.display()),
                )));
            }
        }
    }
    Ok(())
}
