//! Scaffolding configuration.
//!
//! Everything the pipeline needs is resolved once into a [`ScaffoldConfig`]
//! and passed by reference into the fetch and extract stages. Nothing here is
//! mutated after construction.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::Result;
use crate::StarterError;
use crate::fetch::FetchRequest;

/// Archive URL of the default template repository snapshot.
pub const DEFAULT_TEMPLATE_URL: &str = "https://github.com/bingoohuang/gostarter/archive/master.zip";

/// Top-level directory of the default template archive.
pub const DEFAULT_ROOT_PREFIX: &str = "gostarter-master";

/// How long a cached archive is trusted before a refresh is attempted.
pub const DEFAULT_MAX_CACHE_AGE: Duration = Duration::from_secs(240 * 60 * 60);

/// Cache location relative to the user's home directory.
pub const DEFAULT_CACHE_RELATIVE: &str = ".gostarter/master.zip";

/// How the archive's top-level directory is removed from entry names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootPrefix {
    /// Strip exactly this directory name (a trailing `/` is implied).
    Fixed(String),
    /// Use the single top-level directory shared by every entry, if any.
    Detect,
    /// Keep entry names unchanged.
    None,
}

impl RootPrefix {
    /// Builds a fixed prefix, normalizing away trailing separators.
    ///
    /// An empty string yields [`RootPrefix::None`].
    #[must_use]
    pub fn fixed(prefix: impl AsRef<str>) -> Self {
        let trimmed = prefix.as_ref().trim_end_matches('/');
        if trimmed.is_empty() {
            Self::None
        } else {
            Self::Fixed(trimmed.to_string())
        }
    }
}

/// Describes the template repository: where it lives and which tokens get
/// rewritten.
///
/// # Examples
///
/// ```
/// use starter_core::config::TemplateConfig;
///
/// let template = TemplateConfig::default();
/// assert_eq!(template.name_token, "gostarter");
/// assert!(template.extensions.iter().any(|ext| ext == "go"));
/// ```
#[derive(Debug, Clone)]
pub struct TemplateConfig {
    /// Archive URL.
    pub url: String,

    /// Top-level directory handling.
    pub root_prefix: RootPrefix,

    /// Fully qualified module path of the template, replaced first.
    pub module_path: String,

    /// Bare template name, replaced by the package name.
    pub name_token: String,

    /// Upper-case template name, replaced by the SHOUTY_SNAKE_CASE package
    /// name.
    pub upper_token: String,

    /// File extensions (without the dot) whose content is rewritten.
    pub extensions: Vec<String>,
}

impl Default for TemplateConfig {
    /// The gostarter template.
    ///
    /// Default values:
    /// - `url`: [`DEFAULT_TEMPLATE_URL`]
    /// - `root_prefix`: `Fixed("gostarter-master")`
    /// - `module_path`: `github.com/bingoohuang/gostarter`
    /// - `name_token`: `gostarter`
    /// - `upper_token`: `GOSTARTER`
    /// - `extensions`: `["go", "md", "mod", "html"]`
    fn default() -> Self {
        Self {
            url: DEFAULT_TEMPLATE_URL.to_string(),
            root_prefix: RootPrefix::fixed(DEFAULT_ROOT_PREFIX),
            module_path: "github.com/bingoohuang/gostarter".to_string(),
            name_token: "gostarter".to_string(),
            upper_token: "GOSTARTER".to_string(),
            extensions: vec![
                "go".to_string(),
                "md".to_string(),
                "mod".to_string(),
                "html".to_string(),
            ],
        }
    }
}

impl TemplateConfig {
    /// Points the template at another archive.
    ///
    /// A URL other than the default one cannot rely on the default root
    /// directory name, so the prefix switches to detection.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        if self.url != DEFAULT_TEMPLATE_URL {
            self.root_prefix = RootPrefix::Detect;
        }
        self
    }

    /// Overrides the top-level directory handling.
    #[must_use]
    pub fn with_root_prefix(mut self, root_prefix: RootPrefix) -> Self {
        self.root_prefix = root_prefix;
        self
    }
}

/// Complete configuration for one scaffolding run.
#[derive(Debug, Clone)]
pub struct ScaffoldConfig {
    /// Directory the template is extracted into.
    pub target_dir: PathBuf,

    /// Package name substituted for the template tokens.
    pub package_name: String,

    /// Cache-aware download parameters.
    pub fetch: FetchRequest,

    /// Template description.
    pub template: TemplateConfig,
}

impl ScaffoldConfig {
    /// Creates a configuration for `target_dir` with the default template and
    /// cache policy.
    ///
    /// When `package_name` is `None` the last component of `target_dir` is
    /// used, so `~/src/myapp` scaffolds package `myapp`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if no package name can be derived or the home
    /// directory (needed for the default cache path) is unknown.
    pub fn new(target_dir: impl Into<PathBuf>, package_name: Option<String>) -> Result<Self> {
        let template = TemplateConfig::default();
        let fetch = FetchRequest::new(template.url.clone(), default_cache_path()?);
        Self::from_parts(target_dir, package_name, fetch, template)
    }

    /// Assembles a configuration from already-built parts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the package name is empty or cannot be
    /// derived from `target_dir`.
    pub fn from_parts(
        target_dir: impl Into<PathBuf>,
        package_name: Option<String>,
        fetch: FetchRequest,
        template: TemplateConfig,
    ) -> Result<Self> {
        let target_dir = target_dir.into();
        let package_name = match package_name {
            Some(name) if !name.trim().is_empty() => name,
            Some(_) => {
                return Err(StarterError::InvalidConfig {
                    reason: "package name must not be empty".to_string(),
                });
            }
            None => derive_package_name(&target_dir)?,
        };

        Ok(Self {
            target_dir,
            package_name,
            fetch,
            template,
        })
    }
}

/// Returns `~/.gostarter/master.zip`.
///
/// # Errors
///
/// Returns `InvalidConfig` when the home directory cannot be determined.
pub fn default_cache_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_CACHE_RELATIVE))
        .ok_or_else(|| StarterError::InvalidConfig {
            reason: "cannot determine home directory for the template cache".to_string(),
        })
}

/// Derives a package name from the last component of `dir`.
///
/// Relative paths are resolved against the current directory first so that
/// `.` yields the name of the working directory.
///
/// # Errors
///
/// Returns `InvalidConfig` if `dir` has no usable final component.
pub fn derive_package_name(dir: &Path) -> Result<String> {
    let absolute = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()?.join(dir)
    };

    let mut name = None;
    for component in absolute.components() {
        match component {
            std::path::Component::Normal(part) => name = Some(part),
            std::path::Component::ParentDir => name = None,
            _ => {}
        }
    }

    // `..` invalidates the tracked name; fall back to canonicalizing.
    let name = match name {
        Some(part) => Some(part.to_string_lossy().into_owned()),
        None => absolute
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned())),
    };

    name.filter(|n| !n.is_empty())
        .ok_or_else(|| StarterError::InvalidConfig {
            reason: format!(
                "cannot derive a package name from {}, pass one explicitly",
                dir.display()
            ),
        })
}
