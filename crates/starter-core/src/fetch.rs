//! Cache-aware template download.
//!
//! The fetcher returns a local path holding the template archive. A cache
//! file younger than the configured age is used as is; otherwise the archive
//! is downloaded again, and a stale cache is kept as the fallback when the
//! download fails. There is no retry loop.

use std::fs::File;
use std::fs::create_dir_all;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use std::time::SystemTime;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::Result;
use crate::StarterError;
use crate::config::DEFAULT_MAX_CACHE_AGE;

/// Parameters of a single cache-aware fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Remote archive URL.
    pub url: String,

    /// Local cache file.
    pub cache_path: PathBuf,

    /// Maximum age of a cache file that is still used without a download.
    pub max_age: Duration,

    /// Always download, ignoring any cache file.
    pub disable_cache: bool,
}

impl FetchRequest {
    /// Creates a request with the default freshness threshold.
    #[must_use]
    pub fn new(url: impl Into<String>, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            cache_path: cache_path.into(),
            max_age: DEFAULT_MAX_CACHE_AGE,
            disable_cache: false,
        }
    }

    /// Sets the freshness threshold.
    #[must_use]
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Enables or disables the cache.
    #[must_use]
    pub fn with_disable_cache(mut self, disable_cache: bool) -> Self {
        self.disable_cache = disable_cache;
        self
    }

    /// Returns `true` if a cache file modified at `modified` is still fresh
    /// at `now`.
    ///
    /// # Examples
    ///
    /// ```
    /// use starter_core::fetch::FetchRequest;
    /// use std::time::Duration;
    /// use std::time::SystemTime;
    ///
    /// let request = FetchRequest::new("https://example.com/t.zip", "/tmp/t.zip")
    ///     .with_max_age(Duration::from_secs(60));
    /// let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
    ///
    /// assert!(request.is_fresh(modified, modified + Duration::from_secs(59)));
    /// assert!(!request.is_fresh(modified, modified + Duration::from_secs(61)));
    /// ```
    #[must_use]
    pub fn is_fresh(&self, modified: SystemTime, now: SystemTime) -> bool {
        modified
            .checked_add(self.max_age)
            .is_some_and(|expires| expires > now)
    }
}

/// Which branch the fetcher took to produce the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A fresh cache file was used; no network call was made.
    Cached {
        /// Cache file path.
        path: PathBuf,
    },
    /// The archive was downloaded into the cache.
    Downloaded {
        /// Cache file path.
        path: PathBuf,
        /// Size of the downloaded body.
        bytes: u64,
    },
    /// The download failed and an existing stale cache was used instead.
    StaleFallback {
        /// Cache file path.
        path: PathBuf,
        /// Why the download failed.
        reason: String,
    },
}

impl FetchOutcome {
    /// Returns the local archive path.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Cached { path } | Self::Downloaded { path, .. } | Self::StaleFallback { path, .. } => {
                path
            }
        }
    }

    /// Returns `true` if the archive came from the network in this run.
    #[must_use]
    pub const fn is_downloaded(&self) -> bool {
        matches!(self, Self::Downloaded { .. })
    }
}

/// Transport used to fetch a URL into a local file.
pub trait Downloader {
    /// Streams the body at `url` into `dest`, returning the number of bytes
    /// written.
    ///
    /// # Errors
    ///
    /// Returns `Network` or `BadStatus` for transport and server failures,
    /// `Io` for local write failures.
    fn download(&self, url: &str, dest: &Path) -> Result<u64>;
}

/// Blocking HTTP(S) downloader.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: reqwest::blocking::Client,
}

impl HttpDownloader {
    /// Creates a downloader with the crate's user agent and the transport's
    /// default timeouts.
    ///
    /// # Errors
    ///
    /// Returns `Network` if the HTTP client cannot be initialised (for
    /// example when the TLS backend fails to load).
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("starter/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StarterError::Network {
                url: String::new(),
                reason: format!("failed to create HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        let mut response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(StarterError::BadStatus {
                url: url.to_string(),
                status: status.to_string(),
            });
        }

        let file = File::create(dest)?;
        let mut writer = BufWriter::with_capacity(64 * 1024, file);
        let bytes = response.copy_to(&mut writer)?;
        writer.flush()?;

        Ok(bytes)
    }
}

/// Resolves the template archive through the cache.
///
/// # Examples
///
/// ```no_run
/// use starter_core::fetch::FetchRequest;
/// use starter_core::fetch::HttpDownloader;
/// use starter_core::fetch::TemplateFetcher;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let request = FetchRequest::new(
///     "https://github.com/bingoohuang/gostarter/archive/master.zip",
///     "/tmp/gostarter/master.zip",
/// );
/// let fetcher = TemplateFetcher::new(request, HttpDownloader::new()?);
/// let outcome = fetcher.fetch()?;
/// println!("archive at {}", outcome.path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TemplateFetcher<D> {
    request: FetchRequest,
    downloader: D,
}

impl<D: Downloader> TemplateFetcher<D> {
    /// Creates a fetcher for `request` using `downloader` as transport.
    #[must_use]
    pub fn new(request: FetchRequest, downloader: D) -> Self {
        Self {
            request,
            downloader,
        }
    }

    /// Fetches using the current system time for the freshness check.
    ///
    /// # Errors
    ///
    /// See [`TemplateFetcher::fetch_at`].
    pub fn fetch(&self) -> Result<FetchOutcome> {
        self.fetch_at(SystemTime::now())
    }

    /// Fetches, treating `now` as the current time.
    ///
    /// # Errors
    ///
    /// Returns the download error when the download fails and no cache file
    /// exists (or the cache is disabled). Creating the cache directory or
    /// replacing the cache file can fail with `Io`.
    pub fn fetch_at(&self, now: SystemTime) -> Result<FetchOutcome> {
        let cache = &self.request.cache_path;
        let mut cache_exists = false;

        if !self.request.disable_cache {
            if let Ok(metadata) = std::fs::metadata(cache) {
                cache_exists = true;
                let modified = metadata.modified()?;
                if self.request.is_fresh(modified, now) {
                    info!(cache = %cache.display(), "cache found");
                    return Ok(FetchOutcome::Cached {
                        path: cache.clone(),
                    });
                }
                info!(
                    cache = %cache.display(),
                    max_age_secs = self.request.max_age.as_secs(),
                    "cache expired"
                );
            }
        }

        if let Some(dir) = cache.parent().filter(|d| !d.as_os_str().is_empty()) {
            // Ignored: a real problem surfaces when the download is written.
            let _ = create_dir_all(dir);
        }

        info!(url = %self.request.url, "start to download");

        match self.download_to_cache() {
            Ok(bytes) => {
                debug!(bytes, cache = %cache.display(), "download complete");
                Ok(FetchOutcome::Downloaded {
                    path: cache.clone(),
                    bytes,
                })
            }
            Err(err) if cache_exists => {
                warn!(error = %err, cache = %cache.display(), "failed to download, using cached archive instead");
                Ok(FetchOutcome::StaleFallback {
                    path: cache.clone(),
                    reason: err.to_string(),
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Downloads into a sibling `.part` file and renames it over the cache
    /// only after the whole body is on disk.
    fn download_to_cache(&self) -> Result<u64> {
        let cache = &self.request.cache_path;
        let partial = partial_path(cache);

        let result = self
            .downloader
            .download(&self.request.url, &partial)
            .and_then(|bytes| {
                std::fs::rename(&partial, cache)?;
                Ok(bytes)
            });

        if result.is_err() {
            let _ = std::fs::remove_file(&partial);
        }

        result
    }
}

fn partial_path(cache: &Path) -> PathBuf {
    let mut name = cache
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".part");
    cache.with_file_name(name)
}
