//! High-level scaffolding API.

use std::path::Path;

use tracing::info;

use crate::Interceptor;
use crate::Result;
use crate::ScaffoldConfig;
use crate::ScaffoldReport;
use crate::config::RootPrefix;
use crate::fetch::Downloader;
use crate::fetch::TemplateFetcher;
use crate::formats::ZipExtractor;
use crate::report::ProgressCallback;
use crate::types::DestDir;

/// Extracts a local template archive into `dest_dir`.
///
/// The destination is created if missing. Entries are rewritten by
/// `interceptor` and stripped of the top-level directory chosen by
/// `root_prefix`.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened, the destination cannot
/// be created, an entry escapes the destination, or any write fails.
///
/// # Examples
///
/// ```no_run
/// use starter_core::Interceptor;
/// use starter_core::NoopProgress;
/// use starter_core::config::RootPrefix;
/// use starter_core::config::TemplateConfig;
/// use starter_core::extract_template;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let interceptor = Interceptor::for_package(&TemplateConfig::default(), "myapp");
/// let report = extract_template(
///     "master.zip",
///     "./myapp",
///     &RootPrefix::Detect,
///     &interceptor,
///     &mut NoopProgress,
/// )?;
/// println!("{} files rewritten", report.files_rewritten);
/// # Ok(())
/// # }
/// ```
pub fn extract_template<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    dest_dir: Q,
    root_prefix: &RootPrefix,
    interceptor: &Interceptor,
    progress: &mut dyn ProgressCallback,
) -> Result<ScaffoldReport> {
    let mut extractor = ZipExtractor::open(archive_path)?;
    let dest = DestDir::create(dest_dir.as_ref())?;
    extractor.extract(&dest, root_prefix, interceptor, progress)
}

/// Runs the whole pipeline: fetch the template, then extract it with the
/// package name substituted.
///
/// # Errors
///
/// Returns the fetch error when no archive could be obtained, otherwise any
/// error from [`extract_template`].
///
/// # Examples
///
/// ```no_run
/// use starter_core::NoopProgress;
/// use starter_core::ScaffoldConfig;
/// use starter_core::fetch::HttpDownloader;
/// use starter_core::scaffold;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ScaffoldConfig::new("./myapp", None)?;
/// let report = scaffold(&config, HttpDownloader::new()?, &mut NoopProgress)?;
/// println!("{} created with {} files", config.package_name, report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn scaffold<D: Downloader>(
    config: &ScaffoldConfig,
    downloader: D,
    progress: &mut dyn ProgressCallback,
) -> Result<ScaffoldReport> {
    let fetcher = TemplateFetcher::new(config.fetch.clone(), downloader);
    let outcome = fetcher.fetch()?;

    let interceptor = Interceptor::for_package(&config.template, &config.package_name);
    let mut report = extract_template(
        outcome.path(),
        &config.target_dir,
        &config.template.root_prefix,
        &interceptor,
        progress,
    )?;

    info!(
        package = %config.package_name,
        dir = %config.target_dir.display(),
        files = report.files_extracted,
        rewritten = report.files_rewritten,
        "scaffold complete"
    );

    report.fetch = Some(outcome);
    Ok(report)
}
