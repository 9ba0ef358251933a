//! Scaffold command implementation.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::convert_config_error;
use crate::error::convert_starter_error;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use starter_core::NoopProgress;
use starter_core::ScaffoldConfig;
use starter_core::TemplateConfig;
use starter_core::config::RootPrefix;
use starter_core::config::default_cache_path;
use starter_core::fetch::FetchRequest;
use starter_core::fetch::HttpDownloader;
use starter_core::scaffold;
use tracing::debug;

pub fn execute(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = build_config(cli).map_err(convert_config_error)?;
    debug!(
        package = %config.package_name,
        dir = %config.target_dir.display(),
        cache = %config.fetch.cache_path.display(),
        "resolved configuration"
    );

    let downloader = HttpDownloader::new().map_err(|e| convert_starter_error(e, &config))?;

    // Use progress bar if TTY is detected (not quiet, not JSON, is terminal)
    let result = if !cli.quiet && !cli.json && CliProgress::should_show() {
        let mut progress = CliProgress::new("Extracting");
        scaffold(&config, downloader, &mut progress)
    } else {
        scaffold(&config, downloader, &mut NoopProgress)
    };
    let report = result.map_err(|e| convert_starter_error(e, &config))?;

    formatter.format_scaffold_result(&config, &report)?;

    Ok(())
}

/// Resolves clap arguments into the immutable run configuration.
fn build_config(cli: &Cli) -> starter_core::Result<ScaffoldConfig> {
    let target_dir = expand(&cli.dir);

    let mut template = TemplateConfig::default().with_url(cli.url.as_str());
    if let Some(prefix) = &cli.strip_prefix {
        template = template.with_root_prefix(RootPrefix::fixed(prefix));
    }

    let cache_path = match &cli.cache_file {
        Some(path) => expand(path),
        None => default_cache_path()?,
    };
    let fetch = FetchRequest::new(template.url.clone(), cache_path)
        .with_max_age(cli.max_cache_age)
        .with_disable_cache(cli.disable_cache);

    ScaffoldConfig::from_parts(target_dir, cli.pkg.clone(), fetch, template)
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
