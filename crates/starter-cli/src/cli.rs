//! CLI argument parsing using clap.

use std::ffi::OsString;
use std::time::Duration;

use clap::Parser;
use clap_complete::Shell;
use starter_core::config::DEFAULT_TEMPLATE_URL;

#[derive(Parser)]
#[command(name = "starter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Target directory (created if missing)
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    pub dir: String,

    /// Package name (default: base name of the target directory)
    #[arg(short, long, value_name = "NAME")]
    pub pkg: Option<String>,

    /// Always download the template, ignoring any cached copy
    #[arg(long, alias = "disableCache")]
    pub disable_cache: bool,

    /// Template archive URL
    #[arg(long, env = "STARTER_TEMPLATE_URL", default_value = DEFAULT_TEMPLATE_URL)]
    pub url: String,

    /// Cache file for the template archive (default: ~/.gostarter/master.zip)
    #[arg(long, value_name = "PATH", env = "STARTER_CACHE_FILE")]
    pub cache_file: Option<String>,

    /// Age after which the cached template is refreshed (e.g. 30s, 15m, 240h, 10d)
    #[arg(long, value_name = "DURATION", default_value = "240h", value_parser = parse_duration)]
    pub max_cache_age: Duration,

    /// Top-level archive directory to strip (default: detected for custom URLs)
    #[arg(long, value_name = "PREFIX")]
    pub strip_prefix: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<Shell>,
}

/// Single-dash long flags accepted for compatibility with the original
/// `gostarter` command line.
const LEGACY_FLAGS: &[&str] = &["dir", "pkg", "disableCache"];

/// Rewrites `-dir`, `-pkg` and `-disableCache` (with or without `=value`) to
/// their double-dash forms so clap does not read them as bundled short flags.
///
/// `-disableCache=true` becomes `--disableCache` and `-disableCache=false`
/// is dropped. Arguments after a `--` terminator and the value following a
/// legacy `-dir` or `-pkg` are left untouched.
pub fn normalize_legacy_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut normalized = Vec::new();
    let mut passthrough = false;
    let mut expects_value = false;

    for arg in args {
        if passthrough || std::mem::take(&mut expects_value) {
            normalized.push(arg);
            continue;
        }
        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };
        if text == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }

        let Some(body) = text.strip_prefix('-').filter(|b| !b.starts_with('-')) else {
            normalized.push(arg);
            continue;
        };
        let (flag, value) = match body.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (body, None),
        };
        if !LEGACY_FLAGS.contains(&flag) {
            normalized.push(arg);
            continue;
        }

        match (flag, value) {
            ("disableCache", Some("true" | "1") | None) => {
                normalized.push(OsString::from("--disableCache"));
            }
            ("disableCache", Some("false" | "0")) => {}
            (_, Some(value)) => normalized.push(OsString::from(format!("--{flag}={value}"))),
            (_, None) => {
                expects_value = true;
                normalized.push(OsString::from(format!("--{flag}")));
            }
        }
    }

    normalized
}

/// Parse a duration with an optional unit suffix (s, m, h, d); bare numbers
/// are seconds.
#[allow(clippy::option_if_let_else)]
fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('d') {
        (stripped, 24 * 60 * 60)
    } else if let Some(stripped) = s.strip_suffix('h') {
        (stripped, 60 * 60)
    } else if let Some(stripped) = s.strip_suffix('m') {
        (stripped, 60)
    } else if let Some(stripped) = s.strip_suffix('s') {
        (stripped, 1)
    } else {
        (s, 1)
    };

    num_str
        .parse::<u64>()
        .map_err(|_| format!("invalid duration: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .map(Duration::from_secs)
                .ok_or_else(|| format!("duration overflow: {s}"))
        })
}
