//! Project scaffolding from a template repository snapshot.
//!
//! `starter-core` downloads a zip snapshot of a template repository (keeping
//! a local cache), extracts it into a target directory and rewrites the
//! template's name tokens in text files to a new package name. Every archive
//! entry is checked to stay inside the target directory before anything is
//! written.
//!
//! # Examples
//!
//! ```no_run
//! use starter_core::NoopProgress;
//! use starter_core::ScaffoldConfig;
//! use starter_core::fetch::HttpDownloader;
//! use starter_core::scaffold;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ScaffoldConfig::new("./myapp", Some("myapp".to_string()))?;
//! let report = scaffold(&config, HttpDownloader::new()?, &mut NoopProgress)?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod error;
pub mod fetch;
pub mod formats;
pub mod interceptor;
pub mod report;
pub mod types;

#[doc(hidden)]
pub mod test_utils;

pub use api::extract_template;
pub use api::scaffold;
pub use config::ScaffoldConfig;
pub use config::TemplateConfig;
pub use error::Result;
pub use error::StarterError;
pub use fetch::FetchOutcome;
pub use interceptor::Interceptor;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use report::ScaffoldReport;
