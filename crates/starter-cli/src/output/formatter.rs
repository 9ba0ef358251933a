//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use starter_core::FetchOutcome;
use starter_core::ScaffoldConfig;
use starter_core::ScaffoldReport;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the result of a successful scaffolding run
    fn format_scaffold_result(&self, config: &ScaffoldConfig, report: &ScaffoldReport)
    -> Result<()>;

    /// Format error message
    fn format_error(&self, error: &anyhow::Error);

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// The success line printed after scaffolding.
pub fn success_message(config: &ScaffoldConfig) -> String {
    format!(
        "{} created successfully in {}!",
        config.package_name,
        config.target_dir.display()
    )
}

/// Short label for where the template archive came from.
pub fn source_label(outcome: Option<&FetchOutcome>) -> &'static str {
    match outcome {
        Some(FetchOutcome::Cached { .. }) => "cache",
        Some(FetchOutcome::Downloaded { .. }) => "download",
        Some(FetchOutcome::StaleFallback { .. }) => "stale-cache",
        None => "local",
    }
}
