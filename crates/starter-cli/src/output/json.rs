//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use super::formatter::source_label;
use super::formatter::success_message;
use anyhow::Result;
use serde::Serialize;
use starter_core::ScaffoldConfig;
use starter_core::ScaffoldReport;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ScaffoldOutput {
    message: String,
    package: String,
    target_dir: String,
    template_url: String,
    archive: Option<String>,
    source: &'static str,
    files_extracted: usize,
    files_rewritten: usize,
    directories_created: usize,
    entries_skipped: usize,
    bytes_written: u64,
    duration_ms: u128,
    warnings: Vec<String>,
}

impl ScaffoldOutput {
    fn new(config: &ScaffoldConfig, report: &ScaffoldReport) -> Self {
        Self {
            message: success_message(config),
            package: config.package_name.clone(),
            target_dir: config.target_dir.display().to_string(),
            template_url: config.fetch.url.clone(),
            archive: report
                .fetch
                .as_ref()
                .map(|f| f.path().display().to_string()),
            source: source_label(report.fetch.as_ref()),
            files_extracted: report.files_extracted,
            files_rewritten: report.files_rewritten,
            directories_created: report.directories_created,
            entries_skipped: report.entries_skipped,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_scaffold_result(
        &self,
        config: &ScaffoldConfig,
        report: &ScaffoldReport,
    ) -> Result<()> {
        let output = JsonOutput::success("scaffold", ScaffoldOutput::new(config, report));
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error("scaffold", format!("{error:#}"));
        let _ = Self::output(&output);
    }

    // Warnings are already part of the result document.
    fn format_warning(&self, _message: &str) {}
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use starter_core::FetchOutcome;
    use starter_core::TemplateConfig;
    use starter_core::fetch::FetchRequest;
    use std::path::PathBuf;

    #[test]
    fn test_scaffold_output_structure() {
        let template = TemplateConfig::default();
        let fetch = FetchRequest::new(template.url.clone(), "/tmp/c.zip");
        let config = ScaffoldConfig::from_parts("/work/app", None, fetch, template).unwrap();

        let mut report = ScaffoldReport::new();
        report.files_extracted = 3;
        report.fetch = Some(FetchOutcome::Cached {
            path: PathBuf::from("/tmp/c.zip"),
        });

        let output = JsonOutput::success("scaffold", ScaffoldOutput::new(&config, &report));
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["operation"], "scaffold");
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"]["package"], "app");
        assert_eq!(value["data"]["source"], "cache");
        assert_eq!(value["data"]["files_extracted"], 3);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_error_output_structure() {
        let output = JsonOutput::error("scaffold", "boom");
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "boom");
        assert!(value.get("data").is_none());
    }
}
