//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use super::formatter::source_label;
use super::formatter::success_message;
use crate::progress::humanize_bytes;
use anyhow::Result;
use console::Term;
use console::style;
use starter_core::ScaffoldConfig;
use starter_core::ScaffoldReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_scaffold_result(
        &self,
        config: &ScaffoldConfig,
        report: &ScaffoldReport,
    ) -> Result<()> {
        for warning in &report.warnings {
            self.format_warning(warning);
        }

        if self.quiet {
            return Ok(());
        }

        self.term.write_line(&success_message(config))?;

        if self.verbose {
            let _ = self.term.write_line(&format!(
                "  Template:     {} ({})",
                report
                    .fetch
                    .as_ref()
                    .map_or_else(String::new, |f| f.path().display().to_string()),
                source_label(report.fetch.as_ref())
            ));
            let _ = self
                .term
                .write_line(&format!("  Files:        {}", report.files_extracted));
            let _ = self
                .term
                .write_line(&format!("  Rewritten:    {}", report.files_rewritten));
            let _ = self
                .term
                .write_line(&format!("  Directories:  {}", report.directories_created));
            let _ = self.term.write_line(&format!(
                "  Total size:   {}",
                humanize_bytes(report.bytes_written)
            ));
            let _ = self
                .term
                .write_line(&format!("  Duration:     {:?}", report.duration));
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:#}", style("Error:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("Error: {error:#}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {message}", style("warning:").yellow().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("warning: {message}"));
        }
    }
}
