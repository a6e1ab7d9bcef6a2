use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::{
    batch::FileOutcome,
    config::MigrationConfig,
    transformation_engine::MigrationStats,
};

/// Reporter for batch migration results
pub struct MigrationReporter {
    output_format: ReportFormat,
}

/// Available output formats for migration reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Console,
    Json,
    Yaml,
}

/// Everything a run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub config: MigrationConfig,
    pub files: Vec<FileOutcome>,
    pub summary: BatchSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub files_scanned: usize,
    pub files_changed: usize,
    pub files_written: usize,
    pub files_with_errors: usize,
    pub files_failed: usize,
    pub totals: MigrationStats,
}

impl BatchReport {
    /// True when any file had validation errors or could not be processed
    pub fn has_failures(&self) -> bool {
        self.summary.files_with_errors > 0 || self.summary.files_failed > 0
    }
}

impl MigrationReporter {
    pub fn new() -> Self {
        Self {
            output_format: ReportFormat::Console,
        }
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn generate_report(&self, config: MigrationConfig, files: Vec<FileOutcome>) -> BatchReport {
        let summary = self.create_summary(&files);
        BatchReport {
            config,
            files,
            summary,
        }
    }

    pub fn format_report(&self, report: &BatchReport) -> Result<String, ReportError> {
        match self.output_format {
            ReportFormat::Console => Ok(self.format_console_report(report)),
            ReportFormat::Json => self.format_json_report(report),
            ReportFormat::Yaml => self.format_yaml_report(report),
        }
    }

    fn create_summary(&self, files: &[FileOutcome]) -> BatchSummary {
        let mut summary = BatchSummary {
            files_scanned: files.len(),
            ..Default::default()
        };

        for outcome in files {
            match outcome {
                FileOutcome::Processed(report) => {
                    if report.changed {
                        summary.files_changed += 1;
                    }
                    if report.written {
                        summary.files_written += 1;
                    }
                    if report.has_errors() {
                        summary.files_with_errors += 1;
                    }
                    summary.totals.absorb(&report.stats);
                }
                FileOutcome::Failed { .. } => summary.files_failed += 1,
            }
        }

        summary
    }

    /// Error listing per file, then pending files for dry runs. Empty when there is nothing to say.
    fn format_console_report(&self, report: &BatchReport) -> String {
        let mut output = String::new();

        for outcome in &report.files {
            match outcome {
                FileOutcome::Processed(file) if file.has_errors() => {
                    let _ = writeln!(output, "{}", file.path.display());
                    for error in &file.errors {
                        let _ = writeln!(output, "- {}", error);
                    }
                }
                FileOutcome::Failed { path, error } => {
                    let _ = writeln!(output, "{}", path.display());
                    let _ = writeln!(output, "- {}", error);
                }
                FileOutcome::Processed(_) => {}
            }
        }

        if report.config.dry_run {
            for outcome in &report.files {
                if let FileOutcome::Processed(file) = outcome {
                    if file.is_pending() {
                        let _ = writeln!(output, "would update: {}", file.path.display());
                    }
                }
            }
        }

        output
    }

    fn format_json_report(&self, report: &BatchReport) -> Result<String, ReportError> {
        serde_json::to_string_pretty(report).map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format_yaml_report(&self, report: &BatchReport) -> Result<String, ReportError> {
        serde_yaml::to_string(report).map_err(|e| ReportError::SerializationError(e.to_string()))
    }
}

impl Default for MigrationReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
