use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{migration_mode::MigrationMode, reporter::ReportFormat};

pub const DEFAULT_EXTENSION: &str = ".kt";

/// Settings for one migration run over a directory tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationConfig {
    pub root: PathBuf,
    pub extension: String,
    pub mode: MigrationMode,
    pub dry_run: bool,
    /// Worker threads; `None` lets rayon decide
    pub jobs: Option<usize>,
    pub format: ReportFormat,
}

impl MigrationConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            mode: MigrationMode::default(),
            dry_run: false,
            jobs: None,
            format: ReportFormat::Console,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_mode(mut self, mode: MigrationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Extension without its leading dot, so `kt` and `.kt` behave the same
    pub fn bare_extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }

    pub fn write_enabled(&self) -> bool {
        !self.dry_run
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
