use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    config::MigrationConfig,
    file_processor::{process_file, FileReport, ProcessOptions},
    walker::find_source_files,
};

/// Per-file result of a batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Processed(FileReport),
    Failed { path: PathBuf, error: String },
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Path does not exist: {}", .0.display())]
    MissingRoot(PathBuf),

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl FileOutcome {
    pub fn path(&self) -> &PathBuf {
        match self {
            FileOutcome::Processed(report) => &report.path,
            FileOutcome::Failed { path, .. } => path,
        }
    }

    /// Validation errors or an I/O failure
    pub fn is_failure(&self) -> bool {
        match self {
            FileOutcome::Processed(report) => report.has_errors(),
            FileOutcome::Failed { .. } => true,
        }
    }
}

/// Migrate every matching file under `config.root`. Each worker owns one file
/// end to end; a failing file never stops the others. Outcomes are sorted by path.
pub fn run_batch(config: &MigrationConfig) -> Result<Vec<FileOutcome>, BatchError> {
    if !config.root.exists() {
        return Err(BatchError::MissingRoot(config.root.clone()));
    }

    let found = find_source_files(&config.root, config.bare_extension());
    info!(
        root = %config.root.display(),
        files = found.files.len(),
        unreadable = found.unreadable.len(),
        mode = %config.mode,
        "starting migration"
    );

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = config.jobs {
        builder = builder.num_threads(jobs);
    }
    let pool = builder.build()?;

    let options = ProcessOptions::new(config.mode, config.write_enabled());
    let mut outcomes: Vec<FileOutcome> = pool.install(|| {
        found
            .files
            .par_iter()
            .map(|path| match process_file(path, options) {
                Ok(report) => FileOutcome::Processed(report),
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "file failed");
                    FileOutcome::Failed {
                        path: path.clone(),
                        error: err.to_string(),
                    }
                }
            })
            .collect()
    });

    outcomes.extend(found.unreadable.into_iter().map(|entry| FileOutcome::Failed {
        path: entry.path,
        error: entry.error,
    }));
    outcomes.sort_by(|a, b| a.path().cmp(b.path()));

    Ok(outcomes)
}
