use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    migration_mode::MigrationMode,
    source::{join_lines, split_lines},
    transformation_engine::{MigrationEngine, MigrationStats},
    validation::ValidationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOptions {
    pub mode: MigrationMode,
    /// `false` for a dry run
    pub write: bool,
}

/// Outcome of migrating a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub changed: bool,
    pub written: bool,
    pub stats: MigrationStats,
    pub errors: Vec<ValidationError>,
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Changed, clean, but not written because writing was disabled
    pub fn is_pending(&self) -> bool {
        self.changed && !self.has_errors() && !self.written
    }
}

impl ProcessOptions {
    pub fn new(mode: MigrationMode, write: bool) -> Self {
        Self { mode, write }
    }
}

/// Migrate one file in place. The file is only rewritten when the migration
/// changed something, produced no validation errors, and writing is enabled.
pub fn process_file(path: &Path, options: ProcessOptions) -> Result<FileReport, ProcessError> {
    let text = fs::read_to_string(path).map_err(|source| ProcessError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let engine = MigrationEngine::new(options.mode);
    let result = engine.transform(&split_lines(&text));

    let written = if result.has_errors() {
        warn!(path = %path.display(), errors = result.errors.len(), "validation failed, leaving file untouched");
        false
    } else if result.changed && options.write {
        fs::write(path, join_lines(&result.lines)).map_err(|source| ProcessError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), mode = %engine.mode(), "migrated");
        true
    } else {
        debug!(path = %path.display(), changed = result.changed, "not written");
        false
    };

    Ok(FileReport {
        path: path.to_path_buf(),
        changed: result.changed,
        written,
        stats: result.stats,
        errors: result.errors,
    })
}
