// Moshi to kotlinx.serialization annotation migration
pub mod annotation;
pub mod batch;
pub mod config;
pub mod file_processor;
pub mod imports;
pub mod migration_mode;
pub mod naming;
pub mod reporter;
pub mod source;
pub mod transformation_engine;
pub mod validation;
pub mod walker;

// Re-export core types for convenience
pub use annotation::{classify, AnnotationMatch, FieldDeclaration};
pub use batch::{run_batch, BatchError, FileOutcome};
pub use config::MigrationConfig;
pub use file_processor::{process_file, FileReport, ProcessError, ProcessOptions};
pub use migration_mode::MigrationMode;
pub use naming::camel_to_snake;
pub use reporter::{BatchReport, MigrationReporter, ReportFormat};
pub use source::SourceLine;
pub use transformation_engine::{migrate_source, MigrationEngine, MigrationStats, TransformResult};
pub use validation::{ValidationError, ValidationErrorKind};

use tracing_subscriber::EnvFilter;

/// Initialize stderr logging. `RUST_LOG` wins; otherwise `verbosity` picks warn/info/debug/trace.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("moshi_migrate={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
