use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::Parser;
use moshi_migrate::{
    init_tracing, run_batch, MigrationConfig, MigrationMode, MigrationReporter, ReportFormat,
};

#[derive(Parser, Debug)]
#[command(name = "moshi-migrate", version)]
#[command(
    about = "Convert Kotlin models from Moshi annotations to kotlinx.serialization. Replaces @JsonClass(...) with @Serializable, removes @Json(...) annotations, and updates imports."
)]
struct Args {
    /// Root directory to scan recursively
    #[arg(default_value = ".")]
    path: PathBuf,

    /// File extension to include
    #[arg(long, default_value = ".kt")]
    ext: String,

    /// Show what would change without writing files
    #[arg(long)]
    dry_run: bool,

    /// Replace mismatched @Json(name=...) with @SerialName(...) and add its import instead of erroring
    #[arg(long, conflicts_with = "fix_all_names")]
    fix_names: bool,

    /// Replace all @Json(name=...) annotations with @SerialName(...) and add its import
    #[arg(long)]
    fix_all_names: bool,

    /// Validation mode by name: strict, fix-mismatches or fix-all
    #[arg(long, value_name = "MODE", conflicts_with_all = ["fix_names", "fix_all_names"])]
    mode: Option<MigrationMode>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    format: ReportFormat,

    /// Number of worker threads (defaults to one per core)
    #[arg(long, short = 'j', value_name = "N")]
    jobs: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    }
}

/// Returns `false` when any file had validation errors or could not be processed
fn run(args: Args) -> anyhow::Result<bool> {
    let mode = match args.mode {
        Some(mode) => mode,
        None => MigrationMode::from_flags(args.fix_names, args.fix_all_names)?,
    };
    let config = MigrationConfig::new(expand_home(&args.path))
        .with_extension(args.ext)
        .with_mode(mode)
        .with_dry_run(args.dry_run)
        .with_jobs(args.jobs)
        .with_format(args.format);

    let outcomes = run_batch(&config)?;

    let reporter = MigrationReporter::new().with_format(config.format);
    let report = reporter.generate_report(config, outcomes);
    let formatted = reporter
        .format_report(&report)
        .context("Failed to render report")?;
    print!("{}", formatted);

    Ok(!report.has_failures())
}

/// Expand a leading `~` the way a shell would
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), std::env::var_os("HOME")) {
        (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => path.to_path_buf(),
    }
}
