//! filagen CLI
//!
//! Regenerates `materials.json` and `materials_snippet.h` from the upstream
//! RFID library repository.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use filagen::{
    error::Result,
    models::{Config, SourceMode},
    pipeline,
};

/// filagen - Bambu filament material table generator
#[derive(Parser, Debug)]
#[command(
    name = "filagen",
    version,
    about = "Regenerates the Bambu filament material tables"
)]
struct Cli {
    /// Output directory for the generated files
    #[arg(default_value = "generated")]
    out_dir: PathBuf,

    /// Which upstream source supplies the fresh records
    #[arg(short, long, value_enum, default_value_t = Source::Store)]
    source: Source,

    /// Path to the configuration file
    #[arg(short, long, default_value = "filagen.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// CLI mirror of the library's source mode.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum Source {
    /// Parse the README's material tables
    Readme,
    /// Fetch and flatten the store's filament catalog
    Store,
}

impl From<Source> for SourceMode {
    fn from(source: Source) -> Self {
        match source {
            Source::Readme => SourceMode::Readme,
            Source::Store => SourceMode::Store,
        }
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("filagen starting...");

    let config = Config::load_or_default(&cli.config);
    config.validate()?;

    log::info!("Using configuration from {}", cli.config.display());

    let mode = SourceMode::from(cli.source);
    let summary = pipeline::run_generate(&config, mode, &cli.out_dir).await?;

    log::info!(
        "Generated {} records into {}",
        summary.record_count,
        cli.out_dir.display()
    );
    log::info!("Done!");

    Ok(())
}
