//! Material table generation pipeline.
//!
//! Fetch → parse → merge → write, end to end. The README is always fetched
//! and parsed so its variant ids can seed the merge; the fresh record set
//! comes from whichever source the mode selects.

use std::path::Path;

use crate::error::Result;
use crate::models::{Config, SourceMode};
use crate::services::{
    MaterialSource, ReadmeParser, ReadmeSource, SourceContext, StoreSource, index_by_code,
};
use crate::storage::{OutputDir, WriteSummary};
use crate::utils::http;

use super::merge::merge_records;

/// Run one generation pass and write both output files.
pub async fn run_generate(
    config: &Config,
    mode: SourceMode,
    out_dir: &Path,
) -> Result<WriteSummary> {
    let client = http::create_client(&config.fetch)?;
    let output = OutputDir::new(out_dir, config.output.clone());

    let previous = output.load_previous().await;
    log::info!(
        "Loaded {} previous entries from {}",
        previous.len(),
        output.json_path().display()
    );

    log::info!("Fetching README from {}", config.sources.readme_url);
    let readme_text = http::fetch_text(&client, &config.sources.readme_url).await?;

    let parser = ReadmeParser::new();
    let readme_rows = parser.parse(&readme_text);
    log::info!("Parsed {} rows from the README material tables", readme_rows.len());

    let source: Box<dyn MaterialSource> = match mode {
        SourceMode::Readme => Box::new(ReadmeSource),
        SourceMode::Store => Box::new(StoreSource::new(&config.sources.catalog_url)),
    };

    log::info!("Fetching fresh records from the {} source", source.name());
    let ctx = SourceContext {
        client: &client,
        readme_rows: &readme_rows,
    };
    let fresh = source.fetch_records(&ctx).await?;
    log::info!("Fetched {} fresh records", fresh.len());

    let readme_index = index_by_code(&readme_rows);
    let merged = merge_records(fresh, &previous, &readme_index);

    output.write_outputs(&merged, mode).await
}
