// src/services/source.rs

//! Fresh-record sources for the generation pipeline.
//!
//! The two historical generation paths (README tables, store catalog) sit
//! behind one trait so the pipeline stays identical either way.

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{MaterialRecord, StoreCatalog};
use crate::services::ReadmeRow;
use crate::utils::http;

/// Shared inputs available to every source.
pub struct SourceContext<'a> {
    /// HTTP client for sources that fetch
    pub client: &'a reqwest::Client,

    /// Rows parsed from the README, in document order
    pub readme_rows: &'a [ReadmeRow],
}

/// A source of fresh material records for one run.
#[async_trait]
pub trait MaterialSource: Send + Sync {
    /// Short name for log lines.
    fn name(&self) -> &'static str;

    /// Produce the fresh record set. Identifier fields may be blank; the
    /// merge step resolves them afterwards.
    async fn fetch_records(&self, ctx: &SourceContext<'_>) -> Result<Vec<MaterialRecord>>;
}

/// Source backed by the README tables alone.
pub struct ReadmeSource;

#[async_trait]
impl MaterialSource for ReadmeSource {
    fn name(&self) -> &'static str {
        "readme"
    }

    async fn fetch_records(&self, ctx: &SourceContext<'_>) -> Result<Vec<MaterialRecord>> {
        Ok(ctx.readme_rows.iter().map(record_from_row).collect())
    }
}

fn record_from_row(row: &ReadmeRow) -> MaterialRecord {
    MaterialRecord {
        material: row.material.clone(),
        color: row.color.clone(),
        filament_code: row.filament_code.clone(),
        variant_id: row.variant_id.clone(),
        material_id: String::new(),
    }
}

/// Source backed by the upstream filament catalog.
pub struct StoreSource {
    catalog_url: String,
}

impl StoreSource {
    pub fn new(catalog_url: impl Into<String>) -> Self {
        Self {
            catalog_url: catalog_url.into(),
        }
    }
}

#[async_trait]
impl MaterialSource for StoreSource {
    fn name(&self) -> &'static str {
        "store"
    }

    async fn fetch_records(&self, ctx: &SourceContext<'_>) -> Result<Vec<MaterialRecord>> {
        let body = http::fetch_text(ctx.client, &self.catalog_url).await?;
        let catalog: StoreCatalog =
            serde_json::from_str(&body).map_err(|e| AppError::catalog(&self.catalog_url, e))?;
        log::debug!("Catalog lists {} material groups", catalog.group_count());
        Ok(catalog.flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<ReadmeRow> {
        vec![
            ReadmeRow {
                material: "PLA Basic".to_string(),
                color: "Black".to_string(),
                filament_code: "10101".to_string(),
                variant_id: "A00-K0".to_string(),
            },
            ReadmeRow {
                material: "".to_string(),
                color: "Mystery".to_string(),
                filament_code: "99999".to_string(),
                variant_id: "Z00-Z0".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn test_readme_source_maps_rows() {
        let client = reqwest::Client::new();
        let rows = sample_rows();
        let ctx = SourceContext {
            client: &client,
            readme_rows: &rows,
        };

        let records = ReadmeSource.fetch_records(&ctx).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].material, "PLA Basic");
        assert_eq!(records[0].variant_id, "A00-K0");
        // The README never knows material ids.
        assert!(records.iter().all(|r| r.material_id.is_empty()));
        // Empty section names are carried as-is.
        assert_eq!(records[1].material, "");
    }
}
