//! Local output directory writer.
//!
//! Owns both generated files. `materials.json` doubles as the prior-run
//! input: it is read back before each run so variant and material ids
//! survive regeneration.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::{MaterialRecord, OutputConfig, SourceMode};
use crate::storage::WriteSummary;

/// Second snippet header line: the id-reuse rule.
const SNIPPET_ID_NOTE: &str =
    "// materialId/variantId reused from prior data when available; otherwise blank.";

/// Output directory holding the two generated files.
#[derive(Clone)]
pub struct OutputDir {
    root: PathBuf,
    files: OutputConfig,
}

impl OutputDir {
    /// Create an OutputDir rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>, files: OutputConfig) -> Self {
        Self {
            root: root.into(),
            files,
        }
    }

    /// Full path of the JSON output file.
    pub fn json_path(&self) -> PathBuf {
        self.root.join(&self.files.json_file)
    }

    /// Full path of the header snippet file.
    pub fn snippet_path(&self) -> PathBuf {
        self.root.join(&self.files.snippet_file)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Load the previous run's records, keyed by filament code.
    ///
    /// Best effort: a missing file means a first run; a malformed one is
    /// logged and treated as empty. Either way the run proceeds, with blank
    /// ids where nothing carries over.
    pub async fn load_previous(&self) -> HashMap<String, MaterialRecord> {
        let path = self.json_path();
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No previous output at {}", path.display());
                return HashMap::new();
            }
            Err(e) => {
                log::warn!("Could not read previous output {}: {}", path.display(), e);
                return HashMap::new();
            }
        };

        match serde_json::from_str::<Vec<MaterialRecord>>(&text) {
            Ok(records) => records
                .into_iter()
                .map(|record| (record.filament_code.clone(), record))
                .collect(),
            Err(e) => {
                log::warn!(
                    "Ignoring malformed previous output {}: {}",
                    path.display(),
                    e
                );
                HashMap::new()
            }
        }
    }

    /// Render the header snippet: two provenance lines, then the rows.
    fn render_snippet(records: &[MaterialRecord], mode: SourceMode) -> String {
        let provenance = match mode {
            SourceMode::Readme => {
                "// Generated from the Bambu-Lab-RFID-Library README material tables."
            }
            SourceMode::Store => {
                "// Generated from the Bambu-Lab-RFID-Library filament catalog (store data)."
            }
        };

        let mut snippet = String::new();
        snippet.push_str(provenance);
        snippet.push('\n');
        snippet.push_str(SNIPPET_ID_NOTE);
        snippet.push('\n');
        for record in records {
            snippet.push_str(&record.snippet_row());
            snippet.push('\n');
        }
        snippet
    }

    /// Write both output files into the directory, creating it if absent.
    pub async fn write_outputs(
        &self,
        records: &[MaterialRecord],
        mode: SourceMode,
    ) -> Result<WriteSummary> {
        tokio::fs::create_dir_all(&self.root).await?;

        let json_path = self.json_path();
        let json = serde_json::to_vec_pretty(records)?;
        self.write_bytes(&json_path, &json).await?;
        log::info!("Wrote {} entries to {}", records.len(), json_path.display());

        let snippet_path = self.snippet_path();
        let snippet = Self::render_snippet(records, mode);
        self.write_bytes(&snippet_path, snippet.as_bytes()).await?;
        log::info!(
            "Wrote {} snippet rows to {}",
            records.len(),
            snippet_path.display()
        );

        Ok(WriteSummary {
            record_count: records.len(),
            json_path,
            snippet_path,
        })
    }
}
