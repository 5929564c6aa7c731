//! Storage for the generated material tables.
//!
//! Everything lives in one flat output directory:
//!
//! ```text
//! generated/
//! ├── materials.json        # Record array; also read back as prior data
//! └── materials_snippet.h   # C initializer rows for the firmware table
//! ```

pub mod local;

use std::path::PathBuf;

// Re-export for convenience
pub use local::OutputDir;

/// Metadata about a completed write.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    /// Number of records written
    pub record_count: usize,
    /// Path of the JSON file
    pub json_path: PathBuf,
    /// Path of the header snippet
    pub snippet_path: PathBuf,
}
