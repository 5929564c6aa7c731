// src/models/mod.rs

//! Domain models for the generator.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod catalog;
mod config;
mod material;

use std::fmt;

// Re-export all public types
pub use catalog::StoreCatalog;
pub use config::{Config, FetchConfig, OutputConfig, SourceConfig};
pub use material::MaterialRecord;

/// Which upstream source supplies the fresh record set.
///
/// The README is fetched in both modes; in store mode it only serves as the
/// variant-id fallback during merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    /// Parse the README's material tables
    Readme,
    /// Fetch and flatten the filament catalog
    Store,
}

impl SourceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceMode::Readme => "readme",
            SourceMode::Store => "store",
        }
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
