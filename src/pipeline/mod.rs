//! Pipeline entry points for generator operations.
//!
//! - `run_generate`: Fetch the selected source, merge ids, write outputs
//! - `merge_records`: Identifier carry-over and output ordering

pub mod generate;
pub mod merge;

pub use generate::run_generate;
pub use merge::{Merger, index_records, merge_records};
