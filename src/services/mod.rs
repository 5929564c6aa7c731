//! Service layer for the generator.
//!
//! This module contains the business logic for:
//! - README table parsing (`ReadmeParser`)
//! - Fresh-record sourcing (`MaterialSource` and its implementations)

mod readme;
mod source;

pub use readme::{ParseState, ReadmeParser, ReadmeRow, index_by_code};
pub use source::{MaterialSource, ReadmeSource, SourceContext, StoreSource};
