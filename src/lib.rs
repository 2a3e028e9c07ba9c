//! wind-params: load, merge, and inspect wind-farm simulation parameter files
//!
//! Parameter files are YAML documents of named sections (`general`,
//! `wind_farm`, `domain`, `solver`, ...) feeding an external CFD
//! simulation engine. Hand-edited files routinely repeat whole sections,
//! so loading collapses the duplicates under a selectable merge strategy
//! and exposes the result as an immutable, typed document.

pub mod cli;
pub mod document;
pub mod error;
pub mod loader;
pub mod merge;
pub mod schema;

pub use document::{ConfigDocument, Section};
pub use error::ConfigError;
pub use loader::{load_document, parse_blocks, parse_document};
pub use merge::{merge_blocks, MergeStrategy};
pub use schema::Params;
