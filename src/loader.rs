//! Parameter file loading
//!
//! Parameter files are YAML documents whose top level is a mapping of
//! section names to key/value blocks. Hand-edited files in the wild
//! repeat whole sections (two `domain` blocks with different mesh
//! counts, say), so the top level is parsed into a block *stream* that
//! preserves duplicates in source order; [`crate::merge`] then collapses
//! the stream under the chosen [`MergeStrategy`].

use crate::document::ConfigDocument;
use crate::error::ConfigError;
use crate::merge::{merge_blocks, MergeStrategy};
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Load a parameter file from disk.
///
/// A missing file fails with [`ConfigError::NotFound`]; malformed content
/// fails with [`ConfigError::Parse`]. Loading is one-shot: no retries,
/// no side effects beyond the read.
pub fn load_document(path: &Path, strategy: MergeStrategy) -> Result<ConfigDocument, ConfigError> {
    let content = read_params_file(path)?;
    parse_document(&content, strategy)
}

/// Read a parameter file to a string, classifying the I/O failure.
pub fn read_params_file(path: &Path) -> Result<String, ConfigError> {
    tracing::debug!("reading parameter file {}", path.display());

    fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound { path: path.to_path_buf() }
        } else {
            ConfigError::Read { path: path.to_path_buf(), source: e }
        }
    })
}

/// Parse parameter file content already held in memory.
pub fn parse_document(content: &str, strategy: MergeStrategy) -> Result<ConfigDocument, ConfigError> {
    let blocks = parse_blocks(content)?;
    Ok(merge_blocks(blocks, strategy))
}

/// Parse the raw top-level block stream, duplicates preserved in source
/// order. Most callers want [`parse_document`]; this is the layer below
/// it, exposed so duplicate occurrences can be inspected before merging.
pub fn parse_blocks(content: &str) -> Result<Vec<(String, Mapping)>, ConfigError> {
    let raw: RawBlocks = serde_yaml::from_str(content).map_err(ConfigError::parse)?;

    let mut blocks = Vec::with_capacity(raw.0.len());
    for (name, body) in raw.0 {
        let entries = match body {
            Value::Mapping(entries) => entries,
            // A bare `section:` line is an empty section, not an error.
            Value::Null => Mapping::new(),
            _ => return Err(ConfigError::Section { name }),
        };
        blocks.push((name, entries));
    }
    Ok(blocks)
}

/// Top-level mapping deserialized entry-by-entry so repeated section
/// names survive. Deserializing into `serde_yaml::Mapping` instead would
/// reject the duplicates this crate exists to handle.
struct RawBlocks(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for RawBlocks {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BlockVisitor;

        impl<'de> Visitor<'de> for BlockVisitor {
            type Value = RawBlocks;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of section names to section bodies")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some((name, body)) = map.next_entry::<String, Value>()? {
                    entries.push((name, body));
                }
                Ok(RawBlocks(entries))
            }

            // An empty file is an empty document.
            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawBlocks(Vec::new()))
            }

            // serde_yaml models an empty document as an absent Option and
            // dispatches here rather than to `visit_unit`; an empty file is
            // still an empty document.
            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawBlocks(Vec::new()))
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_any(BlockVisitor)
            }
        }

        deserializer.deserialize_any(BlockVisitor)
    }
}
