//! Duplicate-section merging
//!
//! Hand-edited parameter files repeat top-level sections, and two
//! readings of that are defensible: merge the blocks key by key, or let
//! the last block replace the section outright. Both are implemented and
//! selectable; per-key merging is the default because it never silently
//! drops keys that only the earlier block set.

use crate::document::{ConfigDocument, Section};
use serde_yaml::Mapping;

/// How repeated top-level sections are collapsed into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// Shallow per-key merge: later keys overwrite earlier keys for the
    /// same section; keys only the earlier block set are retained.
    #[default]
    MergeKeys,
    /// The later block replaces the section wholly.
    LastBlock,
}

/// Collapse a raw block stream into a [`ConfigDocument`].
///
/// Section order is the order of first appearance. Under `MergeKeys`,
/// key order within a section is first-appearance order with new keys
/// appended.
pub fn merge_blocks(blocks: Vec<(String, Mapping)>, strategy: MergeStrategy) -> ConfigDocument {
    let mut sections: Vec<Section> = Vec::new();

    for (name, block) in blocks {
        match sections.iter_mut().find(|s| s.name() == name) {
            Some(existing) => {
                tracing::debug!("section `{name}` repeats, collapsing with {strategy:?}");
                match strategy {
                    MergeStrategy::MergeKeys => {
                        for (key, value) in block {
                            existing.entries_mut().insert(key, value);
                        }
                    }
                    MergeStrategy::LastBlock => *existing.entries_mut() = block,
                }
            }
            None => sections.push(Section::new(name, block)),
        }
    }

    ConfigDocument::from_sections(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{parse_blocks, parse_document};

    // Two domain blocks, as seen in real farm configs: the second tweaks
    // the streamwise cell count and adds a spanwise one.
    const DUPLICATE_DOMAIN: &str = "\
domain:
  nx: 25
  nz: 10
wind_farm:
  HH: 90
domain:
  nx: 24
  ny: 16
";

    #[test]
    fn test_merge_keys_is_shallow_per_key() {
        let doc = parse_document(DUPLICATE_DOMAIN, MergeStrategy::MergeKeys).expect("doc");
        let domain = doc.section("domain").expect("domain section");

        // Later value wins per key, new keys land, earlier-only keys stay.
        assert_eq!(domain.get_int("nx").expect("int"), Some(24));
        assert_eq!(domain.get_int("ny").expect("int"), Some(16));
        assert_eq!(domain.get_int("nz").expect("int"), Some(10));
        assert_eq!(domain.len(), 3);
    }

    #[test]
    fn test_last_block_replaces_section_wholly() {
        let doc = parse_document(DUPLICATE_DOMAIN, MergeStrategy::LastBlock).expect("doc");
        let domain = doc.section("domain").expect("domain section");

        assert_eq!(domain.get_int("nx").expect("int"), Some(24));
        assert_eq!(domain.get_int("ny").expect("int"), Some(16));
        assert_eq!(domain.get_int("nz").expect("none left"), None);
        assert_eq!(domain.len(), 2);
    }

    #[test]
    fn test_section_order_is_first_appearance() {
        let doc = parse_document(DUPLICATE_DOMAIN, MergeStrategy::MergeKeys).expect("doc");
        assert_eq!(doc.names().collect::<Vec<_>>(), vec!["domain", "wind_farm"]);
    }

    #[test]
    fn test_merged_key_order_keeps_first_appearance() {
        let blocks = parse_blocks(DUPLICATE_DOMAIN).expect("blocks");
        let doc = merge_blocks(blocks, MergeStrategy::MergeKeys);
        let domain = doc.section("domain").expect("domain section");

        let keys: Vec<_> = domain
            .entries()
            .iter()
            .map(|(k, _)| k.as_str().expect("string key"))
            .collect();
        // nx keeps its original slot even though its value was overwritten.
        assert_eq!(keys, vec!["nx", "nz", "ny"]);
    }

    #[test]
    fn test_unique_sections_are_untouched_by_strategy() {
        let content = "general:\n  name: test\nsolver:\n  type: steady\n";
        let merged = parse_document(content, MergeStrategy::MergeKeys).expect("merge-keys");
        let replaced = parse_document(content, MergeStrategy::LastBlock).expect("last-block");
        assert_eq!(merged, replaced);
    }
}
