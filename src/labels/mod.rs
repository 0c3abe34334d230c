//! Label resolution
//!
//! Maps a class index of the active model variant to a canonical identifier
//! (scientific name or class tag) and a human-readable display alias.
//!
//! Every table has a fixed domain: `class_count` indices, one per model output.
//! Indices without a registered name resolve to a placeholder of the form
//! `"Unknown Species (i)"`, and names without an alias display as themselves, so
//! resolution never fails.
//!
//! # Example
//!
//! ```
//! use bloom_rank::labels::{LabelTable, ModelVariant};
//!
//! let table = LabelTable::builtin(ModelVariant::Inaturalist);
//! let label = table.resolve(0);
//! assert_eq!(label.canonical_name, "Rosa canina");
//! assert_eq!(label.display_name, "Dog Rose");
//!
//! let unknown = table.resolve(999);
//! assert_eq!(unknown.canonical_name, "Unknown Species (999)");
//! assert_eq!(unknown.display_name, "Unknown Species (999)");
//! ```

pub mod inaturalist;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Supported classifier backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ModelVariant {
    /// Inception V3 trained on iNaturalist research-grade observations (1000 classes)
    #[default]
    Inaturalist,
    /// Quantized MobileNet V2 trained on iNaturalist plants (2102 classes)
    PlantsV1,
    /// Inception V3 trained on ImageNet (1000 classes, emits logits)
    ImageNet,
}

/// Static description of a model variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    /// Display name of the model
    pub name: &'static str,
    /// Training dataset
    pub dataset: &'static str,
    /// Network architecture
    pub architecture: &'static str,
    /// Number of output classes
    pub class_count: usize,
    /// Square input edge length in pixels
    pub input_size: u32,
}

impl ModelVariant {
    /// Number of output classes (length of every score vector for this variant)
    pub fn class_count(self) -> usize {
        match self {
            ModelVariant::Inaturalist => inaturalist::INATURALIST_CLASS_COUNT,
            ModelVariant::PlantsV1 => 2102,
            ModelVariant::ImageNet => 1000,
        }
    }

    /// Descriptor for this variant
    pub fn info(self) -> ModelInfo {
        match self {
            ModelVariant::Inaturalist => ModelInfo {
                name: "Inception V3 (iNaturalist)",
                dataset: "iNaturalist research-grade observations",
                architecture: "Inception V3",
                class_count: self.class_count(),
                input_size: 299,
            },
            ModelVariant::PlantsV1 => ModelInfo {
                name: "iNaturalist Plants V1",
                dataset: "iNaturalist plants",
                architecture: "MobileNet V2 (uint8 quantized)",
                class_count: self.class_count(),
                input_size: 224,
            },
            ModelVariant::ImageNet => ModelInfo {
                name: "Inception V3 (ImageNet)",
                dataset: "ImageNet ILSVRC-2012",
                architecture: "Inception V3",
                class_count: self.class_count(),
                input_size: 299,
            },
        }
    }
}

/// Resolved names for one class index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLabel {
    /// Canonical identifier (scientific name, class tag or placeholder)
    pub canonical_name: String,
    /// Human-readable alias, equal to `canonical_name` when none is registered
    pub display_name: String,
}

/// Fixed-size index → name table with an alias map
#[derive(Debug, Clone)]
pub struct LabelTable {
    names: Vec<Option<String>>,
    aliases: HashMap<String, String>,
}

impl LabelTable {
    /// Table with `class_count` entries and no registered names
    pub fn unlabeled(class_count: usize) -> Self {
        Self {
            names: vec![None; class_count],
            aliases: HashMap::new(),
        }
    }

    /// Table whose domain is exactly `labels.len()`
    ///
    /// Blank entries are treated as unmapped and resolve to a placeholder.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = labels
            .into_iter()
            .map(|label| {
                let label = label.into();
                let trimmed = label.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect();
        Self {
            names,
            aliases: HashMap::new(),
        }
    }

    /// Parse a label file with one class name per line
    ///
    /// Line `i` names class `i`; blank lines keep their slot as unmapped.
    ///
    /// ```
    /// use bloom_rank::labels::LabelTable;
    ///
    /// let table = LabelTable::from_label_text("Rosa canina\n\nBellis perennis\n");
    /// assert_eq!(table.class_count(), 3);
    /// assert_eq!(table.resolve(1).canonical_name, "Unknown Species (1)");
    /// ```
    pub fn from_label_text(text: &str) -> Self {
        Self::from_labels(text.lines())
    }

    /// Default table for a model variant
    ///
    /// Only the iNaturalist variant ships names; the other variants return an
    /// unlabeled table of the right size that callers populate via
    /// [`LabelTable::from_label_text`].
    pub fn builtin(variant: ModelVariant) -> Self {
        match variant {
            ModelVariant::Inaturalist => {
                let mut table = Self::unlabeled(variant.class_count());
                for &(index, name) in inaturalist::SPECIES {
                    table.names[index] = Some(name.to_string());
                }
                table.with_aliases(inaturalist::COMMON_NAMES.iter().copied())
            }
            ModelVariant::PlantsV1 | ModelVariant::ImageNet => {
                Self::unlabeled(variant.class_count())
            }
        }
    }

    /// Register a display alias for a canonical name
    pub fn with_alias(mut self, canonical: impl Into<String>, alias: impl Into<String>) -> Self {
        self.aliases.insert(canonical.into(), alias.into());
        self
    }

    /// Register several display aliases
    pub fn with_aliases<I, K, V>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.aliases
            .extend(aliases.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Size of the index domain
    pub fn class_count(&self) -> usize {
        self.names.len()
    }

    /// Registered canonical name, if any
    pub fn canonical_name(&self, index: usize) -> Option<&str> {
        self.names.get(index).and_then(|name| name.as_deref())
    }

    /// Resolve an index to its canonical and display names
    pub fn resolve(&self, index: usize) -> ResolvedLabel {
        let canonical_name = match self.canonical_name(index) {
            Some(name) => name.to_string(),
            None => placeholder_name(index),
        };
        let display_name = self
            .aliases
            .get(&canonical_name)
            .cloned()
            .unwrap_or_else(|| canonical_name.clone());
        ResolvedLabel {
            canonical_name,
            display_name,
        }
    }

    /// Canonical names for the whole domain, placeholders included
    pub fn labels(&self) -> Vec<String> {
        (0..self.class_count())
            .map(|index| self.resolve(index).canonical_name)
            .collect()
    }
}

/// Name used for indices missing from a table
pub fn placeholder_name(index: usize) -> String {
    format!("Unknown Species ({})", index)
}
