//! Ortholog groups files: clusters, per-file groups and multi-file aggregation.

pub mod cluster;
pub mod group;
pub mod multi_group;

pub use cluster::{Cluster, Compliance};
pub use group::{Group, GroupStatistics};
pub use multi_group::MultiGroups;

use crate::OrthoError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_LABEL_PREFIX: &str = "MyGroups";
pub const DEFAULT_STATISTICS_NAME: &str = "multigroup_base_statistics.csv";
pub const DEFAULT_FILTERED_NAME: &str = "filtered_groups";

/// Gene (max copies per species) and species (min distinct species) thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub gene: u32,
    pub species: u32,
}

impl Thresholds {
    pub fn new(gene: u32, species: u32) -> Self {
        Self { gene, species }
    }

    /// Filtering is only active when both thresholds are known.
    pub fn from_options(gene: Option<u32>, species: Option<u32>) -> Option<Self> {
        match (gene, species) {
            (Some(gene), Some(species)) => Some(Self { gene, species }),
            _ => None,
        }
    }

    /// Like [`Thresholds::from_options`], but a missing value is a configuration error.
    pub fn require(gene: Option<u32>, species: Option<u32>) -> Result<Self, OrthoError> {
        match (gene, species) {
            (Some(gene), Some(species)) => Ok(Self { gene, species }),
            (None, None) => Err(OrthoError::Config(
                "gene and species thresholds are required for filtering".to_string(),
            )),
            (None, _) => Err(OrthoError::Config(
                "gene threshold is required for filtering".to_string(),
            )),
            (_, None) => Err(OrthoError::Config(
                "species threshold is required for filtering".to_string(),
            )),
        }
    }
}

/// How per-species sequence counts are derived from a cluster's sequence list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeciesCounting {
    /// Non-overlapping occurrences of the species token in the space-joined
    /// sequence list. `Hsap` is also counted inside `Hsap2`.
    #[default]
    Substring,
    /// Identifiers whose species field equals the species token.
    Exact,
}

/// Which parsed clusters a [`Group`] keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RetentionPolicy {
    /// Clusters are kept only when both thresholds are supplied.
    #[default]
    FilteredOnly,
    /// Every parsed cluster is kept; flags stay `Unknown` without thresholds.
    All,
}

/// Settings shared by every group built from the same invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOptions {
    pub thresholds: Option<Thresholds>,
    pub label_prefix: String,
    pub counting: SpeciesCounting,
    pub retention: RetentionPolicy,
}

impl Default for GroupOptions {
    fn default() -> Self {
        Self {
            thresholds: None,
            label_prefix: DEFAULT_LABEL_PREFIX.to_string(),
            counting: SpeciesCounting::default(),
            retention: RetentionPolicy::default(),
        }
    }
}

impl GroupOptions {
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    pub fn with_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.label_prefix = prefix.into();
        self
    }

    pub fn with_counting(mut self, counting: SpeciesCounting) -> Self {
        self.counting = counting;
        self
    }

    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }
}

/// `<dir>/<prefix>.<file name>` for an output named `<dir>/<file name>`.
pub fn prefixed_path(prefix: &str, output: &Path) -> PathBuf {
    let file_name = output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let prefixed = format!("{}.{}", prefix, file_name);

    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(prefixed),
        _ => PathBuf::from(prefixed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_from_options() {
        assert_eq!(
            Thresholds::from_options(Some(1), Some(2)),
            Some(Thresholds::new(1, 2))
        );
        assert_eq!(Thresholds::from_options(Some(1), None), None);
        assert_eq!(Thresholds::from_options(None, Some(2)), None);
    }

    #[test]
    fn test_thresholds_require_names_missing_value() {
        let err = Thresholds::require(None, Some(3)).unwrap_err();
        assert!(matches!(err, OrthoError::Config(ref msg) if msg.contains("gene")));

        let err = Thresholds::require(Some(1), None).unwrap_err();
        assert!(matches!(err, OrthoError::Config(ref msg) if msg.contains("species")));

        assert!(Thresholds::require(Some(1), Some(3)).is_ok());
    }

    #[test]
    fn test_prefixed_path() {
        assert_eq!(
            prefixed_path("MyGroups", Path::new("stats.csv")),
            PathBuf::from("MyGroups.stats.csv")
        );
        assert_eq!(
            prefixed_path("run1", Path::new("out/stats.csv")),
            PathBuf::from("out/run1.stats.csv")
        );
    }
}
