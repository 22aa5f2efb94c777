use crate::ortho::{SpeciesCounting, Thresholds};
use crate::RecordError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Outcome of checking a cluster against one threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Compliance {
    /// No filter has been applied yet
    #[default]
    Unknown,
    Compliant,
    NonCompliant,
}

impl Compliance {
    fn from_check(passed: bool) -> Self {
        if passed {
            Compliance::Compliant
        } else {
            Compliance::NonCompliant
        }
    }

    pub fn is_compliant(&self) -> bool {
        *self == Compliance::Compliant
    }
}

/// One line of a groups file: a named cluster of sequence identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster {
    name: String,
    sequences: Vec<String>,
    species_frequency: BTreeMap<String, usize>,
    gene_compliant: Compliance,
    species_compliant: Compliance,
}

impl Cluster {
    /// Parse a `<name>: <seq1> <seq2> ...` record.
    ///
    /// Only the first colon separates the name, so identifiers may contain
    /// colons. Each sequence identifier must carry a species as its second
    /// `|`-delimited field, e.g. `gene42|Hsap|isoform1`. That field may be
    /// empty.
    pub fn parse(record: &str, counting: SpeciesCounting) -> Result<Self, RecordError> {
        let (name, sequence_list) = record
            .split_once(':')
            .ok_or(RecordError::MissingSeparator)?;

        let sequences: Vec<String> = sequence_list
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let mut exact_counts: BTreeMap<String, usize> = BTreeMap::new();
        for sequence in &sequences {
            let species = species_of(sequence)?;
            *exact_counts.entry(species.to_string()).or_insert(0) += 1;
        }

        let species_frequency = match counting {
            SpeciesCounting::Exact => exact_counts,
            SpeciesCounting::Substring => {
                let joined = sequences.join(" ");
                exact_counts
                    .into_keys()
                    .map(|species| {
                        let count = joined.matches(species.as_str()).count();
                        (species, count)
                    })
                    .collect()
            }
        };

        Ok(Self {
            name: name.trim().to_string(),
            sequences,
            species_frequency,
            gene_compliant: Compliance::Unknown,
            species_compliant: Compliance::Unknown,
        })
    }

    /// Set both compliance flags from `thresholds`.
    ///
    /// Groups call this exactly once per cluster. Calling it again with other
    /// thresholds overwrites the previous outcome.
    pub fn apply_filter(&mut self, thresholds: Thresholds) {
        self.species_compliant =
            Compliance::from_check(self.species_count() >= thresholds.species as usize);
        self.gene_compliant =
            Compliance::from_check(self.max_frequency() <= thresholds.gene as usize);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequences(&self) -> &[String] {
        &self.sequences
    }

    pub fn species_frequency(&self) -> &BTreeMap<String, usize> {
        &self.species_frequency
    }

    pub fn gene_compliant(&self) -> Compliance {
        self.gene_compliant
    }

    pub fn species_compliant(&self) -> Compliance {
        self.species_compliant
    }

    /// Number of distinct species in the cluster
    pub fn species_count(&self) -> usize {
        self.species_frequency.len()
    }

    /// Highest per-species copy number, 0 for a cluster without sequences
    pub fn max_frequency(&self) -> usize {
        self.species_frequency.values().copied().max().unwrap_or(0)
    }

    /// True when both the gene and species checks passed
    pub fn is_compliant(&self) -> bool {
        self.gene_compliant.is_compliant() && self.species_compliant.is_compliant()
    }
}

fn species_of(sequence: &str) -> Result<&str, RecordError> {
    sequence
        .split('|')
        .nth(1)
        .ok_or_else(|| RecordError::MissingSpecies(sequence.to_string()))
}

impl FromStr for Cluster {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cluster::parse(s, SpeciesCounting::default())
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.sequences.join(" "))
    }
}
