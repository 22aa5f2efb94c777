use crate::ortho::{prefixed_path, Cluster, GroupOptions, RetentionPolicy};
use crate::utils::lines::LineSource;
use crate::{OrthoError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Whole-file counts for a groups file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStatistics {
    pub total_clusters: usize,
    pub total_sequences: usize,
    /// Clusters with at least the species threshold of distinct species
    pub species_compliant: usize,
    /// Clusters with no species above the gene threshold
    pub gene_compliant: usize,
    pub both_compliant: usize,
}

impl GroupStatistics {
    /// Values in report column order
    pub fn as_row(&self) -> [usize; 5] {
        [
            self.total_clusters,
            self.total_sequences,
            self.species_compliant,
            self.gene_compliant,
            self.both_compliant,
        ]
    }
}

/// All clusters of one groups file, in file order.
#[derive(Debug, Clone)]
pub struct Group {
    source: PathBuf,
    label_prefix: String,
    clusters: Vec<Cluster>,
}

impl Group {
    /// Parse the groups file at `path`.
    pub fn open<P: AsRef<Path>>(path: P, options: &GroupOptions) -> Result<Self> {
        let source = LineSource::new(path.as_ref());
        let reader = source.open()?;
        Self::from_reader(source.path(), reader, options)
    }

    /// Parse groups records from any buffered reader.
    ///
    /// `source` names the records in errors and reports. Any line that is not
    /// a valid record, blank lines included, aborts parsing.
    pub fn from_reader<R: BufRead>(
        source: impl Into<PathBuf>,
        reader: R,
        options: &GroupOptions,
    ) -> Result<Self> {
        let source = source.into();
        let keep_unfiltered = options.retention == RetentionPolicy::All;

        if options.thresholds.is_none() && !keep_unfiltered {
            warn!(
                "No gene/species thresholds for {}; clusters will not be retained",
                source.display()
            );
        }

        let mut clusters = Vec::new();
        let mut parsed = 0usize;

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|err| OrthoError::Input {
                path: source.clone(),
                source: err,
            })?;

            let mut cluster =
                Cluster::parse(&line, options.counting).map_err(|err| OrthoError::Parse {
                    path: source.clone(),
                    line: index + 1,
                    source: err,
                })?;
            parsed += 1;

            match options.thresholds {
                Some(thresholds) => {
                    cluster.apply_filter(thresholds);
                    clusters.push(cluster);
                }
                None if keep_unfiltered => clusters.push(cluster),
                None => {}
            }
        }

        debug!(
            "Parsed {} clusters from {} ({} retained)",
            parsed,
            source.display(),
            clusters.len()
        );

        Ok(Self {
            source,
            label_prefix: options.label_prefix.clone(),
            clusters,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn label_prefix(&self) -> &str {
        &self.label_prefix
    }

    /// `output_name` with this group's label prefix on its file name
    pub fn prefixed_output<P: AsRef<Path>>(&self, output_name: P) -> PathBuf {
        prefixed_path(&self.label_prefix, output_name.as_ref())
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn statistics(&self) -> GroupStatistics {
        let mut stats = GroupStatistics {
            total_clusters: self.clusters.len(),
            ..GroupStatistics::default()
        };

        for cluster in &self.clusters {
            stats.total_sequences += cluster.sequences().len();

            let species_ok = cluster.species_compliant().is_compliant();
            let gene_ok = cluster.gene_compliant().is_compliant();

            if species_ok {
                stats.species_compliant += 1;
            }
            if gene_ok {
                stats.gene_compliant += 1;
            }
            if species_ok && gene_ok {
                stats.both_compliant += 1;
            }
        }

        stats
    }

    /// Clusters passing both thresholds, in file order
    pub fn compliant_clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter().filter(|cluster| cluster.is_compliant())
    }

    /// Write the compliant clusters to `path` in groups-file format.
    ///
    /// Any existing file is overwritten. Returns the number of clusters written.
    pub fn export_filtered<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let output_error = |source: std::io::Error| OrthoError::Output {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(output_error)?;
        let mut writer = BufWriter::new(file);

        let mut written = 0;
        for cluster in self.compliant_clusters() {
            writeln!(writer, "{}", cluster).map_err(output_error)?;
            written += 1;
        }
        writer.flush().map_err(output_error)?;

        info!(
            "Exported {} of {} clusters to {}",
            written,
            self.clusters.len(),
            path.display()
        );

        Ok(written)
    }
}
