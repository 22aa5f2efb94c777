use crate::ortho::{prefixed_path, Group, GroupOptions, GroupStatistics};
use crate::{OrthoError, Result};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const REPORT_DELIMITER: char = ';';

pub const REPORT_HEADER: [&str; 6] = [
    "Group file",
    "Total clusters",
    "Total sequences",
    "Clusters above species threshold",
    "Clusters below gene threshold",
    "Clusters below gene and above species thresholds",
];

/// Several groups files parsed with the same options, kept in input order.
#[derive(Debug, Clone)]
pub struct MultiGroups {
    groups: Vec<Group>,
    options: GroupOptions,
}

impl MultiGroups {
    /// Parse every path with `options`.
    ///
    /// Files are parsed in parallel. The first failing path in input order is
    /// reported and no partial collection is returned.
    pub fn open<P: AsRef<Path> + Sync>(paths: &[P], options: &GroupOptions) -> Result<Self> {
        debug!("Parsing {} groups files", paths.len());

        let results: Vec<Result<Group>> = paths
            .par_iter()
            .map(|path| Group::open(path, options))
            .collect();

        let groups = results.into_iter().collect::<Result<Vec<_>>>()?;

        Ok(Self {
            groups,
            options: options.clone(),
        })
    }

    /// Wrap groups that were already parsed, e.g. from in-memory readers.
    pub fn from_groups(groups: Vec<Group>, options: GroupOptions) -> Self {
        Self { groups, options }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// `(source, statistics)` rows in input order, duplicates included
    pub fn statistics(&self) -> Vec<(String, GroupStatistics)> {
        self.groups
            .iter()
            .map(|group| (group.source().display().to_string(), group.statistics()))
            .collect()
    }

    /// Render the aggregate report: a header row and one row per group.
    pub fn render_report(&self) -> String {
        let delimiter = REPORT_DELIMITER.to_string();
        let mut report = REPORT_HEADER.join(&delimiter);
        report.push('\n');

        for (source, stats) in self.statistics() {
            let values: Vec<String> = stats.as_row().iter().map(|v| v.to_string()).collect();
            report.push_str(&source);
            report.push(REPORT_DELIMITER);
            report.push_str(&values.join(&delimiter));
            report.push('\n');
        }

        report
    }

    /// Write the aggregate report next to `output_name`, named
    /// `<label prefix>.<file name>`, and return the path written.
    pub fn aggregate_statistics<P: AsRef<Path>>(&self, output_name: P) -> Result<PathBuf> {
        let path = prefixed_path(&self.options.label_prefix, output_name.as_ref());
        let output_error = |source: std::io::Error| OrthoError::Output {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(output_error)?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(self.render_report().as_bytes())
            .map_err(output_error)?;
        writer.flush().map_err(output_error)?;

        info!(
            "Wrote statistics for {} groups files to {}",
            self.groups.len(),
            path.display()
        );

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ortho::Thresholds;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn options() -> GroupOptions {
        GroupOptions::default()
            .with_thresholds(Thresholds::new(1, 2))
            .with_label_prefix("run")
    }

    fn group(name: &str, content: &str) -> Group {
        Group::from_reader(name, Cursor::new(content.to_string()), &options()).unwrap()
    }

    #[test]
    fn test_report_rows_follow_input_order() {
        let multi = MultiGroups::from_groups(
            vec![
                group("b.txt", "G1: a|sp1|1 b|sp2|1\n"),
                group("a.txt", "G1: a|sp1|1\nG2: c|sp1|1 d|sp2|1\n"),
                group("b.txt", ""),
            ],
            options(),
        );

        let report = multi.render_report();
        let rows: Vec<&str> = report.lines().collect();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], REPORT_HEADER.join(";"));
        assert_eq!(rows[1], "b.txt;1;2;1;1;1");
        assert_eq!(rows[2], "a.txt;2;3;1;2;1");
        assert_eq!(rows[3], "b.txt;0;0;0;0;0");
    }

    #[test]
    fn test_aggregate_statistics_uses_prefixed_path() {
        let dir = TempDir::new().unwrap();
        let multi = MultiGroups::from_groups(vec![group("g.txt", "G1: a|sp1|1\n")], options());

        let written = multi
            .aggregate_statistics(dir.path().join("stats.csv"))
            .unwrap();

        assert_eq!(written, dir.path().join("run.stats.csv"));
        let content = std::fs::read_to_string(&written).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_open_stops_on_first_failing_path() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.txt");
        let bad = dir.path().join("bad.txt");
        std::fs::write(&good, "G1: a|sp1|1\n").unwrap();
        std::fs::write(&bad, "G1: a|sp1|1\nbroken\n").unwrap();
        let missing = dir.path().join("missing.txt");

        let err = MultiGroups::open(&[good.clone(), bad.clone(), missing], &options()).unwrap_err();
        match err {
            OrthoError::Parse { path, line, .. } => {
                assert_eq!(path, bad);
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }

        let multi = MultiGroups::open(&[good.clone(), good], &options()).unwrap();
        assert_eq!(multi.groups().len(), 2);
    }
}
