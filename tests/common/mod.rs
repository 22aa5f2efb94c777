#![allow(dead_code)]

//! Shared fixtures for groups-file integration tests
use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The two-cluster file used throughout the documentation examples
pub const SCENARIO_GROUPS: &str =
    "Cluster1: seq1|Hsap|1 seq2|Mmus|1 seq3|Hsap|2\nCluster2: seq4|Hsap|1\n";

/// Temporary directory holding input and output files for one test
pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn create_input_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }
}

/// A groups file with `n` clusters spread over `species` species.
///
/// Cluster `i` holds `i % species + 1` species, and every third cluster
/// carries a second copy of its first species.
pub fn create_groups_content(n: usize, species: usize) -> String {
    let mut content = String::new();
    for i in 0..n {
        content.push_str(&format!("OG{:05}:", i));
        for s in 0..(i % species + 1) {
            content.push_str(&format!(" g{}_{}|sp{:02}|{}", i, s, s, s));
        }
        if i % 3 == 0 {
            content.push_str(&format!(" g{}_dup|sp00|x", i));
        }
        content.push('\n');
    }
    content
}

pub fn orthogroups_cmd() -> Command {
    Command::cargo_bin("orthogroups").expect("binary is built for integration tests")
}

/// Count non-empty lines of a text file
pub fn count_lines(path: &Path) -> Result<usize> {
    Ok(fs::read_to_string(path)?
        .lines()
        .filter(|line| !line.trim().is_empty())
        .count())
}
