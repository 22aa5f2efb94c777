//! Line-oriented readers for groups files and file lists

use crate::{OrthoError, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// A named text resource that can be read line by line any number of times.
///
/// Every call to [`LineSource::open`] opens a fresh handle, so a source can
/// be re-read from the start. Files ending in `.gz` are decompressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSource {
    path: PathBuf,
}

impl LineSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_gzipped(&self) -> bool {
        self.path.extension().and_then(|s| s.to_str()) == Some("gz")
    }

    pub fn open(&self) -> Result<Box<dyn BufRead + Send>> {
        let file = File::open(&self.path).map_err(|source| OrthoError::Input {
            path: self.path.clone(),
            source,
        })?;

        if self.is_gzipped() {
            Ok(Box::new(BufReader::new(MultiGzDecoder::new(
                BufReader::new(file),
            ))))
        } else {
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Read a one-column list file, one entry per line.
///
/// Entries are trimmed and blank lines are ignored.
pub fn read_basic_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let source = LineSource::new(path);
    let reader = source.open()?;

    let mut storage = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|source_err| OrthoError::Input {
            path: source.path().to_path_buf(),
            source: source_err,
        })?;
        let entry = line.trim();
        if !entry.is_empty() {
            storage.push(entry.to_string());
        }
    }

    Ok(storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_line_source_reopens_from_start() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("groups.txt");
        std::fs::write(&path, "a\nb\n").unwrap();

        let source = LineSource::new(&path);
        let first: Vec<String> = source.open().unwrap().lines().map(|l| l.unwrap()).collect();
        let second: Vec<String> = source.open().unwrap().lines().map(|l| l.unwrap()).collect();

        assert_eq!(first, vec!["a", "b"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_line_source_decompresses_gzip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("groups.txt.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b"G1: a|sp1|1\n").unwrap();
        encoder.finish().unwrap();

        let source = LineSource::new(&path);
        assert!(source.is_gzipped());
        let lines: Vec<String> = source.open().unwrap().lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["G1: a|sp1|1"]);
    }

    #[test]
    fn test_missing_file_is_input_error() {
        let err = LineSource::new("/definitely/not/here.txt").open().err().unwrap();
        assert!(matches!(err, OrthoError::Input { .. }));
    }

    #[test]
    fn test_read_basic_list_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("files.txt");
        std::fs::write(&path, "one.txt\n\n  two.txt  \n").unwrap();

        assert_eq!(read_basic_list(&path).unwrap(), vec!["one.txt", "two.txt"]);
    }
}
