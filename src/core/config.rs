use crate::ortho::{
    GroupOptions, RetentionPolicy, SpeciesCounting, Thresholds, DEFAULT_FILTERED_NAME,
    DEFAULT_LABEL_PREFIX, DEFAULT_STATISTICS_NAME,
};
use crate::OrthoError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub parsing: ParsingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FilterConfig {
    /// Maximum copies of any one species in a cluster
    #[serde(default)]
    pub gene_threshold: Option<u32>,
    /// Minimum number of distinct species in a cluster
    #[serde(default)]
    pub species_threshold: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ParsingConfig {
    #[serde(default)]
    pub species_counting: SpeciesCounting,
    #[serde(default)]
    pub retention: RetentionPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_label_prefix")]
    pub label_prefix: String,
    #[serde(default = "default_statistics_name")]
    pub statistics_name: String,
    #[serde(default = "default_filtered_name")]
    pub filtered_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            label_prefix: default_label_prefix(),
            statistics_name: default_statistics_name(),
            filtered_name: default_filtered_name(),
        }
    }
}

fn default_label_prefix() -> String {
    DEFAULT_LABEL_PREFIX.to_string()
}

fn default_statistics_name() -> String {
    DEFAULT_STATISTICS_NAME.to_string()
}

fn default_filtered_name() -> String {
    DEFAULT_FILTERED_NAME.to_string()
}

impl Config {
    pub fn thresholds(&self) -> Option<Thresholds> {
        Thresholds::from_options(self.filter.gene_threshold, self.filter.species_threshold)
    }

    pub fn group_options(&self) -> GroupOptions {
        GroupOptions {
            thresholds: self.thresholds(),
            label_prefix: self.output.label_prefix.clone(),
            counting: self.parsing.species_counting,
            retention: self.parsing.retention,
        }
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, OrthoError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| OrthoError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| OrthoError::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), OrthoError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| OrthoError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}
