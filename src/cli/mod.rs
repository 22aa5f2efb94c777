pub mod commands;
pub mod output;

use crate::core::config::Config;
use crate::ortho::{GroupOptions, RetentionPolicy, SpeciesCounting, Thresholds};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "orthogroups",
    version,
    about = "Filter and summarise ortholog groups files",
    long_about = "Orthogroups parses OrthoMCL-style groups files, checks every cluster against \
                  gene copy-number and species coverage thresholds, exports the compliant \
                  clusters and aggregates per-file statistics into a summary table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of threads to use (0 = all available)
    #[arg(short = 'j', long, default_value = "0", global = true)]
    pub threads: usize,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", global = true, env = "ORTHOGROUPS_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter one groups file and export the compliant clusters
    Filter(commands::filter::FilterArgs),

    /// Aggregate statistics over several groups files
    Stats(commands::stats::StatsArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Threshold and parsing flags shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GroupFlags {
    /// Maximum number of gene copies per species
    #[arg(short = 'g', long, value_name = "N")]
    pub gene_threshold: Option<u32>,

    /// Minimum number of distinct species per cluster
    #[arg(short = 's', long, value_name = "N")]
    pub species_threshold: Option<u32>,

    /// Prefix for output file names
    #[arg(short = 'p', long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Count species by exact identifier match instead of substring occurrences
    #[arg(long)]
    pub exact_species: bool,
}

impl GroupFlags {
    pub fn gene(&self, config: &Config) -> Option<u32> {
        self.gene_threshold.or(config.filter.gene_threshold)
    }

    pub fn species(&self, config: &Config) -> Option<u32> {
        self.species_threshold.or(config.filter.species_threshold)
    }

    /// Merge the flags over the configuration file values.
    pub fn group_options(&self, config: &Config) -> GroupOptions {
        let mut options = config.group_options();
        options.thresholds = Thresholds::from_options(self.gene(config), self.species(config));
        if let Some(prefix) = &self.prefix {
            options.label_prefix = prefix.clone();
        }
        if self.exact_species {
            options.counting = SpeciesCounting::Exact;
        }
        options
    }

    pub fn with_retention(&self, config: &Config, retain_all: bool) -> GroupOptions {
        let mut options = self.group_options(config);
        if retain_all {
            options.retention = RetentionPolicy::All;
        }
        options
    }
}
