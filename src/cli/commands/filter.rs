use crate::cli::{GroupFlags, OutputFormat};
use crate::core::config::Config;
use crate::ortho::{Group, GroupStatistics, Thresholds};
use crate::utils::progress::create_spinner;
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct FilterArgs {
    /// Input groups file (plain text or .gz)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Filtered groups output (default: <prefix>.filtered_groups)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub flags: GroupFlags,

    /// Summary format printed to stdout
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct FilterSummary<'a> {
    source: String,
    output: String,
    thresholds: Thresholds,
    #[serde(flatten)]
    statistics: &'a GroupStatistics,
}

pub fn run(args: FilterArgs, config: &Config) -> anyhow::Result<()> {
    let thresholds = Thresholds::require(args.flags.gene(config), args.flags.species(config))?;
    let options = args.flags.group_options(config);

    let spinner = create_spinner(&format!("Loading {}...", args.input.display()));
    let group = Group::open(&args.input, &options)?;
    spinner.finish_and_clear();

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| group.prefixed_output(&config.output.filtered_name));

    let stats = group.statistics();
    group.export_filtered(&output)?;

    match args.format {
        OutputFormat::Json => {
            let summary = FilterSummary {
                source: group.source().display().to_string(),
                output: output.display().to_string(),
                thresholds,
                statistics: &stats,
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => print_text_summary(&group, &stats, thresholds, &output),
    }

    Ok(())
}

fn print_text_summary(group: &Group, stats: &GroupStatistics, thresholds: Thresholds, output: &Path) {
    use crate::cli::output::*;

    section_header_with_line(&format!("Groups file {}", group.source().display()));

    tree_item(false, "Total clusters", Some(&format_number(stats.total_clusters)));
    tree_item(false, "Total sequences", Some(&format_number(stats.total_sequences)));

    let compliance = vec![
        (
            "Species threshold",
            format!(
                "≥ {} species: {} ({})",
                thresholds.species,
                format_number(stats.species_compliant),
                format_share(stats.species_compliant, stats.total_clusters)
            ),
        ),
        (
            "Gene threshold",
            format!(
                "≤ {} copies: {} ({})",
                thresholds.gene,
                format_number(stats.gene_compliant),
                format_share(stats.gene_compliant, stats.total_clusters)
            ),
        ),
        (
            "Both",
            format!(
                "{} ({})",
                format_number(stats.both_compliant),
                format_share(stats.both_compliant, stats.total_clusters)
            ),
        ),
    ];
    tree_section("Compliant clusters", compliance, true);
    println!();

    if stats.both_compliant == 0 {
        warning(&format!(
            "No cluster passed both thresholds; {} is empty",
            output.display()
        ));
    } else {
        success(&format!(
            "Wrote {} clusters to {}",
            format_number(stats.both_compliant),
            output.display()
        ));
    }
}
