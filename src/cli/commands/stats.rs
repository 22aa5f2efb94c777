use crate::cli::{GroupFlags, OutputFormat};
use crate::core::config::Config;
use crate::ortho::{GroupStatistics, MultiGroups};
use crate::utils::lines::read_basic_list;
use crate::utils::progress::create_spinner;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

#[derive(Args)]
pub struct StatsArgs {
    /// Groups files to summarise, in report order
    #[arg(value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// File listing groups files, one per line (appended after FILE arguments)
    #[arg(short, long, value_name = "FILE")]
    pub list: Option<PathBuf>,

    /// Report file name; written as <prefix>.<name>
    #[arg(short, long, value_name = "NAME")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub flags: GroupFlags,

    /// Keep every cluster even when no thresholds are given
    #[arg(long)]
    pub retain_all: bool,

    /// Summary format printed to stdout
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct ReportRow<'a> {
    source: &'a str,
    #[serde(flatten)]
    statistics: &'a GroupStatistics,
}

impl StatsArgs {
    /// Positional inputs followed by the entries of the list file
    pub fn collect_inputs(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut inputs = self.inputs.clone();
        if let Some(list) = &self.list {
            inputs.extend(read_basic_list(list)?.into_iter().map(PathBuf::from));
        }
        if inputs.is_empty() {
            anyhow::bail!("No groups files given; pass FILE arguments or --list");
        }
        Ok(inputs)
    }
}

pub fn run(args: StatsArgs, config: &Config) -> anyhow::Result<()> {
    let inputs = args.collect_inputs()?;
    let options = args.flags.with_retention(config, args.retain_all);

    if options.thresholds.is_none() {
        warn!("Gene and species thresholds are both needed for compliance counts");
    }

    let spinner = create_spinner(&format!("Parsing {} groups files...", inputs.len()));
    let multi = MultiGroups::open(&inputs, &options)?;
    spinner.finish_and_clear();

    let output_name = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.statistics_name));
    let written = multi.aggregate_statistics(&output_name)?;

    let rows = multi.statistics();
    match args.format {
        OutputFormat::Json => {
            let report: Vec<ReportRow> = rows
                .iter()
                .map(|(source, statistics)| ReportRow { source, statistics })
                .collect();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => print_table(&rows, &written),
    }

    Ok(())
}

fn print_table(rows: &[(String, GroupStatistics)], written: &std::path::Path) {
    use crate::cli::output::*;
    use crate::ortho::multi_group::REPORT_HEADER;
    use comfy_table::Cell;

    section_header_with_line("Groups Statistics");

    let mut table = create_standard_table();
    table.set_header(REPORT_HEADER.iter().map(|title| header_cell(title)));

    for (source, stats) in rows {
        let mut cells = vec![Cell::new(source)];
        cells.extend(
            stats
                .as_row()
                .iter()
                .map(|value| Cell::new(format_number(*value))),
        );
        table.add_row(cells);
    }

    println!("{table}");
    success(&format!("Statistics written to {}", written.display()));
}
