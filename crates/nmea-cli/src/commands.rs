use std::fs;
use std::io;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::warn;

use nmea_cli::interactive::run_prompt_loop;
use nmea_cli::pipeline::{ConvertRequest, convert};
use nmea_core::RunSummary;
use nmea_model::ConversionConfig;

use crate::cli::{ConvertArgs, InteractiveArgs};
use crate::summary::{apply_table_style, print_summary};

pub fn run_constellations(config: &ConversionConfig) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Constellation", "Talker", "PRN range", "GSV address"]);
    apply_table_style(&mut table);
    for constellation in &config.constellations {
        table.add_row(vec![
            constellation.kind.to_string(),
            constellation.talker.clone(),
            format!("{}-{}", constellation.first_prn, constellation.last_prn),
            constellation.gsv_address(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_convert(args: &ConvertArgs, config: &ConversionConfig) -> Result<RunSummary> {
    let request = ConvertRequest {
        dr: args.dr.clone(),
        gnss: args.gnss.clone(),
        types: args.types.clone(),
        output_dir: args.output_dir.clone(),
    };
    let summary = convert(&request, config, true)?;
    if let Some(path) = &args.summary_json {
        let json = serde_json::to_string_pretty(&summary).context("serialize run summary")?;
        fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    }
    Ok(summary)
}

/// Runs conversions until `e`; a failed conversion is reported and the
/// prompt continues.
pub fn run_interactive(args: &InteractiveArgs, config: &ConversionConfig) -> Result<()> {
    let stdin = io::stdin();
    run_prompt_loop(stdin.lock(), io::stdout(), &args.output_dir, |request| {
        match convert(&request, config, true) {
            Ok(summary) => print_summary(&summary),
            Err(error) => {
                warn!(types = %request.types, "conversion failed");
                eprintln!("error: {error:#}");
            }
        }
    })
    .context("read prompt input")
}
