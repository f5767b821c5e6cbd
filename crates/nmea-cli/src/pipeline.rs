//! Conversion stages: validate, ingest, plan, write.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span};

use nmea_core::{ConversionPlan, OutputTarget, RunDriver, RunSummary};
use nmea_ingest::{CsvTable, RecordSource, read_csv_table};
use nmea_model::{ConversionConfig, PathError, TypeSelector};

/// Version tag embedded in output file names.
pub const OUTPUT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Inputs of one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertRequest {
    pub dr: Option<PathBuf>,
    pub gnss: Option<PathBuf>,
    pub types: String,
    pub output_dir: PathBuf,
}

/// Checks the selector and the paths it needs, before any file is touched.
pub fn validate(request: &ConvertRequest) -> Result<TypeSelector> {
    let selector = TypeSelector::parse(&request.types)
        .with_context(|| format!("invalid message types `{}`", request.types))?;
    selector.check_paths(request.dr.as_deref(), request.gnss.as_deref())?;
    Ok(selector)
}

pub fn ingest(path: &Path) -> Result<CsvTable> {
    let table = read_csv_table(path)?;
    info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "table loaded"
    );
    Ok(table)
}

/// Runs one conversion end to end and returns its summary.
///
/// The output file is flushed even when the run fails part way, so sentences
/// written up to that point stay on disk.
pub fn convert(
    request: &ConvertRequest,
    config: &ConversionConfig,
    show_progress: bool,
) -> Result<RunSummary> {
    let selector = validate(request)?;
    let gnss_path = request.gnss.as_deref().ok_or(PathError::MissingGnss)?;
    let span = info_span!("request", types = %selector, gnss = %gnss_path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let dr = request.dr.as_deref().map(ingest).transpose()?;
    let gnss = ingest(gnss_path)?;

    let plan = ConversionPlan::resolve(
        dr.as_ref().map(|table| table as &dyn RecordSource),
        &gnss,
        &selector,
        config,
    )?;

    let mut target = OutputTarget::create(&request.output_dir, OUTPUT_VERSION).with_context(|| {
        format!(
            "create output file in {}",
            request.output_dir.display()
        )
    })?;
    let progress = progress_bar(plan.tick_count(), show_progress);
    let outcome = RunDriver::new(plan).run(&mut target, |_| progress.inc(1));
    progress.finish_and_clear();

    let output = target.path().to_path_buf();
    let flushed = target.finish();
    let mut summary =
        outcome.with_context(|| format!("conversion stopped, partial output in {}", output.display()))?;
    let output = flushed.with_context(|| format!("flush {}", output.display()))?;
    info!(
        output = %output.display(),
        elapsed_ms = start.elapsed().as_millis(),
        "conversion written"
    );
    summary.output = Some(output);
    Ok(summary)
}

fn progress_bar(ticks: usize, show: bool) -> ProgressBar {
    if !show || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(ticks as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} ticks {eta}") {
        bar.set_style(style);
    }
    bar
}
