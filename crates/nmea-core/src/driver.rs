//! Conversion planning and the per-tick loop.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use nmea_ingest::{RecordSource, parse_f64, sheet_row};
use nmea_model::{ConversionConfig, MessageType, PathError, TableRole, TypeSelector};

use crate::align::{AlignmentOutcome, MissKind, TimeAligner, read_time_key};
use crate::catalog::SatelliteCatalog;
use crate::error::Result;
use crate::schema::{GgaColumns, GsaColumns, RmcColumns, SchemaResolver, TimeColumns};
use crate::segment::SentenceSegmenter;
use crate::sentence::{Sentence, SentenceBuilder};

/// Every column map a run needs, resolved before the first tick.
pub struct ConversionPlan<'a> {
    config: &'a ConversionConfig,
    primary: &'a dyn RecordSource,
    primary_role: TableRole,
    gnss: &'a dyn RecordSource,
    selector: TypeSelector,
    primary_time: TimeColumns,
    gnss_time: TimeColumns,
    gga: Option<GgaColumns>,
    rmc: Option<RmcColumns>,
    gsa: Option<GsaColumns>,
    satellites: Option<SatelliteCatalog>,
}

impl<'a> ConversionPlan<'a> {
    /// Chooses the primary table and resolves every requested family.
    ///
    /// The DR table drives the ticks unless it is absent or its first
    /// time-of-week disagrees with the GNSS table's, in which case the GNSS
    /// table serves as both primary and quality source.
    pub fn resolve(
        dr: Option<&'a dyn RecordSource>,
        gnss: &'a dyn RecordSource,
        selector: &TypeSelector,
        config: &'a ConversionConfig,
    ) -> Result<Self> {
        let gnss_resolver = SchemaResolver::new(gnss, TableRole::Gnss, config);
        let gnss_time = TimeColumns::resolve(&gnss_resolver)?;

        let (primary, primary_role, primary_time) = match dr {
            Some(dr) => {
                let dr_time = TimeColumns::resolve(&SchemaResolver::new(dr, TableRole::Dr, config))?;
                let dr_first = parse_f64(dr.cell(0, dr_time.time_of_week));
                let gnss_first = parse_f64(gnss.cell(0, gnss_time.time_of_week));
                if dr_first == gnss_first {
                    (dr, TableRole::Dr, dr_time)
                } else {
                    warn!(
                        dr_time_of_week = ?dr_first,
                        gnss_time_of_week = ?gnss_first,
                        "first rows disagree, tables may come from different logs; using GNSS as primary"
                    );
                    (gnss, TableRole::Gnss, gnss_time)
                }
            }
            None => (gnss, TableRole::Gnss, gnss_time),
        };
        let primary_resolver = SchemaResolver::new(primary, primary_role, config);

        let gga = if selector.contains(MessageType::Gga) {
            if dr.is_none() {
                return Err(PathError::MissingDr(MessageType::Gga).into());
            }
            let columns = GgaColumns::resolve(&primary_resolver, &gnss_resolver)?;
            info!(table = %primary_role, mode = columns.altitude.describe(), "altitude source");
            Some(columns)
        } else {
            None
        };
        let rmc = if selector.contains(MessageType::Rmc) {
            Some(RmcColumns::resolve(&gnss_resolver)?)
        } else {
            None
        };
        let satellites = if selector.wants_satellites() {
            Some(SatelliteCatalog::resolve(&gnss_resolver)?)
        } else {
            None
        };
        let gsa = if selector.contains(MessageType::Gsa) {
            Some(GsaColumns::resolve(&gnss_resolver)?)
        } else {
            None
        };

        Ok(Self {
            config,
            primary,
            primary_role,
            gnss,
            selector: selector.clone(),
            primary_time,
            gnss_time,
            gga,
            rmc,
            gsa,
            satellites,
        })
    }

    pub fn primary_role(&self) -> TableRole {
        self.primary_role
    }

    /// Number of ticks the run will iterate.
    pub fn tick_count(&self) -> usize {
        self.primary.row_count()
    }

    pub fn satellites(&self) -> Option<&SatelliteCatalog> {
        self.satellites.as_ref()
    }
}

/// Sentences written per family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentenceCounts {
    pub gga: usize,
    pub rmc: usize,
    pub gsv: usize,
    pub gsa: usize,
}

impl SentenceCounts {
    pub fn total(&self) -> usize {
        self.gga + self.rmc + self.gsv + self.gsa
    }
}

/// Outcome of one conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub primary: TableRole,
    pub types: String,
    pub ticks: usize,
    pub matched: usize,
    pub gnss_gaps: usize,
    pub dr_behind: usize,
    pub ignored: usize,
    pub sentences: SentenceCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl RunSummary {
    fn new(primary: TableRole, selector: &TypeSelector) -> Self {
        Self {
            primary,
            types: selector.to_string(),
            ticks: 0,
            matched: 0,
            gnss_gaps: 0,
            dr_behind: 0,
            ignored: 0,
            sentences: SentenceCounts::default(),
            output: None,
        }
    }

    /// Ticks that were aligned but found no GNSS row.
    pub fn misses(&self) -> usize {
        self.gnss_gaps + self.dr_behind
    }

    fn record(&mut self, outcome: AlignmentOutcome) {
        match outcome {
            AlignmentOutcome::Matched(_) => self.matched += 1,
            AlignmentOutcome::Miss(MissKind::GnssGap) => self.gnss_gaps += 1,
            AlignmentOutcome::Miss(MissKind::DrBehind) => self.dr_behind += 1,
            AlignmentOutcome::Ignored => self.ignored += 1,
        }
    }
}

/// Drives one conversion: align each tick, render its sentences, write them.
pub struct RunDriver<'a> {
    plan: ConversionPlan<'a>,
}

impl<'a> RunDriver<'a> {
    pub fn new(plan: ConversionPlan<'a>) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &ConversionPlan<'a> {
        &self.plan
    }

    /// Writes every tick's sentences to `out`, one line each, in the order
    /// GGA, RMC, then per constellation its GSV batch followed by its GSA
    /// sentences. `on_tick` is called after each tick is written.
    pub fn run<W: Write>(&self, out: &mut W, mut on_tick: impl FnMut(usize)) -> Result<RunSummary> {
        let plan = &self.plan;
        let span = info_span!(
            "convert",
            primary = %plan.primary_role,
            types = %plan.selector,
            ticks = plan.tick_count()
        );
        let _guard = span.enter();

        let builder = SentenceBuilder::new(plan.config);
        let segmenter = SentenceSegmenter::new(plan.config);
        let mut aligner = TimeAligner::new(plan.gnss, plan.gnss_time);
        let mut summary = RunSummary::new(plan.primary_role, &plan.selector);

        for tick in 0..plan.tick_count() {
            let key = read_time_key(plan.primary, tick, plan.primary_time);
            let outcome = aligner.align(key);
            summary.ticks += 1;
            summary.record(outcome);
            match outcome {
                AlignmentOutcome::Ignored => {
                    debug!(row = sheet_row(tick), "unreadable time key, tick ignored");
                }
                AlignmentOutcome::Miss(kind) => {
                    debug!(row = sheet_row(tick), ?kind, "no GNSS row for tick");
                }
                AlignmentOutcome::Matched(_) => {}
            }

            if let Some(columns) = &plan.gga {
                let sentence =
                    builder.gga(plan.primary, plan.gnss, columns, tick, outcome.matched_row());
                write_sentences(out, std::slice::from_ref(&sentence))?;
                summary.sentences.gga += 1;
            }

            if let Some(row) = outcome.matched_row() {
                if let Some(sentence) = plan
                    .rmc
                    .as_ref()
                    .and_then(|columns| builder.rmc(plan.gnss, columns, row))
                {
                    write_sentences(out, std::slice::from_ref(&sentence))?;
                    summary.sentences.rmc += 1;
                }

                if let Some(catalog) = &plan.satellites {
                    for map in catalog.maps() {
                        let used = map.used_satellites(plan.gnss, row);
                        let gsv = segmenter.gsv(&map.constellation, &used);
                        if gsv.is_empty() {
                            continue;
                        }
                        write_sentences(out, &gsv)?;
                        summary.sentences.gsv += gsv.len();
                        if let Some(columns) = &plan.gsa {
                            let gsa = segmenter.gsa(plan.gnss, columns, row, &used);
                            write_sentences(out, &gsa)?;
                            summary.sentences.gsa += gsa.len();
                        }
                    }
                }
            }

            on_tick(tick);
        }
        out.flush()?;

        info!(
            ticks = summary.ticks,
            matched = summary.matched,
            misses = summary.misses(),
            ignored = summary.ignored,
            sentences = summary.sentences.total(),
            "conversion finished"
        );
        Ok(summary)
    }
}

fn write_sentences<W: Write>(out: &mut W, sentences: &[Sentence]) -> std::io::Result<()> {
    for sentence in sentences {
        writeln!(out, "{sentence}")?;
    }
    Ok(())
}
