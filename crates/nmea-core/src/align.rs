//! Forward-only alignment of primary ticks against GNSS rows.
//!
//! The cursor only moves forward. A primary tick that is behind the GNSS row
//! at the cursor is dropped rather than searched for backwards, because the
//! two tables are sampled at different rates and the GNSS side may have gaps.

use tracing::trace;

use nmea_ingest::{RecordSource, parse_f64, parse_week, sheet_row};
use nmea_model::TimeKey;

use crate::schema::TimeColumns;

/// Reads the week/time-of-week key of a data row.
pub fn read_time_key(source: &dyn RecordSource, row: usize, columns: TimeColumns) -> Option<TimeKey> {
    let week = parse_week(source.cell(row, columns.week))?;
    let time_of_week = parse_f64(source.cell(row, columns.time_of_week))?;
    Some(TimeKey::new(week, time_of_week))
}

/// Why a tick found no GNSS row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum MissKind {
    /// The forward scan ran off the end of the GNSS table.
    GnssGap,
    /// The tick is earlier than the GNSS row at the cursor.
    DrBehind,
}

/// Result of aligning one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentOutcome {
    /// GNSS data row shared by every message family for this tick.
    Matched(usize),
    Miss(MissKind),
    /// The tick's own time key is unreadable; nothing was attempted.
    Ignored,
}

impl AlignmentOutcome {
    pub fn matched_row(self) -> Option<usize> {
        match self {
            Self::Matched(row) => Some(row),
            _ => None,
        }
    }
}

/// Owns the GNSS cursor for one conversion run.
pub struct TimeAligner<'a> {
    gnss: &'a dyn RecordSource,
    columns: TimeColumns,
    cursor: usize,
}

impl<'a> TimeAligner<'a> {
    pub fn new(gnss: &'a dyn RecordSource, columns: TimeColumns) -> Self {
        Self {
            gnss,
            columns,
            cursor: 0,
        }
    }

    /// Next GNSS data row to compare against.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn align(&mut self, tick: Option<TimeKey>) -> AlignmentOutcome {
        let Some(tick) = tick else {
            return AlignmentOutcome::Ignored;
        };
        if self.cursor >= self.gnss.row_count() {
            return AlignmentOutcome::Miss(MissKind::GnssGap);
        }
        let current = read_time_key(self.gnss, self.cursor, self.columns);
        if current == Some(tick) {
            let row = self.cursor;
            self.cursor += 1;
            return AlignmentOutcome::Matched(row);
        }
        let gnss_lagging = current.is_none_or(|current| tick > current);
        if !gnss_lagging {
            trace!(
                gnss_row = sheet_row(self.cursor),
                week = tick.week,
                time_of_week = tick.time_of_week,
                "tick behind GNSS cursor"
            );
            return AlignmentOutcome::Miss(MissKind::DrBehind);
        }
        let found = (self.cursor + 1..self.gnss.row_count())
            .find(|&row| read_time_key(self.gnss, row, self.columns) == Some(tick));
        match found {
            Some(row) => {
                self.cursor = row + 1;
                AlignmentOutcome::Matched(row)
            }
            None => {
                trace!(
                    week = tick.week,
                    time_of_week = tick.time_of_week,
                    "no GNSS row for tick"
                );
                AlignmentOutcome::Miss(MissKind::GnssGap)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use nmea_ingest::CsvTable;

    use super::*;

    fn gnss(times: &[&str]) -> CsvTable {
        CsvTable::new(
            vec!["Week #".into(), "Time of Week (sec GPS)".into()],
            times
                .iter()
                .map(|t| vec!["2190".to_string(), t.to_string()])
                .collect(),
        )
    }

    const COLUMNS: TimeColumns = TimeColumns {
        week: 0,
        time_of_week: 1,
    };

    fn key(tow: f64) -> Option<TimeKey> {
        Some(TimeKey::new(2190, tow))
    }

    #[test]
    fn equal_keys_advance_by_one() {
        let table = gnss(&["1.0", "1.1", "1.2"]);
        let mut aligner = TimeAligner::new(&table, COLUMNS);
        assert_eq!(aligner.align(key(1.0)), AlignmentOutcome::Matched(0));
        assert_eq!(aligner.align(key(1.1)), AlignmentOutcome::Matched(1));
        assert_eq!(aligner.cursor(), 2);
    }

    #[test]
    fn gnss_gap_scans_forward() {
        let table = gnss(&["1.0", "1.2", "1.4"]);
        let mut aligner = TimeAligner::new(&table, COLUMNS);
        assert_eq!(aligner.align(key(1.2)), AlignmentOutcome::Matched(1));
        assert_eq!(aligner.cursor(), 2);
    }

    #[test]
    fn exhausted_scan_leaves_cursor() {
        let table = gnss(&["1.0", "1.2"]);
        let mut aligner = TimeAligner::new(&table, COLUMNS);
        assert_eq!(aligner.align(key(1.1)), AlignmentOutcome::Miss(MissKind::GnssGap));
        assert_eq!(aligner.cursor(), 0);
        assert_eq!(aligner.align(key(1.0)), AlignmentOutcome::Matched(0));
    }

    #[test]
    fn dr_behind_does_not_rewind() {
        let table = gnss(&["1.0", "1.2"]);
        let mut aligner = TimeAligner::new(&table, COLUMNS);
        assert_eq!(aligner.align(key(1.2)), AlignmentOutcome::Matched(1));
        assert_eq!(aligner.align(key(1.0)), AlignmentOutcome::Miss(MissKind::GnssGap));
        assert_eq!(aligner.cursor(), 2);

        let table = gnss(&["2.0", "2.1"]);
        let mut aligner = TimeAligner::new(&table, COLUMNS);
        assert_eq!(aligner.align(key(1.9)), AlignmentOutcome::Miss(MissKind::DrBehind));
        assert_eq!(aligner.cursor(), 0);
    }

    #[test]
    fn unreadable_keys() {
        let table = gnss(&["#N/A", "1.1"]);
        let mut aligner = TimeAligner::new(&table, COLUMNS);
        assert_eq!(aligner.align(None), AlignmentOutcome::Ignored);
        assert_eq!(aligner.align(key(1.1)), AlignmentOutcome::Matched(1));
    }

    #[test]
    fn cursor_never_decreases() {
        let table = gnss(&["1.0", "1.1", "1.3", "1.4", "1.6", "1.7"]);
        let mut aligner = TimeAligner::new(&table, COLUMNS);
        let mut last = aligner.cursor();
        for tow in [0.9, 1.0, 1.05, 1.1, 1.2, 1.3, 1.35, 1.0, 1.6, 1.65, 1.7, 1.8] {
            aligner.align(key(tow));
            assert!(aligner.cursor() >= last);
            last = aligner.cursor();
        }
        assert_eq!(last, 6);
    }
}
