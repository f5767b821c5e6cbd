//! Time keys and satellite values passed between conversion stages.

use serde::{Deserialize, Serialize};

/// GPS week and time-of-week identifying one sample instant.
///
/// Ordering is by week, then time-of-week.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct TimeKey {
    pub week: i64,
    pub time_of_week: f64,
}

impl TimeKey {
    pub fn new(week: i64, time_of_week: f64) -> Self {
        Self { week, time_of_week }
    }
}

/// One carrier-to-noise reading and the band it was measured on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CnoReading {
    pub value: Option<String>,
    pub band: Option<String>,
}

/// A satellite flagged as used in one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatelliteRecord {
    pub prn: u16,
    pub elevation: Option<String>,
    pub azimuth: Option<String>,
    pub cno1: CnoReading,
    pub cno2: CnoReading,
}
