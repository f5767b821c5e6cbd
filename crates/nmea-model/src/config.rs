//! Conversion constants.
//!
//! Every header name, band label, PRN range, and numeric constant the
//! converter relies on lives in one [`ConversionConfig`] value that is built
//! once at startup and passed by reference.

use serde::{Deserialize, Serialize};

use crate::constellation::Constellation;

/// Symbolic header names expected in the first row of the source tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderNames {
    pub time_of_week: String,
    pub latitude: String,
    pub longitude: String,
    pub fix_type: String,
    pub sv_used_count: String,
    pub hdop: String,
    pub pdop: String,
    pub vdop: String,
    pub altitude_msl: String,
    pub altitude_wgs84: String,
    pub correction_age: String,
    pub week: String,
    pub speed: String,
    pub heading: String,
}

impl Default for HeaderNames {
    fn default() -> Self {
        Self {
            time_of_week: "Time of Week (sec GPS)".to_string(),
            latitude: "Latitude (deg)".to_string(),
            longitude: "Longitude (deg)".to_string(),
            fix_type: "Fix Type".to_string(),
            sv_used_count: "# SVs (used)".to_string(),
            hdop: "HDOP".to_string(),
            pdop: "PDOP".to_string(),
            vdop: "VDOP".to_string(),
            altitude_msl: "Altitude (m MSL)".to_string(),
            altitude_wgs84: "Altitude (m WGS-84)".to_string(),
            correction_age: "Age of Corrections (sec)".to_string(),
            week: "Week #".to_string(),
            speed: "Speed (m/s)".to_string(),
            heading: "Heading (deg)".to_string(),
        }
    }
}

impl HeaderNames {
    /// `SV<NN> Used` header for a PRN.
    pub fn sv_used(&self, prn: u16) -> String {
        format!("{} Used", sv_prefix(prn))
    }

    /// Unlabeled `SV<NN> CNO` header.
    pub fn sv_cno(&self, prn: u16) -> String {
        format!("{} CNO", sv_prefix(prn))
    }

    /// Band-labeled `SV<NN> CNO (<band>)` header.
    pub fn sv_cno_band(&self, prn: u16, band: &str) -> String {
        format!("{} CNO ({band})", sv_prefix(prn))
    }

    pub fn sv_azimuth(&self, prn: u16) -> String {
        format!("{} Azim (deg)", sv_prefix(prn))
    }

    pub fn sv_elevation(&self, prn: u16) -> String {
        format!("{} Elev (deg)", sv_prefix(prn))
    }
}

fn sv_prefix(prn: u16) -> String {
    format!("SV{prn:02}")
}

/// Immutable configuration for one converter process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    pub headers: HeaderNames,
    /// Carrier band labels that may suffix a CNO header.
    pub band_labels: Vec<String>,
    /// Constellations in GSV/GSA emission order.
    pub constellations: Vec<Constellation>,
    pub seconds_per_week: f64,
    /// Week counter modulus of the 10-bit broadcast week number.
    pub week_rollover: i64,
    /// Weeks below this value are lifted by `week_rollover` before conversion.
    pub baseline_week: f64,
    /// Multiplier from m/s to knots.
    pub knots_per_mps: f64,
    pub max_satellites_per_gsv: usize,
    pub gga_address: String,
    pub rmc_address: String,
    pub gsa_address: String,
    /// Constant closing field of every GGA sentence.
    pub datum_tag: String,
    /// When false, a header found in the table's last column is reported as
    /// not found, matching the historical lookup behavior.
    pub last_column_resolves: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            headers: HeaderNames::default(),
            band_labels: ["L1", "L2", "L5", "G1", "G2", "E1", "E5A", "E5B", "B1", "B2A", "B2I"]
                .into_iter()
                .map(String::from)
                .collect(),
            constellations: Constellation::defaults(),
            seconds_per_week: 604_800.0,
            week_rollover: 1024,
            baseline_week: baseline_week(2020, 1, 1),
            knots_per_mps: 1.944,
            max_satellites_per_gsv: 3,
            gga_address: "GPGGA".to_string(),
            rmc_address: "GNRMC".to_string(),
            gsa_address: "GNGSA".to_string(),
            datum_tag: "02".to_string(),
            last_column_resolves: false,
        }
    }
}

/// Approximate GPS week of a calendar anchor, counted from 1980.
fn baseline_week(year: i32, month: i32, day: i32) -> f64 {
    f64::from((year - 1980) * 52 + month * 4) + f64::from(day) / 7.0
}
