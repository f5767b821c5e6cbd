//! Satellite constellation descriptors.
//!
//! Each constellation owns a fixed PRN range in the source tables and a
//! two-letter talker ID used as the GSV sentence prefix.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// GNSS constellations present in the satellite columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstellationKind {
    Gps,
    Glonass,
    Sbas,
    Galileo,
    Qzss,
    Beidou,
}

impl ConstellationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gps => "GPS",
            Self::Glonass => "GLONASS",
            Self::Sbas => "SBAS",
            Self::Galileo => "Galileo",
            Self::Qzss => "QZSS",
            Self::Beidou => "BeiDou",
        }
    }
}

impl fmt::Display for ConstellationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptor driving satellite column discovery and GSV rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constellation {
    pub kind: ConstellationKind,
    /// Talker ID prefixed to `GSV` (`GP`, `GL`, ...).
    pub talker: String,
    pub first_prn: u16,
    pub last_prn: u16,
}

impl Constellation {
    pub fn new(kind: ConstellationKind, talker: &str, first_prn: u16, last_prn: u16) -> Self {
        Self {
            kind,
            talker: talker.to_string(),
            first_prn,
            last_prn,
        }
    }

    pub fn prns(&self) -> RangeInclusive<u16> {
        self.first_prn..=self.last_prn
    }

    /// Sentence address for this constellation's satellites-in-view output.
    pub fn gsv_address(&self) -> String {
        format!("{}GSV", self.talker)
    }

    /// Default table in emission order. SBAS shares the GPS talker.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(ConstellationKind::Gps, "GP", 1, 32),
            Self::new(ConstellationKind::Sbas, "GP", 120, 138),
            Self::new(ConstellationKind::Glonass, "GL", 65, 96),
            Self::new(ConstellationKind::Galileo, "GA", 150, 185),
            Self::new(ConstellationKind::Qzss, "GQ", 193, 200),
            Self::new(ConstellationKind::Beidou, "GB", 201, 246),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ranges_do_not_overlap() {
        let mut table = Constellation::defaults();
        table.sort_by_key(|c| c.first_prn);
        for pair in table.windows(2) {
            assert!(pair[0].last_prn < pair[1].first_prn);
        }
    }

    #[test]
    fn sbas_is_emitted_with_gps_talker() {
        let table = Constellation::defaults();
        assert_eq!(table[1].kind, ConstellationKind::Sbas);
        assert_eq!(table[1].gsv_address(), "GPGSV");
    }
}
