//! Per-constellation satellite column discovery.
//!
//! Satellite columns come in runs headed by `SV<NN> Used`:
//!
//! ```text
//! SV05 Used | SV05 Azim (deg) | SV05 Elev (deg)
//! SV05 Used | SV05 CNO | SV05 Azim (deg) | SV05 Elev (deg)
//! SV05 Used | SV05 CNO (L1) | SV05 Azim (deg) | SV05 Elev (deg)
//! SV05 Used | SV05 CNO (L1) | SV05 CNO (L5) | SV05 Azim (deg) | SV05 Elev (deg)
//! ```

use tracing::{debug, info, warn};

use nmea_ingest::{RecordSource, is_truthy};
use nmea_model::{CnoReading, Constellation, SatelliteRecord, SchemaError};

use crate::schema::{ColumnLookup, SchemaResolver};

/// A carrier-to-noise column and its band label, if the header carries one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CnoColumn {
    pub column: usize,
    pub band: Option<String>,
}

/// Resolved columns of one PRN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SatelliteSlot {
    pub prn: u16,
    pub used: usize,
    /// Zero, one or two CNO columns directly after `used`.
    pub cno: Vec<CnoColumn>,
    pub azimuth: usize,
    pub elevation: usize,
}

impl SatelliteSlot {
    /// The satellite's record for a data row, when its Used flag is set.
    pub fn read(&self, source: &dyn RecordSource, row: usize) -> Option<SatelliteRecord> {
        if !is_truthy(source.cell(row, self.used)) {
            return None;
        }
        let text = |column: usize| source.cell(row, column).map(str::to_string);
        let reading = |slot: Option<&CnoColumn>| {
            slot.map(|cno| CnoReading {
                value: text(cno.column),
                band: cno.band.clone(),
            })
            .unwrap_or_default()
        };
        Some(SatelliteRecord {
            prn: self.prn,
            elevation: text(self.elevation),
            azimuth: text(self.azimuth),
            cno1: reading(self.cno.first()),
            cno2: reading(self.cno.get(1)),
        })
    }
}

/// Satellite slots discovered for one constellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstellationMap {
    pub constellation: Constellation,
    pub slots: Vec<SatelliteSlot>,
}

impl ConstellationMap {
    /// Scans the header row for the constellation's PRN range.
    ///
    /// Returns `None` when no PRN of the range is present, or when a PRN's
    /// run of columns is malformed; the latter drops the whole constellation.
    pub fn resolve(resolver: &SchemaResolver<'_>, constellation: &Constellation) -> Option<Self> {
        let headers = &resolver.config().headers;
        let mut next = 0;
        let mut slots = Vec::new();
        for prn in constellation.prns() {
            let ColumnLookup::Found(used) = resolver.lookup(&headers.sv_used(prn), next) else {
                continue;
            };
            let Some(cno) = cno_columns(resolver, prn, used) else {
                warn!(
                    constellation = %constellation.kind,
                    prn,
                    column = used + 1,
                    "unexpected header after SV Used, constellation dropped"
                );
                return None;
            };
            let azimuth = used + cno.len() + 1;
            let elevation = azimuth + 1;
            for (column, expected) in [
                (azimuth, headers.sv_azimuth(prn)),
                (elevation, headers.sv_elevation(prn)),
            ] {
                if !resolver.header_is(column, &expected) {
                    warn!(
                        constellation = %constellation.kind,
                        prn,
                        header = %expected,
                        "missing satellite header, constellation dropped"
                    );
                    return None;
                }
            }
            slots.push(SatelliteSlot {
                prn,
                used,
                cno,
                azimuth,
                elevation,
            });
            next = elevation + 1;
        }
        if slots.is_empty() {
            debug!(constellation = %constellation.kind, "no satellite columns");
            return None;
        }
        Some(Self {
            constellation: constellation.clone(),
            slots,
        })
    }

    /// Satellites flagged as used in a data row, in PRN order.
    pub fn used_satellites(&self, source: &dyn RecordSource, row: usize) -> Vec<SatelliteRecord> {
        self.slots
            .iter()
            .filter_map(|slot| slot.read(source, row))
            .collect()
    }
}

/// Detects the CNO columns following a `SV<NN> Used` column.
fn cno_columns(resolver: &SchemaResolver<'_>, prn: u16, used: usize) -> Option<Vec<CnoColumn>> {
    let config = resolver.config();
    let headers = &config.headers;
    let first = used + 1;
    if resolver.header_is(first, &headers.sv_cno(prn)) {
        return Some(vec![CnoColumn {
            column: first,
            band: None,
        }]);
    }
    if resolver.header_is(first, &headers.sv_azimuth(prn)) {
        return Some(Vec::new());
    }
    let band_at = |column: usize| {
        config
            .band_labels
            .iter()
            .find(|band| resolver.header_is(column, &headers.sv_cno_band(prn, band)))
            .cloned()
    };
    let mut cno = vec![CnoColumn {
        column: first,
        band: Some(band_at(first)?),
    }];
    if let Some(band) = band_at(first + 1) {
        cno.push(CnoColumn {
            column: first + 1,
            band: Some(band),
        });
    }
    Some(cno)
}

/// Every constellation that resolved, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SatelliteCatalog {
    maps: Vec<ConstellationMap>,
}

impl SatelliteCatalog {
    /// Resolves all configured constellations; fails only when none resolve.
    pub fn resolve(gnss: &SchemaResolver<'_>) -> Result<Self, SchemaError> {
        let maps: Vec<ConstellationMap> = gnss
            .config()
            .constellations
            .iter()
            .filter_map(|constellation| ConstellationMap::resolve(gnss, constellation))
            .collect();
        if maps.is_empty() {
            return Err(SchemaError::NoSatellites);
        }
        for map in &maps {
            info!(
                constellation = %map.constellation.kind,
                satellites = map.slots.len(),
                "satellite columns resolved"
            );
        }
        Ok(Self { maps })
    }

    pub fn maps(&self) -> &[ConstellationMap] {
        &self.maps
    }
}

#[cfg(test)]
mod tests {
    use nmea_ingest::CsvTable;
    use nmea_model::{ConstellationKind, ConversionConfig, TableRole};

    use super::*;

    fn headers(names: &[&str]) -> CsvTable {
        let mut all: Vec<String> = names.iter().map(|h| h.to_string()).collect();
        all.push("end".to_string());
        CsvTable::new(all, Vec::new())
    }

    fn gps(config: &ConversionConfig) -> &Constellation {
        &config.constellations[0]
    }

    #[test]
    fn detects_zero_one_and_two_cno_columns() {
        let config = ConversionConfig::default();
        let table = headers(&[
            "SV01 Used",
            "SV01 Azim (deg)",
            "SV01 Elev (deg)",
            "SV02 Used",
            "SV02 CNO",
            "SV02 Azim (deg)",
            "SV02 Elev (deg)",
            "SV03 Used",
            "SV03 CNO (L1)",
            "SV03 Azim (deg)",
            "SV03 Elev (deg)",
            "SV04 Used",
            "SV04 CNO (L1)",
            "SV04 CNO (L5)",
            "SV04 Azim (deg)",
            "SV04 Elev (deg)",
        ]);
        let resolver = SchemaResolver::new(&table, TableRole::Gnss, &config);
        let map = ConstellationMap::resolve(&resolver, gps(&config)).expect("gps resolves");

        let layout: Vec<(u16, usize, usize, usize)> = map
            .slots
            .iter()
            .map(|slot| (slot.prn, slot.cno.len(), slot.azimuth, slot.elevation))
            .collect();
        assert_eq!(
            layout,
            vec![(1, 0, 1, 2), (2, 1, 5, 6), (3, 1, 9, 10), (4, 2, 14, 15)]
        );
        assert_eq!(map.slots[1].cno[0].band, None);
        assert_eq!(map.slots[2].cno[0].band.as_deref(), Some("L1"));
        assert_eq!(map.slots[3].cno[1].band.as_deref(), Some("L5"));
    }

    #[test]
    fn missing_elevation_drops_only_that_constellation() {
        let config = ConversionConfig::default();
        let table = headers(&[
            "SV01 Used",
            "SV01 CNO (L1)",
            "SV01 Azim (deg)",
            "SV01 Elev (deg)",
            "SV65 Used",
            "SV65 CNO (G1)",
            "SV65 Azim (deg)",
            "SV66 Used",
        ]);
        let resolver = SchemaResolver::new(&table, TableRole::Gnss, &config);
        let catalog = SatelliteCatalog::resolve(&resolver).expect("gps survives");
        let kinds: Vec<ConstellationKind> = catalog
            .maps()
            .iter()
            .map(|map| map.constellation.kind)
            .collect();
        assert_eq!(kinds, vec![ConstellationKind::Gps]);
    }

    #[test]
    fn unknown_band_label_drops_constellation() {
        let config = ConversionConfig::default();
        let table = headers(&[
            "SV07 Used",
            "SV07 CNO (X9)",
            "SV07 Azim (deg)",
            "SV07 Elev (deg)",
        ]);
        let resolver = SchemaResolver::new(&table, TableRole::Gnss, &config);
        assert!(ConstellationMap::resolve(&resolver, gps(&config)).is_none());
        assert_eq!(
            SatelliteCatalog::resolve(&resolver),
            Err(SchemaError::NoSatellites)
        );
    }

    #[test]
    fn used_satellites_follow_flag_and_layout() {
        let config = ConversionConfig::default();
        let table = CsvTable::new(
            [
                "SV01 Used",
                "SV01 CNO (L1)",
                "SV01 CNO (L5)",
                "SV01 Azim (deg)",
                "SV01 Elev (deg)",
                "SV02 Used",
                "SV02 CNO",
                "SV02 Azim (deg)",
                "SV02 Elev (deg)",
                "end",
            ]
            .iter()
            .map(|h| h.to_string())
            .collect(),
            vec![
                ["1", "45", "#N/A", "120", "35", "0", "30", "10", "5", ""]
                    .iter()
                    .map(|v| v.to_string())
                    .collect(),
            ],
        );
        let resolver = SchemaResolver::new(&table, TableRole::Gnss, &config);
        let map = ConstellationMap::resolve(&resolver, gps(&config)).expect("gps resolves");
        let used = map.used_satellites(&table, 0);
        assert_eq!(
            used,
            vec![SatelliteRecord {
                prn: 1,
                elevation: Some("35".to_string()),
                azimuth: Some("120".to_string()),
                cno1: CnoReading {
                    value: Some("45".to_string()),
                    band: Some("L1".to_string()),
                },
                cno2: CnoReading {
                    value: None,
                    band: Some("L5".to_string()),
                },
            }]
        );
    }
}
