//! Header resolution: symbolic field names to column indices.
//!
//! Every message family gets its own typed column map, resolved once before
//! the tick loop. Construction fails on the first unresolved required header.

use nmea_ingest::RecordSource;
use nmea_model::{ConversionConfig, MessageType, SchemaError, TableRole};

/// Outcome of a header search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnLookup {
    Found(usize),
    NotFound,
}

impl ColumnLookup {
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Found(column) => Some(column),
            Self::NotFound => None,
        }
    }
}

/// Header lookups against one table.
#[derive(Clone, Copy)]
pub struct SchemaResolver<'a> {
    source: &'a dyn RecordSource,
    table: TableRole,
    config: &'a ConversionConfig,
}

impl<'a> SchemaResolver<'a> {
    pub fn new(source: &'a dyn RecordSource, table: TableRole, config: &'a ConversionConfig) -> Self {
        Self {
            source,
            table,
            config,
        }
    }

    pub fn table(&self) -> TableRole {
        self.table
    }

    pub fn config(&self) -> &'a ConversionConfig {
        self.config
    }

    /// Scans headers left to right from `start` for an exact match.
    ///
    /// Unless `last_column_resolves` is set, a match in the last column is
    /// reported as [`ColumnLookup::NotFound`].
    pub fn lookup(&self, header: &str, start: usize) -> ColumnLookup {
        let width = self.source.column_count();
        let Some(column) = (start..width).find(|&col| self.source.header(col) == Some(header))
        else {
            return ColumnLookup::NotFound;
        };
        if column + 1 == width && !self.config.last_column_resolves {
            return ColumnLookup::NotFound;
        }
        ColumnLookup::Found(column)
    }

    /// True when the header at `column` is exactly `expected`.
    pub fn header_is(&self, column: usize, expected: &str) -> bool {
        self.source.header(column) == Some(expected)
    }

    pub fn optional(&self, header: &str) -> Option<usize> {
        self.lookup(header, 0).index()
    }

    pub fn require(&self, family: MessageType, header: &str) -> Result<usize, SchemaError> {
        self.optional(header)
            .ok_or_else(|| SchemaError::MissingHeader {
                family,
                table: self.table,
                header: header.to_string(),
            })
    }
}

/// Week and time-of-week columns of one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeColumns {
    pub week: usize,
    pub time_of_week: usize,
}

impl TimeColumns {
    pub fn resolve(resolver: &SchemaResolver<'_>) -> Result<Self, SchemaError> {
        let headers = &resolver.config.headers;
        let find = |header: &str| {
            resolver
                .optional(header)
                .ok_or_else(|| SchemaError::MissingTimeHeader {
                    table: resolver.table,
                    header: header.to_string(),
                })
        };
        Ok(Self {
            week: find(&headers.week)?,
            time_of_week: find(&headers.time_of_week)?,
        })
    }
}

/// Orthometric height and geoid separation sources, decided once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltitudeColumns {
    /// Height from MSL; separation is WGS-84 minus MSL.
    Both { msl: usize, wgs84: usize },
    /// Height from MSL; separation is `0`.
    Msl(usize),
    /// Height from WGS-84; separation is `0`.
    Wgs84(usize),
}

impl AltitudeColumns {
    pub fn resolve(resolver: &SchemaResolver<'_>) -> Result<Self, SchemaError> {
        let headers = &resolver.config.headers;
        let msl = resolver.optional(&headers.altitude_msl);
        let wgs84 = resolver.optional(&headers.altitude_wgs84);
        match (msl, wgs84) {
            (Some(msl), Some(wgs84)) => Ok(Self::Both { msl, wgs84 }),
            (Some(msl), None) => Ok(Self::Msl(msl)),
            (None, Some(wgs84)) => Ok(Self::Wgs84(wgs84)),
            (None, None) => Err(SchemaError::NoAltitude {
                table: resolver.table,
                msl: headers.altitude_msl.clone(),
                wgs84: headers.altitude_wgs84.clone(),
            }),
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Both { .. } => "orthometric height from MSL, geoid separation WGS-84 minus MSL",
            Self::Msl(_) => "orthometric height from MSL, geoid separation zero",
            Self::Wgs84(_) => "orthometric height from WGS-84, geoid separation zero",
        }
    }
}

/// GGA columns: position and time from the primary table, fix quality from
/// the GNSS table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GgaColumns {
    pub time: TimeColumns,
    pub latitude: usize,
    pub longitude: usize,
    pub altitude: AltitudeColumns,
    pub fix_type: usize,
    pub sv_count: usize,
    pub hdop: usize,
    pub correction_age: usize,
}

impl GgaColumns {
    pub fn resolve(
        primary: &SchemaResolver<'_>,
        gnss: &SchemaResolver<'_>,
    ) -> Result<Self, SchemaError> {
        let headers = &primary.config.headers;
        let family = MessageType::Gga;
        let time = TimeColumns::resolve(primary)?;
        let latitude = primary.require(family, &headers.latitude)?;
        let longitude = primary.require(family, &headers.longitude)?;
        let fix_type = gnss.require(family, &headers.fix_type)?;
        let sv_count = gnss.require(family, &headers.sv_used_count)?;
        let hdop = gnss.require(family, &headers.hdop)?;
        let altitude = AltitudeColumns::resolve(primary)?;
        let correction_age = gnss.require(family, &headers.correction_age)?;
        Ok(Self {
            time,
            latitude,
            longitude,
            altitude,
            fix_type,
            sv_count,
            hdop,
            correction_age,
        })
    }
}

/// RMC columns, all from the GNSS table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RmcColumns {
    pub time: TimeColumns,
    pub latitude: usize,
    pub longitude: usize,
    pub speed: usize,
    pub heading: usize,
}

impl RmcColumns {
    pub fn resolve(gnss: &SchemaResolver<'_>) -> Result<Self, SchemaError> {
        let headers = &gnss.config.headers;
        let family = MessageType::Rmc;
        let time_of_week = gnss.require(family, &headers.time_of_week)?;
        let latitude = gnss.require(family, &headers.latitude)?;
        let longitude = gnss.require(family, &headers.longitude)?;
        let speed = gnss.require(family, &headers.speed)?;
        let heading = gnss.require(family, &headers.heading)?;
        let week = gnss.require(family, &headers.week)?;
        Ok(Self {
            time: TimeColumns { week, time_of_week },
            latitude,
            longitude,
            speed,
            heading,
        })
    }
}

/// GSA columns, all from the GNSS table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GsaColumns {
    pub fix_type: usize,
    pub pdop: usize,
    pub hdop: usize,
    pub vdop: usize,
}

impl GsaColumns {
    pub fn resolve(gnss: &SchemaResolver<'_>) -> Result<Self, SchemaError> {
        let headers = &gnss.config.headers;
        let family = MessageType::Gsa;
        Ok(Self {
            fix_type: gnss.require(family, &headers.fix_type)?,
            pdop: gnss.require(family, &headers.pdop)?,
            hdop: gnss.require(family, &headers.hdop)?,
            vdop: gnss.require(family, &headers.vdop)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use nmea_ingest::CsvTable;

    use super::*;

    fn table(headers: &[&str]) -> CsvTable {
        CsvTable::new(headers.iter().map(|h| h.to_string()).collect(), Vec::new())
    }

    #[test]
    fn lookup_respects_start_column() {
        let config = ConversionConfig::default();
        let source = table(&["A", "B", "A", "C"]);
        let resolver = SchemaResolver::new(&source, TableRole::Gnss, &config);
        assert_eq!(resolver.lookup("A", 0), ColumnLookup::Found(0));
        assert_eq!(resolver.lookup("A", 1), ColumnLookup::Found(2));
        assert_eq!(resolver.lookup("B", 2), ColumnLookup::NotFound);
        assert_eq!(resolver.lookup("Z", 0), ColumnLookup::NotFound);
    }

    #[test]
    fn last_column_is_not_found_by_default() {
        let mut config = ConversionConfig::default();
        let source = table(&["A", "B", "C"]);
        let resolver = SchemaResolver::new(&source, TableRole::Dr, &config);
        assert_eq!(resolver.lookup("C", 0), ColumnLookup::NotFound);

        config.last_column_resolves = true;
        let resolver = SchemaResolver::new(&source, TableRole::Dr, &config);
        assert_eq!(resolver.lookup("C", 0), ColumnLookup::Found(2));
    }

    #[test]
    fn altitude_fallbacks() {
        let config = ConversionConfig::default();
        let both = table(&["Altitude (m MSL)", "Altitude (m WGS-84)", "end"]);
        let msl = table(&["Altitude (m MSL)", "end"]);
        let wgs = table(&["Altitude (m WGS-84)", "end"]);
        let none = table(&["Latitude (deg)", "end"]);

        let resolve = |source: &CsvTable| {
            AltitudeColumns::resolve(&SchemaResolver::new(source, TableRole::Dr, &config))
        };
        assert_eq!(resolve(&both), Ok(AltitudeColumns::Both { msl: 0, wgs84: 1 }));
        assert_eq!(resolve(&msl), Ok(AltitudeColumns::Msl(0)));
        assert_eq!(resolve(&wgs), Ok(AltitudeColumns::Wgs84(0)));
        assert!(matches!(resolve(&none), Err(SchemaError::NoAltitude { .. })));
    }

    #[test]
    fn missing_required_header_names_family_and_table() {
        let config = ConversionConfig::default();
        let source = table(&["Fix Type", "PDOP", "HDOP", "end"]);
        let resolver = SchemaResolver::new(&source, TableRole::Gnss, &config);
        let error = GsaColumns::resolve(&resolver).expect_err("VDOP is missing");
        assert_eq!(
            error,
            SchemaError::MissingHeader {
                family: MessageType::Gsa,
                table: TableRole::Gnss,
                header: "VDOP".to_string(),
            }
        );
        assert_eq!(
            error.to_string(),
            "GSA: header `VDOP` not found in GNSS table"
        );
    }
}
