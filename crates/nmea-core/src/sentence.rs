//! Sentence rendering and checksums for GGA, RMC and GSA.

use std::fmt;

use nmea_ingest::{RecordSource, parse_f64};
use nmea_model::ConversionConfig;

use crate::align::read_time_key;
use crate::format::{Axis, coordinate, fixed, zero_pad2};
use crate::gps_time::{format_utc_date, format_utc_time, gps_to_utc};
use crate::schema::{AltitudeColumns, GgaColumns, RmcColumns};

/// One rendered NMEA-0183 sentence, without line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence(String);

impl Sentence {
    /// `$` + comma-joined fields + `*` + two uppercase hex checksum digits.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Self {
        let mut text = String::from("$");
        for (idx, field) in fields.iter().enumerate() {
            if idx > 0 {
                text.push(',');
            }
            text.push_str(field.as_ref());
        }
        text.push('*');
        text.push_str(&hex::encode_upper([checksum(fields)]));
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Text between `$` and `*`.
    pub fn body(&self) -> &str {
        let end = self.0.rfind('*').unwrap_or(self.0.len());
        self.0.get(1..end).unwrap_or_default()
    }

    /// The first field, such as `GPGGA`.
    pub fn address(&self) -> &str {
        let body = self.body();
        body.split(',').next().unwrap_or(body)
    }

    /// The two hex digits after `*`.
    pub fn checksum_hex(&self) -> &str {
        let start = self.0.rfind('*').map_or(self.0.len(), |idx| idx + 1);
        &self.0[start..]
    }

    pub fn fields(&self) -> Vec<&str> {
        self.body().split(',').collect()
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// XOR of every field byte, plus one comma for each odd separator count.
///
/// Separators between `n` fields contribute `n - 1` commas; pairs cancel, so
/// a single comma is folded in when the field count is even. The result is
/// the XOR of every byte between `$` and `*`.
pub fn checksum<S: AsRef<str>>(fields: &[S]) -> u8 {
    let mut sum = fields
        .iter()
        .flat_map(|field| field.as_ref().bytes())
        .fold(0u8, |acc, byte| acc ^ byte);
    if fields.len().saturating_sub(1) % 2 == 1 {
        sum ^= b',';
    }
    sum
}

/// GNSS-side GGA fields; blank when the tick has no matching GNSS row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FixQuality {
    fix_type: String,
    sv_count: String,
    hdop: String,
    correction_age: String,
}

impl FixQuality {
    fn read(gnss: &dyn RecordSource, row: usize, columns: &GgaColumns) -> Self {
        let text = |column: usize| gnss.cell(row, column).unwrap_or_default().to_string();
        Self {
            fix_type: text(columns.fix_type),
            sv_count: gnss
                .cell(row, columns.sv_count)
                .map(zero_pad2)
                .unwrap_or_default(),
            hdop: parse_f64(gnss.cell(row, columns.hdop))
                .map(|hdop| fixed(hdop, 2))
                .unwrap_or_default(),
            correction_age: text(columns.correction_age),
        }
    }
}

/// GGA fields 9 to 12.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AltitudeFields {
    pub height: String,
    pub height_unit: String,
    pub separation: String,
    pub separation_unit: String,
}

impl AltitudeFields {
    /// Renders the altitude pair; any needed cell missing blanks all four.
    pub fn read(source: &dyn RecordSource, row: usize, columns: AltitudeColumns) -> Self {
        let value = |column: usize| parse_f64(source.cell(row, column));
        let rendered = match columns {
            AltitudeColumns::Both { msl, wgs84 } => value(msl)
                .zip(value(wgs84))
                .map(|(msl, wgs84)| (fixed(msl, 6), fixed(wgs84 - msl, 6))),
            AltitudeColumns::Msl(msl) => value(msl).map(|msl| (fixed(msl, 6), "0".to_string())),
            AltitudeColumns::Wgs84(wgs84) => {
                value(wgs84).map(|wgs84| (fixed(wgs84, 6), "0".to_string()))
            }
        };
        match rendered {
            Some((height, separation)) => Self {
                height,
                height_unit: "M".to_string(),
                separation,
                separation_unit: "M".to_string(),
            },
            None => Self::default(),
        }
    }
}

/// Renders sentences from resolved column maps.
#[derive(Clone, Copy)]
pub struct SentenceBuilder<'a> {
    config: &'a ConversionConfig,
}

impl<'a> SentenceBuilder<'a> {
    pub fn new(config: &'a ConversionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a ConversionConfig {
        self.config
    }

    /// GGA for `tick` of the primary table, merged with the matched GNSS row.
    pub fn gga(
        &self,
        primary: &dyn RecordSource,
        gnss: &dyn RecordSource,
        columns: &GgaColumns,
        tick: usize,
        matched: Option<usize>,
    ) -> Sentence {
        let time = read_time_key(primary, tick, columns.time)
            .and_then(|key| gps_to_utc(key, self.config))
            .map(format_utc_time)
            .unwrap_or_default();
        let latitude = coordinate(parse_f64(primary.cell(tick, columns.latitude)), Axis::Latitude);
        let longitude = coordinate(
            parse_f64(primary.cell(tick, columns.longitude)),
            Axis::Longitude,
        );
        let quality = matched
            .map(|row| FixQuality::read(gnss, row, columns))
            .unwrap_or_default();
        let altitude = AltitudeFields::read(primary, tick, columns.altitude);

        Sentence::from_fields(&[
            self.config.gga_address.as_str(),
            time.as_str(),
            latitude.value.as_str(),
            latitude.direction.as_str(),
            longitude.value.as_str(),
            longitude.direction.as_str(),
            quality.fix_type.as_str(),
            quality.sv_count.as_str(),
            quality.hdop.as_str(),
            altitude.height.as_str(),
            altitude.height_unit.as_str(),
            altitude.separation.as_str(),
            altitude.separation_unit.as_str(),
            quality.correction_age.as_str(),
            self.config.datum_tag.as_str(),
        ])
    }

    /// RMC for a GNSS row; `None` when the row's UTC time cannot be formed.
    pub fn rmc(&self, gnss: &dyn RecordSource, columns: &RmcColumns, row: usize) -> Option<Sentence> {
        let utc = read_time_key(gnss, row, columns.time).and_then(|key| gps_to_utc(key, self.config))?;
        let latitude = coordinate(parse_f64(gnss.cell(row, columns.latitude)), Axis::Latitude);
        let longitude = coordinate(parse_f64(gnss.cell(row, columns.longitude)), Axis::Longitude);
        let status = if latitude.is_complete() && longitude.is_complete() {
            "A"
        } else {
            "V"
        };
        let speed = parse_f64(gnss.cell(row, columns.speed))
            .map(|mps| fixed(mps * self.config.knots_per_mps, 5))
            .unwrap_or_default();
        let heading = gnss.cell(row, columns.heading).unwrap_or_default();
        let time = format_utc_time(utc);
        let date = format_utc_date(utc);

        Some(Sentence::from_fields(&[
            self.config.rmc_address.as_str(),
            time.as_str(),
            status,
            latitude.value.as_str(),
            latitude.direction.as_str(),
            longitude.value.as_str(),
            longitude.direction.as_str(),
            speed.as_str(),
            heading,
            date.as_str(),
            "",
            "",
            "",
        ]))
    }
}
