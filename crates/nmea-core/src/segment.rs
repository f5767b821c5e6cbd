//! GSV batching and the GSA sentences derived from each batch.

use nmea_ingest::RecordSource;
use nmea_model::{Constellation, ConversionConfig, SatelliteRecord};

use crate::schema::GsaColumns;
use crate::sentence::Sentence;

/// Fields per satellite in a GSV sentence: PRN, elevation, azimuth, then two
/// CNO value/label pairs.
pub const GSV_SATELLITE_FIELDS: usize = 7;

/// Splits one constellation's used satellites into GSV and GSA sentences.
#[derive(Clone, Copy)]
pub struct SentenceSegmenter<'a> {
    config: &'a ConversionConfig,
}

impl<'a> SentenceSegmenter<'a> {
    pub fn new(config: &'a ConversionConfig) -> Self {
        Self { config }
    }

    /// `ceil(N / max)` GSV sentences for `N` satellites, each carrying the
    /// batch size, its own 1-based index and the satellite total.
    pub fn gsv(&self, constellation: &Constellation, satellites: &[SatelliteRecord]) -> Vec<Sentence> {
        if satellites.is_empty() {
            return Vec::new();
        }
        let per_sentence = self.config.max_satellites_per_gsv.max(1);
        let batch_size = satellites.len().div_ceil(per_sentence).to_string();
        let total = satellites.len().to_string();
        let address = constellation.gsv_address();

        satellites
            .chunks(per_sentence)
            .enumerate()
            .map(|(idx, chunk)| {
                let mut fields = Vec::with_capacity(4 + chunk.len() * GSV_SATELLITE_FIELDS);
                fields.push(address.clone());
                fields.push(batch_size.clone());
                fields.push((idx + 1).to_string());
                fields.push(total.clone());
                for satellite in chunk {
                    fields.extend(satellite_fields(satellite));
                }
                Sentence::from_fields(&fields)
            })
            .collect()
    }

    /// One GSA sentence per satellite of a non-empty GSV batch.
    pub fn gsa(
        &self,
        gnss: &dyn RecordSource,
        columns: &GsaColumns,
        row: usize,
        satellites: &[SatelliteRecord],
    ) -> Vec<Sentence> {
        let text = |column: usize| gnss.cell(row, column).unwrap_or_default();
        let fix_type = text(columns.fix_type);
        let pdop = text(columns.pdop);
        let hdop = text(columns.hdop);
        let vdop = text(columns.vdop);

        satellites
            .iter()
            .map(|satellite| {
                let prn = satellite.prn.to_string();
                Sentence::from_fields(&[
                    self.config.gsa_address.as_str(),
                    "A",
                    fix_type,
                    prn.as_str(),
                    pdop,
                    hdop,
                    vdop,
                ])
            })
            .collect()
    }
}

fn satellite_fields(satellite: &SatelliteRecord) -> [String; GSV_SATELLITE_FIELDS] {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        satellite.prn.to_string(),
        text(&satellite.elevation),
        text(&satellite.azimuth),
        text(&satellite.cno1.value),
        text(&satellite.cno1.band),
        text(&satellite.cno2.value),
        text(&satellite.cno2.band),
    ]
}
