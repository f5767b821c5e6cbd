//! Property tests for sentence checksums and GSV batching.

use proptest::prelude::*;

use nmea_core::{Sentence, SentenceSegmenter, checksum};
use nmea_model::{CnoReading, ConversionConfig, SatelliteRecord};

fn field() -> impl Strategy<Value = String> {
    "[A-Z0-9.]{0,12}"
}

fn satellite(prn: u16) -> SatelliteRecord {
    SatelliteRecord {
        prn,
        elevation: Some("30".to_string()),
        azimuth: Some("200".to_string()),
        cno1: CnoReading {
            value: Some("42".to_string()),
            band: Some("L1".to_string()),
        },
        cno2: CnoReading {
            value: Some("37".to_string()),
            band: Some("L5".to_string()),
        },
    }
}

proptest! {
    #[test]
    fn checksum_equals_xor_of_body(fields in prop::collection::vec(field(), 1..20)) {
        let sentence = Sentence::from_fields(&fields);
        let expected = sentence.body().bytes().fold(0u8, |acc, b| acc ^ b);
        prop_assert_eq!(checksum(&fields), expected);
        prop_assert_eq!(sentence.checksum_hex().to_string(), format!("{expected:02X}"));
        prop_assert_eq!(sentence.fields().len(), fields.len());
    }

    #[test]
    fn gsv_batches_hold_at_most_three(count in 1usize..40) {
        let config = ConversionConfig::default();
        let segmenter = SentenceSegmenter::new(&config);
        let used: Vec<SatelliteRecord> = (1..=count as u16).map(satellite).collect();
        let sentences = segmenter.gsv(&config.constellations[0], &used);

        prop_assert_eq!(sentences.len(), count.div_ceil(3));
        let last = if count % 3 == 0 { 3 } else { count % 3 };
        let last_fields = sentences[sentences.len() - 1].fields().len();
        prop_assert_eq!(last_fields, 4 + 7 * last);

        let total = count.to_string();
        let batch = sentences.len().to_string();
        let mut prns = Vec::new();
        for (idx, sentence) in sentences.iter().enumerate() {
            let fields = sentence.fields();
            let index = (idx + 1).to_string();
            prop_assert_eq!(fields[1], batch.as_str());
            prop_assert_eq!(fields[2], index.as_str());
            prop_assert_eq!(fields[3], total.as_str());
            prns.extend(fields[4..].chunks(7).map(|tuple| tuple[0].to_string()));
        }
        let expected: Vec<String> = (1..=count).map(|prn| prn.to_string()).collect();
        prop_assert_eq!(prns, expected);
    }
}
