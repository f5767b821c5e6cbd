//! Selector parsing and path requirements through the public API.

use std::path::Path;

use nmea_model::{
    ConstellationKind, ConversionConfig, MessageType, PathError, SelectorError, TypeSelector,
};

#[test]
fn test_selector_keeps_given_order() {
    let selector = TypeSelector::parse("GSA+GGA+RMC").unwrap();
    assert_eq!(
        selector.types(),
        &[MessageType::Gsa, MessageType::Gga, MessageType::Rmc]
    );
    assert_eq!(selector.to_string(), "GSA+GGA+RMC");
    assert!(selector.wants_satellites());
}

#[test]
fn test_selector_rejects_bad_input() {
    assert_eq!(
        TypeSelector::parse(""),
        Err(SelectorError::Invalid(String::new()))
    );
    assert_eq!(
        TypeSelector::parse("GGA++RMC"),
        Err(SelectorError::Invalid(String::new()))
    );
    assert_eq!(
        TypeSelector::parse("RMC+RMC"),
        Err(SelectorError::Duplicate(MessageType::Rmc))
    );
}

#[test]
fn test_gga_requires_dr_path() {
    let gnss = Path::new("gnss.csv");
    let selector = TypeSelector::parse("RMC+GGA").unwrap();
    assert_eq!(
        selector.check_paths(None, Some(gnss)),
        Err(PathError::MissingDr(MessageType::Gga))
    );
    assert_eq!(
        selector.check_paths(Some(Path::new("dr.csv")), Some(gnss)),
        Ok(())
    );
    assert_eq!(
        TypeSelector::parse("RMC").unwrap().check_paths(None, Some(gnss)),
        Ok(())
    );
}

#[test]
fn test_default_config_scans_six_constellations() {
    let config = ConversionConfig::default();
    let kinds: Vec<ConstellationKind> = config.constellations.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ConstellationKind::Gps,
            ConstellationKind::Sbas,
            ConstellationKind::Glonass,
            ConstellationKind::Galileo,
            ConstellationKind::Qzss,
            ConstellationKind::Beidou,
        ]
    );
}
