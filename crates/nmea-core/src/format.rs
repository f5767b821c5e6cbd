//! Field value rendering shared by the sentence builders.

/// Latitude or longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

/// A rendered position value and its hemisphere letter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coordinate {
    pub value: String,
    pub direction: String,
}

impl Coordinate {
    pub fn is_complete(&self) -> bool {
        !self.value.is_empty() && !self.direction.is_empty()
    }
}

/// Decimal degrees to `DDDMM.mmmmmmmm` and a hemisphere letter.
///
/// Positive values are north/east; zero and negative values are south/west.
/// Missing input yields two empty fields.
pub fn coordinate(degrees: Option<f64>, axis: Axis) -> Coordinate {
    let Some(degrees) = degrees else {
        return Coordinate::default();
    };
    let direction = match (axis, degrees > 0.0) {
        (Axis::Latitude, true) => "N",
        (Axis::Latitude, false) => "S",
        (Axis::Longitude, true) => "E",
        (Axis::Longitude, false) => "W",
    };
    let magnitude = degrees.abs();
    let whole = magnitude.trunc();
    let minutes = round_decimal((magnitude - whole) * 60.0, 8);
    Coordinate {
        value: shortest_decimal(whole * 100.0 + minutes),
        direction: direction.to_string(),
    }
}

/// Rounds to `places` decimal digits using the exact binary value.
pub fn round_decimal(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

/// Fixed-point rendering with `places` decimals.
pub fn fixed(value: f64, places: usize) -> String {
    format!("{value:.places$}")
}

/// Shortest round-trip rendering that always carries a decimal point
/// (`3730.0`, `1.25`), switching to exponent form outside `[1e-4, 1e16)`.
pub fn shortest_decimal(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let rendered = format!("{value:e}");
        return match rendered.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => rendered,
        };
    }
    let rendered = value.to_string();
    if rendered.contains('.') {
        rendered
    } else {
        format!("{rendered}.0")
    }
}

/// Left-pads with zeros to two characters.
pub fn zero_pad2(value: &str) -> String {
    format!("{value:0>2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_use_degree_minutes() {
        let lat = coordinate(Some(37.5), Axis::Latitude);
        assert_eq!(lat.value, "3730.0");
        assert_eq!(lat.direction, "N");

        let lon = coordinate(Some(-122.25), Axis::Longitude);
        assert_eq!(lon.value, "12215.0");
        assert_eq!(lon.direction, "W");
    }

    #[test]
    fn zero_is_southern_and_western() {
        assert_eq!(coordinate(Some(0.0), Axis::Latitude).direction, "S");
        assert_eq!(coordinate(Some(0.0), Axis::Longitude).direction, "W");
    }

    #[test]
    fn missing_position_is_blank() {
        let blank = coordinate(None, Axis::Latitude);
        assert!(blank.value.is_empty());
        assert!(!blank.is_complete());
    }

    #[test]
    fn minutes_round_to_eight_places() {
        // 0.123456789 deg = 7.40740734 min
        let lat = coordinate(Some(24.123456789), Axis::Latitude);
        assert_eq!(lat.value, "2407.40740734");
    }

    #[test]
    fn shortest_decimal_forms() {
        assert_eq!(shortest_decimal(3730.0), "3730.0");
        assert_eq!(shortest_decimal(0.1), "0.1");
        assert_eq!(shortest_decimal(0.0), "0.0");
        assert_eq!(shortest_decimal(0.000_006), "6e-06");
        assert_eq!(shortest_decimal(1.5e16), "1.5e+16");
    }

    #[test]
    fn fixed_and_padding() {
        assert_eq!(fixed(100.0, 6), "100.000000");
        assert_eq!(fixed(0.876, 2), "0.88");
        assert_eq!(zero_pad2("7"), "07");
        assert_eq!(zero_pad2("12"), "12");
    }
}
