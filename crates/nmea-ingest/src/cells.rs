//! Cell value interpretation helpers.

/// Spreadsheet markers for an unavailable value.
const NA_MARKERS: [&str; 2] = ["=NA()", "#N/A"];

/// Returns true for empty cells and NA markers.
pub fn is_na(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || NA_MARKERS.contains(&trimmed)
}

/// Parses a cell as f64, returning None for missing or non-numeric cells.
pub fn parse_f64(value: Option<&str>) -> Option<f64> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a GPS week number. Integral floats such as `2190.0` are accepted.
pub fn parse_week(value: Option<&str>) -> Option<i64> {
    let raw = value?.trim();
    if let Ok(week) = raw.parse::<i64>() {
        return Some(week);
    }
    let week = parse_f64(Some(raw))?;
    if week.fract() == 0.0 {
        Some(week as i64)
    } else {
        None
    }
}

/// Truthiness of a flag cell such as `SV05 Used`.
///
/// Missing cells and `false` are false, numeric cells are true when
/// non-zero, and any other text is true.
pub fn is_truthy(value: Option<&str>) -> bool {
    let Some(raw) = value else {
        return false;
    };
    let trimmed = raw.trim();
    if is_na(trimmed) || trimmed.eq_ignore_ascii_case("false") {
        return false;
    }
    match trimmed.parse::<f64>() {
        Ok(number) => number != 0.0,
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn na_markers() {
        assert!(is_na(""));
        assert!(is_na("  "));
        assert!(is_na("#N/A"));
        assert!(is_na("=NA()"));
        assert!(!is_na("0"));
    }

    #[test]
    fn parses_numbers() {
        assert_eq!(parse_f64(Some(" 12.5 ")), Some(12.5));
        assert_eq!(parse_f64(Some("abc")), None);
        assert_eq!(parse_f64(Some("NaN")), None);
        assert_eq!(parse_f64(None), None);
    }

    #[test]
    fn parses_weeks() {
        assert_eq!(parse_week(Some("2190")), Some(2190));
        assert_eq!(parse_week(Some("2190.0")), Some(2190));
        assert_eq!(parse_week(Some("2190.5")), None);
        assert_eq!(parse_week(None), None);
    }

    #[test]
    fn truthy_flags() {
        assert!(is_truthy(Some("1")));
        assert!(is_truthy(Some("TRUE")));
        assert!(is_truthy(Some("yes")));
        assert!(!is_truthy(Some("0")));
        assert!(!is_truthy(Some("0.0")));
        assert!(!is_truthy(Some("FALSE")));
        assert!(!is_truthy(Some("#N/A")));
        assert!(!is_truthy(None));
    }
}
