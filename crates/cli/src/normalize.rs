//! Boundary normalization for raw operator input. Everything here runs once,
//! before a `LoadFilter` is built; the core crates never see raw strings.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

const ABSENT_MARKERS: [&str; 3] = ["none", "null", "undefined"];

/// Maps empty strings and textual null markers to an absent value.
pub fn normalize_text_param(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if ABSENT_MARKERS.iter().any(|marker| trimmed.eq_ignore_ascii_case(marker)) {
        return None;
    }
    Some(trimmed.to_string())
}

/// Lenient numeric parse: anything that is not a number is treated as absent,
/// never as an error. Discarded values are logged so bad input is traceable.
pub fn normalize_numeric_param(raw: &str) -> Option<f64> {
    let text = normalize_text_param(raw)?;
    match text.parse::<f64>().ok().filter(|value| value.is_finite()) {
        Some(value) => Some(value),
        None => {
            tracing::warn!(value = %text, "ignoring non-numeric filter value");
            None
        }
    }
}

/// Decimal counterpart of [`normalize_numeric_param`] for money amounts.
pub fn normalize_decimal_param(raw: &str) -> Option<Decimal> {
    let text = normalize_text_param(raw)?;
    match text.parse::<Decimal>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(value = %text, "ignoring non-numeric money amount");
            None
        }
    }
}

/// Reduces a city input to its comparable form: the part before the first
/// comma, lowercased ("Chicago, IL" becomes "chicago").
pub fn normalize_city(raw: &str) -> Option<String> {
    let text = normalize_text_param(raw)?;
    let city = text.split(',').next().unwrap_or(&text).trim();
    if city.is_empty() {
        return None;
    }
    Some(city.to_lowercase())
}

/// Accepts RFC 3339 timestamps or bare dates (midnight UTC); anything else is
/// absent.
pub fn normalize_datetime_param(raw: &str) -> Option<DateTime<Utc>> {
    let text = normalize_text_param(raw)?;

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&text) {
        return Some(parsed.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(&text, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::{
        normalize_city, normalize_datetime_param, normalize_decimal_param,
        normalize_numeric_param, normalize_text_param,
    };

    #[test]
    fn null_markers_and_blanks_are_absent() {
        for raw in ["", "   ", "none", "None", "NULL", "undefined", " null "] {
            assert_eq!(normalize_text_param(raw), None, "{raw:?} should normalize to absent");
        }
    }

    #[test]
    fn ordinary_text_is_trimmed_and_kept() {
        assert_eq!(normalize_text_param("  Reefer "), Some("Reefer".to_string()));
        // "nonetheless" contains a marker but is not one.
        assert_eq!(normalize_text_param("nonetheless"), Some("nonetheless".to_string()));
    }

    #[test]
    fn bad_numbers_are_absent_not_errors() {
        assert_eq!(normalize_numeric_param("925.5"), Some(925.5));
        assert_eq!(normalize_numeric_param("a lot"), None);
        assert_eq!(normalize_numeric_param("NaN"), None);
        assert_eq!(normalize_numeric_param(""), None);

        assert_eq!(normalize_decimal_param("1850.00"), Some(Decimal::new(185_000, 2)));
        assert_eq!(normalize_decimal_param("eighteen fifty"), None);
    }

    #[test]
    fn city_drops_state_suffix_and_lowercases() {
        assert_eq!(normalize_city("Chicago, IL"), Some("chicago".to_string()));
        assert_eq!(normalize_city("  Dallas "), Some("dallas".to_string()));
        assert_eq!(normalize_city(", IL"), None);
        assert_eq!(normalize_city("none"), None);
    }

    #[test]
    fn datetimes_accept_rfc3339_and_bare_dates() {
        assert_eq!(
            normalize_datetime_param("2025-08-04T09:30:00Z"),
            Some(Utc.with_ymd_and_hms(2025, 8, 4, 9, 30, 0).unwrap()),
        );
        assert_eq!(
            normalize_datetime_param("2025-08-04"),
            Some(Utc.with_ymd_and_hms(2025, 8, 4, 0, 0, 0).unwrap()),
        );
        assert_eq!(
            normalize_datetime_param("2025-08-04T04:00:00-05:00"),
            Some(Utc.with_ymd_and_hms(2025, 8, 4, 9, 0, 0).unwrap()),
        );
        assert_eq!(normalize_datetime_param("next tuesday"), None);
        assert_eq!(normalize_datetime_param("null"), None);
    }
}
