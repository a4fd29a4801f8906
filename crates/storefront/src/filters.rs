//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats a UTC timestamp as a short pickup label, e.g. "Aug 26, 5:30 PM".
///
/// Usage in templates: `{{ reservation.pickup_time|pickup_label }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn pickup_label(
    value: &chrono::DateTime<chrono::Utc>,
    _env: &dyn askama::Values,
) -> askama::Result<String> {
    Ok(value.format("%b %-d, %-I:%M %p").to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    #[test]
    fn test_pickup_label_format() {
        let time = chrono::Utc.with_ymd_and_hms(2025, 8, 26, 17, 30, 0).unwrap();
        let label = time.format("%b %-d, %-I:%M %p").to_string();
        assert_eq!(label, "Aug 26, 5:30 PM");
    }
}
