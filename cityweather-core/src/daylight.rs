//! Daylight-span arithmetic over sunrise/sunset time-of-day strings.

use chrono::NaiveTime;

/// Formats observed in upstream payloads, tried in order. The full timeline
/// path reports times with seconds ("06:15:32"), older payloads use bare
/// 24-hour ("06:15"), and the `/today` path reports 12-hour ("06:15 AM").
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M %p"];

/// Parse a time-of-day string in any of the supported formats.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
}

/// Hours of daylight between sunrise and sunset, as whole minutes / 60.
///
/// Missing or unparseable inputs yield `0.0` rather than an error; the
/// record is still served. A sunset that parses earlier than its sunrise
/// produces a negative span, which is preserved as-is (it only occurs on
/// malformed upstream data, and clamping would hide that).
pub fn daylight_hours(sunrise: Option<&str>, sunset: Option<&str>) -> f64 {
    let (Some(sunrise), Some(sunset)) = (sunrise, sunset) else {
        return 0.0;
    };

    match (parse_time_of_day(sunrise), parse_time_of_day(sunset)) {
        (Some(rise), Some(set)) => {
            let minutes = set.signed_duration_since(rise).num_minutes();
            minutes as f64 / 60.0
        }
        _ => {
            tracing::warn!(sunrise, sunset, "unparseable sunrise/sunset, daylight defaults to 0");
            0.0
        }
    }
}
