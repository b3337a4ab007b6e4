use serde::{Deserialize, Deserializer, Serialize};

use crate::daylight;

/// Weather record for a single city, built fresh per request.
///
/// Field names follow the upstream payload (camelCase); the same shape is
/// re-serialized on the forecast endpoint. Numeric fields tolerate the
/// upstream's habit of sending numbers, numeric strings, nulls, or nothing
/// at all: anything unusable becomes `0.0` instead of failing the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityWeather {
    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub current_conditions: CurrentConditions,

    /// Daily summaries from the payload. No endpoint logic reads these;
    /// they are carried through for forecast completeness.
    #[serde(default)]
    pub days: Vec<DaySummary>,

    /// Derived from sunrise/sunset after deserialization, never read from
    /// the payload.
    #[serde(skip_deserializing)]
    pub daylight_hours: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentConditions {
    #[serde(rename = "temp", default, deserialize_with = "lenient_f64")]
    pub temperature: f64,

    #[serde(rename = "feelslike", default, deserialize_with = "lenient_f64")]
    pub feels_like: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub humidity: f64,

    #[serde(default)]
    pub sunrise: Option<String>,

    #[serde(default)]
    pub sunset: Option<String>,

    /// Free-text weather description, e.g. "Rain, Partially cloudy".
    #[serde(default)]
    pub conditions: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySummary {
    #[serde(rename = "datetime", default)]
    pub date: Option<String>,

    #[serde(rename = "temp", default, deserialize_with = "lenient_f64")]
    pub temperature: f64,

    #[serde(rename = "tempmax", default, deserialize_with = "lenient_f64")]
    pub max_temperature: f64,

    #[serde(rename = "tempmin", default, deserialize_with = "lenient_f64")]
    pub min_temperature: f64,

    #[serde(default)]
    pub conditions: Option<String>,
}

impl CityWeather {
    /// Fill in `daylight_hours` from the current conditions.
    pub fn compute_daylight(&mut self) {
        self.daylight_hours = daylight::daylight_hours(
            self.current_conditions.sunrise.as_deref(),
            self.current_conditions.sunset.as_deref(),
        );
    }

    /// Coarse rain classification: any conditions text containing "rain" or
    /// "shower" (case-insensitive) counts as raining. "Light rain" and
    /// "Thunderstorm with rain" both qualify; that is intentional.
    pub fn is_raining(&self) -> bool {
        self.current_conditions
            .conditions
            .as_deref()
            .map(|text| {
                let text = text.to_lowercase();
                text.contains("rain") || text.contains("shower")
            })
            .unwrap_or(false)
    }
}

/// Accept a JSON number, a numeric string, or null; anything else (or a
/// string that fails to parse) becomes `0.0` with a warning. Combined with
/// `#[serde(default)]`, absent fields also land on `0.0`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Num(n)) => Ok(n),
        Some(Raw::Text(s)) => Ok(s.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(value = %s, "non-numeric field value, defaulting to 0");
            0.0
        })),
        Some(Raw::Other(_)) | None => Ok(0.0),
    }
}
