use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;

use cityweather_core::{CityWeather, ForecastRange, VisualCrossingClient};

use crate::error::ApiError;

/// Shared per-request state. The client is cheap to clone (the underlying
/// connection pool is shared); nothing else is retained between requests.
#[derive(Clone)]
pub struct AppState {
    pub client: VisualCrossingClient,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather/forecast/{city}", get(forecast))
        .route("/weather/compareDaylight/{city1}/{city2}", get(compare_daylight))
        .route("/weather/rainCheck/{city1}/{city2}", get(rain_check))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastQuery {
    /// Upstream call shape: "today" (default) or "full".
    range: Option<String>,
}

impl ForecastQuery {
    fn resolve(&self) -> Result<ForecastRange, ApiError> {
        match self.range.as_deref() {
            None | Some("today") => Ok(ForecastRange::Today),
            Some("full") => Ok(ForecastRange::FullTimeline),
            Some(other) => Err(ApiError::BadRequest(format!(
                "Unknown forecast range '{other}'. Expected 'today' or 'full'."
            ))),
        }
    }
}

/// GET /weather/forecast/{city}[?range=today|full]
async fn forecast(
    State(state): State<AppState>,
    Path(city): Path<String>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<CityWeather>, ApiError> {
    let range = query.resolve()?;

    let record = state.client.fetch(&city, range).await.map_err(|err| {
        tracing::warn!(%city, error = %err, "forecast fetch failed");
        ApiError::BadRequest(format!("City '{city}' could not be found."))
    })?;

    Ok(Json(record))
}

/// GET /weather/compareDaylight/{city1}/{city2}
async fn compare_daylight(
    State(state): State<AppState>,
    Path((city1, city2)): Path<(String, String)>,
) -> Result<String, ApiError> {
    let (first, second) = fetch_pair(&state, &city1, &city2).await?;

    let result = if first.daylight_hours > second.daylight_hours {
        format!("{city1} has the longest daylight hours.")
    } else if first.daylight_hours < second.daylight_hours {
        format!("{city2} has the longest daylight hours.")
    } else {
        "Both cities have the same daylight hours.".to_string()
    };

    Ok(result)
}

/// GET /weather/rainCheck/{city1}/{city2}
async fn rain_check(
    State(state): State<AppState>,
    Path((city1, city2)): Path<(String, String)>,
) -> Result<String, ApiError> {
    let (first, second) = fetch_pair(&state, &city1, &city2).await?;

    let message = match (first.is_raining(), second.is_raining()) {
        (true, true) => format!("It is raining in both {city1} and {city2}"),
        (true, false) => format!("It is raining in {city1}"),
        (false, true) => format!("It is raining in {city2}"),
        (false, false) => "It is not raining in either city.".to_string(),
    };

    Ok(message)
}

/// The two lookups are independent and read-only, so they run concurrently.
/// Any failed fetch collapses to a single 400; the cause is logged.
async fn fetch_pair(
    state: &AppState,
    city1: &str,
    city2: &str,
) -> Result<(CityWeather, CityWeather), ApiError> {
    let (first, second) = tokio::join!(state.client.today(city1), state.client.today(city2));

    match (first, second) {
        (Ok(first), Ok(second)) => Ok((first, second)),
        (first, second) => {
            if let Err(err) = &first {
                tracing::warn!(city = city1, error = %err, "city lookup failed");
            }
            if let Err(err) = &second {
                tracing::warn!(city = city2, error = %err, "city lookup failed");
            }
            Err(ApiError::BadRequest("One or both cities could not be found.".to_string()))
        }
    }
}
