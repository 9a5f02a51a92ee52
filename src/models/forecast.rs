use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Forecast data fetched from the provider for one location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastData {
    pub fetched_at: DateTime<Utc>,
    pub location_name: String,
    pub points: Vec<ForecastPoint>, // 3-hour intervals
}

/// A single 3-hour forecast sample
///
/// The timestamp is the provider's local time string ("YYYY-MM-DD HH:MM:SS").
/// It is kept verbatim; daily grouping uses its date prefix without any
/// timezone conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: String,
    pub temp_c: f64,
    pub humidity_percent: f64,
    pub wind_speed_mps: f64,
    /// Rain over the 3-hour bucket, in mm. None when the provider omitted
    /// the field or sent something non-numeric.
    pub rain_mm: Option<f64>,
}

impl ForecastPoint {
    /// The calendar-date portion of the provider timestamp.
    pub fn date(&self) -> &str {
        self.timestamp.get(..10).unwrap_or(&self.timestamp)
    }
}

/// Aggregated weather statistics for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: String,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub humidity_mean: f64,
    pub wind_speed_max_mps: f64,
    pub rain_total_mm: f64,
}
