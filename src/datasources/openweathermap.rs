use crate::config::{Coordinates, OpenWeatherMapConfig};
use crate::error::{Result, SahayakError};
use crate::models::{ForecastData, ForecastPoint};
use chrono::Utc;
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
    city: OwmCity,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    /// Provider-local timestamp, "YYYY-MM-DD HH:MM:SS"
    dt_txt: String,
    main: OwmMain,
    wind: OwmWind,
    #[serde(default)]
    rain: Option<OwmPrecipitation>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmPrecipitation {
    #[serde(rename = "3h", default, deserialize_with = "lenient_mm")]
    three_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmCity {
    name: String,
}

/// Accept the rain bucket as a number or numeric string; anything else
/// (null, objects, garbage) becomes None and aggregates as zero later.
fn lenient_mm<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch the 5-day/3-hour forecast for the given coordinates, in
    /// metric units
    pub async fn fetch_forecast(&self, coords: &Coordinates) -> Result<ForecastData> {
        let url = format!(
            "{}/forecast?lat={}&lon={}&appid={}&units=metric",
            API_BASE_URL, coords.latitude, coords.longitude, self.config.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SahayakError::FetchFailure(format!("OpenWeatherMap: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SahayakError::FetchFailure(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        let owm_response: OwmForecastResponse = response.json().await.map_err(|e| {
            SahayakError::FetchFailure(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })?;

        Ok(convert_response(owm_response))
    }

    /// Test connection to the OpenWeatherMap API using the current-weather
    /// endpoint
    pub async fn test_connection(&self, coords: &Coordinates) -> Result<bool> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            API_BASE_URL, coords.latitude, coords.longitude, self.config.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SahayakError::FetchFailure(format!("OpenWeatherMap: {}", e)))?;

        Ok(response.status().is_success())
    }
}

fn convert_response(response: OwmForecastResponse) -> ForecastData {
    let points = response
        .list
        .into_iter()
        .map(|item| ForecastPoint {
            timestamp: item.dt_txt,
            temp_c: item.main.temp,
            humidity_percent: item.main.humidity,
            wind_speed_mps: item.wind.speed,
            rain_mm: item.rain.and_then(|r| r.three_hour),
        })
        .collect();

    ForecastData {
        fetched_at: Utc::now(),
        location_name: response.city.name,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(rain_json: &str) -> OwmForecastItem {
        let json = format!(
            r#"{{
                "dt_txt": "2024-06-01 06:00:00",
                "main": {{"temp": 31.5, "humidity": 70}},
                "wind": {{"speed": 4.2}}{}
            }}"#,
            rain_json
        );
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn rain_bucket_parses_number() {
        let item = item(r#", "rain": {"3h": 2.5}"#);
        assert_eq!(item.rain.unwrap().three_hour, Some(2.5));
    }

    #[test]
    fn rain_bucket_parses_numeric_string() {
        let item = item(r#", "rain": {"3h": "1.25"}"#);
        assert_eq!(item.rain.unwrap().three_hour, Some(1.25));
    }

    #[test]
    fn rain_bucket_tolerates_null_and_garbage() {
        assert_eq!(item(r#", "rain": {"3h": null}"#).rain.unwrap().three_hour, None);
        assert_eq!(item(r#", "rain": {"3h": "wet"}"#).rain.unwrap().three_hour, None);
        assert_eq!(item(r#", "rain": {}"#).rain.unwrap().three_hour, None);
        assert!(item("").rain.is_none());
    }

    #[test]
    fn convert_maps_fields() {
        let response: OwmForecastResponse = serde_json::from_str(
            r#"{
                "list": [{
                    "dt_txt": "2024-06-01 06:00:00",
                    "main": {"temp": 31.5, "humidity": 70},
                    "wind": {"speed": 4.2},
                    "rain": {"3h": 0.5}
                }],
                "city": {"name": "Patiala"}
            }"#,
        )
        .unwrap();

        let data = convert_response(response);
        assert_eq!(data.location_name, "Patiala");
        assert_eq!(data.points.len(), 1);
        let p = &data.points[0];
        assert_eq!(p.timestamp, "2024-06-01 06:00:00");
        assert_eq!(p.temp_c, 31.5);
        assert_eq!(p.humidity_percent, 70.0);
        assert_eq!(p.wind_speed_mps, 4.2);
        assert_eq!(p.rain_mm, Some(0.5));
    }

    #[test]
    fn malformed_payload_is_rejected_wholesale() {
        let result: std::result::Result<OwmForecastResponse, _> =
            serde_json::from_str(r#"{"list": "not-a-list"}"#);
        assert!(result.is_err());
    }
}
