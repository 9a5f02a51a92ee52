use crate::models::{DailySummary, ForecastPoint};
use std::collections::BTreeMap;

/// 3-hour forecast cadence
const POINTS_PER_DAY: usize = 8;

/// Collapse 3-hour forecast samples into per-day summaries.
///
/// Works over the first `horizon_days * 8` points (48 hours at the default
/// two-day horizon) and emits at most `horizon_days` summaries, in date
/// order. Days with no samples are omitted, never fabricated. Grouping
/// uses the date prefix of the provider's local timestamp string as-is.
pub fn normalize_daily(points: &[ForecastPoint], horizon_days: usize) -> Vec<DailySummary> {
    let window = points.iter().take(horizon_days * POINTS_PER_DAY);

    let mut by_date: BTreeMap<String, Vec<&ForecastPoint>> = BTreeMap::new();
    for point in window {
        by_date.entry(point.date().to_string()).or_default().push(point);
    }

    by_date
        .into_iter()
        .take(horizon_days)
        .map(|(date, group)| aggregate_day(date, &group))
        .collect()
}

fn aggregate_day(date: String, points: &[&ForecastPoint]) -> DailySummary {
    let temp_max_c = points
        .iter()
        .map(|p| p.temp_c)
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0.0);

    let temp_min_c = points
        .iter()
        .map(|p| p.temp_c)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0.0);

    let humidity_mean: f64 =
        points.iter().map(|p| p.humidity_percent).sum::<f64>() / points.len().max(1) as f64;

    let wind_speed_max_mps = points
        .iter()
        .map(|p| p.wind_speed_mps)
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0.0);

    // Missing or unparseable rain buckets contribute nothing
    let rain_total_mm: f64 = points.iter().filter_map(|p| p.rain_mm).sum();

    DailySummary {
        date,
        temp_max_c,
        temp_min_c,
        humidity_mean,
        wind_speed_max_mps,
        rain_total_mm,
    }
}
