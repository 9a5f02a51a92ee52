use super::{DayContext, Rule};
use crate::models::{Alert, AlertKind, DailySummary, Severity};

/// High wind warning rule
///
/// The provider reports wind in m/s; the agronomic threshold is stated in
/// km/h, so the peak is converted before comparison.
pub struct HighWindRule;

const MPS_TO_KMH: f64 = 3.6;
const WIND_SPEED_THRESHOLD_KMH: f64 = 25.0;

impl Rule for HighWindRule {
    fn id(&self) -> &'static str {
        "high_wind"
    }

    fn name(&self) -> &'static str {
        "High Wind Warning"
    }

    fn evaluate(&self, day: &DailySummary, ctx: &DayContext) -> Option<Alert> {
        let wind_speed_kmh = day.wind_speed_max_mps * MPS_TO_KMH;
        if wind_speed_kmh <= WIND_SPEED_THRESHOLD_KMH {
            return None;
        }

        Some(Alert::new(
            AlertKind::HighWind,
            Severity::Medium,
            &ctx.location,
            &ctx.day_label,
            format!(
                "Wind speeds up to {:.1} km/h expected {}",
                wind_speed_kmh, ctx.day_label
            ),
            "Secure farm structures and protect young plants.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(wind_mps: f64) -> DailySummary {
        DailySummary {
            date: "2024-06-01".into(),
            temp_max_c: 25.0,
            temp_min_c: 18.0,
            humidity_mean: 50.0,
            wind_speed_max_mps: wind_mps,
            rain_total_mm: 0.0,
        }
    }

    #[test]
    fn conversion_is_exact() {
        // 9.0 m/s is 32.4 km/h, comfortably over the 25 km/h threshold
        let ctx = DayContext::new("ludhiana", 0);
        let alert = HighWindRule.evaluate(&summary(9.0), &ctx).unwrap();
        assert!(alert.headline.contains("32.4 km/h"));
    }

    #[test]
    fn below_threshold_does_not_fire() {
        // 6.9 m/s is 24.84 km/h
        let ctx = DayContext::new("ludhiana", 0);
        assert!(HighWindRule.evaluate(&summary(6.9), &ctx).is_none());
    }

    #[test]
    fn severity_is_medium() {
        let ctx = DayContext::new("ludhiana", 1);
        let alert = HighWindRule.evaluate(&summary(9.0), &ctx).unwrap();
        assert_eq!(alert.severity, Severity::Medium);
        assert_eq!(
            alert.full_message(),
            "High wind warning for Ludhiana: Wind speeds up to 32.4 km/h expected tomorrow. \
             Secure farm structures and protect young plants."
        );
    }
}
