use super::{DayContext, Rule};
use crate::models::{Alert, AlertKind, DailySummary, Severity};

/// Fungal disease risk rule
///
/// Sustained humidity above 85% combined with daytime warmth above 28°C
/// favors fungal outbreaks in most field crops. Both conditions must hold.
pub struct DiseaseRiskRule;

const HUMIDITY_THRESHOLD_PERCENT: f64 = 85.0;
const MAX_TEMP_THRESHOLD_C: f64 = 28.0;

impl Rule for DiseaseRiskRule {
    fn id(&self) -> &'static str {
        "disease_risk"
    }

    fn name(&self) -> &'static str {
        "Disease Risk Alert"
    }

    fn evaluate(&self, day: &DailySummary, ctx: &DayContext) -> Option<Alert> {
        if day.humidity_mean <= HUMIDITY_THRESHOLD_PERCENT || day.temp_max_c <= MAX_TEMP_THRESHOLD_C
        {
            return None;
        }

        Some(Alert::new(
            AlertKind::DiseaseRisk,
            Severity::Medium,
            &ctx.location,
            &ctx.day_label,
            format!(
                "High humidity ({}%) and temperature ({:.1}°C) {} may increase fungal disease risk",
                day.humidity_mean.round() as i64,
                day.temp_max_c,
                ctx.day_label
            ),
            "Monitor crops closely.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(humidity: f64, temp_max: f64) -> DailySummary {
        DailySummary {
            date: "2024-07-01".into(),
            temp_max_c: temp_max,
            temp_min_c: 22.0,
            humidity_mean: humidity,
            wind_speed_max_mps: 2.0,
            rain_total_mm: 0.0,
        }
    }

    #[test]
    fn requires_both_conditions() {
        let ctx = DayContext::new("varanasi", 0);
        assert!(DiseaseRiskRule.evaluate(&summary(90.0, 27.0), &ctx).is_none());
        assert!(DiseaseRiskRule.evaluate(&summary(80.0, 32.0), &ctx).is_none());
        assert!(DiseaseRiskRule.evaluate(&summary(90.0, 32.0), &ctx).is_some());
    }

    #[test]
    fn thresholds_are_strict() {
        let ctx = DayContext::new("varanasi", 0);
        assert!(DiseaseRiskRule.evaluate(&summary(85.0, 32.0), &ctx).is_none());
        assert!(DiseaseRiskRule.evaluate(&summary(90.0, 28.0), &ctx).is_none());
    }

    #[test]
    fn humidity_is_rounded_to_integer() {
        let ctx = DayContext::new("varanasi", 0);
        let alert = DiseaseRiskRule.evaluate(&summary(87.6, 30.0), &ctx).unwrap();
        assert_eq!(
            alert.full_message(),
            "Disease risk alert for Varanasi: High humidity (88%) and temperature (30.0°C) \
             today may increase fungal disease risk. Monitor crops closely."
        );
    }
}
