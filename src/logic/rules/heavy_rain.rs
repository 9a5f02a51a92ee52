use super::{DayContext, Rule};
use crate::models::{Alert, AlertKind, DailySummary, Severity};

/// Heavy rainfall alert rule
///
/// More than 30 mm accumulated over one day risks waterlogging in
/// low-lying fields.
pub struct HeavyRainRule;

const RAIN_TOTAL_THRESHOLD_MM: f64 = 30.0;

impl Rule for HeavyRainRule {
    fn id(&self) -> &'static str {
        "heavy_rain"
    }

    fn name(&self) -> &'static str {
        "Heavy Rainfall Alert"
    }

    fn evaluate(&self, day: &DailySummary, ctx: &DayContext) -> Option<Alert> {
        if day.rain_total_mm <= RAIN_TOTAL_THRESHOLD_MM {
            return None;
        }

        Some(Alert::new(
            AlertKind::HeavyRain,
            Severity::High,
            &ctx.location,
            &ctx.day_label,
            format!(
                "{:.1}mm rain expected {}",
                day.rain_total_mm, ctx.day_label
            ),
            "Protect crops from waterlogging and ensure proper drainage.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(rain_total: f64) -> DailySummary {
        DailySummary {
            date: "2024-06-01".into(),
            temp_max_c: 25.0,
            temp_min_c: 18.0,
            humidity_mean: 70.0,
            wind_speed_max_mps: 3.0,
            rain_total_mm: rain_total,
        }
    }

    #[test]
    fn threshold_is_strict() {
        let ctx = DayContext::new("mumbai", 0);
        assert!(HeavyRainRule.evaluate(&summary(30.0), &ctx).is_none());
        assert!(HeavyRainRule.evaluate(&summary(30.1), &ctx).is_some());
    }

    #[test]
    fn message_shape() {
        let ctx = DayContext::new("mumbai", 0);
        let alert = HeavyRainRule.evaluate(&summary(42.5), &ctx).unwrap();
        assert_eq!(
            alert.full_message(),
            "Heavy rainfall alert for Mumbai: 42.5mm rain expected today. \
             Protect crops from waterlogging and ensure proper drainage."
        );
    }
}
