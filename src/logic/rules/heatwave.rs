use super::{DayContext, Rule};
use crate::models::{Alert, AlertKind, DailySummary, Severity};

/// Heatwave warning rule
///
/// Daytime maxima above 38°C stress standing crops and livestock.
/// Threshold is a strict inequality: exactly 38.0°C does not fire.
pub struct HeatwaveRule;

const MAX_TEMP_THRESHOLD_C: f64 = 38.0;

impl Rule for HeatwaveRule {
    fn id(&self) -> &'static str {
        "heatwave"
    }

    fn name(&self) -> &'static str {
        "Heatwave Warning"
    }

    fn evaluate(&self, day: &DailySummary, ctx: &DayContext) -> Option<Alert> {
        if day.temp_max_c <= MAX_TEMP_THRESHOLD_C {
            return None;
        }

        Some(Alert::new(
            AlertKind::Heatwave,
            Severity::High,
            &ctx.location,
            &ctx.day_label,
            format!(
                "Temperature expected to reach {:.1}°C {}",
                day.temp_max_c, ctx.day_label
            ),
            "Ensure adequate irrigation and provide shade for livestock.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(temp_max: f64) -> DailySummary {
        DailySummary {
            date: "2024-06-01".into(),
            temp_max_c: temp_max,
            temp_min_c: 20.0,
            humidity_mean: 50.0,
            wind_speed_max_mps: 3.0,
            rain_total_mm: 0.0,
        }
    }

    #[test]
    fn threshold_is_strict() {
        let ctx = DayContext::new("agra", 0);
        assert!(HeatwaveRule.evaluate(&summary(38.0), &ctx).is_none());
        assert!(HeatwaveRule.evaluate(&summary(38.1), &ctx).is_some());
    }

    #[test]
    fn message_includes_location_value_and_day() {
        let ctx = DayContext::new("agra", 1);
        let alert = HeatwaveRule.evaluate(&summary(41.25), &ctx).unwrap();
        assert_eq!(alert.kind, AlertKind::Heatwave);
        assert_eq!(alert.severity, Severity::High);
        assert_eq!(
            alert.full_message(),
            "Heatwave warning for Agra: Temperature expected to reach 41.2°C tomorrow. \
             Ensure adequate irrigation and provide shade for livestock."
        );
    }
}
