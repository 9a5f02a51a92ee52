use super::{DayContext, Rule};
use crate::models::{Alert, AlertKind, DailySummary, Severity};

/// Frost warning rule
///
/// Overnight minima below 7°C can damage frost-sensitive crops well
/// before actual freezing.
pub struct FrostRule;

const MIN_TEMP_THRESHOLD_C: f64 = 7.0;

impl Rule for FrostRule {
    fn id(&self) -> &'static str {
        "frost"
    }

    fn name(&self) -> &'static str {
        "Frost Warning"
    }

    fn evaluate(&self, day: &DailySummary, ctx: &DayContext) -> Option<Alert> {
        if day.temp_min_c >= MIN_TEMP_THRESHOLD_C {
            return None;
        }

        Some(Alert::new(
            AlertKind::Frost,
            Severity::High,
            &ctx.location,
            &ctx.day_label,
            format!(
                "Temperature may drop to {:.1}°C {}",
                day.temp_min_c, ctx.day_label
            ),
            "Protect sensitive crops from frost damage.",
        ))
    }
}
