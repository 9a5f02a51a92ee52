use super::{
    disease_risk::DiseaseRiskRule, frost::FrostRule, heatwave::HeatwaveRule,
    heavy_rain::HeavyRainRule, high_wind::HighWindRule, DayContext, Rule,
};
use crate::models::{Alert, DailySummary};

/// Evaluates the fixed rule set over daily summaries.
///
/// Rules fire independently, in declaration order; batch output is ordered
/// day-then-rule, so alerts for today always precede tomorrow's.
pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(HeatwaveRule),
            Box::new(HeavyRainRule),
            Box::new(HighWindRule),
            Box::new(FrostRule),
            Box::new(DiseaseRiskRule),
        ];

        Self { rules }
    }

    /// Evaluate every rule against a single day's summary
    pub fn evaluate_day(&self, day: &DailySummary, ctx: &DayContext) -> Vec<Alert> {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(day, ctx))
            .collect()
    }

    /// Evaluate the two-day horizon for one location, producing the full
    /// ordered alert batch
    pub fn evaluate(&self, location: &str, summaries: &[DailySummary]) -> Vec<Alert> {
        summaries
            .iter()
            .enumerate()
            .flat_map(|(day_index, day)| {
                let ctx = DayContext::new(location, day_index);
                self.evaluate_day(day, &ctx)
            })
            .collect()
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}
