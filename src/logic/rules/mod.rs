pub mod disease_risk;
pub mod engine;
pub mod frost;
pub mod heatwave;
pub mod heavy_rain;
pub mod high_wind;

pub use engine::RulesEngine;

use crate::models::{Alert, DailySummary};

/// Trait for agronomic risk rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule against one day's summary, returning an alert if
    /// the risk threshold is crossed
    fn evaluate(&self, day: &DailySummary, ctx: &DayContext) -> Option<Alert>;
}

/// Location and day framing shared by every rule evaluated for one day
#[derive(Debug, Clone)]
pub struct DayContext {
    /// Title-cased location name
    pub location: String,
    /// "today" for day 0, "tomorrow" for day 1
    pub day_label: String,
}

impl DayContext {
    pub fn new(location: &str, day_index: usize) -> Self {
        Self {
            location: title_case(location),
            day_label: day_label(day_index).to_string(),
        }
    }
}

fn day_label(day_index: usize) -> &'static str {
    match day_index {
        0 => "today",
        _ => "tomorrow",
    }
}

/// Capitalize the first letter of each whitespace-separated word
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_districts() {
        assert_eq!(title_case("patiala"), "Patiala");
        assert_eq!(title_case("navi mumbai"), "Navi Mumbai");
        assert_eq!(title_case("HUBBALLI"), "Hubballi");
    }

    #[test]
    fn day_context_labels() {
        assert_eq!(DayContext::new("pune", 0).day_label, "today");
        assert_eq!(DayContext::new("pune", 1).day_label, "tomorrow");
        assert_eq!(DayContext::new("pune", 0).location, "Pune");
    }
}
