use serde::{Deserialize, Serialize};

/// The closed set of agronomic risk conditions this system alerts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Heatwave,
    HeavyRain,
    HighWind,
    Frost,
    DiseaseRisk,
}

impl AlertKind {
    /// Long title used at the start of the full alert message
    pub fn title(&self) -> &'static str {
        match self {
            AlertKind::Heatwave => "Heatwave warning",
            AlertKind::HeavyRain => "Heavy rainfall alert",
            AlertKind::HighWind => "High wind warning",
            AlertKind::Frost => "Frost warning",
            AlertKind::DiseaseRisk => "Disease risk alert",
        }
    }

    /// Short label used by the SMS compactor
    pub fn short_label(&self) -> &'static str {
        match self {
            AlertKind::Heatwave => "Heat",
            AlertKind::HeavyRain => "Rain",
            AlertKind::HighWind => "Wind",
            AlertKind::Frost => "Frost",
            AlertKind::DiseaseRisk => "Disease",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single risk finding for one location and one day.
///
/// Location, day label, and the message parts stay structured so the
/// compactor can pick the short fragment directly instead of parsing the
/// rendered text back apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub severity: Severity,
    /// Title-cased location name, e.g. "Patiala"
    pub location: String,
    /// "today" or "tomorrow"
    pub day_label: String,
    /// One sentence (no trailing period) stating the condition and value
    pub headline: String,
    /// Short actionable recommendation, a complete sentence
    pub advice: String,
}

impl Alert {
    pub fn new(
        kind: AlertKind,
        severity: Severity,
        location: impl Into<String>,
        day_label: impl Into<String>,
        headline: impl Into<String>,
        advice: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            location: location.into(),
            day_label: day_label.into(),
            headline: headline.into(),
            advice: advice.into(),
        }
    }

    /// Render the long-form message used for rich display surfaces and logs
    pub fn full_message(&self) -> String {
        format!(
            "{} for {}: {}. {}",
            self.kind.title(),
            self.location,
            self.headline,
            self.advice
        )
    }
}
