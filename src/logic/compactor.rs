use super::rules::title_case;
use crate::models::Alert;

const FRAGMENT_SEPARATOR: &str = " | ";
const SUFFIX: &str = " | More in app";
const EMPTY_FALLBACK: &str = "Weather update";
const ELLIPSIS: &str = "...";

/// Bounds for the compact SMS rendering
#[derive(Debug, Clone, Copy)]
pub struct MessageLimits {
    /// Alerts summarized before the rest are dropped
    pub max_alerts: usize,
    /// Hard cap on the rendered message length
    pub max_length: usize,
}

impl Default for MessageLimits {
    fn default() -> Self {
        Self {
            max_alerts: 3,
            max_length: 140,
        }
    }
}

/// Render a bounded-length, transport-safe text summary of an alert batch.
///
/// The output stays within `limits.max_length` regardless of how many
/// alerts exist or how long their messages are, and only 7-bit printable
/// characters survive. Trial SMS accounts reject anything longer, and a
/// single non-GSM character would force UCS-2 segmentation.
pub fn build_sms_message(
    app_name: &str,
    location: &str,
    alerts: &[Alert],
    limits: &MessageLimits,
) -> String {
    let fragments: Vec<String> = alerts
        .iter()
        .take(limits.max_alerts)
        .map(|alert| format!("{}: {}", alert.kind.short_label(), alert.headline))
        .collect();

    let core = if fragments.is_empty() {
        EMPTY_FALLBACK.to_string()
    } else {
        fragments.join(FRAGMENT_SEPARATOR)
    };

    let text = format!("{} {}: {}{}", app_name, title_case(location), core, SUFFIX);

    truncate_with_ellipsis(&sanitize_transport_safe(&text), limits.max_length)
}

/// Render the unbounded display variant of the same alert batch, used for
/// in-app surfaces and logs. No compaction, no character stripping.
pub fn build_rich_message(app_name: &str, recipient_name: &str, alerts: &[Alert]) -> String {
    let body: Vec<String> = alerts.iter().map(|a| a.full_message()).collect();
    format!(
        "\u{1f33e} {} Alert for {}:\n\n{}\n\nStay safe and protect your crops. \
         For more farming tips, visit {} app.",
        app_name,
        recipient_name,
        body.join("\n\n"),
        app_name
    )
}

/// Drop every character outside the 7-bit printable range. Removal, not
/// substitution: an emoji contributes zero characters to the output.
fn sanitize_transport_safe(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect()
}

/// Cap the string at `max_length`, replacing the overflow with a
/// three-character ellipsis marker. A no-op for strings already within
/// the limit, so re-application is idempotent.
fn truncate_with_ellipsis(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let kept: String = text
        .chars()
        .take(max_length.saturating_sub(ELLIPSIS.len()))
        .collect();
    format!("{}{}", kept.trim_end(), ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertKind, Severity};

    const APP: &str = "Agri-Sahayak";

    fn alert(kind: AlertKind, headline: &str) -> Alert {
        Alert::new(
            kind,
            Severity::High,
            "Patiala",
            "today",
            headline,
            "Protect sensitive crops from frost damage.",
        )
    }

    #[test]
    fn zero_alerts_uses_fallback() {
        let msg = build_sms_message(APP, "patiala", &[], &MessageLimits::default());
        assert_eq!(msg, "Agri-Sahayak Patiala: Weather update | More in app");
    }

    #[test]
    fn fragments_are_labeled_and_joined() {
        let alerts = vec![
            alert(AlertKind::Frost, "Temperature may drop to 4.5C today"),
            alert(AlertKind::HighWind, "Wind speeds up to 32.4 km/h expected today"),
        ];
        let msg = build_sms_message(APP, "patiala", &alerts, &MessageLimits::default());
        assert!(msg.starts_with("Agri-Sahayak Patiala: Frost: "));
        assert!(msg.contains(" | Wind: "));
    }

    #[test]
    fn summarizes_at_most_three_alerts() {
        let alerts = vec![
            alert(AlertKind::Heatwave, "a"),
            alert(AlertKind::HeavyRain, "b"),
            alert(AlertKind::HighWind, "c"),
            alert(AlertKind::Frost, "d"),
        ];
        let limits = MessageLimits {
            max_length: 400,
            ..Default::default()
        };
        let msg = build_sms_message(APP, "patiala", &alerts, &limits);
        assert!(msg.contains("Heat: a"));
        assert!(msg.contains("Rain: b"));
        assert!(msg.contains("Wind: c"));
        assert!(!msg.contains("Frost: d"));
    }

    #[test]
    fn output_never_exceeds_max_length() {
        let long = "x".repeat(500);
        let alerts = vec![
            alert(AlertKind::Heatwave, &long),
            alert(AlertKind::HeavyRain, &long),
            alert(AlertKind::HighWind, &long),
        ];
        for max_length in [20, 140, 160] {
            let limits = MessageLimits {
                max_length,
                ..Default::default()
            };
            let msg = build_sms_message(APP, "patiala", &alerts, &limits);
            assert!(msg.chars().count() <= max_length);
            assert!(msg.ends_with(ELLIPSIS));
        }
    }

    #[test]
    fn truncation_is_idempotent() {
        let long = "y".repeat(300);
        let alerts = vec![alert(AlertKind::Heatwave, &long)];
        let limits = MessageLimits::default();
        let msg = build_sms_message(APP, "patiala", &alerts, &limits);
        assert_eq!(truncate_with_ellipsis(&msg, limits.max_length), msg);

        let short = build_sms_message(APP, "patiala", &[], &limits);
        assert_eq!(truncate_with_ellipsis(&short, limits.max_length), short);
    }

    #[test]
    fn non_ascii_is_dropped_without_replacement() {
        let alerts = vec![alert(
            AlertKind::Heatwave,
            "Temperature expected to reach 41.2\u{b0}C today \u{1f525}",
        )];
        let msg = build_sms_message(APP, "patiala", &alerts, &MessageLimits::default());
        assert!(msg.contains("41.2C today"));
        assert!(msg.is_ascii());
        assert!(!msg.contains('\u{fffd}'));
    }

    #[test]
    fn truncation_trims_trailing_whitespace_before_ellipsis() {
        let text = format!("{} tail of the message", "a".repeat(136));
        // Cut lands right after the space at index 136
        let truncated = truncate_with_ellipsis(&text, 140);
        assert_eq!(truncated, format!("{}...", "a".repeat(136)));
    }

    #[test]
    fn rich_message_keeps_full_text() {
        let alerts = vec![alert(AlertKind::Frost, "Temperature may drop to 4.5\u{b0}C today")];
        let msg = build_rich_message(APP, "Asha", &alerts);
        assert!(msg.contains("Frost warning for Patiala:"));
        assert!(msg.contains("\u{b0}C"));
        assert!(msg.contains("visit Agri-Sahayak app."));
    }
}
