use crate::config::Config;
use crate::datasources::OpenWeatherMapClient;
use crate::db::Database;
use crate::error::Result;
use crate::logic::compactor::{build_rich_message, build_sms_message, MessageLimits};
use crate::logic::normalizer::normalize_daily;
use crate::logic::rules::RulesEngine;
use crate::models::{Alert, User};
use crate::transport::TwilioClient;

/// One-shot alerting run over every district with registered users.
///
/// Each district is independent: a fetch or send failure is logged,
/// counted, and never blocks the remaining districts or recipients.
pub struct AlertService {
    config: Config,
    db: Database,
    weather: OpenWeatherMapClient,
    sms: Option<TwilioClient>,
    engine: RulesEngine,
}

#[derive(Debug, Clone, Default)]
pub struct DispatchSummary {
    pub districts_processed: usize,
    pub districts_skipped: usize,
    pub alerts_generated: usize,
    pub messages_dispatched: usize,
    pub failures: usize,
}

impl AlertService {
    pub fn new(config: Config, db: Database, dry_run: bool) -> Self {
        let weather = OpenWeatherMapClient::new(config.openweathermap.clone());

        let sms = if dry_run {
            tracing::info!("Dry run - SMS messages will be logged, not sent");
            None
        } else {
            Some(TwilioClient::new(config.twilio.clone()))
        };

        Self {
            config,
            db,
            weather,
            sms,
            engine: RulesEngine::new(),
        }
    }

    pub async fn run(&self) -> Result<DispatchSummary> {
        let mut summary = DispatchSummary::default();

        let users = self.db.fetch_all_users()?;
        if users.is_empty() {
            tracing::warn!("No users found in database");
            return Ok(summary);
        }

        let districts = self.db.unique_districts()?;
        tracing::info!(
            "Processing {} districts for {} users",
            districts.len(),
            users.len()
        );

        let limits = MessageLimits {
            max_alerts: self.config.app.max_alerts_in_summary,
            max_length: self.config.app.max_message_length,
        };

        for district in &districts {
            let Some(coords) = self.config.district_coordinates(district) else {
                tracing::warn!("Coordinates not found for district: {}", district);
                summary.districts_skipped += 1;
                continue;
            };

            let forecast = match self.weather.fetch_forecast(coords).await {
                Ok(data) => data,
                Err(e) => {
                    tracing::error!("Failed to fetch forecast for {}: {}", district, e);
                    summary.failures += 1;
                    continue;
                }
            };

            tracing::debug!(
                "Fetched {} forecast points for {} ({}) at {}",
                forecast.points.len(),
                district,
                forecast.location_name,
                forecast.fetched_at
            );

            let daily = normalize_daily(&forecast.points, self.config.app.horizon_days);
            let alerts = self.engine.evaluate(district, &daily);
            tracing::info!("Generated {} alerts for {}", alerts.len(), district);

            if alerts.is_empty() {
                continue;
            }

            summary.districts_processed += 1;
            summary.alerts_generated += alerts.len();

            let sms_body =
                build_sms_message(&self.config.app.name, district, &alerts, &limits);

            let recipients: Vec<&User> =
                users.iter().filter(|u| u.is_in_district(district)).collect();
            tracing::info!(
                "Sending alerts to {} users in {}",
                recipients.len(),
                district
            );

            for user in recipients {
                match self.dispatch_to_user(user, &alerts, &sms_body).await {
                    Ok(true) => summary.messages_dispatched += 1,
                    Ok(false) => {}
                    Err(e) => {
                        tracing::error!("Failed to send SMS to {}: {}", user.name, e);
                        summary.failures += 1;
                    }
                }
            }
        }

        tracing::info!(
            "Alerting run complete: {} districts alerted, {} messages dispatched, {} failures",
            summary.districts_processed,
            summary.messages_dispatched,
            summary.failures
        );

        Ok(summary)
    }

    /// Returns Ok(true) when a message was dispatched (or would have been,
    /// on a dry run), Ok(false) when the user is unreachable.
    async fn dispatch_to_user(&self, user: &User, alerts: &[Alert], sms_body: &str) -> Result<bool> {
        let Some(to_number) = user.phone_number.as_deref().map(str::trim) else {
            return Ok(false);
        };
        if to_number.is_empty() {
            return Ok(false);
        }

        if !to_number.starts_with('+') {
            tracing::warn!(
                "Recipient number not in E.164 format: '{}' for user {}. Delivery may fail.",
                to_number,
                user.name
            );
        }

        // The unbounded variant goes to logs and in-app surfaces only
        let rich = build_rich_message(&self.config.app.name, &user.name, alerts);
        tracing::debug!("Rich message for {}:\n{}", user.name, rich);

        match &self.sms {
            Some(client) => {
                let receipt = client.send_sms(to_number, sms_body).await?;
                tracing::info!(
                    "SMS queued with SID {} to {} ({}). Initial status: {}",
                    receipt.sid,
                    user.name,
                    to_number,
                    receipt.status
                );
            }
            None => {
                tracing::info!(
                    "[dry-run] Would send SMS to {} ({}): {}",
                    user.name,
                    to_number,
                    sms_body
                );
            }
        }

        Ok(true)
    }
}
