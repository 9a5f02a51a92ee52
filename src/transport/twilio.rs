use crate::config::TwilioConfig;
use crate::error::{Result, SahayakError};
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.twilio.com/2010-04-01";

pub struct TwilioClient {
    client: reqwest::Client,
    config: TwilioConfig,
}

/// Queue acknowledgement returned by the transport for one message
#[derive(Debug, Clone, Deserialize)]
pub struct MessageReceipt {
    pub sid: String,
    pub status: String,
}

impl TwilioClient {
    pub fn new(config: TwilioConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Queue one SMS. Recipients should be in E.164 form ("+9198...");
    /// anything else is passed through and left to the carrier to reject.
    pub async fn send_sms(&self, to: &str, body: &str) -> Result<MessageReceipt> {
        let url = format!(
            "{}/Accounts/{}/Messages.json",
            API_BASE_URL, self.config.account_sid
        );

        let params = [
            ("To", to),
            ("From", self.config.from_number.as_str()),
            ("Body", body),
        ];

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| SahayakError::Transport(format!("Twilio: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SahayakError::Transport(format!(
                "Twilio returned {}: {}",
                status, body
            )));
        }

        let receipt: MessageReceipt = response
            .json()
            .await
            .map_err(|e| SahayakError::Transport(format!("Failed to parse Twilio response: {}", e)))?;

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_parses_from_response_json() {
        let receipt: MessageReceipt = serde_json::from_str(
            r#"{"sid": "SM123", "status": "queued", "num_segments": "1"}"#,
        )
        .unwrap();
        assert_eq!(receipt.sid, "SM123");
        assert_eq!(receipt.status, "queued");
    }
}
