use crate::error::{Result, SahayakError};
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    pub openweathermap: OpenWeatherMapConfig,
    pub twilio: TwilioConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    /// District name (lowercase) to coordinates, resolvable before any
    /// forecast fetch. Districts absent here are skipped with a warning.
    #[serde(default = "default_districts")]
    pub districts: BTreeMap<String, Coordinates>,
}

/// Product policy knobs for the alerting run
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_horizon_days")]
    pub horizon_days: usize,
    #[serde(default = "default_max_alerts")]
    pub max_alerts_in_summary: usize,
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
    #[serde(default)]
    pub dry_run: bool,
}

fn default_app_name() -> String {
    "Agri-Sahayak".to_string()
}

fn default_horizon_days() -> usize {
    2
}

fn default_max_alerts() -> usize {
    3
}

fn default_max_message_length() -> usize {
    140
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            horizon_days: default_horizon_days(),
            max_alerts_in_summary: default_max_alerts(),
            max_message_length: default_max_message_length(),
            dry_run: false,
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

impl std::fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"[REDACTED]")
            .field("from_number", &self.from_number)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Explicit path to the shared users database; defaults to the XDG
    /// data directory when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Coordinates for the demo districts served by the pilot deployment
fn default_districts() -> BTreeMap<String, Coordinates> {
    let raw = [
        ("bangalore", 12.9716, 77.5946),
        ("mysore", 12.2958, 76.6394),
        ("mumbai", 19.0760, 72.8777),
        ("pune", 18.5204, 73.8567),
        ("ludhiana", 30.9010, 75.8573),
        ("amritsar", 31.6340, 74.8723),
        ("lucknow", 26.8467, 80.9462),
        ("kanpur", 26.4499, 80.3319),
        ("agra", 27.1767, 78.0081),
        ("varanasi", 25.3176, 82.9739),
        ("hoshiarpur", 31.5344, 75.9119),
        ("patiala", 30.3398, 76.3869),
        ("noida", 28.5355, 77.3910),
        ("hubballi", 15.3647, 75.1240),
        ("gorakhpur", 26.7606, 83.3732),
    ];

    raw.iter()
        .map(|(name, latitude, longitude)| {
            (
                name.to_string(),
                Coordinates {
                    latitude: *latitude,
                    longitude: *longitude,
                },
            )
        })
        .collect()
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(SahayakError::Config(format!(
                "Config file not found at {:?}. Run `agri-sahayak init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| SahayakError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| SahayakError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("agri-sahayak").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        // Return XDG path as the default (will trigger "not found" in load)
        let default_path = dirs::config_dir()
            .ok_or_else(|| SahayakError::Config("Cannot determine config directory".into()))?
            .join("agri-sahayak")
            .join("config.yaml");
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/agri-sahayak/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SahayakError::Config("Cannot determine config directory".into()))?
            .join("agri-sahayak");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("No configuration found. Let's set up Agri-Sahayak alerting!");
        println!();

        // --- OpenWeatherMap ---
        println!("OpenWeatherMap");
        let owm_api_key: String = Input::new()
            .with_prompt("  API key")
            .interact_text()
            .map_err(|e| SahayakError::Config(format!("Input error: {}", e)))?;

        println!();

        // --- Twilio ---
        println!("Twilio SMS");
        let account_sid: String = Input::new()
            .with_prompt("  Account SID")
            .interact_text()
            .map_err(|e| SahayakError::Config(format!("Input error: {}", e)))?;

        let auth_token: String = Password::new()
            .with_prompt("  Auth token")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| SahayakError::Config(format!("Input error: {}", e)))?;

        let from_number: String = Input::new()
            .with_prompt("  From number (E.164, e.g. +14155550100)")
            .interact_text()
            .map_err(|e| SahayakError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            app: AppConfig::default(),
            openweathermap: OpenWeatherMapConfig {
                api_key: owm_api_key,
            },
            twilio: TwilioConfig {
                account_sid,
                auth_token,
                from_number,
            },
            database: DatabaseConfig::default(),
            districts: default_districts(),
        };

        // Write to default config path
        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| SahayakError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write with a header comment
        let content = format!(
            "# Agri-Sahayak Configuration\n# Generated by `agri-sahayak init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    /// Coordinates for a district label, matched case-insensitively
    pub fn district_coordinates(&self, district: &str) -> Option<&Coordinates> {
        self.districts.get(&district.to_lowercase())
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        // Then check env var
        if let Ok(dir) = std::env::var("SAHAYAK_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        // Use XDG data directory
        let data_dir = dirs::data_dir()
            .ok_or_else(|| SahayakError::Config("Cannot determine data directory".into()))?
            .join("agri-sahayak");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(&self, data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }
        Ok(Self::data_dir(data_dir_override)?.join("users.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_districts_cover_the_pilot() {
        let districts = default_districts();
        assert_eq!(districts.len(), 15);
        let patiala = &districts["patiala"];
        assert_eq!(patiala.latitude, 30.3398);
        assert_eq!(patiala.longitude, 76.3869);
    }

    #[test]
    fn district_lookup_ignores_case() {
        let yaml = r#"
openweathermap:
  api_key: test
twilio:
  account_sid: AC123
  auth_token: secret
  from_number: "+14155550100"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.district_coordinates("Patiala").is_some());
        assert!(config.district_coordinates("atlantis").is_none());
    }

    #[test]
    fn app_policy_defaults() {
        let app = AppConfig::default();
        assert_eq!(app.name, "Agri-Sahayak");
        assert_eq!(app.horizon_days, 2);
        assert_eq!(app.max_alerts_in_summary, 3);
        assert_eq!(app.max_message_length, 140);
        assert!(!app.dry_run);
    }

    #[test]
    fn credentials_are_redacted_in_debug() {
        let twilio = TwilioConfig {
            account_sid: "AC123".into(),
            auth_token: "secret".into(),
            from_number: "+14155550100".into(),
        };
        let debug = format!("{:?}", twilio);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret"));
    }
}
