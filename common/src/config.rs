use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const ENV_ORIGIN: &str = "CARDPOST_ORIGIN";
pub const ENV_FLIP_DELAY_MS: &str = "CARDPOST_FLIP_DELAY_MS";
pub const ENV_RECIPIENT_LOADING_MS: &str = "CARDPOST_RECIPIENT_LOADING_MS";
pub const ENV_NOTIFY_TIMEOUT_MS: &str = "CARDPOST_NOTIFY_TIMEOUT_MS";
pub const ENV_EMAILJS_SERVICE_ID: &str = "CARDPOST_EMAILJS_SERVICE_ID";
pub const ENV_EMAILJS_TEMPLATE_ID: &str = "CARDPOST_EMAILJS_TEMPLATE_ID";
pub const ENV_EMAILJS_PUBLIC_KEY: &str = "CARDPOST_EMAILJS_PUBLIC_KEY";

/// Credentials of the EmailJS account used for card notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailServiceConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

/// Runtime settings of the card app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Scheme + host prefix of shareable card links.
    pub origin: String,
    pub flip_delay_ms: u64,
    pub recipient_loading_ms: u64,
    pub notification_timeout_ms: u64,
    /// `None` disables email sending; cards are still published.
    pub email: Option<EmailServiceConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:5173".to_string(),
            flip_delay_ms: 300,
            recipient_loading_ms: 1000,
            notification_timeout_ms: 10_000,
            email: None,
        }
    }
}

fn parse_millis(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected: "a whole number of milliseconds",
    })
}

impl AppConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// Build from `CARDPOST_*` keys. `lookup` returns the raw value of a key,
    /// if set; empty values count as unset.
    ///
    /// Email sending is enabled only when all three EmailJS keys are present.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(origin) = get(ENV_ORIGIN) {
            config.origin = origin.trim().trim_end_matches('/').to_string();
        }
        if let Some(v) = get(ENV_FLIP_DELAY_MS) {
            config.flip_delay_ms = parse_millis(ENV_FLIP_DELAY_MS, &v)?;
        }
        if let Some(v) = get(ENV_RECIPIENT_LOADING_MS) {
            config.recipient_loading_ms = parse_millis(ENV_RECIPIENT_LOADING_MS, &v)?;
        }
        if let Some(v) = get(ENV_NOTIFY_TIMEOUT_MS) {
            config.notification_timeout_ms = parse_millis(ENV_NOTIFY_TIMEOUT_MS, &v)?;
        }
        config.email = match (
            get(ENV_EMAILJS_SERVICE_ID),
            get(ENV_EMAILJS_TEMPLATE_ID),
            get(ENV_EMAILJS_PUBLIC_KEY),
        ) {
            (Some(service_id), Some(template_id), Some(public_key)) => Some(EmailServiceConfig {
                service_id,
                template_id,
                public_key,
            }),
            (None, None, None) => None,
            _ => {
                tracing::warn!("incomplete EmailJS settings, email delivery disabled");
                None
            }
        };
        Ok(config)
    }

    /// Build from the process environment.
    #[cfg(feature = "std")]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn flip_delay(&self) -> Duration {
        Duration::from_millis(self.flip_delay_ms)
    }

    pub fn recipient_loading_delay(&self) -> Duration {
        Duration::from_millis(self.recipient_loading_ms)
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_millis(self.notification_timeout_ms)
    }
}
