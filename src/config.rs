use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use lettre::message::Mailbox;
use portfolio_contact::MailCredentials;
use serde::Deserialize;
use std::{collections::HashMap, env};

/// Pre-prefix variable names, only honoured when the prefixed one is unset
const LEGACY_MAIL_VARS: [(&str, &str, &str); 2] = [
    ("SMTP_USERNAME", "PORTFOLIO__MAIL__USERNAME", "mail.username"),
    ("SMTP_PASSWORD", "PORTFOLIO__MAIL__PASSWORD", "mail.password"),
];

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub mail: MailCredentials,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ContactConfig {
    /// Append the relay's error to the message shown to visitors.
    /// Leaks server internals, keep it off outside development.
    #[serde(default)]
    pub show_error_detail: bool,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (PORTFOLIO__MAIL__PASSWORD, etc.)
    /// 2. Legacy SMTP_USERNAME / SMTP_PASSWORD variables
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        Self::load_from(config_path, env::vars().collect())
    }

    /// Same as [`Config::load`], reading variables from `vars` instead of the process
    pub fn load_from(
        config_path: Option<String>,
        vars: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("mail.host", "localhost")?
            .set_default("mail.port", 1025)?
            .set_default("mail.tls", "none")?
            .set_default("mail.sender", "website@localhost")?
            .set_default("mail.recipient", "owner@localhost")?;

        let config_file_path = config_path
            .or_else(|| vars.get("CONFIG_PATH").cloned())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, defaults and environment are enough to run locally
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        for (legacy, prefixed, key) in LEGACY_MAIL_VARS {
            if vars.contains_key(prefixed) {
                continue;
            }
            if let Some(value) = vars.get(legacy) {
                builder = builder.set_override(key, value.as_str())?;
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("PORTFOLIO")
                .separator("__")
                .try_parsing(true)
                .source(Some(vars)),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.mail.host.trim().is_empty() {
            return Err("SMTP host must not be empty".to_string());
        }
        if self.mail.port == 0 {
            return Err("SMTP port must be greater than 0".to_string());
        }
        if self.mail.sender.parse::<Mailbox>().is_err() {
            return Err(format!("Invalid sender address: {}", self.mail.sender));
        }
        if self.mail.recipient.parse::<Mailbox>().is_err() {
            return Err(format!("Invalid recipient address: {}", self.mail.recipient));
        }
        if self.mail.username.is_empty() != self.mail.password.is_empty() {
            return Err("SMTP username and password must be set together".to_string());
        }
        Ok(())
    }
}
