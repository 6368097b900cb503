//! Configuration management

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use crate::application::errors::ConfigError;

/// Process configuration, read once at startup
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub discord: DiscordConfig,
    pub classifier: ClassifierConfig,
    pub endpoint: EndpointConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    /// Author whose spawn announcements are watched
    pub target: String,
    /// Token that must appear in the spawn image URL
    pub spawn_marker: String,
    pub command_prefix: String,
    /// Seconds between classification and the action message. Negative values clamp to 0.
    pub delay_seconds: i64,
    pub hints: bool,
    /// Optional cap on concurrently running sequences
    pub max_concurrent_sequences: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DiscordConfig {
    pub token: Option<String>,
    pub is_bot: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ClassifierConfig {
    pub model_path: PathBuf,
    pub image_width: u32,
    pub image_height: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct EndpointConfig {
    pub bind: String,
    pub model_path: PathBuf,
    pub composition_map: HashMap<String, i64>,
    pub packaging_map: HashMap<String, i64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            target: "Pokécord#4503".to_string(),
            spawn_marker: "PokecordSpawn".to_string(),
            command_prefix: "p!catch".to_string(),
            delay_seconds: 10,
            hints: false,
            max_concurrent_sequences: None,
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: None,
            is_bot: true,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("100x100model.json"),
            image_width: 100,
            image_height: 100,
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            model_path: PathBuf::from("battery_model.json"),
            composition_map: HashMap::new(),
            packaging_map: HashMap::new(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn load_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Overlay environment variables on top of the current values
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(token) = var("DISCORD_TOKEN") {
            self.discord.token = Some(token);
        }

        if let Some(target) = var("POKEGUESSER_TARGET") {
            self.bot.target = target;
        }

        if let Some(delay) = var("POKEGUESSER_DELAY") {
            self.bot.delay_seconds = delay
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("POKEGUESSER_DELAY={}", delay)))?;
        }

        if let Some(hints) = var("POKEGUESSER_HINTS") {
            self.bot.hints = matches!(hints.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }

        if let Some(path) = var("MODEL_PATH") {
            self.classifier.model_path = PathBuf::from(path);
        }

        if let Some(path) = var("ENDPOINT_MODEL_PATH") {
            self.endpoint.model_path = PathBuf::from(path);
        }

        if let Some(map) = var("COMPOSITION_MAP_STRING") {
            self.endpoint.composition_map = parse_lookup("COMPOSITION_MAP_STRING", &map)?;
        }

        if let Some(map) = var("PACKAGING_MAP_STRING") {
            self.endpoint.packaging_map = parse_lookup("PACKAGING_MAP_STRING", &map)?;
        }

        Ok(())
    }

    /// Configured delay, negative values clamped to zero
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.bot.delay_seconds.max(0) as u64)
    }

    /// Gateway credential, validated for the bot adapter
    pub fn bot_token(&self) -> Result<&str, ConfigError> {
        let token = self
            .discord
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField("discord.token".to_string()))?;

        if !self.discord.is_bot {
            return Err(ConfigError::InvalidValue(
                "discord.is-bot: only bot tokens are supported by the gateway adapter".to_string(),
            ));
        }

        Ok(token)
    }
}

/// Parse a JSON object of string to integer ids
fn parse_lookup(name: &str, raw: &str) -> Result<HashMap<String, i64>, ConfigError> {
    serde_json::from_str(raw).map_err(|e| ConfigError::Parse(format!("{}: {}", name, e)))
}
