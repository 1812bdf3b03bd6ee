use poise::serenity_prelude::{ChannelId, RoleId};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::green::MAX_COOLDOWN_MINUTES;
use super::{GreenConfig, RoleConfig};
use crate::error::{BotError, Result};

/// Top-level bot configuration.
/// Loaded from data/config.json (or `--config`), then patched from the environment
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    #[serde(default)]
    pub roles: RoleConfig,

    #[serde(default)]
    pub green: GreenConfig,
}

impl BotConfig {
    /// Load from a JSON file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BotError::ConfigLoad {
            path: path.to_string(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| BotError::ConfigParse {
            path: path.to_string(),
            source: e,
        })
    }

    /// Load from a JSON file, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &str) -> Result<Self> {
        match Self::load_from_file(path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path);
                Ok(config)
            }
            Err(BotError::ConfigLoad { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                warn!(
                    "Config file {} not found, using defaults (no role holds any capability)",
                    path
                );
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Apply `ADMIN_ROLE_ID`, `COLLAR_ROLE_ID`, `CAPT_ROLE_ID` and `GREEN_CHANNEL_ID`
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub(crate) fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let parse_id = |key: &str| {
            let value = lookup(key)?;
            match value.trim().parse::<u64>() {
                Ok(id) if id != 0 => Some(id),
                _ => {
                    warn!("Ignoring {}: '{}' is not a valid Discord id", key, value);
                    None
                }
            }
        };

        if let Some(id) = parse_id("ADMIN_ROLE_ID") {
            RoleConfig::add_role(&mut self.roles.admin, RoleId::new(id));
        }
        if let Some(id) = parse_id("COLLAR_ROLE_ID") {
            RoleConfig::add_role(&mut self.roles.facilitator, RoleId::new(id));
        }
        if let Some(id) = parse_id("CAPT_ROLE_ID") {
            RoleConfig::add_role(&mut self.roles.capt_participant, RoleId::new(id));
        }
        if let Some(id) = parse_id("GREEN_CHANNEL_ID") {
            self.green.notification_channel = Some(ChannelId::new(id));
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.green.cooldown_minutes <= 0 {
            return Err(BotError::ConfigValidation {
                message: format!(
                    "green.cooldown_minutes must be positive, got {}",
                    self.green.cooldown_minutes
                ),
            });
        }
        if self.green.cooldown_minutes > MAX_COOLDOWN_MINUTES {
            return Err(BotError::ConfigValidation {
                message: format!(
                    "green.cooldown_minutes must be at most {}, got {}",
                    MAX_COOLDOWN_MINUTES, self.green.cooldown_minutes
                ),
            });
        }
        if self.green.notification_channel.is_none() {
            warn!("green.notification_channel is not set, /green requests will fail");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "roles": {
                "create_capt": ["1"],
                "create_registration": ["2"],
                "capt_participant": ["3"],
                "registration_participant": [],
                "facilitator": ["4"],
                "admin": ["5"],
                "cooldown_exempt": ["6", "7"]
            },
            "green": {
                "notification_channel": "1452747206225432666",
                "mention_roles": ["8"],
                "cooldown_minutes": 10
            }
        }"#;

        let config: BotConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.roles.cooldown_exempt.len(), 2);
        assert_eq!(config.roles.registration_participant, Some(vec![]));
        assert_eq!(
            config.green.notification_channel,
            Some(ChannelId::new(1452747206225432666))
        );
        assert_eq!(config.green.cooldown_window(), chrono::Duration::minutes(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config: BotConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, BotConfig::default());
        assert_eq!(config.green.cooldown_minutes, 25);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: std::result::Result<BotConfig, _> =
            serde_json::from_str(r#"{ "rolez": {} }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("ADMIN_ROLE_ID", "100"),
            ("COLLAR_ROLE_ID", "200"),
            ("CAPT_ROLE_ID", "not-a-number"),
            ("GREEN_CHANNEL_ID", "300"),
        ]
        .into_iter()
        .collect();

        let mut config = BotConfig::default();
        config.roles.admin.push(RoleId::new(100));
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.roles.admin, vec![RoleId::new(100)]);
        assert_eq!(config.roles.facilitator, vec![RoleId::new(200)]);
        assert!(config.roles.capt_participant.is_empty());
        assert_eq!(config.green.notification_channel, Some(ChannelId::new(300)));
    }

    #[test]
    fn test_validate_rejects_non_positive_cooldown() {
        let mut config = BotConfig::default();
        config.green.cooldown_minutes = 0;
        assert!(matches!(
            config.validate(),
            Err(BotError::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_oversized_cooldown() {
        let mut config = BotConfig::default();
        config.green.cooldown_minutes = 1_000_000_000_000;
        assert!(matches!(
            config.validate(),
            Err(BotError::ConfigValidation { .. })
        ));
        assert_eq!(
            config.green.cooldown_window(),
            chrono::Duration::minutes(MAX_COOLDOWN_MINUTES)
        );

        config.green.cooldown_minutes = MAX_COOLDOWN_MINUTES;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = BotConfig::load_or_default("does/not/exist.json").unwrap();
        assert_eq!(config, BotConfig::default());
    }
}
