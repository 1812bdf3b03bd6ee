use poise::serenity_prelude::{ChannelId, RoleId};
use serde::{Deserialize, Serialize};

/// Settings for the /green request form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GreenConfig {
    /// Channel that receives request notices
    #[serde(default)]
    pub notification_channel: Option<ChannelId>,

    /// Roles pinged on every notice
    #[serde(default)]
    pub mention_roles: Vec<RoleId>,

    /// Quiet period between two requests of the same user
    #[serde(default = "default_cooldown_minutes")]
    pub cooldown_minutes: i64,
}

fn default_cooldown_minutes() -> i64 {
    25
}

/// Longest accepted cooldown, one week
pub const MAX_COOLDOWN_MINUTES: i64 = 7 * 24 * 60;

impl GreenConfig {
    pub fn cooldown_window(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.cooldown_minutes.clamp(0, MAX_COOLDOWN_MINUTES))
    }
}

impl Default for GreenConfig {
    fn default() -> Self {
        Self {
            notification_channel: None,
            mention_roles: vec![],
            cooldown_minutes: default_cooldown_minutes(),
        }
    }
}
