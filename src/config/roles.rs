use poise::serenity_prelude::RoleId;
use serde::{Deserialize, Serialize};

/// Role ids granting each bot capability.
/// Loaded from the `roles` section of data/config.json
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RoleConfig {
    /// May run /capt
    #[serde(default)]
    pub create_capt: Vec<RoleId>,

    /// May run /regmp
    #[serde(default)]
    pub create_registration: Vec<RoleId>,

    /// May sign up as main or sub on a capt
    #[serde(default)]
    pub capt_participant: Vec<RoleId>,

    /// May sign up on a registration. `None` leaves registrations open to everyone.
    #[serde(default)]
    pub registration_participant: Option<Vec<RoleId>>,

    /// May sign up as facilitator (collar)
    #[serde(default)]
    pub facilitator: Vec<RoleId>,

    /// May delete sheets
    #[serde(default)]
    pub admin: Vec<RoleId>,

    /// Never throttled by the /green cooldown
    #[serde(default)]
    pub cooldown_exempt: Vec<RoleId>,
}

impl RoleConfig {
    /// Append a role to a list unless it is already there
    pub(crate) fn add_role(list: &mut Vec<RoleId>, role: RoleId) {
        if !list.contains(&role) {
            list.push(role);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roles() {
        let json = r#"{
            "create_capt": ["1438414086588338256", "1451138364743880883"],
            "admin": [1438414086588338256],
            "facilitator": ["42"]
        }"#;

        let config: RoleConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.create_capt.len(), 2);
        assert_eq!(config.admin, vec![RoleId::new(1438414086588338256)]);
        assert_eq!(config.facilitator, vec![RoleId::new(42)]);
        assert!(config.registration_participant.is_none());
        assert!(config.cooldown_exempt.is_empty());
    }

    #[test]
    fn test_add_role_skips_duplicates() {
        let mut list = vec![RoleId::new(1)];
        RoleConfig::add_role(&mut list, RoleId::new(1));
        RoleConfig::add_role(&mut list, RoleId::new(2));
        assert_eq!(list, vec![RoleId::new(1), RoleId::new(2)]);
    }
}
