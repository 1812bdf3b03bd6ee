//! Capability checks.
//!
//! The core never looks at role ids directly. It asks an [`Authorizer`] whether
//! an [`Actor`] holds a [`Capability`]; the role-based implementation reads the
//! role lists from [`RoleConfig`].

use poise::serenity_prelude::{RoleId, UserId};

use crate::config::RoleConfig;

/// The user behind an interaction, with the roles Discord reported for them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub roles: Vec<RoleId>,
}

impl Actor {
    pub fn new(user_id: UserId, roles: Vec<RoleId>) -> Self {
        Self { user_id, roles }
    }

    pub fn has_any_role(&self, roles: &[RoleId]) -> bool {
        self.roles.iter().any(|r| roles.contains(r))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    CreateCapt,
    CreateRegistration,
    JoinCapt,
    JoinRegistration,
    Facilitate,
    Administer,
    BypassCooldown,
}

pub trait Authorizer: Send + Sync {
    fn allows(&self, actor: &Actor, capability: Capability) -> bool;
}

/// Grants capabilities by role membership
pub struct RoleAuthorizer {
    roles: RoleConfig,
}

impl RoleAuthorizer {
    pub fn new(roles: RoleConfig) -> Self {
        Self { roles }
    }
}

impl Authorizer for RoleAuthorizer {
    fn allows(&self, actor: &Actor, capability: Capability) -> bool {
        let required = match capability {
            Capability::CreateCapt => &self.roles.create_capt,
            Capability::CreateRegistration => &self.roles.create_registration,
            Capability::JoinCapt => &self.roles.capt_participant,
            Capability::JoinRegistration => match &self.roles.registration_participant {
                Some(roles) => roles,
                None => return true,
            },
            Capability::Facilitate => &self.roles.facilitator,
            Capability::Administer => &self.roles.admin,
            Capability::BypassCooldown => &self.roles.cooldown_exempt,
        };
        actor.has_any_role(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles() -> RoleConfig {
        RoleConfig {
            create_capt: vec![RoleId::new(1), RoleId::new(2)],
            capt_participant: vec![RoleId::new(3)],
            admin: vec![RoleId::new(1)],
            ..Default::default()
        }
    }

    #[test]
    fn test_role_membership_grants_capability() {
        let auth = RoleAuthorizer::new(roles());
        let leader = Actor::new(UserId::new(10), vec![RoleId::new(2), RoleId::new(3)]);

        assert!(auth.allows(&leader, Capability::CreateCapt));
        assert!(auth.allows(&leader, Capability::JoinCapt));
        assert!(!auth.allows(&leader, Capability::Administer));
        assert!(!auth.allows(&leader, Capability::Facilitate));
    }

    #[test]
    fn test_empty_list_denies_everyone() {
        let auth = RoleAuthorizer::new(roles());
        let actor = Actor::new(UserId::new(10), vec![RoleId::new(1)]);
        assert!(!auth.allows(&actor, Capability::BypassCooldown));
    }

    #[test]
    fn test_registration_join_open_unless_configured() {
        let actor = Actor::new(UserId::new(10), vec![]);
        assert!(RoleAuthorizer::new(roles()).allows(&actor, Capability::JoinRegistration));

        let mut gated = roles();
        gated.registration_participant = Some(vec![RoleId::new(9)]);
        assert!(!RoleAuthorizer::new(gated).allows(&actor, Capability::JoinRegistration));
    }
}
