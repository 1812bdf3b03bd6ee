use poise::serenity_prelude::UserId;
use std::sync::Arc;
use tracing::info;

use super::{MessageLocation, Roster, SessionId, SessionStore, SheetManager};
use crate::auth::{Actor, Authorizer, Capability};
use crate::error::{BotError, Result};
use crate::messages::{registration_message, RenderedMessage};

/// An unbounded sign-up sheet for a named event
#[derive(Debug, Clone)]
pub struct Registration {
    pub event_name: String,
    pub description: Option<String>,
    pub roster: Roster,
    pub location: Option<MessageLocation>,
}

impl Registration {
    /// Blank descriptions are dropped
    pub fn new(event_name: String, description: Option<String>) -> Self {
        Self {
            event_name,
            description: description.filter(|d| !d.trim().is_empty()),
            roster: Roster::new(),
            location: None,
        }
    }
}

pub struct RegistrationManager {
    sessions: SessionStore<Registration>,
    authorizer: Arc<dyn Authorizer>,
}

impl RegistrationManager {
    pub fn new(authorizer: Arc<dyn Authorizer>) -> Self {
        Self {
            sessions: SessionStore::new(),
            authorizer,
        }
    }

    pub fn ensure_can_create(&self, actor: &Actor) -> Result<()> {
        if self.authorizer.allows(actor, Capability::CreateRegistration) {
            Ok(())
        } else {
            Err(BotError::forbidden(
                "You are not allowed to start a registration",
            ))
        }
    }

    pub fn create(
        &mut self,
        actor: &Actor,
        event_name: &str,
        description: Option<String>,
    ) -> Result<SessionId> {
        self.ensure_can_create(actor)?;

        let event_name = event_name.trim();
        if event_name.is_empty() {
            return Err(BotError::invalid_input("Event name is required"));
        }

        let id = SessionId::generate();
        self.sessions
            .insert(id.clone(), Registration::new(event_name.to_string(), description));
        info!("Registration {} created by {}", id, actor.user_id);
        Ok(id)
    }

    pub fn get(&self, id: &SessionId) -> Result<&Registration> {
        self.sessions.get(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    fn ensure_can_join(&self, actor: &Actor) -> Result<()> {
        if self.authorizer.allows(actor, Capability::JoinRegistration) {
            Ok(())
        } else {
            Err(BotError::forbidden("You don't have the role to sign up"))
        }
    }
}

impl SheetManager for RegistrationManager {
    fn join_main(&mut self, id: &SessionId, actor: &Actor) -> Result<()> {
        self.sessions.get(id)?;
        self.ensure_can_join(actor)?;
        self.sessions.get_mut(id)?.roster.join_main(actor.user_id, None)
    }

    fn join_sub(&mut self, id: &SessionId, actor: &Actor) -> Result<()> {
        self.sessions.get(id)?;
        self.ensure_can_join(actor)?;
        self.sessions.get_mut(id)?.roster.join_sub(actor.user_id, None)
    }

    fn become_facilitator(&mut self, id: &SessionId, actor: &Actor) -> Result<()> {
        self.sessions.get(id)?;
        if !self.authorizer.allows(actor, Capability::Facilitate) {
            return Err(BotError::forbidden("You don't have the facilitator role"));
        }
        self.sessions.get_mut(id)?.roster.become_facilitator(actor.user_id)
    }

    fn leave(&mut self, id: &SessionId, actor: &Actor) -> Result<()> {
        self.sessions.get_mut(id)?.roster.leave(actor.user_id)?;
        Ok(())
    }

    fn delete(&mut self, id: &SessionId, actor: &Actor) -> Result<Option<MessageLocation>> {
        self.sessions.get(id)?;
        if !self.authorizer.allows(actor, Capability::Administer) {
            return Err(BotError::forbidden(
                "Only an administrator can delete a registration",
            ));
        }
        let registration = self.sessions.remove(id)?;
        info!("Registration {} deleted by {}", id, actor.user_id);
        Ok(registration.location)
    }

    fn set_location(&mut self, id: &SessionId, location: MessageLocation) -> Result<()> {
        self.sessions.get_mut(id)?.location = Some(location);
        Ok(())
    }

    fn discard(&mut self, id: &SessionId) {
        let _ = self.sessions.remove(id);
    }

    fn render(&self, id: &SessionId, viewer: Option<UserId>) -> Result<RenderedMessage> {
        Ok(registration_message(id, self.sessions.get(id)?, viewer))
    }
}
