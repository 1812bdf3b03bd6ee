use poise::serenity_prelude::UserId;
use std::sync::Arc;
use tracing::info;

use super::{MessageLocation, Roster, SessionId, SessionStore, SheetManager};
use crate::auth::{Actor, Authorizer, Capability};
use crate::error::{BotError, Result};
use crate::messages::{capt_message, RenderedMessage};

/// A timed sign-up sheet with bounded main and sub lists
#[derive(Debug, Clone)]
pub struct CaptSession {
    pub max_players: usize,
    pub max_subs: usize,
    pub time: String,
    pub roster: Roster,
    pub location: Option<MessageLocation>,
}

impl CaptSession {
    pub fn new(max_players: usize, max_subs: usize, time: String) -> Self {
        Self {
            max_players,
            max_subs,
            time,
            roster: Roster::new(),
            location: None,
        }
    }
}

/// Validated contents of the capt creation form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptDraft {
    pub max_players: usize,
    pub max_subs: usize,
    pub time: String,
}

impl CaptDraft {
    pub fn parse(players: &str, subs: &str, time: &str) -> Result<Self> {
        let parse = |value: &str| value.trim().parse::<usize>().ok();

        let (Some(max_players), Some(max_subs)) = (parse(players), parse(subs)) else {
            return Err(BotError::invalid_input(
                "Number of players and subs must be whole numbers",
            ));
        };
        if max_players == 0 {
            return Err(BotError::invalid_input("Number of players must be at least 1"));
        }

        Ok(Self {
            max_players,
            max_subs,
            time: time.trim().to_string(),
        })
    }
}

pub struct CaptManager {
    sessions: SessionStore<CaptSession>,
    authorizer: Arc<dyn Authorizer>,
}

impl CaptManager {
    pub fn new(authorizer: Arc<dyn Authorizer>) -> Self {
        Self {
            sessions: SessionStore::new(),
            authorizer,
        }
    }

    pub fn ensure_can_create(&self, actor: &Actor) -> Result<()> {
        if self.authorizer.allows(actor, Capability::CreateCapt) {
            Ok(())
        } else {
            Err(BotError::forbidden("You are not allowed to create a capt"))
        }
    }

    pub fn create(&mut self, actor: &Actor, draft: CaptDraft) -> Result<SessionId> {
        self.ensure_can_create(actor)?;

        let id = SessionId::generate();
        self.sessions.insert(
            id.clone(),
            CaptSession::new(draft.max_players, draft.max_subs, draft.time),
        );
        info!("Capt {} created by {}", id, actor.user_id);
        Ok(id)
    }

    pub fn get(&self, id: &SessionId) -> Result<&CaptSession> {
        self.sessions.get(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    fn ensure_can_join(&self, actor: &Actor) -> Result<()> {
        if self.authorizer.allows(actor, Capability::JoinCapt) {
            Ok(())
        } else {
            Err(BotError::forbidden("You don't have the role to sign up"))
        }
    }
}

impl SheetManager for CaptManager {
    fn join_main(&mut self, id: &SessionId, actor: &Actor) -> Result<()> {
        self.sessions.get(id)?;
        self.ensure_can_join(actor)?;
        let capt = self.sessions.get_mut(id)?;
        capt.roster.join_main(actor.user_id, Some(capt.max_players))
    }

    fn join_sub(&mut self, id: &SessionId, actor: &Actor) -> Result<()> {
        self.sessions.get(id)?;
        self.ensure_can_join(actor)?;
        let capt = self.sessions.get_mut(id)?;
        capt.roster.join_sub(actor.user_id, Some(capt.max_subs))
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
            return Err(BotError::forbidden("Only an administrator can delete a capt"));
        }
        let capt = self.sessions.remove(id)?;
        info!("Capt {} deleted by {}", id, actor.user_id);
        Ok(capt.location)
    }

    fn set_location(&mut self, id: &SessionId, location: MessageLocation) -> Result<()> {
        self.sessions.get_mut(id)?.location = Some(location);
        Ok(())
    }

    fn discard(&mut self, id: &SessionId) {
        let _ = self.sessions.remove(id);
    }

    fn render(&self, id: &SessionId, viewer: Option<UserId>) -> Result<RenderedMessage> {
        Ok(capt_message(id, self.sessions.get(id)?, viewer))
    }
}
