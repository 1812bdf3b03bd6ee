//! Routes an [`Interaction`] to the capt and registration managers and the
//! cooldown gate, and tells the Discord layer how to answer.
//!
//! The dispatcher owns all bot state. Callers hold it behind a single mutex
//! for the whole interaction, including the reply, so interactions never
//! interleave.

use chrono::{DateTime, Utc};
use poise::serenity_prelude::ChannelId;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::auth::{Actor, Authorizer, Capability};
use crate::config::{BotConfig, GreenConfig};
use crate::error::{BotError, Result};
use crate::gateway::{GreenNotice, MessageGateway};
use crate::interaction::{
    ButtonTag, Command, Form, FormKind, GreenLevel, Interaction, RosterAction, Sheet,
};
use crate::messages::{
    cooldown_message, created_message, deleted_message, green_accepted_message, RenderedMessage,
};
use crate::state::{
    CaptDraft, CaptManager, CooldownDecision, CooldownGate, RegistrationManager, SheetManager,
};

/// What the Discord layer should do in answer to an interaction
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Open the creation form
    ShowForm(FormKind),
    /// Ephemeral reply to the acting user
    Private(String),
    /// Replace the pressed message with a fresh render
    Update(RenderedMessage),
}

pub struct Dispatcher {
    capts: CaptManager,
    registrations: RegistrationManager,
    cooldowns: CooldownGate,
    authorizer: Arc<dyn Authorizer>,
    green: GreenConfig,
}

impl Dispatcher {
    pub fn new(config: &BotConfig, authorizer: Arc<dyn Authorizer>) -> Self {
        Self {
            capts: CaptManager::new(authorizer.clone()),
            registrations: RegistrationManager::new(authorizer.clone()),
            cooldowns: CooldownGate::new(config.green.cooldown_window()),
            authorizer,
            green: config.green.clone(),
        }
    }

    pub fn capts(&self) -> &CaptManager {
        &self.capts
    }

    pub fn registrations(&self) -> &RegistrationManager {
        &self.registrations
    }

    pub async fn handle(
        &mut self,
        gateway: &dyn MessageGateway,
        interaction: Interaction,
        now: DateTime<Utc>,
    ) -> Response {
        let result = match interaction {
            Interaction::CommandInvoked { actor, command } => {
                self.command(gateway, actor, command, now).await
            }
            Interaction::FormSubmitted {
                actor,
                channel_id,
                form,
            } => self.create_sheet(gateway, actor, channel_id, form).await,
            Interaction::ButtonPressed { actor, tag } => self.press(gateway, actor, tag).await,
        };

        result.unwrap_or_else(|e| {
            match &e {
                BotError::Discord { .. } | BotError::Internal { .. } => {
                    error!("Interaction failed: {}", e)
                }
                _ => debug!("Interaction rejected: {}", e),
            }
            Response::Private(e.user_message())
        })
    }

    fn sheet_mut(&mut self, sheet: Sheet) -> &mut dyn SheetManager {
        match sheet {
            Sheet::Capt => &mut self.capts,
            Sheet::Registration => &mut self.registrations,
        }
    }

    async fn command(
        &mut self,
        gateway: &dyn MessageGateway,
        actor: Actor,
        command: Command,
        now: DateTime<Utc>,
    ) -> Result<Response> {
        match command {
            Command::Capt => {
                self.capts.ensure_can_create(&actor)?;
                Ok(Response::ShowForm(FormKind::Capt))
            }
            Command::Regmp => {
                self.registrations.ensure_can_create(&actor)?;
                Ok(Response::ShowForm(FormKind::Registration))
            }
            Command::Green { level } => self.green_request(gateway, actor, level, now).await,
        }
    }

    async fn green_request(
        &mut self,
        gateway: &dyn MessageGateway,
        actor: Actor,
        level: GreenLevel,
        now: DateTime<Utc>,
    ) -> Result<Response> {
        self.cooldowns.prune(now);

        let exempt = self.authorizer.allows(&actor, Capability::BypassCooldown);
        if let CooldownDecision::Denied { seconds_remaining } =
            self.cooldowns
                .check_and_record_exempt(actor.user_id, exempt, now)
        {
            return Ok(Response::Private(cooldown_message(seconds_remaining)));
        }

        let channel_id = self.green.notification_channel.ok_or_else(|| BotError::Internal {
            message: "green notification channel is not configured".to_string(),
        })?;

        let notice = GreenNotice {
            user_id: actor.user_id,
            level,
            mention_roles: self.green.mention_roles.clone(),
            requested_at: now,
        };
        gateway.notify(channel_id, &notice).await?;

        info!("Green request from {} ({})", actor.user_id, level.label());
        Ok(Response::Private(green_accepted_message(actor.user_id)))
    }

    async fn create_sheet(
        &mut self,
        gateway: &dyn MessageGateway,
        actor: Actor,
        channel_id: ChannelId,
        form: Form,
    ) -> Result<Response> {
        let (sheet, id) = match form {
            Form::Capt {
                players,
                subs,
                time,
            } => {
                self.capts.ensure_can_create(&actor)?;
                let draft = CaptDraft::parse(&players, &subs, &time)?;
                (Sheet::Capt, self.capts.create(&actor, draft)?)
            }
            Form::Registration {
                event_name,
                description,
            } => (
                Sheet::Registration,
                self.registrations.create(&actor, &event_name, description)?,
            ),
        };

        let manager = self.sheet_mut(sheet);
        let rendered = manager.render(&id, None)?;
        match gateway.publish(channel_id, &rendered).await {
            Ok(location) => {
                manager.set_location(&id, location)?;
                Ok(Response::Private(created_message(sheet).to_string()))
            }
            Err(e) => {
                manager.discard(&id);
                Err(e)
            }
        }
    }

    async fn press(
        &mut self,
        gateway: &dyn MessageGateway,
        actor: Actor,
        tag: ButtonTag,
    ) -> Result<Response> {
        debug!("Button {} pressed by {}", tag, actor.user_id);

        let manager = self.sheet_mut(tag.sheet);
        match tag.action {
            RosterAction::JoinMain => manager.join_main(&tag.session, &actor)?,
            RosterAction::JoinSub => manager.join_sub(&tag.session, &actor)?,
            RosterAction::BecomeFacilitator => manager.become_facilitator(&tag.session, &actor)?,
            RosterAction::Leave => manager.leave(&tag.session, &actor)?,
            RosterAction::Delete => {
                if let Some(location) = manager.delete(&tag.session, &actor)? {
                    if let Err(e) = gateway.delete(location).await {
                        warn!("Failed to delete message for {}: {}", tag.session, e);
                    }
                }
                return Ok(Response::Private(deleted_message(tag.sheet).to_string()));
            }
        }

        Ok(Response::Update(
            manager.render(&tag.session, Some(actor.user_id))?,
        ))
    }
}

/// Dispatcher shared between the command handlers and the event handler
pub type SharedDispatcher = Arc<Mutex<Dispatcher>>;

pub fn create_shared_dispatcher(
    config: &BotConfig,
    authorizer: Arc<dyn Authorizer>,
) -> SharedDispatcher {
    Arc::new(Mutex::new(Dispatcher::new(config, authorizer)))
}
