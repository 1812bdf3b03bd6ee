use poise::Modal;
use tracing::{debug, info};

use super::{actor_from, dispatch, reply};
use crate::dispatcher::Response;
use crate::interaction::{Command, Form, Interaction};
use crate::{ApplicationContext, Context, Error};

#[derive(Debug, Modal)]
#[name = "Create capt"]
struct CaptModal {
    #[name = "Number of players"]
    #[placeholder = "e.g. 10"]
    players: String,
    #[name = "Max subs"]
    #[placeholder = "e.g. 5"]
    subs: String,
    #[name = "Capt time"]
    #[placeholder = "e.g. 15:00"]
    time: String,
}

impl From<CaptModal> for Form {
    fn from(modal: CaptModal) -> Self {
        Form::Capt {
            players: modal.players,
            subs: modal.subs,
            time: modal.time,
        }
    }
}

#[derive(Debug, Modal)]
#[name = "Create registration"]
struct RegistrationModal {
    #[name = "Date and time"]
    #[placeholder = "e.g. 16.10 at 16:00"]
    event_name: String,
    #[name = "Description (optional)"]
    #[placeholder = "Anything participants should know..."]
    #[paragraph]
    description: Option<String>,
}

impl From<RegistrationModal> for Form {
    fn from(modal: RegistrationModal) -> Self {
        Form::Registration {
            event_name: modal.event_name,
            description: modal.description,
        }
    }
}

/// Create a capt sign-up sheet
#[poise::command(slash_command, guild_only)]
pub async fn capt(ctx: ApplicationContext<'_>) -> Result<(), Error> {
    let app_ctx = ctx;
    let ctx: Context<'_> = app_ctx.into();
    let actor = actor_from(ctx.author().id, app_ctx.interaction.member.as_deref());
    let http = &ctx.serenity_context().http;

    let response = dispatch(
        ctx.data(),
        http,
        Interaction::CommandInvoked {
            actor: actor.clone(),
            command: Command::Capt,
        },
    )
    .await;
    if !matches!(response, Response::ShowForm(_)) {
        return reply(ctx, response).await;
    }

    // The dispatcher is not held while the user fills in the form
    let Some(modal) = CaptModal::execute(app_ctx).await? else {
        debug!("Capt form from {} was not submitted", ctx.author().name);
        return Ok(());
    };
    info!("Capt form submitted by {}: {:?}", ctx.author().name, modal);

    let response = dispatch(
        ctx.data(),
        http,
        Interaction::FormSubmitted {
            actor,
            channel_id: ctx.channel_id(),
            form: modal.into(),
        },
    )
    .await;
    reply(ctx, response).await
}

/// Open a registration for an event
#[poise::command(slash_command, guild_only)]
pub async fn regmp(ctx: ApplicationContext<'_>) -> Result<(), Error> {
    let app_ctx = ctx;
    let ctx: Context<'_> = app_ctx.into();
    let actor = actor_from(ctx.author().id, app_ctx.interaction.member.as_deref());
    let http = &ctx.serenity_context().http;

    let response = dispatch(
        ctx.data(),
        http,
        Interaction::CommandInvoked {
            actor: actor.clone(),
            command: Command::Regmp,
        },
    )
    .await;
    if !matches!(response, Response::ShowForm(_)) {
        return reply(ctx, response).await;
    }

    let Some(modal) = RegistrationModal::execute(app_ctx).await? else {
        debug!("Registration form from {} was not submitted", ctx.author().name);
        return Ok(());
    };
    info!("Registration form submitted by {}: {:?}", ctx.author().name, modal);

    let response = dispatch(
        ctx.data(),
        http,
        Interaction::FormSubmitted {
            actor,
            channel_id: ctx.channel_id(),
            form: modal.into(),
        },
    )
    .await;
    reply(ctx, response).await
}
