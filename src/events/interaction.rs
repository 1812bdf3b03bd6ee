use chrono::Utc;
use poise::serenity_prelude as serenity;
use tracing::{debug, warn};

use crate::commands::actor_from;
use crate::dispatcher::Response;
use crate::gateway::SerenityGateway;
use crate::interaction::{ButtonTag, Interaction};
use crate::{Data, Error};

/// Handle button presses on sign-up sheets
pub async fn handle_interaction(
    ctx: &serenity::Context,
    interaction: &serenity::Interaction,
    data: &Data,
) -> Result<(), Error> {
    // Slash commands and modals are routed through poise
    let serenity::Interaction::Component(component) = interaction else {
        return Ok(());
    };

    let custom_id = &component.data.custom_id;
    let tag: ButtonTag = match custom_id.parse() {
        Ok(tag) => tag,
        Err(_) => {
            warn!("Unknown button interaction: {}", custom_id);
            return Ok(());
        }
    };
    debug!("Button {} pressed by {}", custom_id, component.user.name);

    let actor = actor_from(component.user.id, component.member.as_ref());
    let gateway = SerenityGateway::new(ctx.http.clone());

    // Keep the dispatcher locked until Discord has the updated message,
    // so concurrent presses on one sheet are applied in order
    let mut dispatcher = data.dispatcher.lock().await;
    let response = dispatcher
        .handle(&gateway, Interaction::ButtonPressed { actor, tag }, Utc::now())
        .await;

    let reply = match response {
        Response::Update(rendered) => serenity::CreateInteractionResponse::UpdateMessage(
            serenity::CreateInteractionResponseMessage::new()
                .content(rendered.content.clone())
                .components(rendered.components()),
        ),
        Response::Private(text) => serenity::CreateInteractionResponse::Message(
            serenity::CreateInteractionResponseMessage::new()
                .content(text)
                .ephemeral(true),
        ),
        Response::ShowForm(kind) => {
            warn!("Button {} unexpectedly asked for a {:?} form", custom_id, kind);
            return Ok(());
        }
    };

    component.create_response(ctx, reply).await?;
    drop(dispatcher);
    Ok(())
}
