pub mod general;
pub mod green;
pub mod sheets;

pub use general::{help, ping};
pub use green::green;
pub use sheets::{capt, regmp};

use chrono::Utc;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::warn;

use crate::auth::Actor;
use crate::dispatcher::Response;
use crate::gateway::SerenityGateway;
use crate::interaction::Interaction;
use crate::{Context, Data, Error};

/// Build the acting user from the member Discord attached to the interaction
pub(crate) fn actor_from(user_id: serenity::UserId, member: Option<&serenity::Member>) -> Actor {
    Actor::new(
        user_id,
        member.map(|m| m.roles.clone()).unwrap_or_default(),
    )
}

/// Run one interaction through the dispatcher, holding it for the whole call
pub(crate) async fn dispatch(
    data: &Data,
    http: &Arc<serenity::Http>,
    interaction: Interaction,
) -> Response {
    let gateway = SerenityGateway::new(http.clone());
    let mut dispatcher = data.dispatcher.lock().await;
    dispatcher.handle(&gateway, interaction, Utc::now()).await
}

/// Send a dispatcher response as the command's reply
pub(crate) async fn reply(ctx: Context<'_>, response: Response) -> Result<(), Error> {
    match response {
        Response::Private(text) => {
            ctx.send(
                poise::CreateReply::default()
                    .content(text)
                    .ephemeral(true),
            )
            .await?;
        }
        other => {
            warn!(
                "Command '{}' got a response it cannot send: {:?}",
                ctx.command().qualified_name,
                other
            );
        }
    }
    Ok(())
}
