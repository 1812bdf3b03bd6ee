use super::{actor_from, dispatch, reply};
use crate::interaction::{Command, GreenLevel, Interaction};
use crate::{Context, Error};

/// Request a Green package
#[poise::command(slash_command, guild_only)]
pub async fn green(
    ctx: Context<'_>,
    #[description = "Your Green level"] level: GreenLevel,
) -> Result<(), Error> {
    let member = ctx.author_member().await;
    let actor = actor_from(ctx.author().id, member.as_deref());

    let response = dispatch(
        ctx.data(),
        &ctx.serenity_context().http,
        Interaction::CommandInvoked {
            actor,
            command: Command::Green { level },
        },
    )
    .await;
    reply(ctx, response).await
}
