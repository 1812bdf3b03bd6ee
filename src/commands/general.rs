use poise::serenity_prelude as serenity;
use tracing::info;

use crate::{Context, Error};

/// Check if the bot is running
#[poise::command(slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    info!("Ping command called by {}", ctx.author().name);
    ctx.send(poise::CreateReply::default()
        .content("Pong! Sign-ups are open.")
        .ephemeral(true))
        .await?;
    Ok(())
}

/// Show help information
#[poise::command(slash_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let embed = serenity::CreateEmbed::new()
        .title("Capt & Registration Bot")
        .description("Sign-up sheets for capts and events, plus Green requests. Use the buttons under a sheet to join, sub, become a facilitator or leave.")
        .field("/capt", "Create a capt sign-up sheet", false)
        .field("/regmp", "Open a registration for an event", false)
        .field("/green", "Request a Green package (limited by a cooldown)", false)
        .field("/ping", "Check if the bot is running", false)
        .color(0x3498db);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true)).await?;
    Ok(())
}
