use async_trait::async_trait;
use chrono::{DateTime, Utc};
use poise::serenity_prelude::{self as serenity, ChannelId, Http, Mentionable, RoleId, UserId};
use std::sync::Arc;

use crate::error::Result;
use crate::interaction::GreenLevel;
use crate::messages::RenderedMessage;
use crate::state::MessageLocation;

/// A /green request as posted to the staff channel
#[derive(Debug, Clone, PartialEq)]
pub struct GreenNotice {
    pub user_id: UserId,
    pub level: GreenLevel,
    pub mention_roles: Vec<RoleId>,
    pub requested_at: DateTime<Utc>,
}

impl GreenNotice {
    pub fn description(&self) -> String {
        let mentions = self
            .mention_roles
            .iter()
            .map(|r| r.mention().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "{}\n\n**User:** {}\n**Level:** {}",
            mentions,
            self.user_id.mention(),
            self.level.label()
        )
    }
}

/// Outgoing messages that are not a direct reply to an interaction
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageGateway: Send + Sync {
    /// Post a new sheet and report where it landed
    async fn publish(&self, channel_id: ChannelId, message: &RenderedMessage) -> Result<MessageLocation>;

    async fn delete(&self, location: MessageLocation) -> Result<()>;

    async fn notify(&self, channel_id: ChannelId, notice: &GreenNotice) -> Result<()>;
}

/// Gateway backed by the serenity HTTP client
pub struct SerenityGateway {
    http: Arc<Http>,
}

impl SerenityGateway {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl MessageGateway for SerenityGateway {
    async fn publish(&self, channel_id: ChannelId, message: &RenderedMessage) -> Result<MessageLocation> {
        let sent = channel_id
            .send_message(
                &*self.http,
                serenity::CreateMessage::new()
                    .content(&message.content)
                    .components(message.components()),
            )
            .await?;

        Ok(MessageLocation {
            channel_id,
            message_id: sent.id,
        })
    }

    async fn delete(&self, location: MessageLocation) -> Result<()> {
        location
            .channel_id
            .delete_message(&*self.http, location.message_id)
            .await?;
        Ok(())
    }

    async fn notify(&self, channel_id: ChannelId, notice: &GreenNotice) -> Result<()> {
        let mut embed = serenity::CreateEmbed::new()
            .title("📋 New Green request")
            .description(notice.description())
            .color(0x00ff00)
            .footer(serenity::CreateEmbedFooter::new("Waiting for a checkmark"));
        if let Ok(timestamp) = serenity::Timestamp::from_unix_timestamp(notice.requested_at.timestamp()) {
            embed = embed.timestamp(timestamp);
        }

        channel_id
            .send_message(
                &*self.http,
                serenity::CreateMessage::new()
                    .embed(embed)
                    .allowed_mentions(
                        serenity::CreateAllowedMentions::new().roles(notice.mention_roles.clone()),
                    ),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_description() {
        let notice = GreenNotice {
            user_id: UserId::new(7),
            level: GreenLevel::Two,
            mention_roles: vec![RoleId::new(1), RoleId::new(2)],
            requested_at: Utc::now(),
        };
        assert_eq!(
            notice.description(),
            "<@&1> <@&2>\n\n**User:** <@7>\n**Level:** Level 2"
        );
    }
}
