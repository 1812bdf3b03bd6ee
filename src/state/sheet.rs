use poise::serenity_prelude::UserId;

use super::{MessageLocation, SessionId};
use crate::auth::Actor;
use crate::error::Result;
use crate::messages::RenderedMessage;

/// Roster operations shared by capts and registrations.
///
/// Every method looks the session up first, so an unknown id always yields
/// `SessionNotFound` before any permission check.
pub trait SheetManager: Send {
    fn join_main(&mut self, id: &SessionId, actor: &Actor) -> Result<()>;

    fn join_sub(&mut self, id: &SessionId, actor: &Actor) -> Result<()>;

    fn become_facilitator(&mut self, id: &SessionId, actor: &Actor) -> Result<()>;

    fn leave(&mut self, id: &SessionId, actor: &Actor) -> Result<()>;

    /// Remove the record, returning where its message was posted
    fn delete(&mut self, id: &SessionId, actor: &Actor) -> Result<Option<MessageLocation>>;

    fn set_location(&mut self, id: &SessionId, location: MessageLocation) -> Result<()>;

    /// Drop a record that never made it to Discord
    fn discard(&mut self, id: &SessionId);

    fn render(&self, id: &SessionId, viewer: Option<UserId>) -> Result<RenderedMessage>;
}
