//! Inbound interactions as the dispatcher sees them.
//!
//! The Discord layer converts poise command invocations, modal submissions
//! and component presses into an [`Interaction`]; the button custom id is
//! parsed once into a [`ButtonTag`].

use poise::serenity_prelude::ChannelId;
use std::fmt;
use std::str::FromStr;

use crate::auth::Actor;
use crate::state::SessionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    CommandInvoked { actor: Actor, command: Command },
    FormSubmitted {
        actor: Actor,
        channel_id: ChannelId,
        form: Form,
    },
    ButtonPressed { actor: Actor, tag: ButtonTag },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Capt,
    Regmp,
    Green { level: GreenLevel },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum GreenLevel {
    #[name = "Level 1"]
    One,
    #[name = "Level 2"]
    Two,
    #[name = "Level 3"]
    Three,
}

impl GreenLevel {
    pub fn label(&self) -> &'static str {
        match self {
            GreenLevel::One => "Level 1",
            GreenLevel::Two => "Level 2",
            GreenLevel::Three => "Level 3",
        }
    }
}

/// Raw field values of a submitted creation form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Form {
    Capt {
        players: String,
        subs: String,
        time: String,
    },
    Registration {
        event_name: String,
        description: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Capt,
    Registration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sheet {
    Capt,
    Registration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterAction {
    JoinMain,
    JoinSub,
    BecomeFacilitator,
    Leave,
    Delete,
}

/// Structured form of a button custom id: `<action>_<session id>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonTag {
    pub sheet: Sheet,
    pub action: RosterAction,
    pub session: SessionId,
}

// Prefixes match the ids the bot has always put on its buttons, so sheets
// posted before a restart still decode (and then report a missing session).
const PREFIXES: [(&str, Sheet, RosterAction); 10] = [
    ("join_main", Sheet::Capt, RosterAction::JoinMain),
    ("join_sub", Sheet::Capt, RosterAction::JoinSub),
    ("become_collar", Sheet::Capt, RosterAction::BecomeFacilitator),
    ("cancel", Sheet::Capt, RosterAction::Leave),
    ("delete", Sheet::Capt, RosterAction::Delete),
    ("reg_join", Sheet::Registration, RosterAction::JoinMain),
    ("reg_sub", Sheet::Registration, RosterAction::JoinSub),
    ("reg_collar", Sheet::Registration, RosterAction::BecomeFacilitator),
    ("reg_cancel", Sheet::Registration, RosterAction::Leave),
    ("reg_delete", Sheet::Registration, RosterAction::Delete),
];

impl ButtonTag {
    pub fn new(sheet: Sheet, action: RosterAction, session: SessionId) -> Self {
        Self {
            sheet,
            action,
            session,
        }
    }

    fn prefix(&self) -> &'static str {
        PREFIXES
            .iter()
            .find(|(_, sheet, action)| *sheet == self.sheet && *action == self.action)
            .map(|(prefix, _, _)| *prefix)
            .unwrap_or("unknown")
    }

    /// Parse a button custom id, `None` if it is not one of ours
    pub fn decode(custom_id: &str) -> Option<Self> {
        let (prefix, session) = custom_id.rsplit_once('_')?;
        if session.is_empty() {
            return None;
        }
        let (_, sheet, action) = PREFIXES.iter().find(|(p, _, _)| *p == prefix)?;
        Some(Self::new(*sheet, *action, SessionId::from(session)))
    }
}

impl fmt::Display for ButtonTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.prefix(), self.session)
    }
}

impl FromStr for ButtonTag {
    type Err = crate::error::BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s).ok_or_else(|| {
            crate::error::BotError::invalid_input(format!("unknown button '{}'", s))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_legacy_ids() {
        let tag = ButtonTag::decode("join_main_1712345678901").unwrap();
        assert_eq!(tag.sheet, Sheet::Capt);
        assert_eq!(tag.action, RosterAction::JoinMain);
        assert_eq!(tag.session.as_str(), "1712345678901");

        let tag: ButtonTag = "reg_cancel_abc".parse().unwrap();
        assert_eq!(tag.sheet, Sheet::Registration);
        assert_eq!(tag.action, RosterAction::Leave);

        let tag = ButtonTag::decode("become_collar_x").unwrap();
        assert_eq!(tag.action, RosterAction::BecomeFacilitator);
    }

    #[test]
    fn test_encode_uses_wire_prefixes() {
        let id = SessionId::from("42");
        let tag = ButtonTag::new(Sheet::Registration, RosterAction::Delete, id.clone());
        assert_eq!(tag.to_string(), "reg_delete_42");

        let tag = ButtonTag::new(Sheet::Capt, RosterAction::Leave, id);
        assert_eq!(tag.to_string(), "cancel_42");
    }

    #[test]
    fn test_every_action_decodes_back() {
        let id = SessionId::generate();
        for (_, sheet, action) in PREFIXES {
            let tag = ButtonTag::new(sheet, action, id.clone());
            assert_eq!(ButtonTag::decode(&tag.to_string()), Some(tag));
        }
    }

    #[test]
    fn test_reject_foreign_ids() {
        assert!(ButtonTag::decode("config_global").is_none());
        assert!(ButtonTag::decode("join_main_").is_none());
        assert!(ButtonTag::decode("nounderscore").is_none());
        assert!("download_users_2025E".parse::<ButtonTag>().is_err());
    }
}
