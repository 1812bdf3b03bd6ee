// src/messages.rs
use poise::serenity_prelude::{self as serenity, ButtonStyle, Mentionable, UserId};

use crate::interaction::{ButtonTag, RosterAction, Sheet};
use crate::state::{CaptSession, Registration, Roster, SessionId};

/// A message body plus its button rows, independent of the Discord builders
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub content: String,
    pub rows: Vec<Vec<ButtonSpec>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSpec {
    pub tag: ButtonTag,
    pub label: &'static str,
    pub style: ButtonStyle,
    pub disabled: bool,
}

impl RenderedMessage {
    pub fn button(&self, action: RosterAction) -> Option<&ButtonSpec> {
        self.rows
            .iter()
            .flatten()
            .find(|b| b.tag.action == action)
    }

    pub fn components(&self) -> Vec<serenity::CreateActionRow> {
        self.rows
            .iter()
            .map(|row| {
                serenity::CreateActionRow::Buttons(
                    row.iter()
                        .map(|b| {
                            serenity::CreateButton::new(b.tag.to_string())
                                .label(b.label)
                                .style(b.style)
                                .disabled(b.disabled)
                        })
                        .collect(),
                )
            })
            .collect()
    }
}

pub fn capt_message(id: &SessionId, capt: &CaptSession, viewer: Option<UserId>) -> RenderedMessage {
    let roster = &capt.roster;
    let content = format!(
        "🕒 **Capt at {}**\n\n\
        👥 **Main {}/{}**\n{}\n\n\
        🔁 **Subs {}/{}**\n{}\n\n\
        🧑‍🦽 **Facilitators {}**\n{}",
        capt.time,
        roster.main().len(),
        capt.max_players,
        numbered(roster.main(), ""),
        roster.subs().len(),
        capt.max_subs,
        numbered(roster.subs(), ""),
        roster.facilitators().len(),
        numbered(roster.facilitators(), " 🧑‍🦽"),
    );

    RenderedMessage {
        content,
        rows: buttons(Sheet::Capt, id, roster, viewer),
    }
}

pub fn registration_message(
    id: &SessionId,
    registration: &Registration,
    viewer: Option<UserId>,
) -> RenderedMessage {
    let roster = &registration.roster;
    let mut content = format!("📋 **Registration: {}**\n\n", registration.event_name);

    if let Some(description) = registration.description.as_deref() {
        content.push_str(description);
        content.push_str("\n\n");
    }

    content.push_str(&format!(
        "👥 **Participants**\n{}\n\n\
        🔁 **Subs**\n{}\n\n\
        🧑‍🦽 **Facilitators**\n{}",
        numbered(roster.main(), ""),
        numbered(roster.subs(), ""),
        numbered(roster.facilitators(), ""),
    ));

    RenderedMessage {
        content,
        rows: buttons(Sheet::Registration, id, roster, viewer),
    }
}

fn numbered(users: &[UserId], suffix: &str) -> String {
    if users.is_empty() {
        return "—".to_string();
    }
    users
        .iter()
        .enumerate()
        .map(|(i, u)| format!("{}. {}{}", i + 1, u.mention(), suffix))
        .collect::<Vec<_>>()
        .join("\n")
}

// The leave button is only live for whoever is looking at the sheet right now
fn buttons(sheet: Sheet, id: &SessionId, roster: &Roster, viewer: Option<UserId>) -> Vec<Vec<ButtonSpec>> {
    let signed_up = viewer.map(|u| roster.contains(u)).unwrap_or(false);
    let spec = |action, label, style, disabled| ButtonSpec {
        tag: ButtonTag::new(sheet, action, id.clone()),
        label,
        style,
        disabled,
    };

    let delete_label = match sheet {
        Sheet::Capt => "🗑️ Delete capt",
        Sheet::Registration => "🗑️ Delete registration",
    };

    vec![
        vec![
            spec(RosterAction::JoinMain, "✅ Sign up", ButtonStyle::Success, false),
            spec(RosterAction::JoinSub, "🔁 Sub", ButtonStyle::Secondary, false),
            spec(
                RosterAction::BecomeFacilitator,
                "🧑‍🦽 Become facilitator",
                ButtonStyle::Primary,
                false,
            ),
            spec(RosterAction::Leave, "❌ Leave", ButtonStyle::Danger, !signed_up),
        ],
        vec![spec(RosterAction::Delete, delete_label, ButtonStyle::Danger, false)],
    ]
}

pub fn created_message(sheet: Sheet) -> &'static str {
    match sheet {
        Sheet::Capt => "✅ Capt created",
        Sheet::Registration => "✅ Registration created",
    }
}

pub fn deleted_message(sheet: Sheet) -> &'static str {
    match sheet {
        Sheet::Capt => "✅ Capt deleted",
        Sheet::Registration => "✅ Registration deleted",
    }
}

pub fn cooldown_message(seconds_remaining: u64) -> String {
    format!(
        "❌ You have already sent a request. Please wait {} min {} sec.",
        seconds_remaining / 60,
        seconds_remaining % 60
    )
}

pub fn green_accepted_message(user: UserId) -> String {
    format!(
        "{} Your Green request has been accepted. A senior member will hand it out soon.",
        user.mention()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capt() -> CaptSession {
        CaptSession::new(2, 1, "15:00".to_string())
    }

    #[test]
    fn test_empty_capt_render() {
        let id = SessionId::from("s1");
        let msg = capt_message(&id, &capt(), None);

        assert!(msg.content.starts_with("🕒 **Capt at 15:00**"));
        assert!(msg.content.contains("**Main 0/2**\n—"));
        assert!(msg.content.contains("**Subs 0/1**\n—"));
        assert!(msg.content.contains("**Facilitators 0**\n—"));
        assert!(msg.button(RosterAction::Leave).unwrap().disabled);
        assert_eq!(
            msg.button(RosterAction::JoinMain).unwrap().tag.to_string(),
            "join_main_s1"
        );
    }

    #[test]
    fn test_numbered_mentions() {
        let id = SessionId::from("s1");
        let mut session = capt();
        session.roster.join_main(UserId::new(11), Some(2)).unwrap();
        session.roster.join_main(UserId::new(22), Some(2)).unwrap();
        session.roster.become_facilitator(UserId::new(33)).unwrap();

        let msg = capt_message(&id, &session, Some(UserId::new(22)));
        assert!(msg.content.contains("**Main 2/2**\n1. <@11>\n2. <@22>"));
        assert!(msg.content.contains("**Facilitators 1**\n1. <@33> 🧑‍🦽"));
        assert!(!msg.button(RosterAction::Leave).unwrap().disabled);

        let other = capt_message(&id, &session, Some(UserId::new(99)));
        assert!(other.button(RosterAction::Leave).unwrap().disabled);
    }

    #[test]
    fn test_registration_description_placement() {
        let id = SessionId::from("r1");
        let registration = Registration::new("MCL 16.10".to_string(), Some("Bring armor".to_string()));
        let msg = registration_message(&id, &registration, None);
        assert!(msg
            .content
            .starts_with("📋 **Registration: MCL 16.10**\n\nBring armor\n\n👥 **Participants**"));
        assert_eq!(msg.button(RosterAction::Delete).unwrap().tag.to_string(), "reg_delete_r1");

        let bare = Registration::new("MCL".to_string(), None);
        let msg = registration_message(&id, &bare, None);
        assert!(msg.content.starts_with("📋 **Registration: MCL**\n\n👥 **Participants**\n—"));
    }

    #[test]
    fn test_cooldown_message() {
        assert_eq!(
            cooldown_message(500),
            "❌ You have already sent a request. Please wait 8 min 20 sec."
        );
    }
}
