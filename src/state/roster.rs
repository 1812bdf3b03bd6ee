use poise::serenity_prelude::UserId;

use crate::error::{BotError, Result};

/// Which list of a roster a user is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Main,
    Sub,
    Facilitator,
}

/// Three disjoint, ordered lists of users.
///
/// Every mutation goes through the methods below, which remove the user from
/// the other lists before inserting, so a user is never in two lists at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    main: Vec<UserId>,
    subs: Vec<UserId>,
    facilitators: Vec<UserId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn main(&self) -> &[UserId] {
        &self.main
    }

    pub fn subs(&self) -> &[UserId] {
        &self.subs
    }

    pub fn facilitators(&self) -> &[UserId] {
        &self.facilitators
    }

    pub fn slot_of(&self, user: UserId) -> Option<Slot> {
        if self.main.contains(&user) {
            Some(Slot::Main)
        } else if self.subs.contains(&user) {
            Some(Slot::Sub)
        } else if self.facilitators.contains(&user) {
            Some(Slot::Facilitator)
        } else {
            None
        }
    }

    pub fn contains(&self, user: UserId) -> bool {
        self.slot_of(user).is_some()
    }

    /// Sign up as main. `limit` of `None` means unbounded.
    pub fn join_main(&mut self, user: UserId, limit: Option<usize>) -> Result<()> {
        self.join(user, Slot::Main, limit)
    }

    /// Sign up as sub. `limit` of `None` means unbounded.
    pub fn join_sub(&mut self, user: UserId, limit: Option<usize>) -> Result<()> {
        self.join(user, Slot::Sub, limit)
    }

    // The user is taken out of main and subs before the capacity check, so a
    // rejected switch leaves them in neither list.
    fn join(&mut self, user: UserId, slot: Slot, limit: Option<usize>) -> Result<()> {
        if self.facilitators.contains(&user) {
            return Err(BotError::forbidden(
                "Facilitators cannot sign up as main or sub",
            ));
        }

        // Unbounded lists keep a repeat sign-up where it is
        if limit.is_none() && self.slot_of(user) == Some(slot) {
            return Ok(());
        }

        self.main.retain(|u| *u != user);
        self.subs.retain(|u| *u != user);

        let (list, roster) = match slot {
            Slot::Main => (&mut self.main, "Main"),
            Slot::Sub => (&mut self.subs, "Subs"),
            Slot::Facilitator => {
                return Err(BotError::Internal {
                    message: "facilitators are added with become_facilitator".to_string(),
                })
            }
        };

        if let Some(max) = limit {
            if list.len() >= max {
                return Err(BotError::CapacityExceeded { roster, max });
            }
        }

        list.push(user);
        Ok(())
    }

    pub fn become_facilitator(&mut self, user: UserId) -> Result<()> {
        if self.facilitators.contains(&user) {
            return Err(BotError::AlreadyFacilitator);
        }
        self.main.retain(|u| *u != user);
        self.subs.retain(|u| *u != user);
        self.facilitators.push(user);
        Ok(())
    }

    /// Remove the user from whichever list holds them
    pub fn leave(&mut self, user: UserId) -> Result<Slot> {
        let slot = self.slot_of(user).ok_or(BotError::NotRegistered)?;
        self.main.retain(|u| *u != user);
        self.subs.retain(|u| *u != user);
        self.facilitators.retain(|u| *u != user);
        Ok(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64) -> UserId {
        UserId::new(id)
    }

    fn assert_disjoint(roster: &Roster) {
        for u in roster.main() {
            assert!(!roster.subs().contains(u));
            assert!(!roster.facilitators().contains(u));
        }
        for u in roster.subs() {
            assert!(!roster.facilitators().contains(u));
        }
    }

    #[test]
    fn test_switch_main_to_sub() {
        let mut roster = Roster::new();
        roster.join_main(user(1), Some(2)).unwrap();
        roster.join_sub(user(1), Some(1)).unwrap();

        assert!(roster.main().is_empty());
        assert_eq!(roster.subs(), &[user(1)]);
        assert_disjoint(&roster);
    }

    #[test]
    fn test_rejected_switch_vacates_original_slot() {
        let mut roster = Roster::new();
        roster.join_sub(user(2), Some(1)).unwrap();
        roster.join_main(user(1), Some(1)).unwrap();

        let err = roster.join_sub(user(1), Some(1)).unwrap_err();
        assert!(matches!(err, BotError::CapacityExceeded { roster: "Subs", max: 1 }));
        assert_eq!(roster.slot_of(user(1)), None);
        assert!(roster.main().is_empty());
    }

    #[test]
    fn test_rejoining_own_full_list_keeps_slot() {
        let mut roster = Roster::new();
        roster.join_main(user(1), Some(2)).unwrap();
        roster.join_main(user(2), Some(2)).unwrap();

        roster.join_main(user(1), Some(2)).unwrap();
        assert_eq!(roster.main(), &[user(2), user(1)]);
    }

    #[test]
    fn test_zero_sub_limit_rejects() {
        let mut roster = Roster::new();
        assert!(matches!(
            roster.join_sub(user(1), Some(0)),
            Err(BotError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_unbounded_join() {
        let mut roster = Roster::new();
        for id in 1..=50 {
            roster.join_main(user(id), None).unwrap();
        }
        assert_eq!(roster.main().len(), 50);
    }

    #[test]
    fn test_unbounded_repeat_join_keeps_position() {
        let mut roster = Roster::new();
        roster.join_main(user(1), None).unwrap();
        roster.join_main(user(2), None).unwrap();
        roster.join_sub(user(3), None).unwrap();
        roster.join_sub(user(4), None).unwrap();

        roster.join_main(user(1), None).unwrap();
        roster.join_sub(user(3), None).unwrap();
        assert_eq!(roster.main(), &[user(1), user(2)]);
        assert_eq!(roster.subs(), &[user(3), user(4)]);

        roster.join_sub(user(1), None).unwrap();
        assert_eq!(roster.main(), &[user(2)]);
        assert_eq!(roster.subs(), &[user(3), user(4), user(1)]);
        assert_disjoint(&roster);
    }

    #[test]
    fn test_facilitator_cannot_join_main() {
        let mut roster = Roster::new();
        roster.become_facilitator(user(1)).unwrap();
        assert!(matches!(
            roster.join_main(user(1), None),
            Err(BotError::Forbidden { .. })
        ));
        assert_eq!(roster.slot_of(user(1)), Some(Slot::Facilitator));
    }

    #[test]
    fn test_become_facilitator_moves_user() {
        let mut roster = Roster::new();
        roster.join_main(user(1), Some(5)).unwrap();
        roster.become_facilitator(user(1)).unwrap();

        assert!(roster.main().is_empty());
        assert_eq!(roster.facilitators(), &[user(1)]);
        assert!(matches!(
            roster.become_facilitator(user(1)),
            Err(BotError::AlreadyFacilitator)
        ));
        assert_disjoint(&roster);
    }

    #[test]
    fn test_leave_twice() {
        let mut roster = Roster::new();
        roster.join_sub(user(1), None).unwrap();

        assert_eq!(roster.leave(user(1)).unwrap(), Slot::Sub);
        let before = roster.clone();
        assert!(matches!(roster.leave(user(1)), Err(BotError::NotRegistered)));
        assert_eq!(roster, before);
    }
}
