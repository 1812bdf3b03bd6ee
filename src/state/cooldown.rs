use chrono::{DateTime, Duration, Utc};
use poise::serenity_prelude::{RoleId, UserId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Outcome of a rate-limited request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownDecision {
    Allowed,
    Denied { seconds_remaining: u64 },
}

impl CooldownDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, CooldownDecision::Allowed)
    }
}

/// Per-user quiet period between accepted requests
#[derive(Debug)]
pub struct CooldownGate {
    window: Duration,
    last_request: HashMap<UserId, DateTime<Utc>>,
}

impl CooldownGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_request: HashMap::new(),
        }
    }

    /// Exempt when `user_roles` shares a role with `exempt_roles`.
    /// The dispatcher asks its `Authorizer` instead and calls
    /// [`Self::check_and_record_exempt`], which this wraps.
    pub fn check_and_record(
        &mut self,
        user_id: UserId,
        exempt_roles: &HashSet<RoleId>,
        user_roles: &[RoleId],
        now: DateTime<Utc>,
    ) -> CooldownDecision {
        let exempt = user_roles.iter().any(|r| exempt_roles.contains(r));
        self.check_and_record_exempt(user_id, exempt, now)
    }

    /// Exempt users always pass and leave no record
    pub fn check_and_record_exempt(
        &mut self,
        user_id: UserId,
        exempt: bool,
        now: DateTime<Utc>,
    ) -> CooldownDecision {
        if exempt {
            return CooldownDecision::Allowed;
        }

        if let Some(last) = self.last_request.get(&user_id).copied() {
            // A window reaching past chrono's range never ends
            let remaining = last
                .checked_add_signed(self.window)
                .map_or(Duration::MAX, |until| until - now);
            if remaining > Duration::zero() {
                let millis = remaining.num_milliseconds().max(0) as u64;
                let seconds_remaining = millis.div_ceil(1000);
                debug!("User {} on cooldown for {}s", user_id, seconds_remaining);
                return CooldownDecision::Denied { seconds_remaining };
            }
            self.last_request.remove(&user_id);
        }

        self.last_request.insert(user_id, now);
        CooldownDecision::Allowed
    }

    /// Drop every record whose window has elapsed
    pub fn prune(&mut self, now: DateTime<Utc>) {
        let window = self.window;
        self.last_request
            .retain(|_, last| last.checked_add_signed(window).map_or(true, |until| until > now));
    }

    pub fn tracked_users(&self) -> usize {
        self.last_request.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + seconds, 0).unwrap()
    }

    fn gate() -> CooldownGate {
        CooldownGate::new(Duration::seconds(1500))
    }

    #[test]
    fn test_window_timeline() {
        let mut gate = gate();
        let user = UserId::new(1);
        let none = HashSet::new();

        assert_eq!(gate.check_and_record(user, &none, &[], at(0)), CooldownDecision::Allowed);
        assert_eq!(
            gate.check_and_record(user, &none, &[], at(1000)),
            CooldownDecision::Denied {
                seconds_remaining: 500
            }
        );
        assert_eq!(gate.check_and_record(user, &none, &[], at(1500)), CooldownDecision::Allowed);
        assert!(!gate.check_and_record(user, &none, &[], at(1501)).is_allowed());
    }

    #[test]
    fn test_denial_does_not_extend_window() {
        let mut gate = gate();
        let user = UserId::new(1);
        gate.check_and_record_exempt(user, false, at(0));
        gate.check_and_record_exempt(user, false, at(1400));
        assert!(gate.check_and_record_exempt(user, false, at(1500)).is_allowed());
    }

    #[test]
    fn test_remaining_rounds_up() {
        let mut gate = gate();
        let user = UserId::new(1);
        gate.check_and_record_exempt(user, false, at(0));

        let almost = at(1499) + Duration::milliseconds(1);
        assert_eq!(
            gate.check_and_record_exempt(user, false, almost),
            CooldownDecision::Denied {
                seconds_remaining: 1
            }
        );
    }

    #[test]
    fn test_exempt_roles_bypass_without_record() {
        let mut gate = gate();
        let user = UserId::new(1);
        let exempt: HashSet<RoleId> = [RoleId::new(9)].into_iter().collect();

        for t in [0, 1, 2] {
            assert!(gate
                .check_and_record(user, &exempt, &[RoleId::new(5), RoleId::new(9)], at(t))
                .is_allowed());
        }
        assert_eq!(gate.tracked_users(), 0);
    }

    #[test]
    fn test_users_are_independent() {
        let mut gate = gate();
        assert!(gate.check_and_record_exempt(UserId::new(1), false, at(0)).is_allowed());
        assert!(gate.check_and_record_exempt(UserId::new(2), false, at(1)).is_allowed());
        assert_eq!(gate.tracked_users(), 2);
    }

    #[test]
    fn test_window_past_date_range_stays_closed() {
        let mut gate = CooldownGate::new(Duration::days(365 * 1_000_000));
        let user = UserId::new(1);

        assert!(gate.check_and_record_exempt(user, false, at(0)).is_allowed());
        gate.prune(at(10));
        assert_eq!(gate.tracked_users(), 1);
        assert!(!gate.check_and_record_exempt(user, false, at(10)).is_allowed());
    }

    #[test]
    fn test_prune() {
        let mut gate = gate();
        gate.check_and_record_exempt(UserId::new(1), false, at(0));
        gate.check_and_record_exempt(UserId::new(2), false, at(1000));

        gate.prune(at(1500));
        assert_eq!(gate.tracked_users(), 1);
    }
}
