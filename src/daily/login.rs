//! Daily login streaks and rewards.
//!
//! Everything is keyed off the server's UTC date; the client has no say in
//! what day it is.

use chrono::NaiveDate;

use crate::account::records::DailyLoginState;
use crate::status_messages::EngineError;

/// Outcome of a successful login claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginReward {
    pub day: u32,
    pub streak: u32,
    pub reward: u64,
    pub is_gem: bool,
}

fn reward_for_day(day: u32) -> (u64, bool) {
    match day {
        1 => (50, false),
        7 => (200, false),
        14 => (500, false),
        21 => (50, true),
        30 => (100, true),
        _ => (25 + day as u64 * 5, false),
    }
}

/// Advance the streak and 30-day calendar, once per UTC date.
pub fn claim(state: &mut DailyLoginState, today: NaiveDate) -> Result<LoginReward, EngineError> {
    let today_str = today.format("%Y-%m-%d").to_string();

    if state.last_login == today_str && state.claimed_today {
        return Err(EngineError::AlreadyClaimed("Daily login".to_string()));
    }

    match NaiveDate::parse_from_str(&state.last_login, "%Y-%m-%d") {
        Ok(last) => {
            let diff = (today - last).num_days();
            if diff == 1 {
                state.streak += 1;
            } else if diff > 1 {
                state.streak = 1;
            }
        }
        Err(_) => state.streak = 1,
    }

    state.day = (state.day % 30) + 1;
    state.last_login = today_str;
    state.claimed_today = true;

    let (reward, is_gem) = reward_for_day(state.day);
    Ok(LoginReward {
        day: state.day,
        streak: state.streak,
        reward,
        is_gem,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_claim_starts_streak_and_calendar() {
        let mut state = DailyLoginState::default();
        let reward = claim(&mut state, date(2026, 1, 10)).unwrap();
        assert_eq!(reward.day, 1);
        assert_eq!(reward.streak, 1);
        assert_eq!(reward.reward, 50);
        assert!(!reward.is_gem);
    }

    #[test]
    fn second_claim_same_day_is_rejected() {
        let mut state = DailyLoginState::default();
        claim(&mut state, date(2026, 1, 10)).unwrap();
        let err = claim(&mut state, date(2026, 1, 10)).unwrap_err();
        assert!(matches!(err, EngineError::AlreadyClaimed(_)));
        assert_eq!(state.streak, 1);
        assert_eq!(state.day, 1);
    }

    #[test]
    fn consecutive_days_grow_the_streak_and_a_gap_resets_it() {
        let mut state = DailyLoginState::default();
        claim(&mut state, date(2026, 1, 10)).unwrap();
        let second = claim(&mut state, date(2026, 1, 11)).unwrap();
        assert_eq!(second.streak, 2);
        let after_gap = claim(&mut state, date(2026, 1, 15)).unwrap();
        assert_eq!(after_gap.streak, 1);
        // the calendar day keeps marching regardless of streak
        assert_eq!(after_gap.day, 3);
    }

    #[test]
    fn milestone_days_pay_out_the_table() {
        let mut state = DailyLoginState {
            day: 6,
            ..Default::default()
        };
        let reward = claim(&mut state, date(2026, 1, 10)).unwrap();
        assert_eq!(reward.day, 7);
        assert_eq!(reward.reward, 200);

        let mut state = DailyLoginState {
            day: 20,
            ..Default::default()
        };
        let reward = claim(&mut state, date(2026, 1, 10)).unwrap();
        assert_eq!(reward.day, 21);
        assert_eq!(reward.reward, 50);
        assert!(reward.is_gem);
    }

    #[test]
    fn day_wraps_after_thirty() {
        let mut state = DailyLoginState {
            day: 30,
            ..Default::default()
        };
        let reward = claim(&mut state, date(2026, 1, 10)).unwrap();
        assert_eq!(reward.day, 1);
    }
}
