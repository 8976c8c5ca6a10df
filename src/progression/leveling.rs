//! Account level progression.
//!
//! The XP threshold for leaving level L is `100 * L`; overflow carries into
//! the next level and multiple level-ups can happen in one grant.

use crate::account::records::PlayerLevelData;

/// Largest XP amount a single grant may carry.
pub const MAX_XP_GRANT: u32 = 10_000;

pub fn xp_to_next(level: u32) -> u32 {
    100 * level
}

/// Apply an XP grant, looping level-ups while the threshold is met.
/// Returns the number of levels gained.
pub fn apply_xp(data: &mut PlayerLevelData, amount: u32) -> u32 {
    let before = data.level;
    data.xp += amount;
    while data.xp >= xp_to_next(data.level) {
        data.xp -= xp_to_next(data.level);
        data.level += 1;
    }
    data.level - before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_account_with_250_xp_reaches_level_2_with_150_over() {
        let mut data = PlayerLevelData::default();
        let gained = apply_xp(&mut data, 250);
        assert_eq!(gained, 1);
        assert_eq!(data.level, 2);
        assert_eq!(data.xp, 150);
    }

    #[test]
    fn big_grant_levels_repeatedly() {
        let mut data = PlayerLevelData::default();
        // 100 + 200 + 300 = 600 consumed, 50 left over at level 4.
        let gained = apply_xp(&mut data, 650);
        assert_eq!(gained, 3);
        assert_eq!(data.level, 4);
        assert_eq!(data.xp, 50);
    }

    #[test]
    fn exact_threshold_rolls_to_zero() {
        let mut data = PlayerLevelData::default();
        apply_xp(&mut data, 100);
        assert_eq!(data.level, 2);
        assert_eq!(data.xp, 0);
    }
}
