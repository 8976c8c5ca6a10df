//! Battle pass season configuration and generated tier reward table.

use chrono::{DateTime, TimeZone, Utc};
use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

pub const XP_PER_TIER: u32 = 1000;
pub const MAX_TIER: u32 = 70;

/// Rewards for a single tier, free and premium tracks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct TierReward {
    pub free_coins: u64,
    pub free_gems: u64,
    pub premium_coins: u64,
    pub premium_gems: u64,
    pub premium_tokens: u64,
}

/// Season-wide battle pass settings.
#[derive(Debug, Clone)]
pub struct BattlePassConfig {
    pub season: u32,
    pub premium_gem_cost: u64,
    pub season_end: DateTime<Utc>,
    pub xp_per_tier: u32,
    pub max_tier: u32,
    /// Indexed by tier, 0..=MAX_TIER.
    pub rewards: Vec<TierReward>,
}

impl BattlePassConfig {
    pub fn standard() -> Self {
        BattlePassConfig {
            // Both bumped together on rollover; a stale player record is
            // detected by the season id and reset.
            season: 1,
            premium_gem_cost: 500,
            season_end: Utc.with_ymd_and_hms(2027, 3, 31, 0, 0, 0).unwrap(),
            xp_per_tier: XP_PER_TIER,
            max_tier: MAX_TIER,
            rewards: generate_rewards(),
        }
    }

    pub fn tier_reward(&self, tier: u32) -> Option<&TierReward> {
        self.rewards.get(tier as usize)
    }
}

/// Free track: coins every tier, gems every 10 tiers.
/// Premium track: coins + tokens every tier, gems every 5 tiers.
fn generate_rewards() -> Vec<TierReward> {
    (0..=MAX_TIER)
        .map(|t| {
            let t64 = t as u64;
            TierReward {
                free_coins: 50 + (t64 / 5) * 25,
                free_gems: if t > 0 && t % 10 == 0 { 5 + (t64 / 10) * 5 } else { 0 },
                premium_coins: 75 + (t64 / 5) * 30,
                premium_gems: if t > 0 && t % 5 == 0 { 10 + (t64 / 10) * 5 } else { 0 },
                premium_tokens: 2 + (t64 / 10) * 2,
            }
        })
        .collect()
}
