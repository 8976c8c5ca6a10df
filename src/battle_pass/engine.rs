//! Battle pass XP accrual and tier claims.
//!
//! Pure state transitions over [`BattlePassData`]; persistence and currency
//! settlement stay in the handlers.

use chrono::{DateTime, Utc};

use crate::account::ledger::Currency;
use crate::account::records::BattlePassData;
use crate::catalog::battle_pass::BattlePassConfig;
use crate::status_messages::EngineError;

/// Largest XP amount a single grant may carry.
pub const MAX_BP_XP_GRANT: u32 = 50_000;

/// Discard progress from an earlier season, starting the record fresh.
/// Returns whether a reset happened.
pub fn sync_season(data: &mut BattlePassData, config: &BattlePassConfig) -> bool {
    if data.season == config.season {
        return false;
    }
    *data = BattlePassData {
        season: config.season,
        ..BattlePassData::default()
    };
    true
}

/// Premium track XP bonus, floored.
fn boosted(amount: u32) -> u32 {
    amount * 3 / 2
}

pub fn season_open(config: &BattlePassConfig, now: DateTime<Utc>) -> bool {
    now < config.season_end
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpGrant {
    pub applied: u32,
    pub tiers_gained: u32,
}

/// Add XP, advancing one tier per `xp_per_tier`. At the tier cap any
/// leftover XP is discarded rather than banked.
pub fn grant_xp(data: &mut BattlePassData, config: &BattlePassConfig, amount: u32) -> XpGrant {
    let applied = if data.premium { boosted(amount) } else { amount };
    let before = data.tier;
    data.xp += applied;
    while data.xp >= config.xp_per_tier && data.tier < config.max_tier {
        data.xp -= config.xp_per_tier;
        data.tier += 1;
    }
    if data.tier >= config.max_tier {
        data.xp = 0;
    }
    XpGrant {
        applied,
        tiers_gained: data.tier - before,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierClaim {
    pub tier: u32,
    pub premium: bool,
    pub grants: Vec<(Currency, u64)>,
}

/// Claim one tier on one track, marking it claimed and returning what to
/// deposit. Each (tier, track) pair is claimable exactly once, and only
/// while the season is running.
pub fn claim_tier(
    data: &mut BattlePassData,
    config: &BattlePassConfig,
    now: DateTime<Utc>,
    tier: u32,
    premium: bool,
) -> Result<TierClaim, EngineError> {
    if !season_open(config, now) {
        return Err(EngineError::SeasonEnded);
    }
    let reward = config
        .tier_reward(tier)
        .ok_or_else(|| EngineError::NotFound(format!("Tier {tier}")))?;
    if tier > data.tier {
        return Err(EngineError::Validation(format!(
            "Tier {tier} not reached (current {})",
            data.tier
        )));
    }
    if premium && !data.premium {
        return Err(EngineError::Validation(
            "Premium track not owned".to_string(),
        ));
    }
    let claimed = if premium {
        &mut data.claimed_premium
    } else {
        &mut data.claimed_free
    };
    if !claimed.insert(tier) {
        return Err(EngineError::AlreadyClaimed(format!("Tier {tier}")));
    }

    let mut grants = Vec::new();
    if premium {
        if reward.premium_coins > 0 {
            grants.push((Currency::Coins, reward.premium_coins));
        }
        if reward.premium_gems > 0 {
            grants.push((Currency::Gems, reward.premium_gems));
        }
        if reward.premium_tokens > 0 {
            grants.push((Currency::HeroTokens, reward.premium_tokens));
        }
    } else {
        if reward.free_coins > 0 {
            grants.push((Currency::Coins, reward.free_coins));
        }
        if reward.free_gems > 0 {
            grants.push((Currency::Gems, reward.free_gems));
        }
    }
    Ok(TierClaim {
        tier,
        premium,
        grants,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config() -> BattlePassConfig {
        BattlePassConfig::standard()
    }

    fn mid_season() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn xp_advances_tiers_with_carry() {
        let mut data = BattlePassData::default();
        let grant = grant_xp(&mut data, &config(), 2500);
        assert_eq!(grant.tiers_gained, 2);
        assert_eq!(data.tier, 2);
        assert_eq!(data.xp, 500);
    }

    #[test]
    fn premium_multiplier_floors() {
        let mut data = BattlePassData {
            premium: true,
            ..Default::default()
        };
        let grant = grant_xp(&mut data, &config(), 25);
        assert_eq!(grant.applied, 37);
        assert_eq!(data.xp, 37);
    }

    #[test]
    fn overflow_at_cap_is_discarded() {
        let cfg = config();
        let mut data = BattlePassData {
            tier: cfg.max_tier - 1,
            xp: 900,
            ..Default::default()
        };
        grant_xp(&mut data, &cfg, 5000);
        assert_eq!(data.tier, cfg.max_tier);
        assert_eq!(data.xp, 0);

        grant_xp(&mut data, &cfg, 2000);
        assert_eq!(data.tier, cfg.max_tier);
        assert_eq!(data.xp, 0);
    }

    #[test]
    fn each_tier_and_track_claims_once() {
        let cfg = config();
        let mut data = BattlePassData {
            tier: 10,
            premium: true,
            ..Default::default()
        };

        let free = claim_tier(&mut data, &cfg, mid_season(), 10, false).unwrap();
        assert!(free.grants.contains(&(Currency::Coins, 100)));
        assert!(free.grants.contains(&(Currency::Gems, 10)));

        let err = claim_tier(&mut data, &cfg, mid_season(), 10, false).unwrap_err();
        assert!(matches!(err, EngineError::AlreadyClaimed(_)));

        // Same tier, premium track is still open.
        let prem = claim_tier(&mut data, &cfg, mid_season(), 10, true).unwrap();
        assert!(prem.grants.contains(&(Currency::HeroTokens, 4)));
    }

    #[test]
    fn claims_stop_when_the_season_ends() {
        let cfg = config();
        let mut data = BattlePassData {
            tier: 10,
            premium: true,
            ..Default::default()
        };
        let after_end = cfg.season_end + chrono::Duration::days(1);
        assert!(matches!(
            claim_tier(&mut data, &cfg, after_end, 10, false),
            Err(EngineError::SeasonEnded)
        ));
        assert!(data.claimed_free.is_empty());
    }

    #[test]
    fn stale_season_record_resets() {
        let mut cfg = config();
        cfg.season = 2;
        let mut data = BattlePassData {
            season: 1,
            tier: 12,
            xp: 300,
            premium: true,
            claimed_free: [1, 2, 3].into_iter().collect(),
            ..Default::default()
        };
        assert!(sync_season(&mut data, &cfg));
        assert_eq!(data.season, 2);
        assert_eq!(data.tier, 0);
        assert_eq!(data.xp, 0);
        assert!(!data.premium);
        assert!(data.claimed_free.is_empty());

        // Already current; nothing to do.
        assert!(!sync_season(&mut data, &cfg));
    }

    #[test]
    fn unreached_tier_and_unowned_premium_are_rejected() {
        let cfg = config();
        let mut data = BattlePassData {
            tier: 3,
            ..Default::default()
        };
        assert!(matches!(
            claim_tier(&mut data, &cfg, mid_season(), 4, false),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            claim_tier(&mut data, &cfg, mid_season(), 2, true),
            Err(EngineError::Validation(_))
        ));
    }
}
