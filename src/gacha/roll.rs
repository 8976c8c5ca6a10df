//! Chest roll resolution.
//!
//! Rolls are a single integer in `0..100` mapped through cumulative
//! thresholds per chest tier. The engine mutates the roster in place and
//! never persists; callers save the roster and settle duplicate tokens.

use rand::RngCore;
use rand_pcg::Lcg64Xsh32;

use crate::account::records::HeroRoster;
use crate::catalog::heroes::{ChestRarity, HeroDef, HeroRarity};
use crate::catalog::Catalog;
use crate::status_messages::EngineError;

/// Hero-token compensation for rolling an already-owned hero.
pub const DUPLICATE_TOKENS: u64 = 5;

/// Outcome of one chest roll.
#[derive(Debug, Clone)]
pub struct ChestRoll {
    pub hero_id: String,
    pub rarity: HeroRarity,
    pub was_new: bool,
    pub dup_tokens: u64,
}

/// Map a `0..100` roll to a rarity for the given chest tier.
pub fn rarity_for(chest: ChestRarity, roll: u32) -> HeroRarity {
    let (common, rare, epic) = match chest {
        ChestRarity::Bronze => (70, 95, 99),
        ChestRarity::Silver => (50, 85, 97),
        ChestRarity::Gold => (25, 65, 90),
    };
    if roll < common {
        HeroRarity::Common
    } else if roll < rare {
        HeroRarity::Rare
    } else if roll < epic {
        HeroRarity::Epic
    } else {
        HeroRarity::Legendary
    }
}

fn candidates(catalog: &Catalog, rarity: HeroRarity) -> Vec<&HeroDef> {
    let same_rarity: Vec<&HeroDef> = catalog
        .heroes
        .iter()
        .filter(|h| h.rarity == rarity && !h.is_free_hero)
        .collect();
    if !same_rarity.is_empty() {
        return same_rarity;
    }
    // No non-starter hero at this rarity; widen to every non-starter.
    catalog.heroes.iter().filter(|h| !h.is_free_hero).collect()
}

/// Roll one chest: pick a rarity, pick a hero of that rarity, then either
/// unlock it or award duplicate tokens.
pub fn roll_chest(
    rng: &mut Lcg64Xsh32,
    catalog: &Catalog,
    roster: &mut HeroRoster,
    chest: ChestRarity,
) -> Result<ChestRoll, EngineError> {
    let roll = (rng.next_u64() % 100) as u32;
    let rarity = rarity_for(chest, roll);
    let pool = candidates(catalog, rarity);
    if pool.is_empty() {
        return Err(EngineError::NoHeroesAvailable);
    }
    let pick = (rng.next_u64() % pool.len() as u64) as usize;
    let hero = pool[pick];
    let was_new = roster.unlock(&hero.hero_id);
    Ok(ChestRoll {
        hero_id: hero.hero_id.clone(),
        rarity,
        was_new,
        dup_tokens: if was_new { 0 } else { DUPLICATE_TOKENS },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn thresholds_partition_the_roll_space() {
        assert_eq!(rarity_for(ChestRarity::Bronze, 0), HeroRarity::Common);
        assert_eq!(rarity_for(ChestRarity::Bronze, 69), HeroRarity::Common);
        assert_eq!(rarity_for(ChestRarity::Bronze, 70), HeroRarity::Rare);
        assert_eq!(rarity_for(ChestRarity::Bronze, 94), HeroRarity::Rare);
        assert_eq!(rarity_for(ChestRarity::Bronze, 95), HeroRarity::Epic);
        assert_eq!(rarity_for(ChestRarity::Bronze, 98), HeroRarity::Epic);
        assert_eq!(rarity_for(ChestRarity::Bronze, 99), HeroRarity::Legendary);
        assert_eq!(rarity_for(ChestRarity::Silver, 49), HeroRarity::Common);
        assert_eq!(rarity_for(ChestRarity::Silver, 50), HeroRarity::Rare);
        assert_eq!(rarity_for(ChestRarity::Gold, 24), HeroRarity::Common);
        assert_eq!(rarity_for(ChestRarity::Gold, 89), HeroRarity::Epic);
        assert_eq!(rarity_for(ChestRarity::Gold, 90), HeroRarity::Legendary);
    }

    #[test]
    fn duplicate_roll_awards_tokens_not_a_second_unlock() {
        let catalog = Catalog::standard();
        let mut rng = Lcg64Xsh32::seed_from_u64(7);
        let mut roster = HeroRoster::default();

        // Everything non-starter is rollable; after enough rolls every roll
        // must be a duplicate.
        for _ in 0..200 {
            roll_chest(&mut rng, &catalog, &mut roster, ChestRarity::Gold).unwrap();
        }
        let unlocked = roster.entries.iter().filter(|e| e.is_unlocked).count();
        assert!(unlocked <= catalog.heroes.len());

        let result = roll_chest(&mut rng, &catalog, &mut roster, ChestRarity::Gold).unwrap();
        assert!(!result.was_new);
        assert_eq!(result.dup_tokens, DUPLICATE_TOKENS);
    }

    #[test]
    fn starters_never_drop_while_alternatives_exist() {
        let catalog = Catalog::standard();
        let mut rng = Lcg64Xsh32::seed_from_u64(42);
        let mut roster = HeroRoster::default();
        for _ in 0..500 {
            let roll = roll_chest(&mut rng, &catalog, &mut roster, ChestRarity::Bronze).unwrap();
            let hero = catalog.hero(&roll.hero_id).unwrap();
            assert!(!hero.is_free_hero, "starter {} dropped from a chest", roll.hero_id);
        }
    }

    #[test]
    fn seeded_distribution_tracks_gold_thresholds() {
        let catalog = Catalog::standard();
        let mut rng = Lcg64Xsh32::seed_from_u64(1234);
        let mut roster = HeroRoster::default();
        let mut counts = std::collections::HashMap::new();
        let n = 10_000;
        for _ in 0..n {
            let roll = roll_chest(&mut rng, &catalog, &mut roster, ChestRarity::Gold).unwrap();
            *counts.entry(roll.rarity).or_insert(0u32) += 1;
        }
        let pct = |r: HeroRarity| counts.get(&r).copied().unwrap_or(0) as f64 / n as f64;
        assert!((pct(HeroRarity::Common) - 0.25).abs() < 0.02);
        assert!((pct(HeroRarity::Rare) - 0.40).abs() < 0.02);
        assert!((pct(HeroRarity::Epic) - 0.25).abs() < 0.02);
        assert!((pct(HeroRarity::Legendary) - 0.10).abs() < 0.02);
    }
}
