//! Immutable game configuration shared by every handler.
//!
//! The catalog is built once at launch and managed as rocket state; all
//! prices, thresholds and reward tables come from here, never from the
//! client.

use std::collections::HashMap;

pub mod battle_pass;
pub mod heroes;
pub mod shop;
pub mod worlds;

use battle_pass::BattlePassConfig;
use heroes::HeroDef;
use shop::{BundleDef, CosmeticDef, DailyDealDef, SkinDef};
use worlds::{LevelConfig, WorldConfig};

/// Scoring bounds applied when a level has no explicit config.
#[derive(Debug, Clone)]
pub struct FallbackScoring {
    pub score_per_order: u32,
    pub score_base: u32,
    pub star_cap: u8,
    pub max_orders: u32,
}

pub struct Catalog {
    pub worlds: Vec<WorldConfig>,
    pub heroes: Vec<HeroDef>,
    pub bundles: Vec<BundleDef>,
    pub deal_pool: Vec<DailyDealDef>,
    pub cosmetics: Vec<CosmeticDef>,
    pub skins: Vec<SkinDef>,
    pub battle_pass: BattlePassConfig,
    /// Levels reachable outside the world list, by legacy numeric id.
    pub legacy_levels: HashMap<u32, LevelConfig>,
    pub fallback: FallbackScoring,
    pub max_ingredient_stock: u32,
    pub bronze_cooldown_seconds: i64,
    pub gem_to_coin_rate: u64,
}

impl Catalog {
    pub fn standard() -> Self {
        Catalog {
            worlds: worlds::standard_worlds(),
            heroes: heroes::standard_heroes(),
            bundles: shop::standard_bundles(),
            deal_pool: shop::standard_deal_pool(),
            cosmetics: shop::standard_cosmetics(),
            skins: shop::standard_skins(),
            battle_pass: BattlePassConfig::standard(),
            legacy_levels: HashMap::new(),
            fallback: FallbackScoring {
                score_per_order: 500,
                score_base: 1000,
                star_cap: 2,
                max_orders: 100,
            },
            max_ingredient_stock: 500,
            bronze_cooldown_seconds: 86_400,
            gem_to_coin_rate: 100,
        }
    }

    /// Look up a level config by global level id, worlds first then the
    /// legacy table.
    pub fn level_config(&self, level_id: u32) -> Option<&LevelConfig> {
        self.worlds
            .iter()
            .find_map(|world| world.levels.get(&level_id))
            .or_else(|| self.legacy_levels.get(&level_id))
    }

    pub fn hero(&self, hero_id: &str) -> Option<&HeroDef> {
        self.heroes.iter().find(|h| h.hero_id == hero_id)
    }

    pub fn bundle(&self, bundle_id: &str) -> Option<&BundleDef> {
        self.bundles.iter().find(|b| b.bundle_id == bundle_id)
    }

    pub fn cosmetic(&self, cosmetic_id: &str) -> Option<&CosmeticDef> {
        self.cosmetics.iter().find(|c| c.cosmetic_id == cosmetic_id)
    }

    pub fn skin(&self, skin_id: &str) -> Option<&SkinDef> {
        self.skins.iter().find(|s| s.skin_id == skin_id)
    }
}
