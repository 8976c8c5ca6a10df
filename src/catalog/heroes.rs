//! Server-authoritative hero catalog and chest pricing.

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

/// Hero rarity tiers rolled by the gacha engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub enum HeroRarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Chest tiers a player can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub enum ChestRarity {
    Bronze,
    Silver,
    Gold,
}

impl ChestRarity {
    /// Gem cost per roll. Bronze is free but cooldown-gated instead.
    pub fn gem_cost(self) -> u64 {
        match self {
            ChestRarity::Bronze => 0,
            ChestRarity::Silver => 50,
            ChestRarity::Gold => 150,
        }
    }
}

/// Catalog entry for a hero.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct HeroDef {
    pub hero_id: String,
    pub hero_name: String,
    pub rarity: HeroRarity,
    pub is_free_hero: bool,
    pub max_level: u32,
}

fn hero(id: &str, name: &str, rarity: HeroRarity, is_free_hero: bool) -> HeroDef {
    HeroDef {
        hero_id: id.to_string(),
        hero_name: name.to_string(),
        rarity,
        is_free_hero,
        max_level: 10,
    }
}

pub fn standard_heroes() -> Vec<HeroDef> {
    vec![
        hero("hero_basil", "Chef Basil", HeroRarity::Common, true),
        hero("hero_pepper", "Pepper", HeroRarity::Common, false),
        hero("hero_sizzle", "Sizzle", HeroRarity::Rare, false),
        hero("hero_dash", "Dash", HeroRarity::Rare, false),
        hero("hero_luna", "Luna", HeroRarity::Rare, false),
        hero("hero_ginger", "Ginger", HeroRarity::Epic, false),
        hero("hero_miso", "Miso", HeroRarity::Epic, false),
        hero("hero_noir", "Chef Noir", HeroRarity::Legendary, false),
    ]
}
