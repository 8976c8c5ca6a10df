//! Bundle catalog, daily-deal pool, cosmetics, skins, ingredient pricing.

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

/// What a bundle line item grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub enum BundleItemKind {
    Coins,
    Gems,
    HeroTokens,
    GoldChests,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct BundleItem {
    #[serde(rename = "type")]
    pub kind: BundleItemKind,
    pub amount: u64,
}

/// One-time purchasable bundle.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct BundleDef {
    pub bundle_id: String,
    pub name: String,
    pub contents: Vec<BundleItem>,
    pub gem_cost: u64,
    pub display_order: u32,
    pub value_multiplier: u32,
}

/// What a daily deal grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub enum DealKind {
    Coins,
    Gems,
    HeroTokens,
    BronzeChest,
}

/// Pool entry the deterministic daily selector draws from.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct DailyDealDef {
    pub deal_id: String,
    #[serde(rename = "type")]
    pub kind: DealKind,
    pub amount: u64,
    pub normal_gem_cost: u64,
    pub deal_gem_cost: u64,
    pub is_free: bool,
    pub weight: u32,
}

/// Cosmetic rarity tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub enum CosmeticRarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

/// Purchasable cosmetic. A price of 0 means the item is not purchasable
/// with that currency.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct CosmeticDef {
    pub cosmetic_id: String,
    pub display_name: String,
    pub slot: String,
    pub rarity: CosmeticRarity,
    pub price_credits: u64,
    pub price_gems: u64,
}

/// Categories of equippable skins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub enum SkinType {
    HeroSkin,
    KnifeSkin,
    CuttingBoardSkin,
    CooktopSkin,
    PlateSkin,
}

impl SkinType {
    /// Stable slot key used in the equipped map.
    pub fn slot_key(self) -> &'static str {
        match self {
            SkinType::HeroSkin => "HeroSkin",
            SkinType::KnifeSkin => "KnifeSkin",
            SkinType::CuttingBoardSkin => "CuttingBoardSkin",
            SkinType::CooktopSkin => "CooktopSkin",
            SkinType::PlateSkin => "PlateSkin",
        }
    }
}

/// Purchasable skin.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct SkinDef {
    pub skin_id: String,
    pub display_name: String,
    pub skin_type: SkinType,
    pub price_coin: u64,
    pub price_gems: u64,
    pub hero_id: String,
}

fn bundle(
    id: &str,
    name: &str,
    contents: Vec<(BundleItemKind, u64)>,
    gem_cost: u64,
    display_order: u32,
    value_multiplier: u32,
) -> BundleDef {
    BundleDef {
        bundle_id: id.to_string(),
        name: name.to_string(),
        contents: contents
            .into_iter()
            .map(|(kind, amount)| BundleItem { kind, amount })
            .collect(),
        gem_cost,
        display_order,
        value_multiplier,
    }
}

pub fn standard_bundles() -> Vec<BundleDef> {
    vec![
        bundle(
            "starter_bundle",
            "Starter Bundle",
            vec![
                (BundleItemKind::Gems, 100),
                (BundleItemKind::Coins, 500),
                (BundleItemKind::HeroTokens, 20),
            ],
            80,
            1,
            3,
        ),
        bundle(
            "hero_boost",
            "Hero Boost Pack",
            vec![(BundleItemKind::HeroTokens, 50), (BundleItemKind::Gems, 200)],
            150,
            2,
            2,
        ),
        bundle(
            "mega_chest_bundle",
            "Mega Chest Bundle",
            vec![(BundleItemKind::GoldChests, 5)],
            600,
            3,
            2,
        ),
        bundle(
            "coin_vault",
            "Coin Vault",
            vec![(BundleItemKind::Coins, 2000), (BundleItemKind::HeroTokens, 10)],
            50,
            4,
            3,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn deal(
    id: &str,
    kind: DealKind,
    amount: u64,
    normal_gem_cost: u64,
    deal_gem_cost: u64,
    is_free: bool,
    weight: u32,
) -> DailyDealDef {
    DailyDealDef {
        deal_id: id.to_string(),
        kind,
        amount,
        normal_gem_cost,
        deal_gem_cost,
        is_free,
        weight,
    }
}

pub fn standard_deal_pool() -> Vec<DailyDealDef> {
    vec![
        deal("free_coins_100", DealKind::Coins, 100, 5, 0, true, 10),
        deal("coins_300", DealKind::Coins, 300, 8, 3, false, 10),
        deal("coins_500", DealKind::Coins, 500, 12, 5, false, 8),
        deal("coins_1000", DealKind::Coins, 1000, 20, 10, false, 5),
        deal("tokens_5", DealKind::HeroTokens, 5, 10, 4, false, 8),
        deal("tokens_15", DealKind::HeroTokens, 15, 25, 12, false, 5),
        deal("tokens_30", DealKind::HeroTokens, 30, 45, 20, false, 3),
        deal("free_tokens_3", DealKind::HeroTokens, 3, 6, 0, true, 8),
        deal("gems_10", DealKind::Gems, 10, 0, 0, true, 4),
        deal("bronze_chest", DealKind::BronzeChest, 1, 5, 0, true, 6),
    ]
}

fn cosmetic(
    id: &str,
    name: &str,
    slot: &str,
    rarity: CosmeticRarity,
    price_credits: u64,
    price_gems: u64,
) -> CosmeticDef {
    CosmeticDef {
        cosmetic_id: id.to_string(),
        display_name: name.to_string(),
        slot: slot.to_string(),
        rarity,
        price_credits,
        price_gems,
    }
}

pub fn standard_cosmetics() -> Vec<CosmeticDef> {
    vec![
        cosmetic("hat_toque", "Classic Toque", "Hat", CosmeticRarity::Common, 500, 0),
        cosmetic("hat_beret", "Saucier Beret", "Hat", CosmeticRarity::Rare, 1500, 0),
        cosmetic("apron_checkered", "Checkered Apron", "Apron", CosmeticRarity::Common, 400, 0),
        cosmetic("apron_gilded", "Gilded Apron", "Apron", CosmeticRarity::Epic, 0, 120),
        cosmetic("trail_steam", "Steam Trail", "Trail", CosmeticRarity::Rare, 0, 60),
        cosmetic("trail_sparkle", "Sparkle Trail", "Trail", CosmeticRarity::Legendary, 0, 250),
    ]
}

fn skin(
    id: &str,
    name: &str,
    skin_type: SkinType,
    price_coin: u64,
    price_gems: u64,
    hero_id: &str,
) -> SkinDef {
    SkinDef {
        skin_id: id.to_string(),
        display_name: name.to_string(),
        skin_type,
        price_coin,
        price_gems,
        hero_id: hero_id.to_string(),
    }
}

pub fn standard_skins() -> Vec<SkinDef> {
    vec![
        skin("skin_basil_summer", "Summer Basil", SkinType::HeroSkin, 2000, 0, "hero_basil"),
        skin("skin_pepper_neon", "Neon Pepper", SkinType::HeroSkin, 0, 80, "hero_pepper"),
        skin("knife_obsidian", "Obsidian Knife", SkinType::KnifeSkin, 1200, 0, ""),
        skin("board_bamboo", "Bamboo Board", SkinType::CuttingBoardSkin, 800, 0, ""),
        skin("cooktop_copper", "Copper Cooktop", SkinType::CooktopSkin, 0, 50, ""),
        skin("plate_porcelain", "Porcelain Plates", SkinType::PlateSkin, 600, 0, ""),
    ]
}

/// Server-defined coin price for one restock batch of an ingredient.
/// Unknown ingredient types fall back to the mid-tier price.
pub fn ingredient_price(kind: &str) -> u64 {
    match kind {
        "Lettuce" | "Tomato" | "Bread" | "Bun" => 25,
        "Meat" | "Cheese" | "Sausage" | "Vegetables" => 50,
        "Dough" | "Sauce" | "Pepperoni" | "Pasta" | "Fish" | "Rice" | "Tortilla" => 75,
        "Seaweed" | "Broth" | "Seasoning" | "Noodles" => 100,
        _ => 50,
    }
}
