//! Typed per-player records.
//!
//! These are the explicit, versionable shapes of the blobs the original
//! loosely-typed store held. Every record is lazily created with defaults
//! on first read and persisted only on mutation.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

use super::store::PlayerRecord;

/// One-shot guard for [`InitNewPlayer`](crate::economy::init_new_player).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(crate = "rocket::serde", default)]
pub struct PlayerInitialized {
    pub initialized: bool,
}

impl PlayerRecord for PlayerInitialized {
    const KEY: &'static str = "PlayerInitialized";
}

/// Best results for a single level.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", default, rename_all = "camelCase")]
pub struct LevelEntry {
    pub best_score: u32,
    pub best_stars: u8,
    pub hero_granted: bool,
}

/// Level frontier plus per-level bests.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", default, rename_all = "camelCase")]
pub struct LevelProgress {
    pub max_unlocked_level: u32,
    pub levels: BTreeMap<u32, LevelEntry>,
}

impl Default for LevelProgress {
    fn default() -> Self {
        LevelProgress {
            max_unlocked_level: 1,
            levels: BTreeMap::new(),
        }
    }
}

impl LevelProgress {
    pub fn entry(&self, level_id: u32) -> LevelEntry {
        self.levels.get(&level_id).cloned().unwrap_or_default()
    }

    pub fn entry_mut(&mut self, level_id: u32) -> &mut LevelEntry {
        self.levels.entry(level_id).or_default()
    }
}

impl PlayerRecord for LevelProgress {
    const KEY: &'static str = "LevelProgress";
}

/// Ingredient counts, clamped to `[0, max_ingredient_stock]` by handlers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(crate = "rocket::serde", default)]
pub struct IngredientStock {
    pub counts: HashMap<String, u32>,
}

impl IngredientStock {
    pub fn count(&self, kind: &str) -> u32 {
        self.counts.get(kind).copied().unwrap_or(0)
    }
}

impl PlayerRecord for IngredientStock {
    const KEY: &'static str = "IngredientStock";
}

/// One hero the player has seen (unlocked or not).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct HeroEntry {
    pub hero_id: String,
    pub is_unlocked: bool,
    pub current_level: u32,
    pub current_xp: u32,
}

impl HeroEntry {
    pub fn unlocked(hero_id: &str) -> Self {
        HeroEntry {
            hero_id: hero_id.to_string(),
            is_unlocked: true,
            current_level: 1,
            current_xp: 0,
        }
    }
}

/// The player's hero roster.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", default)]
pub struct HeroRoster {
    pub entries: Vec<HeroEntry>,
}

impl HeroRoster {
    pub fn entry(&self, hero_id: &str) -> Option<&HeroEntry> {
        self.entries.iter().find(|e| e.hero_id == hero_id)
    }

    pub fn entry_mut(&mut self, hero_id: &str) -> Option<&mut HeroEntry> {
        self.entries.iter_mut().find(|e| e.hero_id == hero_id)
    }

    /// Unlock a hero at level 1, returning `true` when it was not owned yet.
    pub fn unlock(&mut self, hero_id: &str) -> bool {
        match self.entry_mut(hero_id) {
            Some(entry) if entry.is_unlocked => false,
            Some(entry) => {
                entry.is_unlocked = true;
                true
            }
            None => {
                self.entries.push(HeroEntry::unlocked(hero_id));
                true
            }
        }
    }
}

impl PlayerRecord for HeroRoster {
    const KEY: &'static str = "HeroProgress";
}

/// Account-wide level and carry-over XP.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", default)]
pub struct PlayerLevelData {
    pub level: u32,
    pub xp: u32,
}

impl Default for PlayerLevelData {
    fn default() -> Self {
        PlayerLevelData { level: 1, xp: 0 }
    }
}

impl PlayerRecord for PlayerLevelData {
    const KEY: &'static str = "PlayerLevelData";
}

/// Season-scoped battle pass progression and claim history.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", default, rename_all = "camelCase")]
pub struct BattlePassData {
    pub season: u32,
    pub tier: u32,
    pub xp: u32,
    pub premium: bool,
    pub claimed_free: BTreeSet<u32>,
    pub claimed_premium: BTreeSet<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_claim_utc: Option<String>,
}

impl PlayerRecord for BattlePassData {
    const KEY: &'static str = "BattlePassData";
}

/// One active daily quest.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct QuestEntry {
    pub quest_id: String,
    pub description: String,
    pub target_count: u32,
    pub current_count: u32,
    pub credit_reward: u64,
    pub is_completed: bool,
    pub is_claimed: bool,
}

/// Daily quest set, regenerated at most once per UTC date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(crate = "rocket::serde", default)]
pub struct DailyQuestState {
    pub date: String,
    pub quests: Vec<QuestEntry>,
    pub rerolls: u32,
}

impl PlayerRecord for DailyQuestState {
    const KEY: &'static str = "DailyQuestData";
}

/// Login streak state keyed by UTC date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(crate = "rocket::serde", default, rename_all = "camelCase")]
pub struct DailyLoginState {
    pub last_login: String,
    pub streak: u32,
    pub day: u32,
    pub claimed_today: bool,
}

impl PlayerRecord for DailyLoginState {
    const KEY: &'static str = "DailyLoginData";
}

/// Daily-deal purchases, reset whenever the stored date goes stale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(crate = "rocket::serde", default)]
pub struct DailyDealsPurchased {
    pub date: String,
    pub bought: Vec<String>,
}

impl DailyDealsPurchased {
    /// Drop stale purchases when the stored date is not `today`.
    pub fn roll_over(&mut self, today: &str) -> bool {
        if self.date != today {
            self.date = today.to_string();
            self.bought.clear();
            true
        } else {
            false
        }
    }
}

impl PlayerRecord for DailyDealsPurchased {
    const KEY: &'static str = "DailyDealsPurchased";
}

/// One-time bundle purchases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(crate = "rocket::serde", default)]
pub struct PurchasedBundles {
    pub bundle_ids: Vec<String>,
}

impl PlayerRecord for PurchasedBundles {
    const KEY: &'static str = "PurchasedBundles";
}

/// Owned and equipped cosmetics, keyed by slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(crate = "rocket::serde", default)]
pub struct CosmeticData {
    pub owned: Vec<String>,
    pub equipped: HashMap<String, String>,
}

impl PlayerRecord for CosmeticData {
    const KEY: &'static str = "CosmeticData";
}

/// Owned and equipped skins, keyed by skin type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(crate = "rocket::serde", default)]
pub struct SkinData {
    pub owned: Vec<String>,
    pub equipped: HashMap<String, String>,
}

impl PlayerRecord for SkinData {
    const KEY: &'static str = "SkinData";
}

/// Timestamp gate for the free bronze chest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(crate = "rocket::serde", default, rename_all = "camelCase")]
pub struct BronzeCooldown {
    pub last_opened_utc: Option<DateTime<Utc>>,
}

impl BronzeCooldown {
    /// Seconds left on the cooldown window, zero when open.
    pub fn remaining_seconds(&self, now: DateTime<Utc>, window_seconds: i64) -> i64 {
        match self.last_opened_utc {
            Some(last) => {
                let elapsed = now.signed_duration_since(last).num_seconds();
                (window_seconds - elapsed).max(0)
            }
            None => 0,
        }
    }
}

impl PlayerRecord for BronzeCooldown {
    const KEY: &'static str = "BronzeCooldown";
}
