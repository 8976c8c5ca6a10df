//! Level lifecycle, account XP and hero upgrades.

use chrono::Utc;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::State;
use rocket_okapi::{openapi, JsonSchema};
use std::sync::Arc;

pub mod anticheat;
pub mod leveling;

use crate::account::ledger::Currency;
use crate::account::records::{
    BattlePassData, HeroRoster, LevelProgress, PlayerLevelData,
};
use crate::account::PlayerRegistry;
use crate::battle_pass::engine as bp_engine;
use crate::catalog::heroes::HeroDef;
use crate::catalog::worlds::WorldConfig;
use crate::catalog::Catalog;
use crate::status_messages::{ApiError, EngineError};

use anticheat::RunReport;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct StartLevelRequest {
    pub level_id: u32,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct StartLevelResponse {
    pub success: bool,
    pub entry_cost: u64,
    pub coins: u64,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct CompleteLevelRequest {
    pub level_id: u32,
    pub score: u32,
    pub stars: u8,
    #[serde(default)]
    pub orders_completed: u32,
    #[serde(default)]
    pub orders_failed: u32,
    #[serde(default)]
    pub best_combo: u32,
    #[serde(default)]
    pub free_hero_reward_id: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct CompleteLevelResponse {
    pub success: bool,
    pub new_best: bool,
    pub best_score: u32,
    pub best_stars: u8,
    pub max_unlocked_level: u32,
    pub coin_reward: u64,
    pub xp_reward: u32,
    pub bp_xp_reward: u32,
    pub unlocked_hero_id: String,
    pub player_level: u32,
    pub player_xp: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct AddPlayerXpRequest {
    pub amount: u32,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct PlayerLevelResponse {
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub levels_gained: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct UpgradeHeroRequest {
    pub hero_id: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct UpgradeHeroResponse {
    pub hero_id: String,
    pub new_level: u32,
    pub hero_tokens: u64,
}

/// Charges the level's entry fee. The cost always comes from the catalog,
/// never from the request.
#[openapi]
#[post("/players/<player_id>/levels/start", format = "json", data = "<request>")]
pub async fn start_level(
    registry: &State<PlayerRegistry>,
    catalog: &State<Arc<Catalog>>,
    player_id: &str,
    request: Json<StartLevelRequest>,
) -> Result<Json<StartLevelResponse>, ApiError> {
    let level_id = request.0.level_id;
    if level_id == 0 {
        return Err(EngineError::Validation("Invalid level id".to_string()).into());
    }

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;

    let progress: LevelProgress = account.store.load();
    if level_id > progress.max_unlocked_level {
        return Err(EngineError::NotUnlocked {
            level_id,
            max_unlocked: progress.max_unlocked_level,
        }
        .into());
    }

    let entry_cost = catalog
        .level_config(level_id)
        .map(|c| c.entry_cost)
        .unwrap_or(0);
    if entry_cost > 0 {
        account.ledger.withdraw(Currency::Coins, entry_cost)?;
    }

    Ok(Json(StartLevelResponse {
        success: true,
        entry_cost,
        coins: account.ledger.balance(Currency::Coins),
    }))
}

/// Validates a reported run, persists bests, unlocks the next level and
/// settles every reward stream in one pass.
#[openapi]
#[post("/players/<player_id>/levels/complete", format = "json", data = "<request>")]
pub async fn complete_level(
    registry: &State<PlayerRegistry>,
    catalog: &State<Arc<Catalog>>,
    player_id: &str,
    request: Json<CompleteLevelRequest>,
) -> Result<Json<CompleteLevelResponse>, ApiError> {
    let req = request.0;
    if req.level_id == 0 {
        return Err(EngineError::Validation("Invalid level id".to_string()).into());
    }

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;

    let mut progress: LevelProgress = account.store.load();
    let max_unlocked = progress.max_unlocked_level;
    if req.level_id > max_unlocked {
        return Err(EngineError::NotUnlocked {
            level_id: req.level_id,
            max_unlocked,
        }
        .into());
    }

    let run = anticheat::validate_run(
        catalog,
        &RunReport {
            level_id: req.level_id,
            score: req.score,
            stars: req.stars,
            orders_completed: req.orders_completed,
        },
    );

    let previous = progress.entry(req.level_id);
    let new_best = run.score > previous.best_score;
    if new_best {
        let entry = progress.entry_mut(req.level_id);
        entry.best_score = run.score;
        entry.best_stars = run.stars;
    }

    if req.level_id >= max_unlocked && run.stars >= 1 {
        progress.max_unlocked_level = req.level_id + 1;
    }

    let coin_reward = 50 + run.stars as u64 * 25;
    account.ledger.deposit(Currency::Coins, coin_reward);
    if run.orders > 0 {
        account
            .ledger
            .deposit(Currency::HeroTokens, run.orders as u64);
    }

    let xp_reward = 50 + run.stars as u32 * 25 + run.orders * 10;
    let mut level_data: PlayerLevelData = account.store.load();
    leveling::apply_xp(&mut level_data, xp_reward);
    account.store.save(&level_data);

    // Battle pass XP only accrues once the seasonal record exists.
    let bp_xp_reward = 100 + run.stars as u32 * 50;
    if let Some(mut bp_data) = account.store.load_existing::<BattlePassData>() {
        bp_engine::sync_season(&mut bp_data, &catalog.battle_pass);
        if bp_engine::season_open(&catalog.battle_pass, Utc::now()) {
            bp_engine::grant_xp(&mut bp_data, &catalog.battle_pass, bp_xp_reward);
            account.store.save(&bp_data);
        }
    }

    // First completion with at least one star may unlock the level's hero.
    let mut unlocked_hero_id = String::new();
    if run.stars >= 1 && !req.free_hero_reward_id.is_empty() {
        let already_granted = progress.entry(req.level_id).hero_granted;
        if !already_granted && catalog.hero(&req.free_hero_reward_id).is_some() {
            progress.entry_mut(req.level_id).hero_granted = true;
            let mut roster: HeroRoster = account.store.load();
            roster.unlock(&req.free_hero_reward_id);
            account.store.save(&roster);
            unlocked_hero_id = req.free_hero_reward_id.clone();
        }
    }

    account.store.save(&progress);

    let stored = progress.entry(req.level_id);
    Ok(Json(CompleteLevelResponse {
        success: true,
        new_best,
        best_score: stored.best_score,
        best_stars: stored.best_stars,
        max_unlocked_level: progress.max_unlocked_level,
        coin_reward,
        xp_reward,
        bp_xp_reward,
        unlocked_hero_id,
        player_level: level_data.level,
        player_xp: level_data.xp,
    }))
}

#[openapi]
#[post("/players/<player_id>/xp", format = "json", data = "<request>")]
pub async fn add_player_xp(
    registry: &State<PlayerRegistry>,
    player_id: &str,
    request: Json<AddPlayerXpRequest>,
) -> Result<Json<PlayerLevelResponse>, ApiError> {
    let amount = request.0.amount;
    if amount == 0 || amount > leveling::MAX_XP_GRANT {
        return Err(EngineError::Validation(format!(
            "amount must be between 1 and {}",
            leveling::MAX_XP_GRANT
        ))
        .into());
    }

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;
    let mut data: PlayerLevelData = account.store.load();
    let levels_gained = leveling::apply_xp(&mut data, amount);
    account.store.save(&data);

    Ok(Json(PlayerLevelResponse {
        level: data.level,
        xp: data.xp,
        xp_to_next: leveling::xp_to_next(data.level),
        levels_gained,
    }))
}

/// Token cost is `10 × current level`; the catalog's max level is a hard
/// ceiling.
#[openapi]
#[post("/players/<player_id>/heroes/upgrade", format = "json", data = "<request>")]
pub async fn upgrade_hero(
    registry: &State<PlayerRegistry>,
    catalog: &State<Arc<Catalog>>,
    player_id: &str,
    request: Json<UpgradeHeroRequest>,
) -> Result<Json<UpgradeHeroResponse>, ApiError> {
    let hero_id = request.0.hero_id;

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;

    let mut roster: HeroRoster = account.store.load();
    let current_level = match roster.entry(&hero_id) {
        Some(entry) if entry.is_unlocked => entry.current_level,
        _ => return Err(EngineError::NotFound(format!("Hero {hero_id}")).into()),
    };

    let max_level = catalog.hero(&hero_id).map(|h| h.max_level).unwrap_or(10);
    if current_level >= max_level {
        return Err(EngineError::Validation(format!(
            "Hero {hero_id} is already at max level"
        ))
        .into());
    }

    let cost = 10 * current_level as u64;
    account.ledger.withdraw(Currency::HeroTokens, cost)?;

    let new_level = current_level + 1;
    if let Some(entry) = roster.entry_mut(&hero_id) {
        entry.current_level = new_level;
    }
    account.store.save(&roster);

    Ok(Json(UpgradeHeroResponse {
        hero_id,
        new_level,
        hero_tokens: account.ledger.balance(Currency::HeroTokens),
    }))
}

#[openapi]
#[get("/heroes")]
pub async fn get_hero_catalog(catalog: &State<Arc<Catalog>>) -> Json<Vec<HeroDef>> {
    Json(catalog.heroes.clone())
}

#[openapi]
#[get("/worlds")]
pub async fn get_world_configs(catalog: &State<Arc<Catalog>>) -> Json<Vec<WorldConfig>> {
    Json(catalog.worlds.clone())
}
