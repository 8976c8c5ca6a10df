//! Chest opening endpoints.

use chrono::Utc;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::State;
use rocket_okapi::{openapi, JsonSchema};
use std::sync::Arc;

pub mod roll;

use crate::account::records::{BronzeCooldown, HeroRoster};
use crate::account::{PlayerAccount, PlayerRegistry};
use crate::catalog::heroes::{ChestRarity, HeroRarity};
use crate::catalog::Catalog;
use crate::status_messages::{ApiError, EngineError};

use roll::roll_chest;

pub const MULTI_PULL_MAX: u32 = 10;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct OpenChestRequest {
    pub chest: ChestRarity,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct OpenChestMultiRequest {
    pub chest: ChestRarity,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ChestRollResult {
    pub hero_id: String,
    pub rarity: HeroRarity,
    pub is_new: bool,
    pub duplicate_tokens: u64,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct OpenChestResponse {
    pub result: ChestRollResult,
    pub gems: u64,
    pub hero_tokens: u64,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct OpenChestMultiResponse {
    pub results: Vec<ChestRollResult>,
    pub gems: u64,
    pub hero_tokens: u64,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ChestCooldownResponse {
    pub bronze_cooldown_remaining: i64,
    pub can_open_bronze: bool,
}

/// Run one roll inside an already-locked account. Shared with the shop,
/// which grants chests through bundles and daily deals.
pub fn open_chest_for_account(
    account: &mut PlayerAccount,
    catalog: &Catalog,
    chest: ChestRarity,
) -> Result<ChestRollResult, EngineError> {
    let mut roster: HeroRoster = account.store.load();
    let outcome = roll_chest(&mut account.rng, catalog, &mut roster, chest)?;
    account.store.save(&roster);
    if outcome.dup_tokens > 0 {
        account
            .ledger
            .deposit(crate::account::ledger::Currency::HeroTokens, outcome.dup_tokens);
    }
    Ok(ChestRollResult {
        hero_id: outcome.hero_id,
        rarity: outcome.rarity,
        is_new: outcome.was_new,
        duplicate_tokens: outcome.dup_tokens,
    })
}

#[openapi]
#[post("/players/<player_id>/chest/open", format = "json", data = "<request>")]
pub async fn open_chest(
    registry: &State<PlayerRegistry>,
    catalog: &State<Arc<Catalog>>,
    player_id: &str,
    request: Json<OpenChestRequest>,
) -> Result<Json<OpenChestResponse>, ApiError> {
    let chest = request.0.chest;
    let account = registry.account(player_id).await;
    let mut account = account.lock().await;

    if chest == ChestRarity::Bronze {
        let cooldown: BronzeCooldown = account.store.load();
        let remaining = cooldown.remaining_seconds(Utc::now(), catalog.bronze_cooldown_seconds);
        if remaining > 0 {
            return Err(EngineError::CooldownActive {
                remaining_seconds: remaining,
            }
            .into());
        }
    } else {
        account
            .ledger
            .withdraw(crate::account::ledger::Currency::Gems, chest.gem_cost())?;
    }

    let result = open_chest_for_account(&mut account, catalog, chest)?;

    if chest == ChestRarity::Bronze {
        let cooldown = BronzeCooldown {
            last_opened_utc: Some(Utc::now()),
        };
        account.store.save(&cooldown);
    }

    Ok(Json(OpenChestResponse {
        result,
        gems: account.ledger.balance(crate::account::ledger::Currency::Gems),
        hero_tokens: account
            .ledger
            .balance(crate::account::ledger::Currency::HeroTokens),
    }))
}

#[openapi]
#[post("/players/<player_id>/chest/open-multi", format = "json", data = "<request>")]
pub async fn open_chest_multi(
    registry: &State<PlayerRegistry>,
    catalog: &State<Arc<Catalog>>,
    player_id: &str,
    request: Json<OpenChestMultiRequest>,
) -> Result<Json<OpenChestMultiResponse>, ApiError> {
    let OpenChestMultiRequest { chest, count } = request.0;
    if chest == ChestRarity::Bronze {
        return Err(EngineError::Validation(
            "Bronze chests cannot be opened in bulk".to_string(),
        )
        .into());
    }
    let count = count.clamp(1, MULTI_PULL_MAX);

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;

    // Total cost is settled up front; a short wallet opens zero chests.
    let total_cost = chest.gem_cost() * count as u64;
    account
        .ledger
        .withdraw(crate::account::ledger::Currency::Gems, total_cost)?;

    let mut results = Vec::with_capacity(count as usize);
    for _ in 0..count {
        results.push(open_chest_for_account(&mut account, catalog, chest)?);
    }

    Ok(Json(OpenChestMultiResponse {
        results,
        gems: account.ledger.balance(crate::account::ledger::Currency::Gems),
        hero_tokens: account
            .ledger
            .balance(crate::account::ledger::Currency::HeroTokens),
    }))
}

#[openapi]
#[get("/players/<player_id>/chest/cooldown")]
pub async fn chest_cooldown(
    registry: &State<PlayerRegistry>,
    catalog: &State<Arc<Catalog>>,
    player_id: &str,
) -> Json<ChestCooldownResponse> {
    let account = registry.account(player_id).await;
    let account = account.lock().await;
    let cooldown: BronzeCooldown = account.store.load();
    let remaining = cooldown.remaining_seconds(Utc::now(), catalog.bronze_cooldown_seconds);
    Json(ChestCooldownResponse {
        bronze_cooldown_remaining: remaining,
        can_open_bronze: remaining == 0,
    })
}
