//! Battle pass endpoints.

use chrono::Utc;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::State;
use rocket_okapi::{openapi, JsonSchema};
use std::sync::Arc;

pub mod engine;

use crate::account::ledger::Currency;
use crate::account::records::BattlePassData;
use crate::account::PlayerRegistry;
use crate::catalog::battle_pass::TierReward;
use crate::catalog::Catalog;
use crate::status_messages::{ApiError, EngineError};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct AddBattlePassXpRequest {
    pub amount: u32,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct BattlePassProgress {
    pub tier: u32,
    pub xp: u32,
    pub premium: bool,
    pub xp_applied: u32,
    pub tiers_gained: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ClaimBpRewardRequest {
    pub tier: u32,
    pub premium: bool,
}

#[derive(Debug, Default, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct RewardGrant {
    pub coins: u64,
    pub gems: u64,
    pub hero_tokens: u64,
}

impl RewardGrant {
    pub fn add(&mut self, currency: Currency, amount: u64) {
        match currency {
            Currency::Coins => self.coins += amount,
            Currency::Gems => self.gems += amount,
            Currency::HeroTokens => self.hero_tokens += amount,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ClaimBpRewardResponse {
    pub tier: u32,
    pub premium: bool,
    pub rewards: RewardGrant,
    pub coins: u64,
    pub gems: u64,
    pub hero_tokens: u64,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct PurchaseBattlePassResponse {
    pub premium: bool,
    pub gems: u64,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct BattlePassConfigResponse {
    pub season: u32,
    pub season_end: String,
    pub xp_per_tier: u32,
    pub max_tier: u32,
    pub premium_gem_cost: u64,
    pub tier: u32,
    pub xp: u32,
    pub premium: bool,
    pub claimed_free: Vec<u32>,
    pub claimed_premium: Vec<u32>,
    pub rewards: Vec<TierReward>,
}

#[openapi]
#[post("/players/<player_id>/battle-pass/xp", format = "json", data = "<request>")]
pub async fn add_battle_pass_xp(
    registry: &State<PlayerRegistry>,
    catalog: &State<Arc<Catalog>>,
    player_id: &str,
    request: Json<AddBattlePassXpRequest>,
) -> Result<Json<BattlePassProgress>, ApiError> {
    let amount = request.0.amount;
    if amount == 0 || amount > engine::MAX_BP_XP_GRANT {
        return Err(EngineError::Validation(format!(
            "amount must be between 1 and {}",
            engine::MAX_BP_XP_GRANT
        ))
        .into());
    }
    if !engine::season_open(&catalog.battle_pass, Utc::now()) {
        return Err(EngineError::SeasonEnded.into());
    }

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;
    let mut data: BattlePassData = account.store.load();
    engine::sync_season(&mut data, &catalog.battle_pass);
    let grant = engine::grant_xp(&mut data, &catalog.battle_pass, amount);
    account.store.save(&data);

    Ok(Json(BattlePassProgress {
        tier: data.tier,
        xp: data.xp,
        premium: data.premium,
        xp_applied: grant.applied,
        tiers_gained: grant.tiers_gained,
    }))
}

#[openapi]
#[post("/players/<player_id>/battle-pass/claim", format = "json", data = "<request>")]
pub async fn claim_bp_reward(
    registry: &State<PlayerRegistry>,
    catalog: &State<Arc<Catalog>>,
    player_id: &str,
    request: Json<ClaimBpRewardRequest>,
) -> Result<Json<ClaimBpRewardResponse>, ApiError> {
    let ClaimBpRewardRequest { tier, premium } = request.0;

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;
    let mut data: BattlePassData = account.store.load();
    engine::sync_season(&mut data, &catalog.battle_pass);
    let claim = engine::claim_tier(&mut data, &catalog.battle_pass, Utc::now(), tier, premium)?;

    let mut rewards = RewardGrant::default();
    for (currency, amount) in &claim.grants {
        account.ledger.deposit(*currency, *amount);
        rewards.add(*currency, *amount);
    }
    data.last_claim_utc = Some(Utc::now().to_rfc3339());
    account.store.save(&data);

    Ok(Json(ClaimBpRewardResponse {
        tier: claim.tier,
        premium: claim.premium,
        rewards,
        coins: account.ledger.balance(Currency::Coins),
        gems: account.ledger.balance(Currency::Gems),
        hero_tokens: account.ledger.balance(Currency::HeroTokens),
    }))
}

#[openapi]
#[post("/players/<player_id>/battle-pass/purchase")]
pub async fn purchase_battle_pass(
    registry: &State<PlayerRegistry>,
    catalog: &State<Arc<Catalog>>,
    player_id: &str,
) -> Result<Json<PurchaseBattlePassResponse>, ApiError> {
    if !engine::season_open(&catalog.battle_pass, Utc::now()) {
        return Err(EngineError::SeasonEnded.into());
    }

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;
    let mut data: BattlePassData = account.store.load();
    engine::sync_season(&mut data, &catalog.battle_pass);
    if data.premium {
        return Err(EngineError::AlreadyOwned("Premium battle pass".to_string()).into());
    }
    account
        .ledger
        .withdraw(Currency::Gems, catalog.battle_pass.premium_gem_cost)?;
    data.premium = true;
    account.store.save(&data);

    Ok(Json(PurchaseBattlePassResponse {
        premium: true,
        gems: account.ledger.balance(Currency::Gems),
    }))
}

/// Season config plus the caller's progress. Persists a default record on
/// first sight so later level completions can credit battle pass XP.
#[openapi]
#[get("/players/<player_id>/battle-pass")]
pub async fn get_battle_pass_config(
    registry: &State<PlayerRegistry>,
    catalog: &State<Arc<Catalog>>,
    player_id: &str,
) -> Json<BattlePassConfigResponse> {
    let account = registry.account(player_id).await;
    let mut account = account.lock().await;
    let mut data: BattlePassData = account.store.load();
    let reset = engine::sync_season(&mut data, &catalog.battle_pass);
    if reset || !account.store.contains::<BattlePassData>() {
        account.store.save(&data);
    }

    Json(BattlePassConfigResponse {
        season: catalog.battle_pass.season,
        season_end: catalog.battle_pass.season_end.to_rfc3339(),
        xp_per_tier: catalog.battle_pass.xp_per_tier,
        max_tier: catalog.battle_pass.max_tier,
        premium_gem_cost: catalog.battle_pass.premium_gem_cost,
        tier: data.tier,
        xp: data.xp,
        premium: data.premium,
        claimed_free: data.claimed_free.iter().copied().collect(),
        claimed_premium: data.claimed_premium.iter().copied().collect(),
        rewards: catalog.battle_pass.rewards.clone(),
    })
}
