//! Connectivity, onboarding, wallet and ingredient endpoints.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::State;
use rocket_okapi::{openapi, JsonSchema};

use crate::account::ledger::Currency;
use crate::account::records::{
    IngredientStock, LevelProgress, PlayerInitialized, PlayerLevelData,
};
use crate::account::PlayerRegistry;
use crate::catalog::shop::ingredient_price;
use crate::catalog::Catalog;
use crate::status_messages::{ApiError, EngineError};

/// Starter grants for a brand-new account.
const STARTER_COINS: u64 = 500;
const STARTER_GEMS: u64 = 50;
const STARTER_INGREDIENTS: [&str; 6] = ["Lettuce", "Tomato", "Bread", "Bun", "Meat", "Cheese"];
const STARTER_INGREDIENT_COUNT: u32 = 100;

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct PingResponse {
    pub ok: bool,
    pub server_time_utc: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct InitNewPlayerResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct WalletResponse {
    pub coins: u64,
    pub gems: u64,
    pub hero_tokens: u64,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ConvertGemsRequest {
    pub gem_amount: u64,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ConvertGemsResponse {
    pub success: bool,
    pub coins_added: u64,
    pub coins: u64,
    pub gems: u64,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct PurchaseIngredientRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: i64,
}

fn default_batch_size() -> i64 {
    100
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct PurchaseIngredientResponse {
    pub success: bool,
    pub new_stock: u32,
    pub coins: u64,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct SyncIngredientStockRequest {
    #[serde(default)]
    pub consumed: HashMap<String, i64>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct SyncIngredientStockResponse {
    pub success: bool,
    pub stock: HashMap<String, u32>,
}

#[openapi]
#[get("/ping")]
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        ok: true,
        server_time_utc: Utc::now().to_rfc3339(),
    })
}

/// One-shot starter grant. Repeat calls answer `success: false` without
/// touching balances.
#[openapi]
#[post("/players/<player_id>/init")]
pub async fn init_new_player(
    registry: &State<PlayerRegistry>,
    player_id: &str,
) -> Json<InitNewPlayerResponse> {
    let account = registry.account(player_id).await;
    let mut account = account.lock().await;

    let guard: PlayerInitialized = account.store.load();
    if guard.initialized {
        return Json(InitNewPlayerResponse {
            success: false,
            reason: Some("Already initialized".to_string()),
        });
    }

    account.ledger.deposit(Currency::Coins, STARTER_COINS);
    account.ledger.deposit(Currency::Gems, STARTER_GEMS);

    let mut stock = IngredientStock::default();
    for kind in STARTER_INGREDIENTS {
        stock
            .counts
            .insert(kind.to_string(), STARTER_INGREDIENT_COUNT);
    }
    account.store.save(&stock);
    account.store.save(&LevelProgress::default());
    account.store.save(&PlayerLevelData::default());
    account.store.save(&PlayerInitialized { initialized: true });

    Json(InitNewPlayerResponse {
        success: true,
        reason: None,
    })
}

#[openapi]
#[get("/players/<player_id>/wallet")]
pub async fn wallet(registry: &State<PlayerRegistry>, player_id: &str) -> Json<WalletResponse> {
    let account = registry.account(player_id).await;
    let account = account.lock().await;
    Json(WalletResponse {
        coins: account.ledger.balance(Currency::Coins),
        gems: account.ledger.balance(Currency::Gems),
        hero_tokens: account.ledger.balance(Currency::HeroTokens),
    })
}

/// Fixed-rate conversion, atomic on the ledger: the debit either covers
/// the whole amount or nothing moves.
#[openapi]
#[post("/players/<player_id>/currency/convert", format = "json", data = "<request>")]
pub async fn convert_gems_to_coins(
    registry: &State<PlayerRegistry>,
    catalog: &State<Arc<Catalog>>,
    player_id: &str,
    request: Json<ConvertGemsRequest>,
) -> Result<Json<ConvertGemsResponse>, ApiError> {
    let gem_amount = request.0.gem_amount;
    if gem_amount == 0 {
        return Err(EngineError::Validation("Invalid amount".to_string()).into());
    }

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;

    account.ledger.withdraw(Currency::Gems, gem_amount)?;
    let coins_added = gem_amount * catalog.gem_to_coin_rate;
    account.ledger.deposit(Currency::Coins, coins_added);

    Ok(Json(ConvertGemsResponse {
        success: true,
        coins_added,
        coins: account.ledger.balance(Currency::Coins),
        gems: account.ledger.balance(Currency::Gems),
    }))
}

/// Restock one ingredient. The price comes from the server table; a batch
/// near the stock cap fills partially for the same price.
#[openapi]
#[post("/players/<player_id>/ingredients/purchase", format = "json", data = "<request>")]
pub async fn purchase_ingredient(
    registry: &State<PlayerRegistry>,
    catalog: &State<Arc<Catalog>>,
    player_id: &str,
    request: Json<PurchaseIngredientRequest>,
) -> Result<Json<PurchaseIngredientResponse>, ApiError> {
    let PurchaseIngredientRequest { kind, batch_size } = request.0;
    if kind.is_empty() {
        return Err(EngineError::Validation("Invalid ingredient type".to_string()).into());
    }

    let price = ingredient_price(&kind);
    let batch = if batch_size <= 0 || batch_size > 100 {
        100
    } else {
        batch_size as u32
    };

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;

    let mut stock: IngredientStock = account.store.load();
    let current = stock.count(&kind);
    if current >= catalog.max_ingredient_stock {
        return Err(EngineError::Validation("Stock is full".to_string()).into());
    }

    account.ledger.withdraw(Currency::Coins, price)?;

    let to_add = batch.min(catalog.max_ingredient_stock - current);
    stock.counts.insert(kind, current + to_add);
    account.store.save(&stock);

    Ok(Json(PurchaseIngredientResponse {
        success: true,
        new_stock: current + to_add,
        coins: account.ledger.balance(Currency::Coins),
    }))
}

/// Deduct consumed ingredients after a run, clamping at zero. Consuming
/// more than is held is logged but honored as a drain to zero.
#[openapi]
#[post("/players/<player_id>/ingredients/sync", format = "json", data = "<request>")]
pub async fn sync_ingredient_stock(
    registry: &State<PlayerRegistry>,
    player_id: &str,
    request: Json<SyncIngredientStockRequest>,
) -> Json<SyncIngredientStockResponse> {
    let consumed = request.0.consumed;

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;

    let mut stock: IngredientStock = account.store.load();
    let mut changed = false;
    for (kind, amount) in consumed {
        if amount <= 0 {
            continue;
        }
        let amount = u32::try_from(amount).unwrap_or(u32::MAX);
        let current = stock.count(&kind);
        if amount > current {
            log::warn!("ingredient sync: {kind} consumed {amount} but only had {current}");
        }
        stock.counts.insert(kind, current.saturating_sub(amount));
        changed = true;
    }
    if changed {
        account.store.save(&stock);
    }

    Json(SyncIngredientStockResponse {
        success: true,
        stock: stock.counts,
    })
}
