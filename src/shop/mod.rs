//! Storefront: bundles, daily deals, cosmetics and skins.

use chrono::Utc;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::State;
use rocket_okapi::{openapi, JsonSchema};
use std::sync::Arc;

use crate::account::ledger::Currency;
use crate::account::records::{
    BronzeCooldown, CosmeticData, DailyDealsPurchased, PurchasedBundles, SkinData,
};
use crate::account::PlayerRegistry;
use crate::catalog::heroes::ChestRarity;
use crate::catalog::shop::{BundleDef, BundleItemKind, DailyDealDef, DealKind};
use crate::catalog::Catalog;
use crate::daily::selector;
use crate::gacha::{open_chest_for_account, ChestRollResult};
use crate::status_messages::{ApiError, EngineError};

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ShopDataResponse {
    pub bundles: Vec<BundleDef>,
    pub daily_deals: Vec<DailyDealDef>,
    pub purchased_deals: Vec<String>,
    pub seconds_until_reset: i64,
    pub bronze_cooldown_remaining: i64,
    pub server_time: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct PurchaseBundleRequest {
    pub bundle_id: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct PurchaseBundleResponse {
    pub success: bool,
    pub bundle_id: String,
    pub chest_results: Vec<ChestRollResult>,
    pub coins: u64,
    pub gems: u64,
    pub hero_tokens: u64,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct PurchaseDailyDealRequest {
    pub deal_id: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct PurchaseDailyDealResponse {
    pub success: bool,
    pub deal_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chest_result: Option<ChestRollResult>,
    pub coins: u64,
    pub gems: u64,
    pub hero_tokens: u64,
}

/// Spend currency for cosmetics and skins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum SpendCurrency {
    Credits,
    Coins,
    Gems,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct PurchaseCosmeticRequest {
    pub cosmetic_id: String,
    pub currency_type: SpendCurrency,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct EquipCosmeticRequest {
    pub cosmetic_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct PurchaseSkinRequest {
    pub skin_id: String,
    pub currency_type: SpendCurrency,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct EquipSkinRequest {
    pub skin_id: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct WardrobeResponse {
    pub success: bool,
    pub owned: Vec<String>,
}

/// Bundles still purchasable plus today's deterministic deals and the
/// player's reset timers.
#[openapi]
#[get("/players/<player_id>/shop")]
pub async fn get_shop_data(
    registry: &State<PlayerRegistry>,
    catalog: &State<Arc<Catalog>>,
    player_id: &str,
) -> Json<ShopDataResponse> {
    let now = Utc::now();
    let today = now.date_naive().format("%Y-%m-%d").to_string();

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;

    let purchased: PurchasedBundles = account.store.load();
    let bundles: Vec<BundleDef> = catalog
        .bundles
        .iter()
        .filter(|b| !purchased.bundle_ids.contains(&b.bundle_id))
        .cloned()
        .collect();

    let daily_deals: Vec<DailyDealDef> = selector::deals_for_date(&catalog.deal_pool, &today)
        .into_iter()
        .cloned()
        .collect();

    let mut deals_purchased: DailyDealsPurchased = account.store.load();
    if deals_purchased.roll_over(&today) {
        account.store.save(&deals_purchased);
    }

    let cooldown: BronzeCooldown = account.store.load();
    let bronze_cooldown_remaining =
        cooldown.remaining_seconds(now, catalog.bronze_cooldown_seconds);

    Json(ShopDataResponse {
        bundles,
        daily_deals,
        purchased_deals: deals_purchased.bought,
        seconds_until_reset: selector::seconds_until_utc_midnight(now),
        bronze_cooldown_remaining,
        server_time: now.to_rfc3339(),
    })
}

#[openapi]
#[post("/players/<player_id>/shop/bundle", format = "json", data = "<request>")]
pub async fn purchase_bundle(
    registry: &State<PlayerRegistry>,
    catalog: &State<Arc<Catalog>>,
    player_id: &str,
    request: Json<PurchaseBundleRequest>,
) -> Result<Json<PurchaseBundleResponse>, ApiError> {
    let bundle_id = request.0.bundle_id;
    let bundle = catalog
        .bundle(&bundle_id)
        .ok_or_else(|| EngineError::NotFound(format!("Bundle {bundle_id}")))?
        .clone();

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;

    let mut purchased: PurchasedBundles = account.store.load();
    if purchased.bundle_ids.contains(&bundle_id) {
        return Err(EngineError::AlreadyOwned(format!("Bundle {bundle_id}")).into());
    }

    if bundle.gem_cost > 0 {
        account.ledger.withdraw(Currency::Gems, bundle.gem_cost)?;
    }

    let mut chest_results = Vec::new();
    for item in &bundle.contents {
        match item.kind {
            BundleItemKind::Coins => account.ledger.deposit(Currency::Coins, item.amount),
            BundleItemKind::Gems => account.ledger.deposit(Currency::Gems, item.amount),
            BundleItemKind::HeroTokens => {
                account.ledger.deposit(Currency::HeroTokens, item.amount)
            }
            BundleItemKind::GoldChests => {
                for _ in 0..item.amount {
                    chest_results.push(open_chest_for_account(
                        &mut account,
                        catalog,
                        ChestRarity::Gold,
                    )?);
                }
            }
        }
    }

    purchased.bundle_ids.push(bundle_id.clone());
    account.store.save(&purchased);

    Ok(Json(PurchaseBundleResponse {
        success: true,
        bundle_id,
        chest_results,
        coins: account.ledger.balance(Currency::Coins),
        gems: account.ledger.balance(Currency::Gems),
        hero_tokens: account.ledger.balance(Currency::HeroTokens),
    }))
}

/// Buys one of today's deals. The deal list is regenerated from the date
/// on the spot, so a stale or forged id can never be purchased.
#[openapi]
#[post("/players/<player_id>/shop/deal", format = "json", data = "<request>")]
pub async fn purchase_daily_deal(
    registry: &State<PlayerRegistry>,
    catalog: &State<Arc<Catalog>>,
    player_id: &str,
    request: Json<PurchaseDailyDealRequest>,
) -> Result<Json<PurchaseDailyDealResponse>, ApiError> {
    let deal_id = request.0.deal_id;
    let now = Utc::now();
    let today = now.date_naive().format("%Y-%m-%d").to_string();

    let deal = selector::deals_for_date(&catalog.deal_pool, &today)
        .into_iter()
        .find(|d| d.deal_id == deal_id)
        .ok_or_else(|| EngineError::NotFound(format!("Deal {deal_id} not available today")))?
        .clone();

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;

    let mut purchased: DailyDealsPurchased = account.store.load();
    purchased.roll_over(&today);
    if purchased.bought.contains(&deal_id) {
        return Err(EngineError::AlreadyClaimed(format!("Deal {deal_id}")).into());
    }

    // The free bronze-chest deal shares the regular bronze cooldown.
    if deal.kind == DealKind::BronzeChest {
        let cooldown: BronzeCooldown = account.store.load();
        let remaining = cooldown.remaining_seconds(now, catalog.bronze_cooldown_seconds);
        if remaining > 0 {
            return Err(EngineError::CooldownActive {
                remaining_seconds: remaining,
            }
            .into());
        }
    }

    if deal.deal_gem_cost > 0 {
        account.ledger.withdraw(Currency::Gems, deal.deal_gem_cost)?;
    }

    let mut chest_result = None;
    match deal.kind {
        DealKind::Coins => account.ledger.deposit(Currency::Coins, deal.amount),
        DealKind::Gems => account.ledger.deposit(Currency::Gems, deal.amount),
        DealKind::HeroTokens => account.ledger.deposit(Currency::HeroTokens, deal.amount),
        DealKind::BronzeChest => {
            chest_result = Some(open_chest_for_account(
                &mut account,
                catalog,
                ChestRarity::Bronze,
            )?);
            account.store.save(&BronzeCooldown {
                last_opened_utc: Some(now),
            });
        }
    }

    purchased.bought.push(deal_id.clone());
    account.store.save(&purchased);

    Ok(Json(PurchaseDailyDealResponse {
        success: true,
        deal_id,
        chest_result,
        coins: account.ledger.balance(Currency::Coins),
        gems: account.ledger.balance(Currency::Gems),
        hero_tokens: account.ledger.balance(Currency::HeroTokens),
    }))
}

/// The price is read from the catalog for the chosen currency; a zero
/// price means the item is not sold for that currency.
#[openapi]
#[post("/players/<player_id>/cosmetics/purchase", format = "json", data = "<request>")]
pub async fn purchase_cosmetic(
    registry: &State<PlayerRegistry>,
    catalog: &State<Arc<Catalog>>,
    player_id: &str,
    request: Json<PurchaseCosmeticRequest>,
) -> Result<Json<WardrobeResponse>, ApiError> {
    let PurchaseCosmeticRequest {
        cosmetic_id,
        currency_type,
    } = request.0;
    let cosmetic = catalog
        .cosmetic(&cosmetic_id)
        .ok_or_else(|| EngineError::NotFound(format!("Cosmetic {cosmetic_id}")))?;

    let (currency, price) = match currency_type {
        SpendCurrency::Credits | SpendCurrency::Coins => (Currency::Coins, cosmetic.price_credits),
        SpendCurrency::Gems => (Currency::Gems, cosmetic.price_gems),
    };
    if price == 0 {
        return Err(EngineError::Validation(format!(
            "Cosmetic {cosmetic_id} is not sold for {currency}"
        ))
        .into());
    }

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;

    let mut data: CosmeticData = account.store.load();
    if data.owned.contains(&cosmetic_id) {
        return Err(EngineError::AlreadyOwned(format!("Cosmetic {cosmetic_id}")).into());
    }

    account.ledger.withdraw(currency, price)?;
    data.owned.push(cosmetic_id);
    account.store.save(&data);

    Ok(Json(WardrobeResponse {
        success: true,
        owned: data.owned,
    }))
}

/// Equips into the slot the catalog assigns the cosmetic, never a
/// client-chosen one.
#[openapi]
#[post("/players/<player_id>/cosmetics/equip", format = "json", data = "<request>")]
pub async fn equip_cosmetic(
    registry: &State<PlayerRegistry>,
    catalog: &State<Arc<Catalog>>,
    player_id: &str,
    request: Json<EquipCosmeticRequest>,
) -> Result<Json<WardrobeResponse>, ApiError> {
    let cosmetic_id = request.0.cosmetic_id;
    let cosmetic = catalog
        .cosmetic(&cosmetic_id)
        .ok_or_else(|| EngineError::NotFound(format!("Cosmetic {cosmetic_id}")))?;

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;

    let mut data: CosmeticData = account.store.load();
    if !data.owned.contains(&cosmetic_id) {
        return Err(EngineError::NotFound(format!("Cosmetic {cosmetic_id} not owned")).into());
    }

    data.equipped.insert(cosmetic.slot.clone(), cosmetic_id);
    account.store.save(&data);

    Ok(Json(WardrobeResponse {
        success: true,
        owned: data.owned,
    }))
}

#[openapi]
#[post("/players/<player_id>/skins/purchase", format = "json", data = "<request>")]
pub async fn purchase_skin(
    registry: &State<PlayerRegistry>,
    catalog: &State<Arc<Catalog>>,
    player_id: &str,
    request: Json<PurchaseSkinRequest>,
) -> Result<Json<WardrobeResponse>, ApiError> {
    let PurchaseSkinRequest {
        skin_id,
        currency_type,
    } = request.0;
    let skin = catalog
        .skin(&skin_id)
        .ok_or_else(|| EngineError::NotFound(format!("Skin {skin_id}")))?;

    let (currency, price) = match currency_type {
        SpendCurrency::Credits | SpendCurrency::Coins => (Currency::Coins, skin.price_coin),
        SpendCurrency::Gems => (Currency::Gems, skin.price_gems),
    };
    if price == 0 {
        return Err(EngineError::Validation(format!(
            "Skin {skin_id} is not sold for {currency}"
        ))
        .into());
    }

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;

    let mut data: SkinData = account.store.load();
    if data.owned.contains(&skin_id) {
        return Err(EngineError::AlreadyOwned(format!("Skin {skin_id}")).into());
    }

    account.ledger.withdraw(currency, price)?;
    data.owned.push(skin_id);
    account.store.save(&data);

    Ok(Json(WardrobeResponse {
        success: true,
        owned: data.owned,
    }))
}

#[openapi]
#[post("/players/<player_id>/skins/equip", format = "json", data = "<request>")]
pub async fn equip_skin(
    registry: &State<PlayerRegistry>,
    catalog: &State<Arc<Catalog>>,
    player_id: &str,
    request: Json<EquipSkinRequest>,
) -> Result<Json<WardrobeResponse>, ApiError> {
    let skin_id = request.0.skin_id;
    let skin = catalog
        .skin(&skin_id)
        .ok_or_else(|| EngineError::NotFound(format!("Skin {skin_id}")))?;

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;

    let mut data: SkinData = account.store.load();
    if !data.owned.contains(&skin_id) {
        return Err(EngineError::NotFound(format!("Skin {skin_id} not owned")).into());
    }

    data.equipped
        .insert(skin.skin_type.slot_key().to_string(), skin_id);
    account.store.save(&data);

    Ok(Json(WardrobeResponse {
        success: true,
        owned: data.owned,
    }))
}
