//! Daily login and quest endpoints.

use chrono::Utc;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::State;
use rocket_okapi::{openapi, JsonSchema};

pub mod login;
pub mod quests;
pub mod selector;

use crate::account::ledger::Currency;
use crate::account::records::{DailyLoginState, DailyQuestState, QuestEntry};
use crate::account::PlayerRegistry;
use crate::status_messages::{ApiError, EngineError};

use quests::QuestTemplate;

/// Login claim outcome. The idempotency guard answers with
/// `success: false` and a reason rather than an error status.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct LoginClaimResponse {
    pub success: bool,
    pub day: u32,
    pub streak: u32,
    pub reward: u64,
    pub is_gem: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct CheckDailyQuestsRequest {
    #[serde(default)]
    pub quest_pool: Vec<QuestTemplate>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct QuestListResponse {
    pub quests: Vec<QuestEntry>,
    pub rerolls: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct UpdateQuestProgressRequest {
    pub quest_type: String,
    #[serde(default = "default_progress_amount")]
    pub amount: u32,
}

fn default_progress_amount() -> u32 {
    1
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ClaimQuestRewardRequest {
    pub quest_index: u32,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ClaimQuestRewardResponse {
    pub success: bool,
    pub reward: u64,
    pub coins: u64,
}

#[openapi]
#[post("/players/<player_id>/login/claim")]
pub async fn claim_daily_login(
    registry: &State<PlayerRegistry>,
    player_id: &str,
) -> Json<LoginClaimResponse> {
    let account = registry.account(player_id).await;
    let mut account = account.lock().await;

    let mut state: DailyLoginState = account.store.load();
    match login::claim(&mut state, Utc::now().date_naive()) {
        Ok(reward) => {
            let currency = if reward.is_gem {
                Currency::Gems
            } else {
                Currency::Coins
            };
            account.ledger.deposit(currency, reward.reward);
            account.store.save(&state);
            Json(LoginClaimResponse {
                success: true,
                day: reward.day,
                streak: reward.streak,
                reward: reward.reward,
                is_gem: reward.is_gem,
                reason: None,
            })
        }
        Err(_) => Json(LoginClaimResponse {
            success: false,
            day: state.day,
            streak: state.streak,
            reward: 0,
            is_gem: false,
            reason: Some("Already claimed today".to_string()),
        }),
    }
}

/// Regenerates the quest set on the first call of each UTC day and echoes
/// the stored set otherwise.
#[openapi]
#[post("/players/<player_id>/quests/check", format = "json", data = "<request>")]
pub async fn check_daily_quests(
    registry: &State<PlayerRegistry>,
    player_id: &str,
    request: Json<CheckDailyQuestsRequest>,
) -> Json<QuestListResponse> {
    let pool = request.0.quest_pool;
    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;

    let mut state: DailyQuestState = account.store.load();
    if quests::ensure_daily_quests(&mut account.rng, &mut state, &pool, &today) {
        account.store.save(&state);
    }

    Json(QuestListResponse {
        rerolls: state.rerolls,
        quests: state.quests,
    })
}

#[openapi]
#[post("/players/<player_id>/quests/progress", format = "json", data = "<request>")]
pub async fn update_quest_progress(
    registry: &State<PlayerRegistry>,
    player_id: &str,
    request: Json<UpdateQuestProgressRequest>,
) -> Result<Json<QuestListResponse>, ApiError> {
    let UpdateQuestProgressRequest { quest_type, amount } = request.0;
    if amount == 0 || amount > quests::MAX_PROGRESS_AMOUNT {
        return Err(EngineError::Validation(format!(
            "amount must be between 1 and {}",
            quests::MAX_PROGRESS_AMOUNT
        ))
        .into());
    }

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;

    let mut state: DailyQuestState = account.store.load();
    if quests::apply_progress(&mut state, &quest_type, amount)? {
        account.store.save(&state);
    }

    Ok(Json(QuestListResponse {
        rerolls: state.rerolls,
        quests: state.quests,
    }))
}

#[openapi]
#[post("/players/<player_id>/quests/claim", format = "json", data = "<request>")]
pub async fn claim_quest_reward(
    registry: &State<PlayerRegistry>,
    player_id: &str,
    request: Json<ClaimQuestRewardRequest>,
) -> Result<Json<ClaimQuestRewardResponse>, ApiError> {
    let index = request.0.quest_index as usize;

    let account = registry.account(player_id).await;
    let mut account = account.lock().await;

    let mut state: DailyQuestState = account.store.load();
    let reward = quests::claim_reward(&mut state, index)?;
    account.store.save(&state);
    account.ledger.deposit(Currency::Coins, reward);

    Ok(Json(ClaimQuestRewardResponse {
        success: true,
        reward,
        coins: account.ledger.balance(Currency::Coins),
    }))
}
