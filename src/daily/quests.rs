//! Daily quest regeneration, progress and claims.
//!
//! The client ships its quest pool with the check request (the pool is
//! content, not authority); everything the server pays out comes from its
//! own stored copy of the chosen quests.

use rand::RngCore;
use rand_pcg::Lcg64Xsh32;
use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

use crate::account::records::{DailyQuestState, QuestEntry};
use crate::status_messages::EngineError;

pub const MAX_PROGRESS_AMOUNT: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum QuestDifficulty {
    Easy,
    Medium,
    Hard,
}

/// A quest the client's pool offers for today's draw.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct QuestTemplate {
    pub quest_id: String,
    pub description: String,
    pub target_count: u32,
    pub credit_reward: u64,
    pub difficulty: QuestDifficulty,
}

fn pick<'a>(
    rng: &mut Lcg64Xsh32,
    pool: &'a [QuestTemplate],
    difficulty: QuestDifficulty,
) -> Option<&'a QuestTemplate> {
    let matching: Vec<&QuestTemplate> = pool.iter().filter(|q| q.difficulty == difficulty).collect();
    if matching.is_empty() {
        return None;
    }
    Some(matching[(rng.next_u64() % matching.len() as u64) as usize])
}

fn instantiate(template: &QuestTemplate) -> QuestEntry {
    QuestEntry {
        quest_id: template.quest_id.clone(),
        description: template.description.clone(),
        target_count: template.target_count,
        current_count: 0,
        credit_reward: template.credit_reward,
        is_completed: false,
        is_claimed: false,
    }
}

/// Regenerate the quest set when the stored date is stale: one quest per
/// difficulty, drawn from the pool. Returns whether a regeneration happened.
pub fn ensure_daily_quests(
    rng: &mut Lcg64Xsh32,
    state: &mut DailyQuestState,
    pool: &[QuestTemplate],
    today: &str,
) -> bool {
    if state.date == today && !state.quests.is_empty() {
        return false;
    }

    let mut quests = Vec::with_capacity(3);
    for difficulty in [
        QuestDifficulty::Easy,
        QuestDifficulty::Medium,
        QuestDifficulty::Hard,
    ] {
        if let Some(template) = pick(rng, pool, difficulty) {
            quests.push(instantiate(template));
        }
    }

    state.date = today.to_string();
    state.quests = quests;
    state.rerolls = 0;
    true
}

/// Credit progress to every incomplete quest whose id contains
/// `quest_type`. Counts are capped at the target.
pub fn apply_progress(
    state: &mut DailyQuestState,
    quest_type: &str,
    amount: u32,
) -> Result<bool, EngineError> {
    if state.quests.is_empty() {
        return Err(EngineError::NotFound("Active quests".to_string()));
    }

    let mut changed = false;
    for quest in &mut state.quests {
        if quest.is_completed {
            continue;
        }
        if quest.quest_id.contains(quest_type) {
            quest.current_count += amount;
            if quest.current_count >= quest.target_count {
                quest.current_count = quest.target_count;
                quest.is_completed = true;
            }
            changed = true;
        }
    }
    Ok(changed)
}

/// Claim a completed quest by index, returning the coin reward to deposit.
pub fn claim_reward(state: &mut DailyQuestState, index: usize) -> Result<u64, EngineError> {
    let quest = state
        .quests
        .get_mut(index)
        .ok_or_else(|| EngineError::NotFound(format!("Quest {index}")))?;
    if !quest.is_completed {
        return Err(EngineError::Validation("Quest not completed".to_string()));
    }
    if quest.is_claimed {
        return Err(EngineError::AlreadyClaimed(format!("Quest {index}")));
    }
    if quest.credit_reward == 0 {
        return Err(EngineError::Validation("Quest has no reward".to_string()));
    }
    quest.is_claimed = true;
    Ok(quest.credit_reward)
}
