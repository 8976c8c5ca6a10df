//! Per-player account state and the registry that serializes access to it.
//!
//! The blob store offers no cross-blob transactions and the ledger's
//! atomicity is independent of blob writes, so the registry hands out one
//! async mutex per player and every handler holds it for its entire
//! read-modify-write. Two simultaneous requests for the same player can
//! never interleave between a balance check and a blob write.

use std::collections::HashMap;
use std::sync::Arc;

use rand::SeedableRng;
use rand_pcg::Lcg64Xsh32;
use rocket::futures::lock::Mutex;

pub mod ledger;
pub mod records;
pub mod store;

use ledger::CurrencyLedger;
use store::BlobStore;

/// Everything the engine holds for one player.
pub struct PlayerAccount {
    pub store: BlobStore,
    pub ledger: CurrencyLedger,
    pub rng: Lcg64Xsh32,
}

impl PlayerAccount {
    pub fn new() -> Self {
        PlayerAccount {
            store: BlobStore::new(),
            ledger: CurrencyLedger::new(),
            rng: Lcg64Xsh32::from_entropy(),
        }
    }
}

impl Default for PlayerAccount {
    fn default() -> Self {
        PlayerAccount::new()
    }
}

/// Lazily-populated map of player id to account, one lock per player.
#[derive(Default)]
pub struct PlayerRegistry {
    players: Mutex<HashMap<String, Arc<Mutex<PlayerAccount>>>>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        PlayerRegistry::default()
    }

    /// Fetch (or create) the account entry for `player_id`.
    ///
    /// The registry lock is held only for the lookup; callers then lock the
    /// returned account for the duration of their handler.
    pub async fn account(&self, player_id: &str) -> Arc<Mutex<PlayerAccount>> {
        let mut players = self.players.lock().await;
        players
            .entry(player_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(PlayerAccount::new())))
            .clone()
    }
}
