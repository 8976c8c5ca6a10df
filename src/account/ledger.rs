//! Virtual-currency ledger for a single player.
//!
//! Balances are unsigned, so they can never go negative; a debit either
//! succeeds in full or fails before any mutation. Handlers must read the
//! live balance through the ledger right before debiting — balances are
//! never cached across a request.

use std::collections::HashMap;
use std::fmt;

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

use crate::status_messages::EngineError;

/// The three virtual currencies of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub enum Currency {
    Coins,
    Gems,
    HeroTokens,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Coins => write!(f, "coins"),
            Currency::Gems => write!(f, "gems"),
            Currency::HeroTokens => write!(f, "hero tokens"),
        }
    }
}

/// Per-player balances, source of truth for all money.
#[derive(Debug, Clone, Default)]
pub struct CurrencyLedger {
    balances: HashMap<Currency, u64>,
}

impl CurrencyLedger {
    pub fn new() -> Self {
        CurrencyLedger::default()
    }

    pub fn balance(&self, currency: Currency) -> u64 {
        self.balances.get(&currency).copied().unwrap_or(0)
    }

    pub fn deposit(&mut self, currency: Currency, amount: u64) {
        let entry = self.balances.entry(currency).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Debit `amount`, rejecting before any mutation if funds are short.
    pub fn withdraw(&mut self, currency: Currency, amount: u64) -> Result<(), EngineError> {
        let have = self.balance(currency);
        if have < amount {
            return Err(EngineError::InsufficientFunds {
                currency,
                needed: amount,
                have,
            });
        }
        self.balances.insert(currency, have - amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn withdraw_rejects_before_mutating() {
        let mut ledger = CurrencyLedger::new();
        ledger.deposit(Currency::Gems, 30);
        let err = ledger.withdraw(Currency::Gems, 50).unwrap_err();
        assert_eq!(
            err,
            EngineError::InsufficientFunds {
                currency: Currency::Gems,
                needed: 50,
                have: 30,
            }
        );
        assert_eq!(ledger.balance(Currency::Gems), 30);
    }

    #[test]
    fn deposit_and_withdraw_round() {
        let mut ledger = CurrencyLedger::new();
        ledger.deposit(Currency::Coins, 500);
        ledger.withdraw(Currency::Coins, 120).unwrap();
        assert_eq!(ledger.balance(Currency::Coins), 380);
        assert_eq!(ledger.balance(Currency::HeroTokens), 0);
    }
}
