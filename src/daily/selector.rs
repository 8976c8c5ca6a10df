//! Deterministic daily deal selection.
//!
//! The selection is a pure function of the UTC date string, so every call
//! on a given day regenerates the same four deals without storing them.

use chrono::{DateTime, Timelike, Utc};

use crate::catalog::shop::DailyDealDef;

/// 32-bit rolling hash of the date string: `seed = seed * 31 + byte` with
/// i32 wraparound, then absolute value. Matches the `(seed << 5) - seed`
/// form bit for bit.
pub fn date_seed(date: &str) -> u32 {
    let mut seed: i32 = 0;
    for byte in date.bytes() {
        seed = seed.wrapping_mul(31).wrapping_add(byte as i32);
    }
    seed.unsigned_abs()
}

/// Today's storefront: one free deal picked by the seed, then the first
/// three paid deals under a seed-keyed stable sort.
pub fn deals_for_date<'a>(pool: &'a [DailyDealDef], date: &str) -> Vec<&'a DailyDealDef> {
    let seed = date_seed(date) as u64;

    let free: Vec<&DailyDealDef> = pool.iter().filter(|d| d.is_free).collect();
    let paid: Vec<&DailyDealDef> = pool.iter().filter(|d| !d.is_free).collect();

    let mut selected = Vec::with_capacity(4);
    if !free.is_empty() {
        selected.push(free[(seed % free.len() as u64) as usize]);
    }

    let mut shuffled = paid;
    shuffled.sort_by_key(|d| (seed * 31 + d.deal_id.len() as u64) % 1000);
    selected.extend(shuffled.into_iter().take(3));
    selected
}

/// Whole seconds until the next UTC midnight.
pub fn seconds_until_utc_midnight(now: DateTime<Utc>) -> i64 {
    86_400 - now.time().num_seconds_from_midnight() as i64
}
