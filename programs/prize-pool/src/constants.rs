use anchor_lang::prelude::*;

// -----------------
// Seeds / constants
// -----------------

pub const POOL_SEED: &[u8] = b"pool_v1";
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault_v1";

/// Maximum number of concurrent depositors per pool instance.
/// NOTE: fixed cap to keep the Pool account size deterministic; the draw
/// walk is O(n) over this list.
pub const MAX_DEPOSITORS: usize = 128;

// Period bounds
// =============

/// Lock periods are expressed in days and act purely as the ticket
/// multiplier. Any value in [1, 365] is accepted at initialization.
pub const MIN_PERIOD_DAYS: u32 = 1;
pub const MAX_PERIOD_DAYS: u32 = 365;

/// Canonical deployments: weekly, biweekly, monthly.
pub const PERIOD_WEEKLY: u32 = 7;
pub const PERIOD_BIWEEKLY: u32 = 15;
pub const PERIOD_MONTHLY: u32 = 30;

pub const INITIAL_VERSION: u16 = 1;
