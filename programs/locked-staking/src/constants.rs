// =============================================================================
// Locked Staking Constants
// =============================================================================

// PDA Seeds
pub const STAKING_POOL_SEED: &[u8] = b"staking_pool";
pub const STAKE_VAULT_SEED: &[u8] = b"stake_vault";
pub const STAKE_ACCOUNT_SEED: &[u8] = b"stake_account";

// Lock duration menu
// Entries are seconds; index into this table is what stakers quote
pub const MAX_LOCK_DURATIONS: usize = 16;

// Upper bound on a single lock (10 years) so unlock_time stays far from i64::MAX
pub const MAX_LOCK_DURATION_SECONDS: i64 = 10 * 365 * SECONDS_PER_DAY;

// Per-account position list
// Bounded so the StakeAccount can be allocated once with a fixed size
pub const MAX_POSITIONS: usize = 32;

pub const SECONDS_PER_DAY: i64 = 86_400;
