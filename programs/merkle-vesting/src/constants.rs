// =============================================================================
// Merkle Vesting Constants
// =============================================================================

// =============================================================================
// PDA SEEDS
// =============================================================================

/// Seed for the VestingConfig PDA
/// Full seed: ["vesting_config", mint_pubkey]
pub const VESTING_CONFIG_SEED: &[u8] = b"vesting_config";

/// Seed for the lock escrow token account (transit account for claim_and_lock)
/// Full seed: ["lock_escrow", vesting_config_pubkey]
pub const LOCK_ESCROW_SEED: &[u8] = b"lock_escrow";

/// Seed for per-claimant, per-category ClaimRecord PDAs
/// Full seed: ["claim_record", vesting_config_pubkey, claimant_pubkey, [category]]
pub const CLAIM_RECORD_SEED: &[u8] = b"claim_record";

// =============================================================================
// VESTING MATH
// =============================================================================

/// Fixed-point scale for the post-cliff vesting ratio (10^18)
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Start rates are whole percentages
pub const PERCENT_DENOMINATOR: u64 = 100;

// =============================================================================
// MERKLE
// =============================================================================

/// Longest accepted proof; 2^32 leaves is far past any allocation set
pub const MAX_PROOF_LEN: usize = 32;

/// Domain byte prefixed to leaf hashes
pub const LEAF_DOMAIN: u8 = 0x00;

/// Domain byte prefixed to internal node hashes
pub const NODE_DOMAIN: u8 = 0x01;

pub const SECONDS_PER_DAY: i64 = 86_400;
