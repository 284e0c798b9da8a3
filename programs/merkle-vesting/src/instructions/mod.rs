// =============================================================================
// Instructions Module - Merkle Vesting
// =============================================================================

pub mod admin;
pub mod claim;
pub mod claim_and_lock;
pub mod claimable_tokens;
pub mod initialize;

pub use admin::*;
pub use claim::*;
pub use claim_and_lock::*;
pub use claimable_tokens::*;
pub use initialize::*;
