// =============================================================================
// Instructions Module - Locked Staking
// =============================================================================

pub mod admin;
pub mod initialize;
pub mod stake;
pub mod unstake;

pub use admin::*;
pub use initialize::*;
pub use stake::*;
pub use unstake::*;
