pub mod claim_record;
pub mod vesting_config;
pub mod vesting_curve;

pub use claim_record::*;
pub use vesting_config::*;
pub use vesting_curve::*;
