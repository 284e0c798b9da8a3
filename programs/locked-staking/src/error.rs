use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    // Amount Errors
    #[msg("Insufficient amount: must be greater than zero")]
    InsufficientAmount,

    // Lock Duration Errors
    #[msg("Invalid duration: index out of range or quoted duration is stale")]
    InvalidDuration,

    #[msg("Invalid lock duration table")]
    InvalidLockTable,

    // Position Errors
    #[msg("No active stake at this position")]
    NoActiveStake,

    #[msg("Stake is still locked")]
    StakeStillLocked,

    #[msg("Position list is full")]
    TooManyPositions,

    // Authorization Errors
    #[msg("Unauthorized: caller lacks the required role")]
    Unauthorized,

    #[msg("Invalid authority")]
    InvalidAuthority,

    #[msg("Invalid beneficiary: must not be the default key")]
    InvalidBeneficiary,

    // Token Errors
    #[msg("Stake vault is not fee-exempt: received less than the staked amount")]
    StakeVaultNotFeeExempt,

    #[msg("Invalid stake mint")]
    InvalidMint,

    // Math Errors
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,
}
