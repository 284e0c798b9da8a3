// =============================================================================
// Merkle Vesting Error Codes
// =============================================================================

use anchor_lang::prelude::*;

/// All errors the vesting program can return.
///
/// Each failure class gets its own variant so clients can branch on it:
/// a countdown for `NoClaimableTokens`, "reload allocation" for
/// `InvalidProof`, and so on.
#[error_code]
pub enum VestingError {
    // =========================================================================
    // Claim Errors
    // =========================================================================

    /// The (claimant, category, allocation) leaf is not under the published root.
    /// Not retryable without a corrected proof
    #[msg("Invalid Merkle proof")]
    InvalidProof,

    /// Nothing has vested beyond what was already claimed. Retry later
    #[msg("No claimable tokens")]
    NoClaimableTokens,

    #[msg("Allocation root has not been set")]
    AllocationRootNotSet,

    // =========================================================================
    // Configuration Errors
    // =========================================================================

    /// Curve count does not match the category count; redeploy required
    #[msg("Vesting schedule length does not match category count")]
    WrongScheduleLength,

    #[msg("Invalid vesting curve")]
    InvalidCurve,

    #[msg("Invalid timestamp")]
    InvalidTimestamp,

    #[msg("Allocation root is already set")]
    AllocationRootAlreadySet,

    #[msg("Invalid allocation root")]
    InvalidAllocationRoot,

    // =========================================================================
    // Authorization Errors
    // =========================================================================

    #[msg("Unauthorized: caller lacks the required role")]
    Unauthorized,

    #[msg("Invalid authority")]
    InvalidAuthority,

    /// The config PDA must hold the mint authority before anything can be minted
    #[msg("Vesting config is not the mint authority")]
    MissingMinterRole,

    // =========================================================================
    // Account Validation Errors
    // =========================================================================

    #[msg("Invalid token mint")]
    InvalidMint,

    #[msg("Staking pool does not stake this mint")]
    InvalidStakingPool,

    #[msg("Claim record does not belong to this claimant and category")]
    ClaimRecordMismatch,

    // =========================================================================
    // Math Errors
    // =========================================================================

    #[msg("Math overflow")]
    MathOverflow,
}
