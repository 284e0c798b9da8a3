// =============================================================================
// Vesting Config Account
// =============================================================================
// Program-wide settings for one vested mint: who administers it, when the
// program started, the per-category curves and the allocation root.
// =============================================================================

use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::merkle::{self, Hash};
use crate::state::{Category, ClaimRecord, VestingCurve, CATEGORY_COUNT};

/// What `set_allocation_root` does once a root exists
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RootPolicy {
    /// The first root is final
    #[default]
    SetOnce,
    /// The admin may publish a new root; claim records carry over
    Replaceable,
}

/// PDA: ["vesting_config", mint]
#[account]
#[derive(Default)]
pub struct VestingConfig {
    // =========================================================================
    // Authorities
    // =========================================================================

    pub admin: Pubkey,

    /// Proposed admin awaiting acceptance, Pubkey::default() if none
    pub pending_admin: Pubkey,

    // =========================================================================
    // Token Accounts
    // =========================================================================

    /// Vested mint; this config PDA is its mint authority
    pub mint: Pubkey,

    /// Transit account claim_and_lock mints into before staking
    pub lock_escrow: Pubkey,

    // =========================================================================
    // Allocation
    // =========================================================================

    /// Merkle root over every (claimant, category, total_allocation)
    pub allocation_root: [u8; 32],

    pub root_set: bool,

    pub root_policy: RootPolicy,

    // =========================================================================
    // Schedule
    // =========================================================================

    /// Unix timestamp all curves are measured from
    pub program_start: i64,

    /// Indexed by `Category as usize`
    pub curves: [VestingCurve; CATEGORY_COUNT],

    /// Sum of every successful claim
    pub total_claimed: u64,

    pub bump: u8,
    pub lock_escrow_bump: u8,
}

impl VestingConfig {
    pub const SIZE: usize = 8 + // discriminator
        32 + // admin
        32 + // pending_admin
        32 + // mint
        32 + // lock_escrow
        32 + // allocation_root
        1 +  // root_set
        1 +  // root_policy
        8 +  // program_start
        VestingCurve::SIZE * CATEGORY_COUNT + // curves
        8 +  // total_claimed
        1 +  // bump
        1 +  // lock_escrow_bump
        64;  // padding for future fields

    /// Check the configured curve table and fix its shape to one curve per category.
    pub fn validate_curves(curves: &[VestingCurve]) -> Result<[VestingCurve; CATEGORY_COUNT]> {
        require!(
            curves.len() == CATEGORY_COUNT,
            VestingError::WrongScheduleLength
        );
        for curve in curves {
            curve.validate()?;
        }
        let mut table = [VestingCurve::default(); CATEGORY_COUNT];
        table.copy_from_slice(curves);
        Ok(table)
    }

    pub fn validate_program_start(program_start: i64) -> Result<()> {
        require!(program_start > 0, VestingError::InvalidTimestamp);
        Ok(())
    }

    /// The config PDA must hold the mint authority before anything can be minted.
    pub fn check_minter(mint_authority: Option<Pubkey>, config: &Pubkey) -> Result<()> {
        require!(
            mint_authority == Some(*config),
            VestingError::MissingMinterRole
        );
        Ok(())
    }

    pub fn curve(&self, category: Category) -> &VestingCurve {
        &self.curves[category.index()]
    }

    pub fn set_allocation_root(&mut self, root: Hash) -> Result<()> {
        require!(root != [0u8; 32], VestingError::InvalidAllocationRoot);
        if self.root_set {
            require!(
                self.root_policy == RootPolicy::Replaceable,
                VestingError::AllocationRootAlreadySet
            );
        }
        self.allocation_root = root;
        self.root_set = true;
        Ok(())
    }

    /// Read-only projection of what `claimant` could claim right now.
    pub fn claimable(
        &self,
        category: Category,
        total_allocation: u64,
        already_claimed: u64,
        now: i64,
    ) -> Result<u64> {
        self.curve(category)
            .claimable_amount(total_allocation, already_claimed, self.program_start, now)
    }

    /// Verify eligibility, compute the claimable amount and commit it to
    /// `record`. Returns the amount the caller must now mint.
    ///
    /// All bookkeeping happens here, before any token CPI, so a re-entered
    /// claim sees the updated record.
    pub fn settle_claim(
        &mut self,
        record: &mut ClaimRecord,
        claimant: &Pubkey,
        proof: &[Hash],
        category: Category,
        total_allocation: u64,
        now: i64,
    ) -> Result<u64> {
        require!(self.root_set, VestingError::AllocationRootNotSet);

        let leaf = merkle::leaf_hash(claimant, category, total_allocation);
        require!(
            merkle::verify(proof, leaf, self.allocation_root),
            VestingError::InvalidProof
        );

        let claimable = self.claimable(
            category,
            total_allocation,
            record.cumulative_claimed,
            now,
        )?;
        require!(claimable > 0, VestingError::NoClaimableTokens);

        record.record_claim(claimable, now)?;
        self.total_claimed = self
            .total_claimed
            .checked_add(claimable)
            .ok_or(VestingError::MathOverflow)?;

        Ok(claimable)
    }

    /// Start a two-step admin hand-over. Proposing the default key clears
    /// any pending proposal.
    pub fn propose_admin(&mut self, new_admin: Pubkey) -> Result<()> {
        require!(new_admin != self.admin, VestingError::InvalidAuthority);
        self.pending_admin = new_admin;
        Ok(())
    }

    pub fn accept_admin(&mut self, caller: Pubkey) -> Result<Pubkey> {
        require!(
            self.pending_admin != Pubkey::default() && caller == self.pending_admin,
            VestingError::Unauthorized
        );
        let old_admin = self.admin;
        self.admin = self.pending_admin;
        self.pending_admin = Pubkey::default();
        Ok(old_admin)
    }
}
