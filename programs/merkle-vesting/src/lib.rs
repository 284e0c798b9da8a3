use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod merkle;
pub mod state;

use instructions::*;
use state::{Category, RootPolicy, VestingCurve};

declare_id!("GU1Bx2gWrCs2MQzEPDapVYHU7X3MDekWdZp9SyVJHiS5");

#[program]
pub mod merkle_vesting {
    use super::*;

    /// Initialize vesting for a mint
    ///
    /// The config PDA must already be the mint authority.
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `program_start` - Unix timestamp all curves are measured from
    /// * `curves` - One vesting curve per category, in category order
    /// * `root_policy` - Whether the allocation root may be replaced later
    ///
    pub fn initialize(
        ctx: Context<Initialize>,
        program_start: i64,
        curves: Vec<VestingCurve>,
        root_policy: RootPolicy,
    ) -> Result<()> {
        instructions::initialize::handler_initialize(ctx, program_start, curves, root_policy)
    }

    /// Publish the allocation root (admin only)
    pub fn set_allocation_root(ctx: Context<SetAllocationRoot>, root: [u8; 32]) -> Result<()> {
        instructions::admin::set_allocation_root(ctx, root)
    }

    /// Claim vested tokens to any token account of the mint
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `proof` - Merkle proof for (claimant, category, total_allocation)
    /// * `category` - Allocation category
    /// * `total_allocation` - Full allocation committed in the leaf
    ///
    pub fn claim(
        ctx: Context<Claim>,
        proof: Vec<[u8; 32]>,
        category: Category,
        total_allocation: u64,
    ) -> Result<u64> {
        instructions::claim::handler_claim(ctx, proof, category, total_allocation)
    }

    /// Claim vested tokens and lock them in the staking program
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `proof` - Merkle proof for (claimant, category, total_allocation)
    /// * `category` - Allocation category
    /// * `total_allocation` - Full allocation committed in the leaf
    /// * `duration_index` - Index into the staking pool's lock duration table
    /// * `expected_duration` - Duration the caller observed at that index
    ///
    pub fn claim_and_lock(
        ctx: Context<ClaimAndLock>,
        proof: Vec<[u8; 32]>,
        category: Category,
        total_allocation: u64,
        duration_index: u8,
        expected_duration: i64,
    ) -> Result<u64> {
        instructions::claim_and_lock::handler_claim_and_lock(
            ctx,
            proof,
            category,
            total_allocation,
            duration_index,
            expected_duration,
        )
    }

    /// Quote the currently claimable amount without claiming
    pub fn claimable_tokens(
        ctx: Context<ClaimableTokens>,
        claimant: Pubkey,
        category: Category,
        total_allocation: u64,
    ) -> Result<u64> {
        instructions::claimable_tokens::handler_claimable_tokens(
            ctx,
            claimant,
            category,
            total_allocation,
        )
    }

    /// Propose a new admin (admin only)
    pub fn propose_admin(ctx: Context<ProposeAdmin>, new_admin: Pubkey) -> Result<()> {
        instructions::admin::propose_admin(ctx, new_admin)
    }

    /// Accept a pending admin proposal (pending admin only)
    pub fn accept_admin(ctx: Context<AcceptAdmin>) -> Result<()> {
        instructions::admin::accept_admin(ctx)
    }
}

#[cfg(test)]
pub(crate) fn error_code(err: anchor_lang::error::Error) -> u32 {
    match err {
        anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
        anchor_lang::error::Error::ProgramError(e) => panic!("unexpected program error: {e:?}"),
    }
}
