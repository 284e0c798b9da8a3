use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("66BFXLSLk7SBk366hm1eR4Kj9EBeQaAwx3JcpdBdeFA7");

#[program]
pub mod locked_staking {
    use super::*;

    /// Initialize a new staking pool
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `lock_durations` - Initial lock duration menu in seconds
    ///
    /// # Accounts
    /// * `admin` - Pool admin (signer, payer)
    /// * `staking_pool` - Staking pool PDA to create
    /// * `mint` - Staked token mint
    /// * `stake_vault` - Vault to hold staked tokens
    ///
    pub fn initialize(ctx: Context<Initialize>, lock_durations: Vec<i64>) -> Result<()> {
        instructions::initialize::handler_initialize(ctx, lock_durations)
    }

    /// Lock tokens into a new position
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of tokens to lock
    /// * `duration_index` - Index into the lock duration table
    /// * `expected_duration` - Duration the caller observed at that index
    /// * `beneficiary` - Owner of the new position
    ///
    pub fn stake(
        ctx: Context<Stake>,
        amount: u64,
        duration_index: u8,
        expected_duration: i64,
        beneficiary: Pubkey,
    ) -> Result<()> {
        instructions::stake::handler_stake(ctx, amount, duration_index, expected_duration, beneficiary)
    }

    /// Withdraw an unlocked position
    ///
    /// The last position takes over the freed index; re-read the position
    /// list before unstaking again.
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `position_index` - Index of the position to withdraw
    ///
    pub fn unstake(ctx: Context<Unstake>, position_index: u32) -> Result<()> {
        instructions::unstake::handler_unstake(ctx, position_index)
    }

    /// Replace the lock duration table (admin only)
    ///
    /// Existing positions keep their unlock time.
    ///
    pub fn update_lock_durations(
        ctx: Context<UpdateLockDurations>,
        new_table: Vec<i64>,
    ) -> Result<()> {
        instructions::admin::update_lock_durations(ctx, new_table)
    }

    /// Set the key allowed to stake for other beneficiaries (admin only)
    ///
    /// Point this at the vesting config PDA to enable claim_and_lock.
    /// Pubkey::default() restricts staking to beneficiaries themselves.
    pub fn set_stake_delegate(ctx: Context<SetStakeDelegate>, delegate: Pubkey) -> Result<()> {
        instructions::admin::set_stake_delegate(ctx, delegate)
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
