use anchor_lang::prelude::*;

use crate::constants::{MAX_LOCK_DURATIONS, MAX_LOCK_DURATION_SECONDS};
use crate::error::StakingError;

/// Global staking pool state
/// PDA: ["staking_pool", mint]
#[account]
#[derive(Default)]
pub struct StakingPool {
    /// Admin who can reconfigure the lock duration menu
    pub admin: Pubkey,

    /// Proposed admin; only this key may accept the hand-over.
    /// Pubkey::default() when nothing is pending
    pub pending_admin: Pubkey,

    /// Staked token mint
    pub mint: Pubkey,

    /// Vault holding staked tokens
    /// PDA: ["stake_vault", staking_pool]
    pub stake_vault: Pubkey,

    /// Key allowed to stake on behalf of other beneficiaries (the vesting
    /// config PDA). Pubkey::default() when only self-staking is allowed
    pub stake_delegate: Pubkey,

    /// Lock durations in seconds, addressed by index
    pub lock_durations: Vec<i64>,

    /// Total tokens currently locked across all positions
    pub total_staked: u64,

    /// Number of stake accounts holding at least one position
    pub staker_count: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Stake vault bump seed
    pub stake_vault_bump: u8,
}

impl StakingPool {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // admin
        32 + // pending_admin
        32 + // mint
        32 + // stake_vault
        32 + // stake_delegate
        4 + 8 * MAX_LOCK_DURATIONS + // lock_durations
        8 +  // total_staked
        8 +  // staker_count
        1 +  // bump
        1 +  // stake_vault_bump
        32;  // padding for future fields

    pub fn validate_lock_durations(table: &[i64]) -> Result<()> {
        require!(
            !table.is_empty() && table.len() <= MAX_LOCK_DURATIONS,
            StakingError::InvalidLockTable
        );
        require!(
            table
                .iter()
                .all(|d| *d > 0 && *d <= MAX_LOCK_DURATION_SECONDS),
            StakingError::InvalidLockTable
        );
        Ok(())
    }

    /// Replace the whole menu. Existing positions keep the unlock_time
    /// they were created with.
    pub fn set_lock_durations(&mut self, table: Vec<i64>) -> Result<()> {
        Self::validate_lock_durations(&table)?;
        self.lock_durations = table;
        Ok(())
    }

    /// Resolve the duration at `index`, refusing if the caller quoted a
    /// different value than the one currently stored there.
    pub fn resolve_duration(&self, index: u8, expected_duration: i64) -> Result<i64> {
        let duration = *self
            .lock_durations
            .get(index as usize)
            .ok_or(StakingError::InvalidDuration)?;
        require!(
            duration == expected_duration,
            StakingError::InvalidDuration
        );
        Ok(duration)
    }

    /// Only the beneficiary itself or the pool's stake delegate may open a
    /// position in a beneficiary's list.
    pub fn authorize_staker(&self, staker: &Pubkey, beneficiary: &Pubkey) -> Result<()> {
        require!(
            *beneficiary != Pubkey::default(),
            StakingError::InvalidBeneficiary
        );
        let is_delegate =
            self.stake_delegate != Pubkey::default() && *staker == self.stake_delegate;
        require!(
            staker == beneficiary || is_delegate,
            StakingError::Unauthorized
        );
        Ok(())
    }

    pub fn set_stake_delegate(&mut self, delegate: Pubkey) {
        self.stake_delegate = delegate;
    }

    /// The vault must be credited the full staked amount.
    pub fn check_vault_credit(vault_before: u64, vault_after: u64, amount: u64) -> Result<()> {
        let received = vault_after
            .checked_sub(vault_before)
            .ok_or(StakingError::MathUnderflow)?;
        require!(received == amount, StakingError::StakeVaultNotFeeExempt);
        Ok(())
    }

    /// Start a two-step admin hand-over. Proposing the default key clears
    /// any pending proposal.
    pub fn propose_admin(&mut self, new_admin: Pubkey) -> Result<()> {
        require!(new_admin != self.admin, StakingError::InvalidAuthority);
        self.pending_admin = new_admin;
        Ok(())
    }

    pub fn accept_admin(&mut self, caller: Pubkey) -> Result<Pubkey> {
        require!(
            self.pending_admin != Pubkey::default() && caller == self.pending_admin,
            StakingError::Unauthorized
        );
        let old_admin = self.admin;
        self.admin = self.pending_admin;
        self.pending_admin = Pubkey::default();
        Ok(old_admin)
    }

    pub fn record_stake(&mut self, amount: u64, first_position: bool) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;

        if first_position {
            self.staker_count = self
                .staker_count
                .checked_add(1)
                .ok_or(StakingError::MathOverflow)?;
        }
        Ok(())
    }

    pub fn record_unstake(&mut self, amount: u64, last_position: bool) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(StakingError::MathUnderflow)?;

        if last_position {
            self.staker_count = self
                .staker_count
                .checked_sub(1)
                .ok_or(StakingError::MathUnderflow)?;
        }
        Ok(())
    }
}
