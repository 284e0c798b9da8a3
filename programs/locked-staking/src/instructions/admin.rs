use anchor_lang::prelude::*;

use crate::constants::STAKING_POOL_SEED;
use crate::error::StakingError;
use crate::state::StakingPool;

// =============================================================================
// Update Lock Durations
// =============================================================================

#[derive(Accounts)]
pub struct UpdateLockDurations<'info> {
    #[account(
        constraint = admin.key() == staking_pool.admin @ StakingError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,
}

pub fn update_lock_durations(ctx: Context<UpdateLockDurations>, new_table: Vec<i64>) -> Result<()> {
    let staking_pool = &mut ctx.accounts.staking_pool;
    let old_table = staking_pool.lock_durations.clone();

    staking_pool.set_lock_durations(new_table)?;

    emit!(LockDurationsUpdated {
        pool: staking_pool.key(),
        old_durations: old_table,
        new_durations: staking_pool.lock_durations.clone(),
    });

    msg!(
        "Lock durations updated to {:?}",
        staking_pool.lock_durations
    );

    Ok(())
}

// =============================================================================
// Stake Delegate
// =============================================================================

#[derive(Accounts)]
pub struct SetStakeDelegate<'info> {
    #[account(
        constraint = admin.key() == staking_pool.admin @ StakingError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,
}

pub fn set_stake_delegate(ctx: Context<SetStakeDelegate>, delegate: Pubkey) -> Result<()> {
    let staking_pool = &mut ctx.accounts.staking_pool;
    let old_delegate = staking_pool.stake_delegate;

    staking_pool.set_stake_delegate(delegate);

    emit!(StakeDelegateUpdated {
        pool: staking_pool.key(),
        old_delegate,
        new_delegate: delegate,
    });

    msg!("Stake delegate changed from {} to {}", old_delegate, delegate);

    Ok(())
}

// =============================================================================
// Two-step Admin Transfer
// =============================================================================

#[derive(Accounts)]
pub struct ProposeAdmin<'info> {
    #[account(
        constraint = admin.key() == staking_pool.admin @ StakingError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,
}

pub fn propose_admin(ctx: Context<ProposeAdmin>, new_admin: Pubkey) -> Result<()> {
    let staking_pool = &mut ctx.accounts.staking_pool;
    staking_pool.propose_admin(new_admin)?;

    emit!(AdminProposed {
        admin: staking_pool.admin,
        pending_admin: new_admin,
    });

    msg!(
        "Admin transfer proposed from {} to {}",
        staking_pool.admin,
        new_admin
    );

    Ok(())
}

#[derive(Accounts)]
pub struct AcceptAdmin<'info> {
    /// Must be the pending admin
    pub new_admin: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,
}

pub fn accept_admin(ctx: Context<AcceptAdmin>) -> Result<()> {
    let staking_pool = &mut ctx.accounts.staking_pool;
    let old_admin = staking_pool.accept_admin(ctx.accounts.new_admin.key())?;

    emit!(AdminAccepted {
        old_admin,
        new_admin: staking_pool.admin,
    });

    msg!(
        "Admin transferred from {} to {}",
        old_admin,
        staking_pool.admin
    );

    Ok(())
}

#[event]
pub struct LockDurationsUpdated {
    pub pool: Pubkey,
    pub old_durations: Vec<i64>,
    pub new_durations: Vec<i64>,
}

#[event]
pub struct StakeDelegateUpdated {
    pub pool: Pubkey,
    pub old_delegate: Pubkey,
    pub new_delegate: Pubkey,
}

#[event]
pub struct AdminProposed {
    pub admin: Pubkey,
    pub pending_admin: Pubkey,
}

#[event]
pub struct AdminAccepted {
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
}
