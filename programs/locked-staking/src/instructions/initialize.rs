use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{STAKE_VAULT_SEED, STAKING_POOL_SEED};
use crate::state::StakingPool;

/// Initialize a new staking pool
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `lock_durations` - Initial lock duration menu (seconds)
///
/// # Accounts
/// * `admin` - The admin who will control this pool (signer, payer)
/// * `staking_pool` - The staking pool PDA to create
/// * `mint` - The staked token mint
/// * `stake_vault` - The vault to hold staked tokens
///
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Admin who will control this staking pool
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Staking pool PDA
    #[account(
        init,
        payer = admin,
        space = StakingPool::SIZE,
        seeds = [STAKING_POOL_SEED, mint.key().as_ref()],
        bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    pub mint: InterfaceAccount<'info, Mint>,

    /// Vault to hold staked tokens
    #[account(
        init,
        payer = admin,
        seeds = [STAKE_VAULT_SEED, staking_pool.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = staking_pool,
        token::token_program = token_program
    )]
    pub stake_vault: InterfaceAccount<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler_initialize(ctx: Context<Initialize>, lock_durations: Vec<i64>) -> Result<()> {
    let staking_pool = &mut ctx.accounts.staking_pool;

    staking_pool.admin = ctx.accounts.admin.key();
    staking_pool.pending_admin = Pubkey::default();
    staking_pool.mint = ctx.accounts.mint.key();
    staking_pool.stake_vault = ctx.accounts.stake_vault.key();
    staking_pool.stake_delegate = Pubkey::default();
    staking_pool.set_lock_durations(lock_durations)?;

    staking_pool.total_staked = 0;
    staking_pool.staker_count = 0;

    staking_pool.bump = ctx.bumps.staking_pool;
    staking_pool.stake_vault_bump = ctx.bumps.stake_vault;

    emit!(StakingInitialized {
        pool: staking_pool.key(),
        admin: staking_pool.admin,
        mint: staking_pool.mint,
        lock_durations: staking_pool.lock_durations.clone(),
    });

    msg!(
        "Staking pool initialized: mint={}, lock durations={:?}",
        staking_pool.mint,
        staking_pool.lock_durations
    );

    Ok(())
}

#[event]
pub struct StakingInitialized {
    pub pool: Pubkey,
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub lock_durations: Vec<i64>,
}
