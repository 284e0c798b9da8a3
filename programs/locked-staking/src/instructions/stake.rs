use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};

use crate::constants::{STAKE_ACCOUNT_SEED, STAKE_VAULT_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::state::{StakeAccount, StakingPool};

/// Lock tokens into a new position for `beneficiary`
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of tokens to lock
/// * `duration_index` - Index into the pool's lock duration table
/// * `expected_duration` - Duration the caller saw at that index
/// * `beneficiary` - Owner of the new position
///
/// # Flow
/// 1. Check the staker may stake for `beneficiary`, validate amount and
///    resolve the quoted duration
/// 2. Append the position and update pool totals
/// 3. Transfer tokens from source to stake vault
/// 4. Require the vault was credited the full amount
///
#[derive(Accounts)]
#[instruction(amount: u64, duration_index: u8, expected_duration: i64, beneficiary: Pubkey)]
pub struct Stake<'info> {
    /// Authority over `source`. The beneficiary itself, or the pool's stake
    /// delegate (the vesting config PDA in claim_and_lock)
    pub staker: Signer<'info>,

    /// Pays for the stake account on first use
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Staking pool
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// Beneficiary's position list (created if first time)
    #[account(
        init_if_needed,
        payer = payer,
        space = StakeAccount::SIZE,
        seeds = [STAKE_ACCOUNT_SEED, staking_pool.key().as_ref(), beneficiary.as_ref()],
        bump
    )]
    pub stake_account: Account<'info, StakeAccount>,

    #[account(
        constraint = mint.key() == staking_pool.mint @ StakingError::InvalidMint
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = staker,
        token::token_program = token_program
    )]
    pub source: InterfaceAccount<'info, TokenAccount>,

    /// Pool's stake vault
    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.stake_vault_bump
    )]
    pub stake_vault: InterfaceAccount<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler_stake(
    ctx: Context<Stake>,
    amount: u64,
    duration_index: u8,
    expected_duration: i64,
    beneficiary: Pubkey,
) -> Result<()> {
    require!(amount > 0, StakingError::InsufficientAmount);
    ctx.accounts
        .staking_pool
        .authorize_staker(&ctx.accounts.staker.key(), &beneficiary)?;

    let now = Clock::get()?.unix_timestamp;
    let lock_duration = ctx
        .accounts
        .staking_pool
        .resolve_duration(duration_index, expected_duration)?;

    let pool_key = ctx.accounts.staking_pool.key();
    let stake_account = &mut ctx.accounts.stake_account;

    if !stake_account.is_initialized() {
        stake_account.pool = pool_key;
        stake_account.owner = beneficiary;
        stake_account.bump = ctx.bumps.stake_account;
    }

    let first_position = stake_account.positions.is_empty();
    let position_index = stake_account.open_position(amount, lock_duration, now)?;
    let unlock_time = stake_account.positions[position_index].unlock_time;

    ctx.accounts
        .staking_pool
        .record_stake(amount, first_position)?;

    // Position is recorded; now pull the tokens
    let vault_before = ctx.accounts.stake_vault.amount;
    token_interface::transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.source.to_account_info(),
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.stake_vault.to_account_info(),
                authority: ctx.accounts.staker.to_account_info(),
            },
        ),
        amount,
        ctx.accounts.mint.decimals,
    )?;

    // A fee-bearing transfer into the vault would leave the position
    // backed by less than its amount
    ctx.accounts.stake_vault.reload()?;
    StakingPool::check_vault_credit(vault_before, ctx.accounts.stake_vault.amount, amount)?;

    emit!(Staked {
        beneficiary,
        staker: ctx.accounts.staker.key(),
        position_index: position_index as u32,
        amount,
        unlock_time,
    });

    msg!(
        "Staked {} for {} until {}. Account total: {}, Pool total: {}",
        amount,
        beneficiary,
        unlock_time,
        ctx.accounts.stake_account.total_locked,
        ctx.accounts.staking_pool.total_staked
    );

    Ok(())
}

#[event]
pub struct Staked {
    pub beneficiary: Pubkey,
    pub staker: Pubkey,
    pub position_index: u32,
    pub amount: u64,
    pub unlock_time: i64,
}
