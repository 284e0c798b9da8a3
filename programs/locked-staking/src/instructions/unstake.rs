use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};

use crate::constants::{STAKE_ACCOUNT_SEED, STAKE_VAULT_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::state::{StakeAccount, StakingPool};

/// Withdraw an unlocked position
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `position_index` - Index of the position in the owner's list
///
/// # Flow
/// 1. Check the position exists and its lock has expired
/// 2. Remove it (last position moves into its slot)
/// 3. Update pool totals
/// 4. Transfer the amount from stake vault back to owner
///
#[derive(Accounts)]
pub struct Unstake<'info> {
    /// Position owner
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Staking pool
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// Owner's position list
    #[account(
        mut,
        seeds = [STAKE_ACCOUNT_SEED, staking_pool.key().as_ref(), owner.key().as_ref()],
        bump = stake_account.bump,
        constraint = stake_account.owner == owner.key() @ StakingError::Unauthorized
    )]
    pub stake_account: Account<'info, StakeAccount>,

    #[account(
        constraint = mint.key() == staking_pool.mint @ StakingError::InvalidMint
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    /// Owner's token account
    #[account(
        mut,
        token::mint = mint,
        token::authority = owner,
        token::token_program = token_program
    )]
    pub owner_token_account: InterfaceAccount<'info, TokenAccount>,

    /// Pool's stake vault
    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.stake_vault_bump
    )]
    pub stake_vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler_unstake(ctx: Context<Unstake>, position_index: u32) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let stake_account = &mut ctx.accounts.stake_account;
    let position = stake_account.close_position(position_index as usize, now)?;
    let last_position = stake_account.positions.is_empty();

    let staking_pool = &mut ctx.accounts.staking_pool;
    staking_pool.record_unstake(position.amount, last_position)?;

    // Pool PDA signs as vault authority
    let mint_key = staking_pool.mint;
    let seeds = &[STAKING_POOL_SEED, mint_key.as_ref(), &[staking_pool.bump]];
    let signer_seeds = &[&seeds[..]];

    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.stake_vault.to_account_info(),
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.owner_token_account.to_account_info(),
                authority: staking_pool.to_account_info(),
            },
            signer_seeds,
        ),
        position.amount,
        ctx.accounts.mint.decimals,
    )?;

    emit!(Unstaked {
        owner: ctx.accounts.owner.key(),
        position_index,
        amount: position.amount,
        unlock_time: position.unlock_time,
    });

    msg!(
        "Unstaked {} from position {}. Remaining positions: {}, Pool total: {}",
        position.amount,
        position_index,
        ctx.accounts.stake_account.positions.len(),
        staking_pool.total_staked
    );

    Ok(())
}

#[event]
pub struct Unstaked {
    pub owner: Pubkey,
    pub position_index: u32,
    pub amount: u64,
    pub unlock_time: i64,
}
