use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, MintTo, TokenAccount, TokenInterface};
use locked_staking::constants::STAKE_ACCOUNT_SEED;
use locked_staking::program::LockedStaking;
use locked_staking::state::StakingPool;

use crate::constants::{CLAIM_RECORD_SEED, LOCK_ESCROW_SEED, VESTING_CONFIG_SEED};
use crate::error::VestingError;
use crate::state::{Category, ClaimRecord, VestingConfig};

/// Claim everything vested so far and lock it straight into staking
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `proof` - Sibling hashes from the claimant's leaf up to the root
/// * `category` - Cohort the allocation belongs to
/// * `total_allocation` - Full allocation committed in the leaf
/// * `duration_index` - Index into the staking pool's lock duration table
/// * `expected_duration` - Duration the caller saw at that index
///
/// # Flow
/// 1. Settle the claim exactly as `claim` does
/// 2. Mint the amount into the lock escrow
/// 3. CPI into locked staking: the config PDA stakes the escrow balance
///    with the claimant as beneficiary
///
/// The staking pool's stake delegate must be this config PDA.
///
/// Returns the locked amount. A failure in staking (stale duration, full
/// position list, fee-bearing vault) aborts the claim as well.
#[derive(Accounts)]
#[instruction(proof: Vec<[u8; 32]>, category: Category)]
pub struct ClaimAndLock<'info> {
    /// Allocation owner and beneficiary of the new position
    #[account(mut)]
    pub claimant: Signer<'info>,

    #[account(
        mut,
        seeds = [VESTING_CONFIG_SEED, vesting_config.mint.as_ref()],
        bump = vesting_config.bump
    )]
    pub vesting_config: Box<Account<'info, VestingConfig>>,

    #[account(
        init_if_needed,
        payer = claimant,
        space = ClaimRecord::SIZE,
        seeds = [
            CLAIM_RECORD_SEED,
            vesting_config.key().as_ref(),
            claimant.key().as_ref(),
            &[category as u8]
        ],
        bump
    )]
    pub claim_record: Box<Account<'info, ClaimRecord>>,

    #[account(
        mut,
        constraint = mint.key() == vesting_config.mint @ VestingError::InvalidMint
    )]
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [LOCK_ESCROW_SEED, vesting_config.key().as_ref()],
        bump = vesting_config.lock_escrow_bump
    )]
    pub lock_escrow: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Written by the staking program during the CPI
    #[account(
        mut,
        constraint = staking_pool.mint == vesting_config.mint @ VestingError::InvalidStakingPool,
        constraint = staking_pool.stake_delegate == vesting_config.key() @ VestingError::InvalidStakingPool
    )]
    pub staking_pool: Box<Account<'info, StakingPool>>,

    /// CHECK: claimant's position list, created and validated by the staking program
    #[account(
        mut,
        seeds = [STAKE_ACCOUNT_SEED, staking_pool.key().as_ref(), claimant.key().as_ref()],
        bump,
        seeds::program = staking_program.key()
    )]
    pub stake_account: UncheckedAccount<'info>,

    #[account(
        mut,
        address = staking_pool.stake_vault @ VestingError::InvalidStakingPool
    )]
    pub stake_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub staking_program: Program<'info, LockedStaking>,
    pub system_program: Program<'info, System>,
    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler_claim_and_lock(
    ctx: Context<ClaimAndLock>,
    proof: Vec<[u8; 32]>,
    category: Category,
    total_allocation: u64,
    duration_index: u8,
    expected_duration: i64,
) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let claimant = ctx.accounts.claimant.key();

    let claim_record = &mut ctx.accounts.claim_record;
    claim_record.bind(claimant, category, ctx.bumps.claim_record);

    let vesting_config = &mut ctx.accounts.vesting_config;
    let amount = vesting_config.settle_claim(
        claim_record,
        &claimant,
        &proof,
        category,
        total_allocation,
        now,
    )?;

    let mint_key = vesting_config.mint;
    let seeds = &[VESTING_CONFIG_SEED, mint_key.as_ref(), &[vesting_config.bump]];
    let signer = &[&seeds[..]];

    // Mint into the escrow, which the config PDA controls
    token_interface::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.lock_escrow.to_account_info(),
                authority: ctx.accounts.vesting_config.to_account_info(),
            },
            signer,
        ),
        amount,
    )?;

    // Config PDA stakes the escrow balance on the claimant's behalf
    locked_staking::cpi::stake(
        CpiContext::new_with_signer(
            ctx.accounts.staking_program.to_account_info(),
            locked_staking::cpi::accounts::Stake {
                staker: ctx.accounts.vesting_config.to_account_info(),
                payer: ctx.accounts.claimant.to_account_info(),
                staking_pool: ctx.accounts.staking_pool.to_account_info(),
                stake_account: ctx.accounts.stake_account.to_account_info(),
                mint: ctx.accounts.mint.to_account_info(),
                source: ctx.accounts.lock_escrow.to_account_info(),
                stake_vault: ctx.accounts.stake_vault.to_account_info(),
                system_program: ctx.accounts.system_program.to_account_info(),
                token_program: ctx.accounts.token_program.to_account_info(),
            },
            signer,
        ),
        amount,
        duration_index,
        expected_duration,
        claimant,
    )?;

    emit!(TokensLocked {
        beneficiary: claimant,
        category,
        amount,
        staking_pool: ctx.accounts.staking_pool.key(),
        lock_duration: expected_duration,
        cumulative_claimed: ctx.accounts.claim_record.cumulative_claimed,
    });

    msg!(
        "Released and locked {} for {} ({:?}) for {}s. Claimed so far: {} of {}",
        amount,
        claimant,
        category,
        expected_duration,
        ctx.accounts.claim_record.cumulative_claimed,
        total_allocation
    );

    Ok(amount)
}

#[event]
pub struct TokensLocked {
    pub beneficiary: Pubkey,
    pub category: Category,
    pub amount: u64,
    pub staking_pool: Pubkey,
    pub lock_duration: i64,
    pub cumulative_claimed: u64,
}
