use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, MintTo, TokenAccount, TokenInterface};

use crate::constants::{CLAIM_RECORD_SEED, VESTING_CONFIG_SEED};
use crate::error::VestingError;
use crate::state::{Category, ClaimRecord, VestingConfig};

/// Claim everything vested so far for one allocation
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `proof` - Sibling hashes from the claimant's leaf up to the root
/// * `category` - Cohort the allocation belongs to
/// * `total_allocation` - Full allocation committed in the leaf
///
/// # Flow
/// 1. Verify (claimant, category, total_allocation) against the allocation root
/// 2. Compute claimable from the curve and the claim record
/// 3. Record the claim
/// 4. Mint the amount to `recipient`
///
/// Returns the minted amount.
#[derive(Accounts)]
#[instruction(proof: Vec<[u8; 32]>, category: Category)]
pub struct Claim<'info> {
    /// Allocation owner; pays for the claim record on first claim
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
    pub claim_record: Account<'info, ClaimRecord>,

    #[account(
        mut,
        constraint = mint.key() == vesting_config.mint @ VestingError::InvalidMint
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    /// Any token account of the vested mint
    #[account(
        mut,
        token::mint = mint,
        token::token_program = token_program
    )]
    pub recipient: InterfaceAccount<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler_claim(
    ctx: Context<Claim>,
    proof: Vec<[u8; 32]>,
    category: Category,
    total_allocation: u64,
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

    // Claim is recorded; now mint
    let mint_key = vesting_config.mint;
    let seeds = &[VESTING_CONFIG_SEED, mint_key.as_ref(), &[vesting_config.bump]];
    let signer = &[&seeds[..]];

    token_interface::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.recipient.to_account_info(),
                authority: ctx.accounts.vesting_config.to_account_info(),
            },
            signer,
        ),
        amount,
    )?;

    emit!(TokensReleased {
        beneficiary: claimant,
        recipient: ctx.accounts.recipient.key(),
        category,
        amount,
        cumulative_claimed: ctx.accounts.claim_record.cumulative_claimed,
    });

    msg!(
        "Released {} to {} ({:?}). Claimed so far: {} of {}",
        amount,
        claimant,
        category,
        ctx.accounts.claim_record.cumulative_claimed,
        total_allocation
    );

    Ok(amount)
}

#[event]
pub struct TokensReleased {
    pub beneficiary: Pubkey,
    pub recipient: Pubkey,
    pub category: Category,
    pub amount: u64,
    pub cumulative_claimed: u64,
}
