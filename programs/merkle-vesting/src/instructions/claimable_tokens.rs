use anchor_lang::prelude::*;

use crate::constants::{CLAIM_RECORD_SEED, VESTING_CONFIG_SEED};
use crate::state::{Category, ClaimRecord, VestingConfig};

/// Read-only quote of what `claimant` could claim right now
///
/// Does not verify a proof and writes nothing; `total_allocation` is taken
/// on trust. Pass the claimant's claim record under this config if one
/// exists, otherwise nothing has been claimed yet.
#[derive(Accounts)]
#[instruction(claimant: Pubkey, category: Category)]
pub struct ClaimableTokens<'info> {
    #[account(
        seeds = [VESTING_CONFIG_SEED, vesting_config.mint.as_ref()],
        bump = vesting_config.bump
    )]
    pub vesting_config: Box<Account<'info, VestingConfig>>,

    #[account(
        seeds = [
            CLAIM_RECORD_SEED,
            vesting_config.key().as_ref(),
            claimant.as_ref(),
            &[category as u8]
        ],
        bump = claim_record.bump
    )]
    pub claim_record: Option<Account<'info, ClaimRecord>>,
}

pub fn handler_claimable_tokens(
    ctx: Context<ClaimableTokens>,
    claimant: Pubkey,
    category: Category,
    total_allocation: u64,
) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;

    let already_claimed = match &ctx.accounts.claim_record {
        Some(record) => record.claimed_for(&claimant, category)?,
        None => 0,
    };

    let claimable = ctx.accounts.vesting_config.claimable(
        category,
        total_allocation,
        already_claimed,
        now,
    )?;

    emit!(ClaimableQuote {
        claimant,
        category,
        total_allocation,
        already_claimed,
        claimable,
        timestamp: now,
    });

    Ok(claimable)
}

#[event]
pub struct ClaimableQuote {
    pub claimant: Pubkey,
    pub category: Category,
    pub total_allocation: u64,
    pub already_claimed: u64,
    pub claimable: u64,
    pub timestamp: i64,
}
