use anchor_lang::prelude::*;

use crate::constants::VESTING_CONFIG_SEED;
use crate::error::VestingError;
use crate::state::VestingConfig;

// =============================================================================
// Allocation Root
// =============================================================================

#[derive(Accounts)]
pub struct SetAllocationRoot<'info> {
    #[account(
        constraint = admin.key() == vesting_config.admin @ VestingError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [VESTING_CONFIG_SEED, vesting_config.mint.as_ref()],
        bump = vesting_config.bump
    )]
    pub vesting_config: Box<Account<'info, VestingConfig>>,
}

pub fn set_allocation_root(ctx: Context<SetAllocationRoot>, root: [u8; 32]) -> Result<()> {
    let vesting_config = &mut ctx.accounts.vesting_config;
    let replaced = vesting_config.root_set;

    vesting_config.set_allocation_root(root)?;

    emit!(AllocationRootSet {
        config: vesting_config.key(),
        root,
        replaced,
    });

    msg!(
        "Allocation root set (replaced previous: {})",
        replaced
    );

    Ok(())
}

// =============================================================================
// Two-step Admin Transfer
// =============================================================================

#[derive(Accounts)]
pub struct ProposeAdmin<'info> {
    #[account(
        constraint = admin.key() == vesting_config.admin @ VestingError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [VESTING_CONFIG_SEED, vesting_config.mint.as_ref()],
        bump = vesting_config.bump
    )]
    pub vesting_config: Box<Account<'info, VestingConfig>>,
}

pub fn propose_admin(ctx: Context<ProposeAdmin>, new_admin: Pubkey) -> Result<()> {
    let vesting_config = &mut ctx.accounts.vesting_config;
    vesting_config.propose_admin(new_admin)?;

    emit!(AdminProposed {
        admin: vesting_config.admin,
        pending_admin: new_admin,
    });

    msg!(
        "Admin transfer proposed from {} to {}",
        vesting_config.admin,
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
        seeds = [VESTING_CONFIG_SEED, vesting_config.mint.as_ref()],
        bump = vesting_config.bump
    )]
    pub vesting_config: Box<Account<'info, VestingConfig>>,
}

pub fn accept_admin(ctx: Context<AcceptAdmin>) -> Result<()> {
    let vesting_config = &mut ctx.accounts.vesting_config;
    let old_admin = vesting_config.accept_admin(ctx.accounts.new_admin.key())?;

    emit!(AdminAccepted {
        old_admin,
        new_admin: vesting_config.admin,
    });

    msg!(
        "Admin transferred from {} to {}",
        old_admin,
        vesting_config.admin
    );

    Ok(())
}

#[event]
pub struct AllocationRootSet {
    pub config: Pubkey,
    pub root: [u8; 32],
    pub replaced: bool,
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
