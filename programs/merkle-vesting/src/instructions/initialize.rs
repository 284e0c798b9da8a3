use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{LOCK_ESCROW_SEED, VESTING_CONFIG_SEED};
use crate::state::{RootPolicy, VestingConfig, VestingCurve};

/// Initialize vesting for a mint
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `program_start` - Unix timestamp every curve is measured from
/// * `curves` - One curve per category, in category order
/// * `root_policy` - Whether the allocation root may be replaced later
///
/// # Accounts
/// * `admin` - The admin who will control this config (signer, payer)
/// * `vesting_config` - The config PDA to create
/// * `mint` - The vested mint; its mint authority must already be the config PDA
/// * `lock_escrow` - Transit token account used by claim_and_lock
///
#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = VestingConfig::SIZE,
        seeds = [VESTING_CONFIG_SEED, mint.key().as_ref()],
        bump
    )]
    pub vesting_config: Box<Account<'info, VestingConfig>>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = admin,
        seeds = [LOCK_ESCROW_SEED, vesting_config.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = vesting_config,
        token::token_program = token_program
    )]
    pub lock_escrow: InterfaceAccount<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler_initialize(
    ctx: Context<Initialize>,
    program_start: i64,
    curves: Vec<VestingCurve>,
    root_policy: RootPolicy,
) -> Result<()> {
    VestingConfig::validate_program_start(program_start)?;
    let curves = VestingConfig::validate_curves(&curves)?;

    let config_key = ctx.accounts.vesting_config.key();
    VestingConfig::check_minter(ctx.accounts.mint.mint_authority.into(), &config_key)?;

    let vesting_config = &mut ctx.accounts.vesting_config;

    vesting_config.admin = ctx.accounts.admin.key();
    vesting_config.pending_admin = Pubkey::default();
    vesting_config.mint = ctx.accounts.mint.key();
    vesting_config.lock_escrow = ctx.accounts.lock_escrow.key();

    vesting_config.allocation_root = [0u8; 32];
    vesting_config.root_set = false;
    vesting_config.root_policy = root_policy;

    vesting_config.program_start = program_start;
    vesting_config.curves = curves;
    vesting_config.total_claimed = 0;

    vesting_config.bump = ctx.bumps.vesting_config;
    vesting_config.lock_escrow_bump = ctx.bumps.lock_escrow;

    emit!(VestingInitialized {
        config: config_key,
        admin: vesting_config.admin,
        mint: vesting_config.mint,
        program_start,
        root_policy,
    });

    msg!(
        "Vesting initialized: mint={}, start={}, root policy={:?}",
        vesting_config.mint,
        program_start,
        root_policy
    );

    Ok(())
}

#[event]
pub struct VestingInitialized {
    pub config: Pubkey,
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub program_start: i64,
    pub root_policy: RootPolicy,
}
