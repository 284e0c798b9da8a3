use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::state::Category;

/// Cumulative claim progress for one (claimant, category) pair.
///
/// PDA: ["claim_record", vesting_config, claimant, [category]]
///
/// Created on first claim, only ever grows, never closed. Keying by
/// category lets one wallet hold several allocations (e.g. a round and an
/// airdrop) without one claim eating into the other.
#[account]
#[derive(Default, Debug)]
pub struct ClaimRecord {
    pub claimant: Pubkey,

    /// Category tag (`Category as u8`)
    pub category: u8,

    /// Total released to this claimant for this category
    pub cumulative_claimed: u64,

    /// Unix timestamp of the most recent claim
    pub last_claim_at: i64,

    pub bump: u8,
}

impl ClaimRecord {
    pub const SIZE: usize = 8 + // discriminator
        32 + // claimant
        1 +  // category
        8 +  // cumulative_claimed
        8 +  // last_claim_at
        1 +  // bump
        16;  // padding for future fields

    pub fn is_initialized(&self) -> bool {
        self.claimant != Pubkey::default()
    }

    /// Attach a freshly created record to its owner. No-op once bound.
    pub fn bind(&mut self, claimant: Pubkey, category: Category, bump: u8) {
        if self.is_initialized() {
            return;
        }
        self.claimant = claimant;
        self.category = category as u8;
        self.bump = bump;
    }

    /// Amount already claimed, after checking the record is the one for
    /// (`claimant`, `category`).
    pub fn claimed_for(&self, claimant: &Pubkey, category: Category) -> Result<u64> {
        require_keys_eq!(self.claimant, *claimant, VestingError::ClaimRecordMismatch);
        require!(
            Category::from_index(self.category) == Some(category),
            VestingError::ClaimRecordMismatch
        );
        Ok(self.cumulative_claimed)
    }

    pub fn record_claim(&mut self, amount: u64, timestamp: i64) -> Result<()> {
        self.cumulative_claimed = self
            .cumulative_claimed
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        self.last_claim_at = timestamp;
        Ok(())
    }
}
