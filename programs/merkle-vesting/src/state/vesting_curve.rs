// =============================================================================
// Vesting Curves
// =============================================================================
// One curve per beneficiary cohort. A curve releases `start_rate_pct` of the
// allocation as soon as the program starts, holds there until the cliff,
// then releases the remainder linearly until `total_duration`.
//
//   vested(t) = start                                   t <= cliff
//   vested(t) = start + (total - start) * r(t)          t >  cliff
//   r(t)      = min(t - cliff, span) / span             span = total_duration - cliff
//
// with `t` measured from `program_start`. The result is clamped to the
// allocation on every path.
// =============================================================================

use anchor_lang::prelude::*;

use crate::constants::{PERCENT_DENOMINATOR, PRECISION};
use crate::error::VestingError;

/// Number of beneficiary cohorts; the curve table must have exactly this many entries
pub const CATEGORY_COUNT: usize = 7;

/// Beneficiary cohort. Declaration order is the stable on-chain tag
/// (Seed = 0 ... Airdrop = 6) used in leaves and PDA seeds, so variants
/// must only ever be appended.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Seed,
    Strategic,
    Public,
    Team,
    Advisors,
    Ecosystem,
    Airdrop,
}

impl Category {
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Seed,
        Category::Strategic,
        Category::Public,
        Category::Team,
        Category::Advisors,
        Category::Ecosystem,
        Category::Airdrop,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// Unlock curve for one category. Durations are seconds after program start
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VestingCurve {
    /// Percent of the allocation unlocked at program start, 0..=100
    pub start_rate_pct: u8,
    pub cliff_duration: i64,
    pub total_duration: i64,
}

impl VestingCurve {
    pub const SIZE: usize = 1 + 8 + 8;

    pub fn validate(&self) -> Result<()> {
        require!(
            u64::from(self.start_rate_pct) <= PERCENT_DENOMINATOR,
            VestingError::InvalidCurve
        );
        require!(self.cliff_duration >= 0, VestingError::InvalidCurve);
        require!(
            self.total_duration >= self.cliff_duration,
            VestingError::InvalidCurve
        );
        Ok(())
    }

    /// Amount of `total_allocation` unlocked `elapsed` seconds after program start.
    pub fn vested_amount(&self, total_allocation: u64, elapsed: i64) -> Result<u64> {
        if elapsed <= 0 {
            return Ok(0);
        }

        let total = total_allocation as u128;
        let mut vested = total
            .checked_mul(self.start_rate_pct as u128)
            .ok_or(VestingError::MathOverflow)?
            / PERCENT_DENOMINATOR as u128;

        if elapsed > self.cliff_duration {
            let span = self
                .total_duration
                .checked_sub(self.cliff_duration)
                .ok_or(VestingError::MathOverflow)?;

            if span == 0 {
                vested = total;
            } else {
                // Past the end the ratio would exceed 100%; clamp it here as
                // well as on the final result
                let since_cliff = (elapsed - self.cliff_duration).min(span);
                let ratio = (since_cliff as u128)
                    .checked_mul(PRECISION)
                    .ok_or(VestingError::MathOverflow)?
                    / span as u128;

                let linear = total
                    .saturating_sub(vested)
                    .checked_mul(ratio)
                    .ok_or(VestingError::MathOverflow)?
                    / PRECISION;

                vested = vested
                    .checked_add(linear)
                    .ok_or(VestingError::MathOverflow)?;
            }
        }

        let vested = vested.min(total);
        u64::try_from(vested).map_err(|_| error!(VestingError::MathOverflow))
    }

    /// Vested-to-date minus what was already claimed, floored at zero.
    pub fn claimable_amount(
        &self,
        total_allocation: u64,
        already_claimed: u64,
        program_start: i64,
        now: i64,
    ) -> Result<u64> {
        if now <= program_start {
            return Ok(0);
        }
        let elapsed = now
            .checked_sub(program_start)
            .ok_or(VestingError::MathOverflow)?;
        let vested = self.vested_amount(total_allocation, elapsed)?;
        Ok(vested.saturating_sub(already_claimed))
    }
}
