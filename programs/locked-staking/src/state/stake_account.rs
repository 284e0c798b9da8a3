use anchor_lang::prelude::*;

use crate::constants::MAX_POSITIONS;
use crate::error::StakingError;

/// A single time-locked position
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StakePosition {
    pub amount: u64,
    /// Fixed at stake time; later lock table changes never move it
    pub unlock_time: i64,
}

impl StakePosition {
    pub const SIZE: usize = 8 + 8;

    pub fn is_unlocked(&self, now: i64) -> bool {
        now >= self.unlock_time
    }
}

/// Per-beneficiary list of locked positions
/// PDA: ["stake_account", staking_pool, owner]
///
/// Positions are addressed by index. Removal swaps the last position into
/// the freed slot, so an index read before an unstake in the same account
/// must be re-read afterwards.
#[account]
#[derive(Default)]
pub struct StakeAccount {
    /// The staking pool this account belongs to
    pub pool: Pubkey,

    /// Beneficiary; the only key allowed to unstake
    pub owner: Pubkey,

    pub positions: Vec<StakePosition>,

    /// Sum of all position amounts
    pub total_locked: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl StakeAccount {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // pool
        32 + // owner
        4 + StakePosition::SIZE * MAX_POSITIONS + // positions
        8 +  // total_locked
        1 +  // bump
        32;  // padding for future fields

    pub fn is_initialized(&self) -> bool {
        self.pool != Pubkey::default()
    }

    /// Append a position locked for `lock_duration` seconds from `now`.
    /// Returns the index it was stored at.
    pub fn open_position(&mut self, amount: u64, lock_duration: i64, now: i64) -> Result<usize> {
        require!(amount > 0, StakingError::InsufficientAmount);
        require!(
            self.positions.len() < MAX_POSITIONS,
            StakingError::TooManyPositions
        );

        let unlock_time = now
            .checked_add(lock_duration)
            .ok_or(StakingError::MathOverflow)?;

        self.total_locked = self
            .total_locked
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;

        self.positions.push(StakePosition {
            amount,
            unlock_time,
        });

        Ok(self.positions.len() - 1)
    }

    /// Remove an unlocked position by swap-with-last, returning it.
    pub fn close_position(&mut self, index: usize, now: i64) -> Result<StakePosition> {
        let position = *self
            .positions
            .get(index)
            .ok_or(StakingError::NoActiveStake)?;
        require!(position.amount > 0, StakingError::NoActiveStake);
        require!(position.is_unlocked(now), StakingError::StakeStillLocked);

        self.total_locked = self
            .total_locked
            .checked_sub(position.amount)
            .ok_or(StakingError::MathUnderflow)?;

        self.positions.swap_remove(index);

        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SECONDS_PER_DAY;
    use crate::error_code;

    const DAY: i64 = SECONDS_PER_DAY;
    const BLOCK_N: i64 = 1_700_000_000;

    #[test]
    fn stake_then_unstake_after_unlock_returns_exact_amount() {
        let mut acct = StakeAccount::default();
        let idx = acct.open_position(100, 30 * DAY, BLOCK_N).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(acct.positions[0].unlock_time, BLOCK_N + 30 * DAY);

        let err = acct.close_position(0, BLOCK_N + 10 * DAY).unwrap_err();
        assert_eq!(error_code(err), u32::from(StakingError::StakeStillLocked));
        assert_eq!(acct.positions.len(), 1);

        let released = acct.close_position(0, BLOCK_N + 30 * DAY).unwrap();
        assert_eq!(released.amount, 100);
        assert!(acct.positions.is_empty());
        assert_eq!(acct.total_locked, 0);
    }

    #[test]
    fn one_second_before_unlock_is_still_locked() {
        let mut acct = StakeAccount::default();
        acct.open_position(5, 90 * DAY, BLOCK_N).unwrap();
        assert!(acct.close_position(0, BLOCK_N + 90 * DAY - 1).is_err());
        assert!(acct.close_position(0, BLOCK_N + 90 * DAY).is_ok());
    }

    #[test]
    fn double_unstake_of_same_slot_fails() {
        let mut acct = StakeAccount::default();
        acct.open_position(7, DAY, BLOCK_N).unwrap();
        acct.close_position(0, BLOCK_N + DAY).unwrap();

        let err = acct.close_position(0, BLOCK_N + DAY).unwrap_err();
        assert_eq!(error_code(err), u32::from(StakingError::NoActiveStake));
    }

    #[test]
    fn removal_moves_last_position_into_freed_slot() {
        let mut acct = StakeAccount::default();
        acct.open_position(1, DAY, BLOCK_N).unwrap();
        acct.open_position(2, 2 * DAY, BLOCK_N).unwrap();
        acct.open_position(3, 3 * DAY, BLOCK_N).unwrap();

        let released = acct.close_position(0, BLOCK_N + DAY).unwrap();
        assert_eq!(released.amount, 1);

        let amounts: Vec<u64> = acct.positions.iter().map(|p| p.amount).collect();
        assert_eq!(amounts, vec![3, 2]);
        assert_eq!(acct.total_locked, 5);

        // index 0 now refers to the 3-day position
        let err = acct.close_position(0, BLOCK_N + 2 * DAY).unwrap_err();
        assert_eq!(error_code(err), u32::from(StakingError::StakeStillLocked));
    }

    #[test]
    fn zero_amount_and_full_list_are_rejected() {
        let mut acct = StakeAccount::default();
        let err = acct.open_position(0, DAY, BLOCK_N).unwrap_err();
        assert_eq!(error_code(err), u32::from(StakingError::InsufficientAmount));

        for _ in 0..MAX_POSITIONS {
            acct.open_position(1, DAY, BLOCK_N).unwrap();
        }
        let err = acct.open_position(1, DAY, BLOCK_N).unwrap_err();
        assert_eq!(error_code(err), u32::from(StakingError::TooManyPositions));
    }

    #[test]
    fn out_of_range_index_is_no_active_stake() {
        let mut acct = StakeAccount::default();
        let err = acct.close_position(3, BLOCK_N).unwrap_err();
        assert_eq!(error_code(err), u32::from(StakingError::NoActiveStake));
    }
}
