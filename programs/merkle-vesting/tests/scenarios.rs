//! End-to-end allocation scenarios driven through the public accounting API:
//! build the published tree, hand out proofs, settle claims against the
//! config and records, and lock released amounts into staking positions.

use anchor_lang::prelude::*;
use locked_staking::error::StakingError;
use locked_staking::state::{StakeAccount, StakingPool};
use merkle_vesting::error::VestingError;
use merkle_vesting::merkle::{leaf_hash, MerkleTree};
use merkle_vesting::state::{Category, ClaimRecord, RootPolicy, VestingConfig, VestingCurve};

const DAY: i64 = 86_400;
const START: i64 = 1_700_000_000;
const TOKEN: u64 = 1_000_000_000;

fn key(n: u8) -> Pubkey {
    Pubkey::new_from_array([n; 32])
}

fn code(err: anchor_lang::error::Error) -> u32 {
    match err {
        anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
        anchor_lang::error::Error::ProgramError(e) => panic!("unexpected program error: {e:?}"),
    }
}

fn standard_curve() -> VestingCurve {
    VestingCurve {
        start_rate_pct: 10,
        cliff_duration: 90 * DAY,
        total_duration: 450 * DAY,
    }
}

struct Allocation {
    claimant: Pubkey,
    category: Category,
    total: u64,
}

struct Deployment {
    config: VestingConfig,
    tree: MerkleTree,
    allocations: Vec<Allocation>,
}

impl Deployment {
    fn new(allocations: Vec<Allocation>) -> Self {
        let curves = vec![standard_curve(); Category::ALL.len()];
        let mut config = VestingConfig {
            admin: key(200),
            program_start: START,
            curves: VestingConfig::validate_curves(&curves).unwrap(),
            root_policy: RootPolicy::SetOnce,
            ..Default::default()
        };
        let leaves = allocations
            .iter()
            .map(|a| leaf_hash(&a.claimant, a.category, a.total))
            .collect();
        let tree = MerkleTree::new(leaves).unwrap();
        config.set_allocation_root(tree.root()).unwrap();
        Self {
            config,
            tree,
            allocations,
        }
    }

    fn claim(&mut self, index: usize, record: &mut ClaimRecord, now: i64) -> Result<u64> {
        let proof = self.tree.proof(index).unwrap();
        let a = &self.allocations[index];
        self.config
            .settle_claim(record, &a.claimant, &proof, a.category, a.total, now)
    }
}

fn round_allocations() -> Vec<Allocation> {
    vec![
        Allocation {
            claimant: key(1),
            category: Category::Seed,
            total: 1_000 * TOKEN,
        },
        Allocation {
            claimant: key(2),
            category: Category::Team,
            total: 4_000 * TOKEN,
        },
        Allocation {
            claimant: key(1),
            category: Category::Airdrop,
            total: 50 * TOKEN,
        },
        Allocation {
            claimant: key(3),
            category: Category::Public,
            total: 12 * TOKEN,
        },
    ]
}

#[test]
fn claims_follow_the_ten_percent_cliff_schedule() {
    let mut d = Deployment::new(round_allocations());
    let mut record = ClaimRecord::default();

    assert_eq!(d.claim(0, &mut record, START + 90 * DAY).unwrap(), 100 * TOKEN);
    assert_eq!(d.claim(0, &mut record, START + 270 * DAY).unwrap(), 450 * TOKEN);
    assert_eq!(d.claim(0, &mut record, START + 450 * DAY).unwrap(), 450 * TOKEN);
    assert_eq!(record.cumulative_claimed, 1_000 * TOKEN);

    let err = d.claim(0, &mut record, START + 900 * DAY).unwrap_err();
    assert_eq!(code(err), u32::from(VestingError::NoClaimableTokens));
}

#[test]
fn late_first_claim_gets_everything_vested_so_far() {
    let mut d = Deployment::new(round_allocations());
    let mut record = ClaimRecord::default();
    assert_eq!(
        d.claim(1, &mut record, START + 270 * DAY).unwrap(),
        2_200 * TOKEN
    );
}

#[test]
fn immediate_second_claim_fails() {
    let mut d = Deployment::new(round_allocations());
    let mut record = ClaimRecord::default();
    let now = START + 123 * DAY;

    d.claim(3, &mut record, now).unwrap();
    let err = d.claim(3, &mut record, now).unwrap_err();
    assert_eq!(code(err), u32::from(VestingError::NoClaimableTokens));
}

#[test]
fn proof_errors_are_distinct_from_empty_claims() {
    let mut d = Deployment::new(round_allocations());
    let mut record = ClaimRecord::default();
    let proof = d.tree.proof(0).unwrap();

    // before any vesting a valid proof still reports nothing to claim
    let err = d.claim(0, &mut record, START).unwrap_err();
    assert_eq!(code(err), u32::from(VestingError::NoClaimableTokens));

    // an inflated allocation never reaches the curve
    let err = d
        .config
        .settle_claim(
            &mut record,
            &key(1),
            &proof,
            Category::Seed,
            2_000 * TOKEN,
            START,
        )
        .unwrap_err();
    assert_eq!(code(err), u32::from(VestingError::InvalidProof));
}

#[test]
fn one_wallet_two_categories() {
    let mut d = Deployment::new(round_allocations());
    let mut seed = ClaimRecord::default();
    let mut airdrop = ClaimRecord::default();
    let end = START + 450 * DAY;

    assert_eq!(d.claim(0, &mut seed, end).unwrap(), 1_000 * TOKEN);
    assert_eq!(d.claim(2, &mut airdrop, end).unwrap(), 50 * TOKEN);
    assert_eq!(d.config.total_claimed, 1_050 * TOKEN);
}

#[test]
fn total_claimed_never_exceeds_the_allocation_set() {
    let mut d = Deployment::new(round_allocations());
    let mut records: Vec<ClaimRecord> = (0..d.allocations.len())
        .map(|_| ClaimRecord::default())
        .collect();
    let grand_total: u64 = d.allocations.iter().map(|a| a.total).sum();

    let mut t = 0;
    while t <= 500 * DAY {
        for (i, record) in records.iter_mut().enumerate() {
            let _ = d.claim(i, record, START + t);
        }
        assert!(d.config.total_claimed <= grand_total);
        t += 17 * DAY;
    }
    assert_eq!(d.config.total_claimed, grand_total);
}

// Stands in for the vesting config PDA address
const CONFIG_KEY: u8 = 150;

fn pool(durations: Vec<i64>) -> StakingPool {
    let mut pool = StakingPool {
        admin: key(100),
        mint: key(101),
        ..Default::default()
    };
    pool.set_lock_durations(durations).unwrap();
    pool.set_stake_delegate(key(CONFIG_KEY));
    pool
}

struct Ledgers {
    record: ClaimRecord,
    staking_pool: StakingPool,
    stake_account: StakeAccount,
}

/// One claim_and_lock transaction: every step runs on working copies that
/// are committed only if the whole sequence succeeds. `fee_bps` is the
/// transfer fee the vault would see on the way in.
fn claim_and_lock(
    d: &mut Deployment,
    ledgers: &mut Ledgers,
    index: usize,
    duration_index: u8,
    expected_duration: i64,
    fee_bps: u64,
    now: i64,
) -> Result<u64> {
    let mut config = d.config.clone();
    let mut record = ledgers.record.clone();
    let mut staking_pool = ledgers.staking_pool.clone();
    let mut stake_account = ledgers.stake_account.clone();

    let a = &d.allocations[index];
    let proof = d.tree.proof(index).unwrap();
    let amount = config.settle_claim(&mut record, &a.claimant, &proof, a.category, a.total, now)?;

    staking_pool.authorize_staker(&key(CONFIG_KEY), &a.claimant)?;
    let duration = staking_pool.resolve_duration(duration_index, expected_duration)?;
    let first = stake_account.positions.is_empty();
    stake_account.open_position(amount, duration, now)?;
    staking_pool.record_stake(amount, first)?;

    let vault_before = staking_pool.total_staked - amount;
    let fee = amount * fee_bps / 10_000;
    StakingPool::check_vault_credit(vault_before, vault_before + amount - fee, amount)?;

    d.config = config;
    ledgers.record = record;
    ledgers.staking_pool = staking_pool;
    ledgers.stake_account = stake_account;
    Ok(amount)
}

fn ledgers() -> Ledgers {
    Ledgers {
        record: ClaimRecord::default(),
        staking_pool: pool(vec![30 * DAY, 90 * DAY]),
        stake_account: StakeAccount::default(),
    }
}

#[test]
fn claim_and_lock_commits_claim_and_position_together() {
    let mut d = Deployment::new(round_allocations());
    let mut l = ledgers();
    let now = START + 90 * DAY;

    let amount = claim_and_lock(&mut d, &mut l, 1, 1, 90 * DAY, 0, now).unwrap();
    assert_eq!(amount, 400 * TOKEN);
    assert_eq!(l.record.cumulative_claimed, amount);
    assert_eq!(l.stake_account.positions[0].amount, amount);
    assert_eq!(l.staking_pool.total_staked, amount);
    assert_eq!(d.config.total_claimed, amount);
}

#[test]
fn stale_duration_reverts_the_claim() {
    let mut d = Deployment::new(round_allocations());
    let mut l = ledgers();
    let now = START + 90 * DAY;

    let err = claim_and_lock(&mut d, &mut l, 1, 0, 60 * DAY, 0, now).unwrap_err();
    assert_eq!(code(err), u32::from(StakingError::InvalidDuration));
    assert_eq!(l.record.cumulative_claimed, 0);
    assert_eq!(d.config.total_claimed, 0);
    assert!(l.stake_account.positions.is_empty());

    // the same claim goes through with a fresh quote
    assert!(claim_and_lock(&mut d, &mut l, 1, 0, 30 * DAY, 0, now).is_ok());
}

#[test]
fn fee_bearing_vault_reverts_the_claim() {
    let mut d = Deployment::new(round_allocations());
    let mut l = ledgers();

    let err = claim_and_lock(&mut d, &mut l, 0, 0, 30 * DAY, 100, START + DAY).unwrap_err();
    assert_eq!(code(err), u32::from(StakingError::StakeVaultNotFeeExempt));
    assert_eq!(l.record.cumulative_claimed, 0);
    assert_eq!(l.staking_pool.total_staked, 0);
}

#[test]
fn outsider_cannot_fill_someone_elses_position_list() {
    let staking_pool = pool(vec![30 * DAY, 3_650 * DAY]);
    let victim = key(2);
    let outsider = key(66);

    for _ in 0..locked_staking::constants::MAX_POSITIONS {
        let err = staking_pool.authorize_staker(&outsider, &victim).unwrap_err();
        assert_eq!(code(err), u32::from(StakingError::Unauthorized));
    }

    // the victim's own stake and the vesting delegate are unaffected
    assert!(staking_pool.authorize_staker(&victim, &victim).is_ok());
    assert!(staking_pool.authorize_staker(&key(CONFIG_KEY), &victim).is_ok());
}

#[test]
fn claim_then_lock_creates_a_position_for_the_claimant() {
    let mut d = Deployment::new(round_allocations());
    let mut staking_pool = pool(vec![30 * DAY, 90 * DAY]);
    let mut stake_account = StakeAccount::default();
    let mut record = ClaimRecord::default();
    let now = START + 90 * DAY;

    let amount = d.claim(1, &mut record, now).unwrap();
    let duration = staking_pool.resolve_duration(1, 90 * DAY).unwrap();
    let index = stake_account.open_position(amount, duration, now).unwrap();
    staking_pool.record_stake(amount, index == 0).unwrap();

    assert_eq!(amount, 400 * TOKEN);
    assert_eq!(stake_account.positions[index].unlock_time, now + 90 * DAY);
    assert_eq!(staking_pool.total_staked, amount);
    assert_eq!(record.cumulative_claimed, amount);
}

#[test]
fn stale_duration_quote_aborts_the_lock() {
    let mut staking_pool = pool(vec![30 * DAY, 90 * DAY]);
    // admin reconfigures after the claimant read the table
    staking_pool
        .set_lock_durations(vec![60 * DAY, 90 * DAY])
        .unwrap();

    let err = staking_pool.resolve_duration(0, 30 * DAY).unwrap_err();
    assert_eq!(code(err), u32::from(StakingError::InvalidDuration));
}

#[test]
fn locked_position_round_trip() {
    let mut staking_pool = pool(vec![30 * DAY, 90 * DAY]);
    let mut stake_account = StakeAccount::default();
    let n = START;

    let duration = staking_pool.resolve_duration(0, 30 * DAY).unwrap();
    let index = stake_account.open_position(100 * TOKEN, duration, n).unwrap();
    staking_pool.record_stake(100 * TOKEN, true).unwrap();

    let err = stake_account.close_position(index, n + 10 * DAY).unwrap_err();
    assert_eq!(code(err), u32::from(StakingError::StakeStillLocked));

    let position = stake_account.close_position(index, n + 30 * DAY).unwrap();
    staking_pool
        .record_unstake(position.amount, stake_account.positions.is_empty())
        .unwrap();
    assert_eq!(position.amount, 100 * TOKEN);
    assert!(stake_account.positions.is_empty());
    assert_eq!(staking_pool.total_staked, 0);
    assert_eq!(staking_pool.staker_count, 0);

    let err = stake_account.close_position(index, n + 31 * DAY).unwrap_err();
    assert_eq!(code(err), u32::from(StakingError::NoActiveStake));
}
