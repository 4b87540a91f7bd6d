use farm_common::{ttl::bump_persistent, utils::mul_div};
use soroban_sdk::{contracttype, log, panic_with_error, Address, Env};

use crate::{error::ContractError, storage::DataKey, storage::StakerKey};

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Distribution {
    /// Number of reward rounds recorded so far
    pub rounds: u32,
    /// Total reward handed out to stakers over all rounds
    pub distributed_total: i128,
    /// Ledger sequence up to which the pool has been credited
    pub last_distribution_block: u32,
}

/// Snapshot taken by every distribution that credited a non-empty pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardRound {
    pub reward: i128,
    pub total_staked: i128,
}

#[derive(Clone)]
#[contracttype]
pub enum DistributionDataKey {
    Round(u32),
}

pub fn save_distribution(env: &Env, distribution: &Distribution) {
    env.storage()
        .instance()
        .set(&DataKey::Distribution, distribution);
}

pub fn get_distribution(env: &Env) -> Distribution {
    env.storage()
        .instance()
        .get(&DataKey::Distribution)
        .unwrap_or_else(|| {
            log!(env, "Farm: Distribution not initialized");
            panic_with_error!(env, ContractError::ConfigNotSet)
        })
}

/// Appends a round and moves the round counter forward.
pub fn record_round(
    env: &Env,
    distribution: &mut Distribution,
    round: &RewardRound,
) -> Result<(), ContractError> {
    let distributed_total = distribution
        .distributed_total
        .checked_add(round.reward)
        .ok_or(ContractError::ContractMathError)?;
    let rounds = distribution
        .rounds
        .checked_add(1)
        .ok_or(ContractError::ContractMathError)?;

    let key = DistributionDataKey::Round(distribution.rounds);
    env.storage().persistent().set(&key, round);
    bump_persistent(env, &key);

    distribution.rounds = rounds;
    distribution.distributed_total = distributed_total;

    Ok(())
}

pub fn get_round(env: &Env, index: u32) -> RewardRound {
    let key = DistributionDataKey::Round(index);
    let round = env.storage().persistent().get(&key).unwrap_or_else(|| {
        log!(env, "Farm: Reward round {} not found", index);
        panic_with_error!(env, ContractError::RewardRoundNotFound)
    });
    bump_persistent(env, &key);

    round
}

/// First round the staker has not been credited for yet.
pub fn get_checkpoint(env: &Env, staker: &Address) -> u32 {
    let key = StakerKey::Checkpoint(staker.clone());
    match env.storage().persistent().get::<_, u32>(&key) {
        Some(checkpoint) => {
            bump_persistent(env, &key);
            checkpoint
        }
        None => 0,
    }
}

pub fn save_checkpoint(env: &Env, staker: &Address, checkpoint: u32) {
    let key = StakerKey::Checkpoint(staker.clone());
    env.storage().persistent().set(&key, &checkpoint);
    bump_persistent(env, &key);
}

/// `floor(reward * staking_balance / total_staked)` of a single round.
pub fn round_share(env: &Env, round: &RewardRound, staking_balance: i128) -> Option<i128> {
    mul_div(env, round.reward, staking_balance, round.total_staked)
}

/// Sum of the staker's share over rounds `from..to`.
///
/// The balance is constant over that span: any change to it settles the staker first.
pub fn unsettled_rewards(
    env: &Env,
    staking_balance: i128,
    from: u32,
    to: u32,
) -> Result<i128, ContractError> {
    if staking_balance <= 0 {
        return Ok(0);
    }

    let mut earned: i128 = 0;
    for index in from..to {
        let round = get_round(env, index);
        let share = round_share(env, &round, staking_balance).ok_or_else(|| {
            log!(
                env,
                "Farm: Reward share overflow in round {}, stake {}",
                index,
                staking_balance
            );
            ContractError::ContractMathError
        })?;
        earned = earned
            .checked_add(share)
            .ok_or(ContractError::ContractMathError)?;
    }

    Ok(earned)
}
