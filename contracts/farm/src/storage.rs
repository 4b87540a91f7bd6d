use farm_common::ttl::{bump_instance, bump_persistent};
use soroban_sdk::{
    contracttype, log, panic_with_error, Address, ConversionError, Env, TryFromVal, Val,
};

use crate::error::ContractError;

#[derive(Clone, Copy)]
#[repr(u32)]
pub enum DataKey {
    Admin = 0,
    Config = 1,
    RewardConfig = 2,
    FeeConfig = 3,
    TotalStaked = 4,
    StakersCount = 5,
    Distribution = 6,
}

impl TryFromVal<Env, DataKey> for Val {
    type Error = ConversionError;

    fn try_from_val(_env: &Env, v: &DataKey) -> Result<Self, Self::Error> {
        Ok((*v as u32).into())
    }
}

/// Per-account keys, kept in persistent storage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StakerKey {
    Record(Address),
    Checkpoint(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Token minted to stakers as reward. The farm must be its admin.
    pub dapp_token: Address,
    /// Token deposited by stakers
    pub lp_token: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardConfig {
    /// Reward minted per ledger for the whole pool
    pub reward_per_block: i128,
    pub min_reward_per_block: i128,
    pub max_reward_per_block: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FeeRecipient {
    /// Fees are minted to the farm itself and can be pulled out with `withdraw_fees`
    Accumulate,
    External(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeConfig {
    pub claim_fee_bps: i64,
    pub fee_recipient: FeeRecipient,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StakerRecord {
    /// Amount of LP tokens currently deposited
    pub staking_balance: i128,
    /// Rewards accrued but not yet claimed
    pub pending_rewards: i128,
    /// Set on the first deposit and never cleared
    pub has_staked: bool,
    /// Mirrors `staking_balance > 0`
    pub is_staking: bool,
}

pub fn save_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

pub fn get_admin(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .unwrap_or_else(|| {
            log!(env, "Farm: Admin not set");
            panic_with_error!(env, ContractError::AdminNotSet)
        })
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Config {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .unwrap_or_else(|| {
            log!(env, "Farm: Config not set");
            panic_with_error!(env, ContractError::ConfigNotSet)
        })
}

pub fn save_reward_config(env: &Env, reward_config: &RewardConfig) {
    env.storage()
        .instance()
        .set(&DataKey::RewardConfig, reward_config);
}

pub fn get_reward_config(env: &Env) -> RewardConfig {
    env.storage()
        .instance()
        .get(&DataKey::RewardConfig)
        .unwrap_or_else(|| {
            log!(env, "Farm: Reward config not set");
            panic_with_error!(env, ContractError::ConfigNotSet)
        })
}

pub fn save_fee_config(env: &Env, fee_config: &FeeConfig) {
    env.storage().instance().set(&DataKey::FeeConfig, fee_config);
}

pub fn get_fee_config(env: &Env) -> FeeConfig {
    env.storage()
        .instance()
        .get(&DataKey::FeeConfig)
        .unwrap_or_else(|| {
            log!(env, "Farm: Fee config not set");
            panic_with_error!(env, ContractError::ConfigNotSet)
        })
}

pub fn get_staker(env: &Env, staker: &Address) -> StakerRecord {
    let key = StakerKey::Record(staker.clone());
    match env.storage().persistent().get::<_, StakerRecord>(&key) {
        Some(record) => {
            bump_persistent(env, &key);
            record
        }
        None => StakerRecord::default(),
    }
}

pub fn save_staker(env: &Env, staker: &Address, record: &StakerRecord) {
    let key = StakerKey::Record(staker.clone());
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}

pub mod utils {
    use super::*;

    pub fn init_counters(env: &Env) {
        env.storage().instance().set(&DataKey::TotalStaked, &0i128);
        env.storage().instance().set(&DataKey::StakersCount, &0u32);
    }

    pub fn get_total_staked(env: &Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalStaked)
            .unwrap_or(0)
    }

    pub fn increase_total_staked(env: &Env, amount: i128) -> Result<(), ContractError> {
        let total = get_total_staked(env)
            .checked_add(amount)
            .ok_or(ContractError::ContractMathError)?;
        env.storage().instance().set(&DataKey::TotalStaked, &total);

        Ok(())
    }

    pub fn decrease_total_staked(env: &Env, amount: i128) -> Result<(), ContractError> {
        let total = get_total_staked(env)
            .checked_sub(amount)
            .filter(|total| *total >= 0)
            .ok_or_else(|| {
                log!(env, "Farm: Total staked would drop below zero");
                ContractError::ContractMathError
            })?;
        env.storage().instance().set(&DataKey::TotalStaked, &total);

        Ok(())
    }

    pub fn get_stakers_count(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::StakersCount)
            .unwrap_or(0)
    }

    pub fn increase_stakers_count(env: &Env) -> Result<(), ContractError> {
        let count = get_stakers_count(env)
            .checked_add(1)
            .ok_or(ContractError::ContractMathError)?;
        env.storage().instance().set(&DataKey::StakersCount, &count);

        Ok(())
    }
}
