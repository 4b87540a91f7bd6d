use farm_common::{
    ttl::bump_instance,
    utils::{bps_portion, validate_bps},
    validate_int_parameters,
};
use soroban_sdk::{
    contract, contractimpl, contractmeta, log, panic_with_error, token, Address, Env, String,
};

use crate::{
    distribution::{
        get_checkpoint, get_distribution, record_round, save_checkpoint, save_distribution,
        unsettled_rewards, Distribution, RewardRound,
    },
    error::ContractError,
    storage::{
        get_admin, get_config, get_fee_config, get_reward_config, get_staker, save_admin,
        save_config, save_fee_config, save_reward_config, save_staker,
        utils::{
            decrease_total_staked, get_stakers_count, get_total_staked, increase_stakers_count,
            increase_total_staked, init_counters,
        },
        Config, FeeConfig, FeeRecipient, RewardConfig, StakerRecord,
    },
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Simple Token Farm LP staking with per ledger DApp rewards"
);

const FARM_NAME: &str = "Simple Token Farm";

#[contract]
pub struct TokenFarm;

pub trait TokenFarmTrait {
    fn deposit(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    fn withdraw(env: Env, sender: Address) -> Result<i128, ContractError>;

    fn claim_rewards(env: Env, sender: Address) -> Result<i128, ContractError>;

    // Credits every staker for the ledgers elapsed since the previous call
    fn distribute_rewards_all(env: Env) -> Result<i128, ContractError>;

    // Credits up to `max_rounds` outstanding rounds to `staker`, returns how many are left
    fn settle_rewards(env: Env, staker: Address, max_rounds: u32) -> Result<u32, ContractError>;

    // ADMIN

    fn set_reward_per_block(env: Env, reward_per_block: i128) -> Result<(), ContractError>;

    fn set_reward_range(env: Env, min: i128, max: i128) -> Result<(), ContractError>;

    fn set_claim_fee(
        env: Env,
        claim_fee_bps: i64,
        fee_recipient: FeeRecipient,
    ) -> Result<(), ContractError>;

    fn withdraw_fees(env: Env, amount: i128, to: Address) -> Result<(), ContractError>;

    fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), ContractError>;

    // QUERIES

    fn name(env: Env) -> String;

    fn dapp_token(env: Env) -> Address;

    fn lp_token(env: Env) -> Address;

    fn owner(env: Env) -> Address;

    fn reward_per_block(env: Env) -> i128;

    fn reward_config(env: Env) -> RewardConfig;

    fn fee_config(env: Env) -> FeeConfig;

    fn total_staking_balance(env: Env) -> i128;

    fn stakers_count(env: Env) -> u32;

    fn last_distribution_block(env: Env) -> u32;

    fn total_rewards_distributed(env: Env) -> i128;

    fn users(env: Env, staker: Address) -> Result<StakerRecord, ContractError>;

    fn pending_rewards(env: Env, staker: Address) -> Result<i128, ContractError>;
}

#[contractimpl]
impl TokenFarm {
    pub fn __constructor(
        env: Env,
        owner: Address,
        dapp_token: Address,
        lp_token: Address,
        reward_per_block: i128,
    ) {
        validate_int_parameters!(reward_per_block);

        if dapp_token == lp_token {
            log!(
                &env,
                "Farm: Initialize: reward and staking token must be different"
            );
            panic_with_error!(&env, ContractError::TokensIdentical);
        }

        save_admin(&env, &owner);
        save_config(
            &env,
            &Config {
                dapp_token,
                lp_token: lp_token.clone(),
            },
        );
        // the rate is pinned until the owner opens a range
        save_reward_config(
            &env,
            &RewardConfig {
                reward_per_block,
                min_reward_per_block: reward_per_block,
                max_reward_per_block: reward_per_block,
            },
        );
        save_fee_config(
            &env,
            &FeeConfig {
                claim_fee_bps: 0,
                fee_recipient: FeeRecipient::Accumulate,
            },
        );
        save_distribution(
            &env,
            &Distribution {
                last_distribution_block: env.ledger().sequence(),
                ..Default::default()
            },
        );
        init_counters(&env);

        env.events().publish(("initialize", "lp_token"), &lp_token);
    }
}

#[contractimpl]
impl TokenFarmTrait for TokenFarm {
    fn deposit(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();
        bump_instance(&env);

        if amount <= 0 {
            log!(
                &env,
                "Farm: Deposit: amount must be bigger then 0, got {}",
                amount
            );
            return Err(ContractError::InvalidAmount);
        }

        let config = get_config(&env);
        let farm = env.current_contract_address();
        // pulls the pre-approved amount, the farm acts as spender
        token::Client::new(&env, &config.lp_token).transfer_from(&farm, &sender, &farm, &amount);

        let mut distribution = get_distribution(&env);
        if get_total_staked(&env) == 0 {
            // nobody earned anything while the pool was empty
            distribution.last_distribution_block = env.ledger().sequence();
            save_distribution(&env, &distribution);
        }

        let mut record = get_staker(&env, &sender);
        settle_staker(&env, &sender, &mut record, distribution.rounds)?;

        if !record.has_staked {
            record.has_staked = true;
            increase_stakers_count(&env)?;
        }
        record.staking_balance = record
            .staking_balance
            .checked_add(amount)
            .ok_or(ContractError::ContractMathError)?;
        record.is_staking = true;

        save_staker(&env, &sender, &record);
        increase_total_staked(&env, amount)?;

        env.events().publish(("deposit", &sender), amount);

        Ok(())
    }

    fn withdraw(env: Env, sender: Address) -> Result<i128, ContractError> {
        sender.require_auth();
        bump_instance(&env);

        let mut record = get_staker(&env, &sender);
        let amount = record.staking_balance;
        if amount <= 0 {
            log!(&env, "Farm: Withdraw: nothing staked");
            return Err(ContractError::NothingStaked);
        }

        let distribution = get_distribution(&env);
        settle_staker(&env, &sender, &mut record, distribution.rounds)?;

        record.staking_balance = 0;
        record.is_staking = false;
        save_staker(&env, &sender, &record);
        decrease_total_staked(&env, amount)?;

        let config = get_config(&env);
        token::Client::new(&env, &config.lp_token).transfer(
            &env.current_contract_address(),
            &sender,
            &amount,
        );

        env.events().publish(("withdraw", &sender), amount);

        Ok(amount)
    }

    fn claim_rewards(env: Env, sender: Address) -> Result<i128, ContractError> {
        sender.require_auth();
        bump_instance(&env);

        let distribution = get_distribution(&env);
        let mut record = get_staker(&env, &sender);
        settle_staker(&env, &sender, &mut record, distribution.rounds)?;

        let gross = record.pending_rewards;
        if gross <= 0 {
            log!(&env, "Farm: Claim rewards: nothing to claim");
            return Err(ContractError::NothingToClaim);
        }

        let fee_config = get_fee_config(&env);
        let fee = bps_portion(gross, fee_config.claim_fee_bps)
            .ok_or(ContractError::ContractMathError)?;
        let net = gross - fee;

        record.pending_rewards = 0;
        save_staker(&env, &sender, &record);

        let config = get_config(&env);
        let dapp_token = token::StellarAssetClient::new(&env, &config.dapp_token);
        if net > 0 {
            dapp_token.mint(&sender, &net);
        }
        if fee > 0 {
            match fee_config.fee_recipient {
                FeeRecipient::Accumulate => {
                    dapp_token.mint(&env.current_contract_address(), &fee)
                }
                FeeRecipient::External(recipient) => dapp_token.mint(&recipient, &fee),
            }
        }

        env.events()
            .publish(("rewards_claimed", &sender), (gross, fee));

        Ok(net)
    }

    fn distribute_rewards_all(env: Env) -> Result<i128, ContractError> {
        bump_instance(&env);

        let current_block = env.ledger().sequence();
        let mut distribution = get_distribution(&env);

        let elapsed = current_block.saturating_sub(distribution.last_distribution_block);
        if elapsed == 0 {
            return Ok(0);
        }

        let total_staked = get_total_staked(&env);
        if total_staked == 0 {
            log!(
                &env,
                "Farm: Distribute rewards: pool empty, skipping {} ledgers",
                elapsed
            );
            distribution.last_distribution_block = current_block;
            save_distribution(&env, &distribution);
            return Ok(0);
        }

        let reward_per_block = get_reward_config(&env).reward_per_block;
        let reward = reward_per_block
            .checked_mul(elapsed as i128)
            .ok_or_else(|| {
                log!(
                    &env,
                    "Farm: Distribute rewards: overflow for {} ledgers at {} per ledger",
                    elapsed,
                    reward_per_block
                );
                ContractError::ContractMathError
            })?;

        if reward > 0 {
            record_round(
                &env,
                &mut distribution,
                &RewardRound {
                    reward,
                    total_staked,
                },
            )?;
        }
        distribution.last_distribution_block = current_block;
        save_distribution(&env, &distribution);

        env.events()
            .publish(("rewards_distributed_all", "total"), reward);

        Ok(reward)
    }

    fn settle_rewards(env: Env, staker: Address, max_rounds: u32) -> Result<u32, ContractError> {
        bump_instance(&env);

        let mut record = get_staker(&env, &staker);
        if record.staking_balance <= 0 {
            // balance changes settle the staker, so there is nothing outstanding
            return Ok(0);
        }

        let rounds = get_distribution(&env).rounds;
        let checkpoint = get_checkpoint(&env, &staker);
        let up_to = checkpoint.saturating_add(max_rounds).min(rounds);

        settle_staker(&env, &staker, &mut record, up_to)?;
        save_staker(&env, &staker, &record);

        Ok(rounds - up_to)
    }

    fn set_reward_per_block(env: Env, reward_per_block: i128) -> Result<(), ContractError> {
        let admin = get_admin(&env);
        admin.require_auth();

        let mut reward_config = get_reward_config(&env);
        if reward_per_block < reward_config.min_reward_per_block
            || reward_per_block > reward_config.max_reward_per_block
        {
            log!(
                &env,
                "Farm: Set reward per block: {} outside of [{}, {}]",
                reward_per_block,
                reward_config.min_reward_per_block,
                reward_config.max_reward_per_block
            );
            return Err(ContractError::RewardOutOfRange);
        }

        reward_config.reward_per_block = reward_per_block;
        save_reward_config(&env, &reward_config);

        env.events()
            .publish(("set_reward_per_block", "rate"), reward_per_block);

        Ok(())
    }

    fn set_reward_range(env: Env, min: i128, max: i128) -> Result<(), ContractError> {
        let admin = get_admin(&env);
        admin.require_auth();

        if min < 0 || min > max {
            log!(
                &env,
                "Farm: Set reward range: invalid range [{}, {}]",
                min,
                max
            );
            return Err(ContractError::InvalidRewardRange);
        }

        let mut reward_config = get_reward_config(&env);
        reward_config.min_reward_per_block = min;
        reward_config.max_reward_per_block = max;
        save_reward_config(&env, &reward_config);

        env.events().publish(("set_reward_range", "min"), min);
        env.events().publish(("set_reward_range", "max"), max);

        Ok(())
    }

    fn set_claim_fee(
        env: Env,
        claim_fee_bps: i64,
        fee_recipient: FeeRecipient,
    ) -> Result<(), ContractError> {
        let admin = get_admin(&env);
        admin.require_auth();

        if !validate_bps(claim_fee_bps) {
            log!(
                &env,
                "Farm: Set claim fee: {} bps is not between 0 and 10000",
                claim_fee_bps
            );
            return Err(ContractError::InvalidFeeBps);
        }

        save_fee_config(
            &env,
            &FeeConfig {
                claim_fee_bps,
                fee_recipient,
            },
        );

        env.events()
            .publish(("set_claim_fee", "bps"), claim_fee_bps);

        Ok(())
    }

    fn withdraw_fees(env: Env, amount: i128, to: Address) -> Result<(), ContractError> {
        let admin = get_admin(&env);
        admin.require_auth();

        if amount <= 0 {
            log!(&env, "Farm: Withdraw fees: amount must be bigger then 0");
            return Err(ContractError::InvalidAmount);
        }

        let config = get_config(&env);
        let dapp_token = token::Client::new(&env, &config.dapp_token);
        let farm = env.current_contract_address();

        let fee_balance = dapp_token.balance(&farm);
        if amount > fee_balance {
            log!(
                &env,
                "Farm: Withdraw fees: requested {} but only {} collected",
                amount,
                fee_balance
            );
            return Err(ContractError::InsufficientFeeBalance);
        }

        dapp_token.transfer(&farm, &to, &amount);

        env.events().publish(("withdraw_fees", &to), amount);

        Ok(())
    }

    fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), ContractError> {
        let admin = get_admin(&env);
        admin.require_auth();

        if admin == new_owner {
            log!(&env, "Farm: Transfer ownership: new owner is the current one");
            return Err(ContractError::SameAdmin);
        }

        save_admin(&env, &new_owner);

        env.events()
            .publish(("ownership_transferred", &admin), &new_owner);

        Ok(())
    }

    // QUERIES

    fn name(env: Env) -> String {
        String::from_str(&env, FARM_NAME)
    }

    fn dapp_token(env: Env) -> Address {
        get_config(&env).dapp_token
    }

    fn lp_token(env: Env) -> Address {
        get_config(&env).lp_token
    }

    fn owner(env: Env) -> Address {
        get_admin(&env)
    }

    fn reward_per_block(env: Env) -> i128 {
        get_reward_config(&env).reward_per_block
    }

    fn reward_config(env: Env) -> RewardConfig {
        get_reward_config(&env)
    }

    fn fee_config(env: Env) -> FeeConfig {
        get_fee_config(&env)
    }

    fn total_staking_balance(env: Env) -> i128 {
        get_total_staked(&env)
    }

    fn stakers_count(env: Env) -> u32 {
        get_stakers_count(&env)
    }

    fn last_distribution_block(env: Env) -> u32 {
        get_distribution(&env).last_distribution_block
    }

    fn total_rewards_distributed(env: Env) -> i128 {
        get_distribution(&env).distributed_total
    }

    fn users(env: Env, staker: Address) -> Result<StakerRecord, ContractError> {
        let mut record = get_staker(&env, &staker);
        record.pending_rewards = current_pending(&env, &staker, &record)?;

        Ok(record)
    }

    fn pending_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        let record = get_staker(&env, &staker);
        current_pending(&env, &staker, &record)
    }
}

// Pending rewards including every round the staker was not settled for yet
fn current_pending(
    env: &Env,
    staker: &Address,
    record: &StakerRecord,
) -> Result<i128, ContractError> {
    let unsettled = unsettled_rewards(
        env,
        record.staking_balance,
        get_checkpoint(env, staker),
        get_distribution(env).rounds,
    )?;

    record
        .pending_rewards
        .checked_add(unsettled)
        .ok_or(ContractError::ContractMathError)
}

/// Credits the staker's share of every round before `up_to` into `pending_rewards`.
/// Must run before the staking balance changes.
fn settle_staker(
    env: &Env,
    staker: &Address,
    record: &mut StakerRecord,
    up_to: u32,
) -> Result<(), ContractError> {
    let checkpoint = get_checkpoint(env, staker);
    if checkpoint >= up_to {
        return Ok(());
    }

    let accrued = unsettled_rewards(env, record.staking_balance, checkpoint, up_to)?;
    save_checkpoint(env, staker, up_to);

    if accrued > 0 {
        record.pending_rewards = record
            .pending_rewards
            .checked_add(accrued)
            .ok_or(ContractError::ContractMathError)?;
        // ledger at which the credit was booked
        env.events().publish(
            ("rewards_accrued", staker),
            (accrued, env.ledger().sequence()),
        );
    }

    Ok(())
}
