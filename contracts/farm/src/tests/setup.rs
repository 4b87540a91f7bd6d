use farm_token::{Token, TokenClient};
use soroban_sdk::{testutils::Ledger, Address, Env, String};

use crate::contract::{TokenFarm, TokenFarmClient};

pub const DECIMALS: u32 = 7;
pub const ONE_TOKEN: i128 = 10_000_000;
pub const WAD_DECIMALS: u32 = 18;
/// One whole token of an 18 decimals token.
pub const ONE_WAD: i128 = 1_000_000_000_000_000_000;
/// Far enough in the future for every approval made in a test.
const APPROVAL_LEDGER: u32 = 10_000;

pub fn deploy_token_contract<'a>(
    env: &Env,
    admin: &Address,
    decimals: u32,
    name: &str,
    symbol: &str,
) -> TokenClient<'a> {
    TokenClient::new(
        env,
        &env.register(
            Token,
            (
                admin,
                decimals,
                String::from_str(env, name),
                String::from_str(env, symbol),
            ),
        ),
    )
}

pub fn deploy_farm_contract<'a>(
    env: &Env,
    owner: &Address,
    dapp_token: &Address,
    lp_token: &Address,
    reward_per_block: i128,
) -> TokenFarmClient<'a> {
    TokenFarmClient::new(
        env,
        &env.register(
            TokenFarm,
            (owner, dapp_token, lp_token, reward_per_block),
        ),
    )
}

pub struct FarmSetup<'a> {
    pub owner: Address,
    pub lp_token: TokenClient<'a>,
    pub dapp_token: TokenClient<'a>,
    pub farm: TokenFarmClient<'a>,
}

/// LP + DApp tokens owned by `owner`, a farm paying `reward_per_block`, and the
/// DApp minting rights handed over to the farm.
pub fn setup_farm<'a>(env: &Env, owner: &Address, reward_per_block: i128) -> FarmSetup<'a> {
    setup_farm_with_decimals(env, owner, reward_per_block, DECIMALS)
}

pub fn setup_farm_with_decimals<'a>(
    env: &Env,
    owner: &Address,
    reward_per_block: i128,
    decimals: u32,
) -> FarmSetup<'a> {
    let lp_token = deploy_token_contract(env, owner, decimals, "LP Token", "LPT");
    let dapp_token = deploy_token_contract(env, owner, decimals, "DApp Token", "DAPP");
    let farm = deploy_farm_contract(
        env,
        owner,
        &dapp_token.address,
        &lp_token.address,
        reward_per_block,
    );
    dapp_token.set_admin(&farm.address);

    FarmSetup {
        owner: owner.clone(),
        lp_token,
        dapp_token,
        farm,
    }
}

impl FarmSetup<'_> {
    /// Mints `amount` LP to `user`, approves the farm and deposits it.
    pub fn mint_and_deposit(&self, user: &Address, amount: i128) {
        self.lp_token.mint(user, &amount);
        self.lp_token
            .approve(user, &self.farm.address, &amount, &APPROVAL_LEDGER);
        self.farm.deposit(user, &amount);
    }
}

pub fn mine_blocks(env: &Env, blocks: u32) {
    env.ledger().with_mut(|li| li.sequence_number += blocks);
}
