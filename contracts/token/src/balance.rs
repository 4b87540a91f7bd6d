use farm_common::ttl::bump_persistent;
use soroban_sdk::{log, panic_with_error, Address, Env};

use crate::{error::TokenError, storage_types::DataKey};

pub fn read_balance(e: &Env, addr: Address) -> i128 {
    let key = DataKey::Balance(addr);
    match e.storage().persistent().get::<DataKey, i128>(&key) {
        Some(balance) => {
            bump_persistent(e, &key);
            balance
        }
        None => 0,
    }
}

fn write_balance(e: &Env, addr: Address, amount: i128) {
    let key = DataKey::Balance(addr);
    e.storage().persistent().set(&key, &amount);
    bump_persistent(e, &key);
}

pub fn receive_balance(e: &Env, addr: Address, amount: i128) {
    let balance = read_balance(e, addr.clone());
    let new_balance = balance.checked_add(amount).unwrap_or_else(|| {
        log!(e, "Token: Receive balance: balance overflow");
        panic_with_error!(e, TokenError::SupplyOverflow)
    });
    write_balance(e, addr, new_balance);
}

pub fn spend_balance(e: &Env, addr: Address, amount: i128) {
    let balance = read_balance(e, addr.clone());
    if balance < amount {
        log!(
            e,
            "Token: Spend balance: balance is not sufficient to spend: {} < {}",
            balance,
            amount
        );
        panic_with_error!(e, TokenError::InsufficientBalance);
    }
    write_balance(e, addr, balance - amount);
}

pub fn read_total_supply(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn increase_total_supply(e: &Env, amount: i128) {
    let supply = read_total_supply(e)
        .checked_add(amount)
        .unwrap_or_else(|| {
            log!(e, "Token: Mint: total supply overflow");
            panic_with_error!(e, TokenError::SupplyOverflow)
        });
    e.storage().instance().set(&DataKey::TotalSupply, &supply);
}

pub fn decrease_total_supply(e: &Env, amount: i128) {
    let supply = read_total_supply(e) - amount;
    e.storage().instance().set(&DataKey::TotalSupply, &supply);
}
