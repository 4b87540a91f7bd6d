use soroban_sdk::{log, panic_with_error, Address, Env};

use crate::{
    error::TokenError,
    storage_types::{AllowanceDataKey, AllowanceValue, DataKey},
};

pub fn read_allowance(e: &Env, from: Address, spender: Address) -> AllowanceValue {
    let key = DataKey::Allowance(AllowanceDataKey { from, spender });
    match e.storage().temporary().get::<_, AllowanceValue>(&key) {
        Some(allowance) if allowance.expiration_ledger < e.ledger().sequence() => AllowanceValue {
            amount: 0,
            expiration_ledger: allowance.expiration_ledger,
        },
        Some(allowance) => allowance,
        None => AllowanceValue {
            amount: 0,
            expiration_ledger: 0,
        },
    }
}

pub fn write_allowance(
    e: &Env,
    from: Address,
    spender: Address,
    amount: i128,
    expiration_ledger: u32,
) {
    let allowance = AllowanceValue {
        amount,
        expiration_ledger,
    };

    if amount > 0 && expiration_ledger < e.ledger().sequence() {
        log!(
            e,
            "Token: Approve: expiration_ledger {} is less than ledger seq when amount > 0",
            expiration_ledger
        );
        panic_with_error!(e, TokenError::ExpirationInPast);
    }

    let key = DataKey::Allowance(AllowanceDataKey { from, spender });
    e.storage().temporary().set(&key, &allowance);

    if amount > 0 {
        // temporary entries only need to outlive the approval itself
        let live_for = expiration_ledger
            .checked_sub(e.ledger().sequence())
            .unwrap_or(0);
        e.storage().temporary().extend_ttl(&key, live_for, live_for);
    }
}

pub fn spend_allowance(e: &Env, from: Address, spender: Address, amount: i128) {
    let allowance = read_allowance(e, from.clone(), spender.clone());
    if allowance.amount < amount {
        log!(
            e,
            "Token: Spend allowance: insufficient allowance: {} < {}",
            allowance.amount,
            amount
        );
        panic_with_error!(e, TokenError::InsufficientAllowance);
    }
    if amount > 0 {
        write_allowance(
            e,
            from,
            spender,
            allowance.amount - amount,
            allowance.expiration_ledger,
        );
    }
}
