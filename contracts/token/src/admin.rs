use soroban_sdk::{log, panic_with_error, Address, Env};

use crate::{error::TokenError, storage_types::DataKey};

pub fn has_administrator(e: &Env) -> bool {
    e.storage().instance().has(&DataKey::Admin)
}

pub fn read_administrator(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&DataKey::Admin)
        .unwrap_or_else(|| {
            log!(e, "Token: Admin not set");
            panic_with_error!(e, TokenError::AdminNotSet)
        })
}

pub fn write_administrator(e: &Env, id: &Address) {
    e.storage().instance().set(&DataKey::Admin, id);
}
