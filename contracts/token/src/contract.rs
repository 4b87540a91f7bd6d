use farm_common::ttl::bump_instance;
use soroban_sdk::{
    contract, contractimpl, contractmeta, log, panic_with_error, token::TokenInterface, Address,
    Env, String,
};
use soroban_token_sdk::{metadata::TokenMetadata, TokenUtils};

use crate::{
    admin::{has_administrator, read_administrator, write_administrator},
    allowance::{read_allowance, spend_allowance, write_allowance},
    balance::{
        decrease_total_supply, increase_total_supply, read_balance, read_total_supply,
        receive_balance, spend_balance,
    },
    error::TokenError,
    metadata::{read_decimal, read_name, read_symbol, write_metadata},
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Simple Token Farm mintable token"
);

fn check_nonnegative_amount(e: &Env, amount: i128) {
    if amount < 0 {
        log!(e, "Token: negative amount is not allowed: {}", amount);
        panic_with_error!(e, TokenError::NegativeAmount);
    }
}

#[contract]
pub struct Token;

#[contractimpl]
impl Token {
    pub fn __constructor(e: Env, admin: Address, decimal: u32, name: String, symbol: String) {
        if decimal > 18 {
            log!(&e, "Token: Initialize: Decimal must not be greater than 18");
            panic_with_error!(&e, TokenError::DecimalTooLarge);
        }
        write_administrator(&e, &admin);
        write_metadata(
            &e,
            TokenMetadata {
                decimal,
                name,
                symbol,
            },
        );
    }

    pub fn mint(e: Env, to: Address, amount: i128) {
        check_nonnegative_amount(&e, amount);
        let admin = read_administrator(&e);
        admin.require_auth();

        bump_instance(&e);

        receive_balance(&e, to.clone(), amount);
        increase_total_supply(&e, amount);
        TokenUtils::new(&e).events().mint(admin, to, amount);
    }

    pub fn set_admin(e: Env, new_admin: Address) {
        let admin = read_administrator(&e);
        admin.require_auth();

        bump_instance(&e);

        write_administrator(&e, &new_admin);
        TokenUtils::new(&e).events().set_admin(admin, new_admin);
    }

    pub fn admin(e: Env) -> Address {
        read_administrator(&e)
    }

    pub fn has_admin(e: Env) -> bool {
        has_administrator(&e)
    }

    pub fn total_supply(e: Env) -> i128 {
        read_total_supply(&e)
    }
}

#[contractimpl]
impl TokenInterface for Token {
    fn allowance(e: Env, from: Address, spender: Address) -> i128 {
        bump_instance(&e);
        read_allowance(&e, from, spender).amount
    }

    fn approve(e: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
        from.require_auth();

        check_nonnegative_amount(&e, amount);
        bump_instance(&e);

        write_allowance(&e, from.clone(), spender.clone(), amount, expiration_ledger);
        TokenUtils::new(&e)
            .events()
            .approve(from, spender, amount, expiration_ledger);
    }

    fn balance(e: Env, id: Address) -> i128 {
        bump_instance(&e);
        read_balance(&e, id)
    }

    fn transfer(e: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();

        check_nonnegative_amount(&e, amount);
        bump_instance(&e);

        spend_balance(&e, from.clone(), amount);
        receive_balance(&e, to.clone(), amount);
        TokenUtils::new(&e).events().transfer(from, to, amount);
    }

    fn transfer_from(e: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();

        check_nonnegative_amount(&e, amount);
        bump_instance(&e);

        spend_allowance(&e, from.clone(), spender, amount);
        spend_balance(&e, from.clone(), amount);
        receive_balance(&e, to.clone(), amount);
        TokenUtils::new(&e).events().transfer(from, to, amount)
    }

    fn burn(e: Env, from: Address, amount: i128) {
        from.require_auth();

        check_nonnegative_amount(&e, amount);
        bump_instance(&e);

        spend_balance(&e, from.clone(), amount);
        decrease_total_supply(&e, amount);
        TokenUtils::new(&e).events().burn(from, amount);
    }

    fn burn_from(e: Env, spender: Address, from: Address, amount: i128) {
        spender.require_auth();

        check_nonnegative_amount(&e, amount);
        bump_instance(&e);

        spend_allowance(&e, from.clone(), spender, amount);
        spend_balance(&e, from.clone(), amount);
        decrease_total_supply(&e, amount);
        TokenUtils::new(&e).events().burn(from, amount)
    }

    fn decimals(e: Env) -> u32 {
        read_decimal(&e)
    }

    fn name(e: Env) -> String {
        read_name(&e)
    }

    fn symbol(e: Env) -> String {
        read_symbol(&e)
    }
}
