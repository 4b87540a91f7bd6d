use pretty_assertions::assert_eq;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address, Env, String,
};

use super::setup::{deploy_token_contract, DECIMALS};
use crate::contract::{Token, TokenClient};

#[test]
fn initialize_sets_metadata_and_admin() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin, "LPT");

    assert_eq!(token.name(), String::from_str(&env, "LPT"));
    assert_eq!(token.symbol(), String::from_str(&env, "LPT"));
    assert_eq!(token.decimals(), DECIMALS);
    assert_eq!(token.admin(), admin);
    assert!(token.has_admin());
    assert_eq!(token.total_supply(), 0);
}

#[test]
#[should_panic(expected = "Error(Contract, #804)")]
fn initialize_with_too_many_decimals() {
    let env = Env::default();
    let admin = Address::generate(&env);

    TokenClient::new(
        &env,
        &env.register(
            Token,
            (
                &admin,
                19u32,
                String::from_str(&env, "DApp Token"),
                String::from_str(&env, "DAPP"),
            ),
        ),
    );
}

#[test]
fn mint_increases_balance_and_supply() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin, "LPT");

    token.mint(&alice, &1_000);
    token.mint(&bob, &500);

    assert_eq!(token.balance(&alice), 1_000);
    assert_eq!(token.balance(&bob), 500);
    assert_eq!(token.total_supply(), 1_500);
}

#[test]
#[should_panic(expected = "Error(Auth, InvalidAction)")]
fn mint_requires_admin() {
    let env = Env::default();

    let admin = Address::generate(&env);
    let alice = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin, "LPT");

    token.mint(&alice, &1_000);
}

#[test]
#[should_panic(expected = "Error(Contract, #800)")]
fn mint_negative_amount() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin, "LPT");

    token.mint(&Address::generate(&env), &-1);
}

#[test]
fn transfer_moves_balance() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin, "DAPP");

    token.mint(&alice, &1_000);
    token.transfer(&alice, &bob, &400);

    assert_eq!(token.balance(&alice), 600);
    assert_eq!(token.balance(&bob), 400);
    assert_eq!(token.total_supply(), 1_000);
}

#[test]
#[should_panic(expected = "Error(Contract, #801)")]
fn transfer_more_than_balance() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let alice = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin, "DAPP");

    token.mint(&alice, &100);
    token.transfer(&alice, &Address::generate(&env), &101);
}

#[test]
fn approve_and_transfer_from() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let alice = Address::generate(&env);
    let farm = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin, "LPT");

    token.mint(&alice, &1_000);
    token.approve(&alice, &farm, &300, &100);
    assert_eq!(token.allowance(&alice, &farm), 300);

    token.transfer_from(&farm, &alice, &farm, &200);

    assert_eq!(token.allowance(&alice, &farm), 100);
    assert_eq!(token.balance(&alice), 800);
    assert_eq!(token.balance(&farm), 200);
}

#[test]
#[should_panic(expected = "Error(Contract, #802)")]
fn transfer_from_without_allowance() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let alice = Address::generate(&env);
    let farm = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin, "LPT");

    token.mint(&alice, &1_000);
    token.approve(&alice, &farm, &100, &100);

    token.transfer_from(&farm, &alice, &farm, &101);
}

#[test]
fn allowance_expires() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let alice = Address::generate(&env);
    let farm = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin, "LPT");

    token.approve(&alice, &farm, &100, &10);
    assert_eq!(token.allowance(&alice, &farm), 100);

    env.ledger().with_mut(|li| li.sequence_number = 11);
    assert_eq!(token.allowance(&alice, &farm), 0);
}

#[test]
#[should_panic(expected = "Error(Contract, #803)")]
fn approve_with_expiration_in_the_past() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin, "LPT");

    env.ledger().with_mut(|li| li.sequence_number = 20);
    token.approve(&Address::generate(&env), &Address::generate(&env), &100, &10);
}

#[test]
fn burn_reduces_supply() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let alice = Address::generate(&env);
    let spender = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin, "DAPP");

    token.mint(&alice, &1_000);
    token.burn(&alice, &100);
    token.approve(&alice, &spender, &50, &100);
    token.burn_from(&spender, &alice, &50);

    assert_eq!(token.balance(&alice), 850);
    assert_eq!(token.total_supply(), 850);
}

#[test]
fn set_admin_hands_over_minting() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let farm = Address::generate(&env);
    let alice = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin, "DAPP");

    token.set_admin(&farm);
    assert_eq!(token.admin(), farm);

    token.mint(&alice, &10);
    assert_eq!(token.balance(&alice), 10);
}
