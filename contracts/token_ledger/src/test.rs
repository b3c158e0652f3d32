#![cfg(test)]

use super::*;
use soroban_sdk::{testutils::Address as _, Address, Env};

fn setup() -> (Env, TokenLedgerClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(TokenLedger, ());
    let client = TokenLedgerClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner);

    (env, client, owner)
}

fn sum_of_balances(client: &TokenLedgerClient) -> i128 {
    let mut sum = 0;
    for i in 0..client.ledger_count() {
        let account = client.account_for_index(&i).unwrap();
        sum += client.balance_of(&account);
    }
    sum
}

#[test]
fn test_initialize() {
    let (_env, client, owner) = setup();

    assert!(client.is_super_admin(&owner));
    assert_eq!(
        client.try_initialize(&owner),
        Err(Ok(Error::AlreadyInitialized))
    );
}

#[test]
fn test_mint_fills_unissued_pool() {
    let (_env, client, owner) = setup();

    client.mint_tokens(&owner, &100);

    assert_eq!(client.total_tokens(), 100);
    assert_eq!(client.total_in_circulation(), 0);
    assert_eq!(client.unissued(), 100);
}

#[test]
fn test_mint_requires_super_admin() {
    let (env, client, owner) = setup();
    let admin = Address::generate(&env);
    client.add_admin(&owner, &admin);

    assert_eq!(
        client.try_mint_tokens(&admin, &100),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(
        client.try_mint_tokens(&owner, &0),
        Err(Ok(Error::InvalidAmount))
    );
    assert_eq!(client.total_tokens(), 0);
}

#[test]
fn test_credit_and_debit() {
    let (env, client, owner) = setup();
    let logic = Address::generate(&env);
    let user = Address::generate(&env);

    client.mint_tokens(&owner, &100);
    client.add_admin(&owner, &logic);

    client.credit_account(&logic, &user, &30);
    assert_eq!(client.balance_of(&user), 30);
    assert_eq!(client.total_in_circulation(), 30);

    client.debit_account(&logic, &user, &10);
    assert_eq!(client.balance_of(&user), 20);
    assert_eq!(client.total_in_circulation(), 20);
    assert_eq!(client.total_tokens(), 100);
}

#[test]
fn test_credit_cannot_exceed_unissued() {
    let (env, client, owner) = setup();
    let user = Address::generate(&env);

    client.mint_tokens(&owner, &10);
    client.credit_account(&owner, &user, &8);

    assert_eq!(
        client.try_credit_account(&owner, &user, &3),
        Err(Ok(Error::ExceedsUnissuedSupply))
    );
    assert_eq!(client.balance_of(&user), 8);
    assert_eq!(client.total_in_circulation(), 8);
}

#[test]
fn test_debit_underflow_fails() {
    let (env, client, owner) = setup();
    let user = Address::generate(&env);

    client.mint_tokens(&owner, &10);
    client.credit_account(&owner, &user, &5);

    assert_eq!(
        client.try_debit_account(&owner, &user, &6),
        Err(Ok(Error::InsufficientBalance))
    );
    assert_eq!(client.balance_of(&user), 5);
}

#[test]
fn test_account_mutation_requires_admin() {
    let (env, client, owner) = setup();
    let outsider = Address::generate(&env);

    client.mint_tokens(&owner, &10);

    assert_eq!(
        client.try_credit_account(&outsider, &outsider, &5),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(
        client.try_debit_account(&outsider, &owner, &1),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(client.total_in_circulation(), 0);
}

#[test]
fn test_transfer_preserves_circulation() {
    let (env, client, owner) = setup();
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);

    client.mint_tokens(&owner, &100);
    client.credit_account(&owner, &alice, &40);

    client.transfer(&owner, &alice, &bob, &15);

    assert_eq!(client.balance_of(&alice), 25);
    assert_eq!(client.balance_of(&bob), 15);
    assert_eq!(client.total_in_circulation(), 40);

    assert_eq!(
        client.try_transfer(&owner, &bob, &alice, &16),
        Err(Ok(Error::InsufficientBalance))
    );
}

#[test]
fn test_balances_sum_to_circulation() {
    let (env, client, owner) = setup();
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let carol = Address::generate(&env);

    client.mint_tokens(&owner, &1_000);
    client.credit_account(&owner, &alice, &300);
    client.credit_account(&owner, &bob, &200);
    client.transfer(&owner, &alice, &carol, &120);
    client.debit_account(&owner, &bob, &200);
    client.credit_account(&owner, &carol, &5);

    assert_eq!(client.ledger_count(), 3);
    assert_eq!(client.balance_of(&bob), 0);
    assert_eq!(sum_of_balances(&client), client.total_in_circulation());
    assert!(client.total_in_circulation() <= client.total_tokens());
    assert_eq!(client.unissued(), 1_000 - 305);
}

#[test]
fn test_holder_index_uses_one_entry_per_slot() {
    let (env, client, owner) = setup();
    client.mint_tokens(&owner, &1_000);

    let mut holders = soroban_sdk::Vec::new(&env);
    for _ in 0..50 {
        let holder = Address::generate(&env);
        client.credit_account(&owner, &holder, &1);
        holders.push_back(holder);
    }

    // Repeat credits and debits to zero do not re-append
    let first = holders.get(0).unwrap();
    client.credit_account(&owner, &first, &4);
    client.debit_account(&owner, &first, &5);

    assert_eq!(client.ledger_count(), 50);
    for i in 0..50 {
        assert_eq!(client.account_for_index(&i), holders.get(i));
    }
    assert_eq!(client.account_for_index(&50), None);

    env.as_contract(&client.address, || {
        assert_eq!(storage::account_count(&env), 50);
        assert_eq!(storage::account_at(&env, 49), holders.get(49));
        assert!(env
            .storage()
            .persistent()
            .has(&storage::DataKey::AccountAt(0)));
    });
    assert_eq!(sum_of_balances(&client), client.total_in_circulation());
}
