#![cfg(test)]

use super::*;
use soroban_sdk::{contract, contractimpl, contracttype, testutils::Address as _, Address, Bytes, Env};

// Mock token logic recording the handshake calls it receives
#[contracttype]
#[derive(Clone)]
enum MockKey {
    Successor,
    Predecessor,
}

#[contract]
pub struct MockUpgradeable;

#[contractimpl]
impl MockUpgradeable {
    pub fn upgrade_to(env: Env, caller: Address, successor: Address) {
        caller.require_auth();
        env.storage().instance().set(&MockKey::Successor, &successor);
    }

    pub fn upgraded_from(env: Env, caller: Address, predecessor: Address) {
        caller.require_auth();
        env.storage()
            .instance()
            .set(&MockKey::Predecessor, &predecessor);
    }

    pub fn successor(env: Env) -> Option<Address> {
        env.storage().instance().get(&MockKey::Successor)
    }

    pub fn predecessor(env: Env) -> Option<Address> {
        env.storage().instance().get(&MockKey::Predecessor)
    }
}

fn setup() -> (Env, NameRegistryClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(NameRegistry, ());
    let client = NameRegistryClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner);

    (env, client, owner)
}

#[test]
fn test_initialize_twice_fails() {
    let (_env, client, owner) = setup();

    assert!(client.is_super_admin(&owner));
    assert_eq!(
        client.try_initialize(&owner),
        Err(Ok(Error::AlreadyInitialized))
    );
}

#[test]
fn test_register_and_resolve() {
    let (env, client, owner) = setup();
    let token = Address::generate(&env);
    let ledger = Address::generate(&env);

    let name = Bytes::from_slice(&env, b"cst");
    let ledger_name = Bytes::from_slice(&env, b"cstLedger");

    let token_hash = client.add_administrated_contract(&owner, &name, &token);
    let ledger_hash = client.add_storage(&owner, &ledger_name, &ledger);

    assert_eq!(token_hash, client.hash_name(&name));
    assert_eq!(
        token_hash,
        env.crypto().keccak256(&name).to_bytes()
    );
    assert_eq!(client.contract_for_hash(&token_hash), Some(token.clone()));
    assert_eq!(client.storage_for_hash(&ledger_hash), Some(ledger.clone()));
    assert_eq!(client.contract_for_name(&name), Some(token));
    assert_eq!(client.storage_for_name(&ledger_name), Some(ledger));

    let entry = client.get_entry(&EntryKind::Contract, &token_hash).unwrap();
    assert_eq!(entry.name, name);
}

#[test]
fn test_unknown_hash_is_unresolved() {
    let (env, client, owner) = setup();
    let token = Address::generate(&env);
    let name = Bytes::from_slice(&env, b"cst");

    let hash = client.add_administrated_contract(&owner, &name, &token);

    // Contracts and storages are separate namespaces
    assert_eq!(client.storage_for_hash(&hash), None);
    assert_eq!(
        client.contract_for_name(&Bytes::from_slice(&env, b"missing")),
        None
    );
}

#[test]
fn test_overwrite_keeps_single_index_entry() {
    let (env, client, owner) = setup();
    let first = Address::generate(&env);
    let second = Address::generate(&env);
    let name = Bytes::from_slice(&env, b"cstStorage");

    let hash = client.add_storage(&owner, &name, &first);
    client.add_storage(&owner, &name, &second);

    assert_eq!(client.storage_for_hash(&hash), Some(second));
    assert_eq!(client.total_entries(&EntryKind::Storage), 1);
    assert_eq!(client.entry_hash_for_index(&EntryKind::Storage, &0), Some(hash));
    assert_eq!(client.total_entries(&EntryKind::Contract), 0);
}

#[test]
fn test_registration_requires_admin() {
    let (env, client, owner) = setup();
    let admin = Address::generate(&env);
    let outsider = Address::generate(&env);
    let target = Address::generate(&env);
    let name = Bytes::from_slice(&env, b"cst");

    assert_eq!(
        client.try_add_administrated_contract(&outsider, &name, &target),
        Err(Ok(Error::Unauthorized))
    );

    client.add_admin(&owner, &admin);
    client.add_administrated_contract(&admin, &name, &target);

    // Admins cannot grow the admin set
    assert_eq!(
        client.try_add_admin(&admin, &outsider),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(
        client.try_add_super_admin(&admin, &admin),
        Err(Ok(Error::Unauthorized))
    );
}

#[test]
fn test_upgrade_contract_links_both_sides() {
    let (env, client, owner) = setup();
    let old_id = env.register(MockUpgradeable, ());
    let new_id = env.register(MockUpgradeable, ());
    let old = MockUpgradeableClient::new(&env, &old_id);
    let new = MockUpgradeableClient::new(&env, &new_id);

    let name = Bytes::from_slice(&env, b"cst");
    client.add_administrated_contract(&owner, &name, &old_id);

    let predecessor = client.upgrade_contract(&owner, &name, &new_id);

    assert_eq!(predecessor, old_id);
    assert_eq!(old.successor(), Some(new_id.clone()));
    assert_eq!(new.predecessor(), Some(old_id));
    assert_eq!(client.contract_for_name(&name), Some(new_id.clone()));

    assert_eq!(
        client.try_upgrade_contract(&owner, &name, &new_id),
        Err(Ok(Error::InvalidSuccessor))
    );
}

#[test]
fn test_upgrade_unknown_name_fails() {
    let (env, client, owner) = setup();
    let successor = Address::generate(&env);

    assert_eq!(
        client.try_upgrade_contract(&owner, &Bytes::from_slice(&env, b"nope"), &successor),
        Err(Ok(Error::ContractNotFound))
    );
}
