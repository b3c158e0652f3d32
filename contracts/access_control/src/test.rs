#![cfg(test)]

use super::*;
use soroban_sdk::{
    contract, contracterror, contractimpl, testutils::Address as _, Address, Env, Vec,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum HarnessError {
    Unauthorized = 1,
    LastSuperAdmin = 2,
}

impl From<AccessError> for HarnessError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthorized => HarnessError::Unauthorized,
            AccessError::LastSuperAdmin => HarnessError::LastSuperAdmin,
        }
    }
}

/// Minimal contract embedding the role sets.
#[contract]
pub struct RoleHarness;

#[contractimpl]
impl RoleHarness {
    pub fn init(env: Env, founder: Address) {
        enroll_founder(&env, &founder);
    }

    pub fn add_super_admin(env: Env, caller: Address, account: Address) -> Result<(), HarnessError> {
        Ok(crate::add_super_admin(&env, &caller, &account)?)
    }

    pub fn remove_super_admin(
        env: Env,
        caller: Address,
        account: Address,
    ) -> Result<(), HarnessError> {
        Ok(crate::remove_super_admin(&env, &caller, &account)?)
    }

    pub fn add_admin(env: Env, caller: Address, account: Address) -> Result<(), HarnessError> {
        Ok(crate::add_admin(&env, &caller, &account)?)
    }

    pub fn remove_admin(env: Env, caller: Address, account: Address) -> Result<(), HarnessError> {
        Ok(crate::remove_admin(&env, &caller, &account)?)
    }

    pub fn gate_admin(env: Env, caller: Address) -> Result<(), HarnessError> {
        Ok(require_admin(&env, &caller)?)
    }

    pub fn is_super_admin(env: Env, account: Address) -> bool {
        crate::is_super_admin(&env, &account)
    }

    pub fn is_admin(env: Env, account: Address) -> bool {
        crate::is_admin(&env, &account)
    }

    pub fn total_admins(env: Env) -> u32 {
        crate::total_admins(&env)
    }

    pub fn admin_for_index(env: Env, index: u32) -> Option<Address> {
        crate::admin_for_index(&env, index)
    }

    pub fn admins(env: Env) -> Vec<Address> {
        crate::admins(&env)
    }

    pub fn super_admins(env: Env) -> Vec<Address> {
        crate::super_admins(&env)
    }
}

fn setup() -> (Env, RoleHarnessClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(RoleHarness, ());
    let client = RoleHarnessClient::new(&env, &contract_id);

    let founder = Address::generate(&env);
    client.init(&founder);

    (env, client, founder)
}

#[test]
fn test_founder_is_super_admin() {
    let (_env, client, founder) = setup();

    assert!(client.is_super_admin(&founder));
    assert!(!client.is_admin(&founder));
    assert_eq!(client.super_admins().len(), 1);
}

#[test]
fn test_super_admin_passes_admin_gate() {
    let (env, client, founder) = setup();
    let outsider = Address::generate(&env);

    client.gate_admin(&founder);
    assert_eq!(
        client.try_gate_admin(&outsider),
        Err(Ok(HarnessError::Unauthorized))
    );
}

#[test]
fn test_admin_cannot_manage_roles() {
    let (env, client, founder) = setup();
    let admin = Address::generate(&env);
    let other = Address::generate(&env);

    client.add_admin(&founder, &admin);
    client.gate_admin(&admin);

    assert_eq!(
        client.try_add_super_admin(&admin, &admin),
        Err(Ok(HarnessError::Unauthorized))
    );
    assert_eq!(
        client.try_remove_super_admin(&admin, &founder),
        Err(Ok(HarnessError::Unauthorized))
    );
    assert_eq!(
        client.try_add_admin(&admin, &other),
        Err(Ok(HarnessError::Unauthorized))
    );
    assert_eq!(
        client.try_remove_admin(&admin, &admin),
        Err(Ok(HarnessError::Unauthorized))
    );

    assert!(!client.is_super_admin(&admin));
    assert!(client.is_super_admin(&founder));
    assert!(!client.is_admin(&other));
}

#[test]
fn test_last_super_admin_cannot_leave() {
    let (env, client, founder) = setup();

    assert_eq!(
        client.try_remove_super_admin(&founder, &founder),
        Err(Ok(HarnessError::LastSuperAdmin))
    );

    let second = Address::generate(&env);
    client.add_super_admin(&founder, &second);
    client.remove_super_admin(&second, &founder);

    assert!(!client.is_super_admin(&founder));
    assert!(client.is_super_admin(&second));
}

#[test]
fn test_enumeration_skips_removed_members() {
    let (env, client, founder) = setup();
    let first = Address::generate(&env);
    let second = Address::generate(&env);

    client.add_admin(&founder, &first);
    client.add_admin(&founder, &second);
    client.remove_admin(&founder, &first);

    // Index keeps the removed entry; the active view does not.
    assert_eq!(client.total_admins(), 2);
    assert_eq!(client.admin_for_index(&0), Some(first.clone()));
    assert!(!client.is_admin(&first));
    assert_eq!(client.admins(), Vec::from_array(&env, [second.clone()]));

    // Re-adding reuses the existing index entry.
    client.add_admin(&founder, &first);
    assert_eq!(client.total_admins(), 2);
    assert_eq!(client.admins(), Vec::from_array(&env, [first, second]));
    assert_eq!(client.admin_for_index(&5), None);
}
