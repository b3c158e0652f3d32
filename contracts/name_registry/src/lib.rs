#![no_std]

//! # Name Registry
//!
//! Maps `keccak256(name)` to the address currently serving that name. Token
//! logic is registered as an administrated contract; the external storage and
//! ledger it runs on are registered as storages. Replacing the token behind a
//! name is how logic is upgraded while the storages stay put.
//!
//! Lookups that miss return `None`. Callers must treat `None` as "unresolved".

mod error;
mod events;
mod interfaces;
mod storage;

pub use error::Error;
pub use storage::{EntryKind, RegistryEntry};

use events::{ContractUpgradedEvent, EntryRegisteredEvent};
use interfaces::UpgradeableClient;

use soroban_sdk::{contract, contractimpl, log, Address, Bytes, BytesN, Env, Symbol, Vec};

#[contract]
pub struct NameRegistry;

#[contractimpl]
impl NameRegistry {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Initialize the registry with its founding super-admin
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, owner: Address) -> Result<(), Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        owner.require_auth();

        storage::set_initialized(&env);
        access_control::enroll_founder(&env, &owner);

        log!(&env, "registry initialized", owner);
        Ok(())
    }

    // ============================================
    // ROLES
    // ============================================

    pub fn add_super_admin(env: Env, caller: Address, account: Address) -> Result<(), Error> {
        Ok(access_control::add_super_admin(&env, &caller, &account)?)
    }

    pub fn remove_super_admin(env: Env, caller: Address, account: Address) -> Result<(), Error> {
        Ok(access_control::remove_super_admin(&env, &caller, &account)?)
    }

    pub fn add_admin(env: Env, caller: Address, account: Address) -> Result<(), Error> {
        Ok(access_control::add_admin(&env, &caller, &account)?)
    }

    pub fn remove_admin(env: Env, caller: Address, account: Address) -> Result<(), Error> {
        Ok(access_control::remove_admin(&env, &caller, &account)?)
    }

    pub fn is_super_admin(env: Env, account: Address) -> bool {
        access_control::is_super_admin(&env, &account)
    }

    pub fn is_admin(env: Env, account: Address) -> bool {
        access_control::is_admin(&env, &account)
    }

    pub fn total_super_admins(env: Env) -> u32 {
        access_control::total_super_admins(&env)
    }

    pub fn total_admins(env: Env) -> u32 {
        access_control::total_admins(&env)
    }

    pub fn super_admin_for_index(env: Env, index: u32) -> Option<Address> {
        access_control::super_admin_for_index(&env, index)
    }

    pub fn admin_for_index(env: Env, index: u32) -> Option<Address> {
        access_control::admin_for_index(&env, index)
    }

    pub fn super_admins(env: Env) -> Vec<Address> {
        access_control::super_admins(&env)
    }

    pub fn admins(env: Env) -> Vec<Address> {
        access_control::admins(&env)
    }

    // ============================================
    // REGISTRATION (ADMIN)
    // ============================================

    /// Register or overwrite the contract serving `name`
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller lacks admin rights
    pub fn add_administrated_contract(
        env: Env,
        caller: Address,
        name: Bytes,
        address: Address,
    ) -> Result<BytesN<32>, Error> {
        Self::register_entry(&env, &caller, EntryKind::Contract, name, address)
    }

    /// Register or overwrite the storage serving `name`
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller lacks admin rights
    pub fn add_storage(
        env: Env,
        caller: Address,
        name: Bytes,
        address: Address,
    ) -> Result<BytesN<32>, Error> {
        Self::register_entry(&env, &caller, EntryKind::Storage, name, address)
    }

    /// Atomically retire the contract registered under `name` in favour of
    /// `successor`: `upgrade_to` on the old instance, `upgraded_from` on the
    /// new one, then repoint the name. The registry must be an admin of both
    /// instances.
    ///
    /// Returns the predecessor address.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller lacks admin rights
    /// - `ContractNotFound`: Nothing registered under `name`
    /// - `InvalidSuccessor`: `successor` is already the registered instance
    pub fn upgrade_contract(
        env: Env,
        caller: Address,
        name: Bytes,
        successor: Address,
    ) -> Result<Address, Error> {
        if !storage::is_initialized(&env) {
            return Err(Error::NotInitialized);
        }
        access_control::require_admin(&env, &caller)?;

        let hash = storage::hash_name(&env, &name);
        let mut entry = storage::get_entry(&env, EntryKind::Contract, &hash)
            .ok_or(Error::ContractNotFound)?;

        let predecessor = entry.address.clone();
        if predecessor == successor {
            return Err(Error::InvalidSuccessor);
        }

        let registry = env.current_contract_address();
        UpgradeableClient::new(&env, &predecessor).upgrade_to(&registry, &successor);
        UpgradeableClient::new(&env, &successor).upgraded_from(&registry, &predecessor);

        entry.address = successor.clone();
        storage::put_entry(&env, EntryKind::Contract, &entry);

        log!(&env, "registry upgraded contract", predecessor, successor);
        env.events().publish(
            (Symbol::new(&env, "contract_upgraded"), hash),
            ContractUpgradedEvent {
                name,
                predecessor: predecessor.clone(),
                successor,
            },
        );

        Ok(predecessor)
    }

    // ============================================
    // LOOKUPS
    // ============================================

    pub fn hash_name(env: Env, name: Bytes) -> BytesN<32> {
        storage::hash_name(&env, &name)
    }

    /// Address of the contract registered under `hash`, `None` on miss
    pub fn contract_for_hash(env: Env, hash: BytesN<32>) -> Option<Address> {
        storage::get_entry(&env, EntryKind::Contract, &hash).map(|entry| entry.address)
    }

    /// Address of the storage registered under `hash`, `None` on miss
    pub fn storage_for_hash(env: Env, hash: BytesN<32>) -> Option<Address> {
        storage::get_entry(&env, EntryKind::Storage, &hash).map(|entry| entry.address)
    }

    pub fn contract_for_name(env: Env, name: Bytes) -> Option<Address> {
        let hash = storage::hash_name(&env, &name);
        Self::contract_for_hash(env, hash)
    }

    pub fn storage_for_name(env: Env, name: Bytes) -> Option<Address> {
        let hash = storage::hash_name(&env, &name);
        Self::storage_for_hash(env, hash)
    }

    pub fn get_entry(env: Env, kind: EntryKind, hash: BytesN<32>) -> Option<RegistryEntry> {
        storage::get_entry(&env, kind, &hash)
    }

    pub fn total_entries(env: Env, kind: EntryKind) -> u32 {
        storage::entry_hashes(&env, kind).len()
    }

    pub fn entry_hash_for_index(env: Env, kind: EntryKind, index: u32) -> Option<BytesN<32>> {
        storage::entry_hashes(&env, kind).get(index)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn register_entry(
        env: &Env,
        caller: &Address,
        kind: EntryKind,
        name: Bytes,
        address: Address,
    ) -> Result<BytesN<32>, Error> {
        if !storage::is_initialized(env) {
            return Err(Error::NotInitialized);
        }
        access_control::require_admin(env, caller)?;

        let hash = storage::hash_name(env, &name);
        let entry = RegistryEntry {
            name,
            hash: hash.clone(),
            address,
        };
        storage::put_entry(env, kind, &entry);

        let topic = match kind {
            EntryKind::Contract => "contract_registered",
            EntryKind::Storage => "storage_registered",
        };
        env.events().publish(
            (Symbol::new(env, topic), hash.clone()),
            EntryRegisteredEvent {
                name: entry.name,
                hash: entry.hash,
                address: entry.address,
            },
        );

        Ok(hash)
    }
}

#[cfg(test)]
mod test;
