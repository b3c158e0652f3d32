#![no_std]

//! # External Storage
//!
//! Generic key-value persistence shared by successive token logic versions.
//! Keys are arbitrary 32-byte hashes chosen by the writer. Writes are limited
//! to the store's admins; a new logic version gains write access by being
//! enrolled as an admin here. Reads are open to anyone.
//!
//! Cells are typed. A key keeps the type of its first write. Writing another
//! type to it, or reading it through another accessor, fails with
//! `TypeMismatch`. Reading a key that was never written yields the type's
//! zero value (`None` for addresses). Cells are never deleted, only
//! overwritten.

mod error;
mod events;
mod storage;

pub use error::Error;
pub use storage::{Cell, CellKind};

use events::CellWrittenEvent;

use soroban_sdk::{contract, contractimpl, log, Address, Bytes, BytesN, Env, Symbol, Vec};

#[contract]
pub struct ExternalStorage;

#[contractimpl]
impl ExternalStorage {
    /// Initialize the store with its founding super-admin
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

        log!(&env, "external storage initialized", owner);
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
    // WRITES (ADMIN)
    // ============================================

    pub fn set_uint(env: Env, caller: Address, key: BytesN<32>, value: u128) -> Result<(), Error> {
        Self::write(&env, &caller, key, Cell::Uint(value))
    }

    pub fn set_int(env: Env, caller: Address, key: BytesN<32>, value: i128) -> Result<(), Error> {
        Self::write(&env, &caller, key, Cell::Int(value))
    }

    pub fn set_address(
        env: Env,
        caller: Address,
        key: BytesN<32>,
        value: Address,
    ) -> Result<(), Error> {
        Self::write(&env, &caller, key, Cell::Address(value))
    }

    pub fn set_bytes32(
        env: Env,
        caller: Address,
        key: BytesN<32>,
        value: BytesN<32>,
    ) -> Result<(), Error> {
        Self::write(&env, &caller, key, Cell::Bytes32(value))
    }

    pub fn set_bytes(env: Env, caller: Address, key: BytesN<32>, value: Bytes) -> Result<(), Error> {
        Self::write(&env, &caller, key, Cell::Bytes(value))
    }

    pub fn set_bool(env: Env, caller: Address, key: BytesN<32>, value: bool) -> Result<(), Error> {
        Self::write(&env, &caller, key, Cell::Bool(value))
    }

    // ============================================
    // READS
    // ============================================

    pub fn get_uint(env: Env, key: BytesN<32>) -> Result<u128, Error> {
        match storage::get_cell(&env, &key) {
            None => Ok(0),
            Some(Cell::Uint(value)) => Ok(value),
            Some(_) => Err(Error::TypeMismatch),
        }
    }

    pub fn get_int(env: Env, key: BytesN<32>) -> Result<i128, Error> {
        match storage::get_cell(&env, &key) {
            None => Ok(0),
            Some(Cell::Int(value)) => Ok(value),
            Some(_) => Err(Error::TypeMismatch),
        }
    }

    /// `None` when the key was never written
    pub fn get_address(env: Env, key: BytesN<32>) -> Result<Option<Address>, Error> {
        match storage::get_cell(&env, &key) {
            None => Ok(None),
            Some(Cell::Address(value)) => Ok(Some(value)),
            Some(_) => Err(Error::TypeMismatch),
        }
    }

    pub fn get_bytes32(env: Env, key: BytesN<32>) -> Result<BytesN<32>, Error> {
        match storage::get_cell(&env, &key) {
            None => Ok(BytesN::from_array(&env, &[0u8; 32])),
            Some(Cell::Bytes32(value)) => Ok(value),
            Some(_) => Err(Error::TypeMismatch),
        }
    }

    pub fn get_bytes(env: Env, key: BytesN<32>) -> Result<Bytes, Error> {
        match storage::get_cell(&env, &key) {
            None => Ok(Bytes::new(&env)),
            Some(Cell::Bytes(value)) => Ok(value),
            Some(_) => Err(Error::TypeMismatch),
        }
    }

    pub fn get_bool(env: Env, key: BytesN<32>) -> Result<bool, Error> {
        match storage::get_cell(&env, &key) {
            None => Ok(false),
            Some(Cell::Bool(value)) => Ok(value),
            Some(_) => Err(Error::TypeMismatch),
        }
    }

    /// Type held by `key`, `None` if never written
    pub fn kind_of(env: Env, key: BytesN<32>) -> Option<CellKind> {
        storage::get_cell(&env, &key).map(|cell| cell.kind())
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn write(env: &Env, caller: &Address, key: BytesN<32>, cell: Cell) -> Result<(), Error> {
        if !storage::is_initialized(env) {
            return Err(Error::NotInitialized);
        }
        access_control::require_admin(env, caller)?;

        let kind = cell.kind();
        if let Some(existing) = storage::get_cell(env, &key) {
            if existing.kind() != kind {
                return Err(Error::TypeMismatch);
            }
        }

        storage::set_cell(env, &key, &cell);

        env.events().publish(
            (Symbol::new(env, "cell_written"), key.clone()),
            CellWrittenEvent {
                key,
                kind,
                writer: caller.clone(),
            },
        );

        Ok(())
    }
}
