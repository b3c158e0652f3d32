//! Client interfaces for the contracts the token logic runs on.
//!
//! Declared as traits rather than importing the contract crates so the token
//! wasm does not link their entry points.

use soroban_sdk::{contractclient, Address, Bytes, BytesN, Env};

#[allow(dead_code)]
#[contractclient(name = "RegistryClient")]
pub trait Registry {
    fn storage_for_hash(env: Env, hash: BytesN<32>) -> Option<Address>;
}

#[allow(dead_code)]
#[contractclient(name = "ExternalStorageClient")]
pub trait ExternalStorage {
    fn get_uint(env: Env, key: BytesN<32>) -> u128;
    fn set_uint(env: Env, caller: Address, key: BytesN<32>, value: u128);
    fn get_int(env: Env, key: BytesN<32>) -> i128;
    fn set_int(env: Env, caller: Address, key: BytesN<32>, value: i128);
    fn get_address(env: Env, key: BytesN<32>) -> Option<Address>;
    fn set_address(env: Env, caller: Address, key: BytesN<32>, value: Address);
    fn get_bytes(env: Env, key: BytesN<32>) -> Bytes;
    fn set_bytes(env: Env, caller: Address, key: BytesN<32>, value: Bytes);
    fn get_bool(env: Env, key: BytesN<32>) -> bool;
    fn set_bool(env: Env, caller: Address, key: BytesN<32>, value: bool);
}

#[allow(dead_code)]
#[contractclient(name = "LedgerClient")]
pub trait Ledger {
    fn mint_tokens(env: Env, caller: Address, amount: i128);
    fn credit_account(env: Env, caller: Address, account: Address, amount: i128);
    fn debit_account(env: Env, caller: Address, account: Address, amount: i128);
    fn transfer(env: Env, caller: Address, from: Address, to: Address, amount: i128);
    fn balance_of(env: Env, account: Address) -> i128;
    fn total_tokens(env: Env) -> i128;
    fn total_in_circulation(env: Env) -> i128;
}
