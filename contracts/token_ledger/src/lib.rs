#![no_std]

//! # Token Ledger
//!
//! Accounting engine behind the token logic. Tracks per-account balances, the
//! total ever minted (`total_tokens`) and the amount held by accounts
//! (`total_in_circulation`). Minted tokens enter an unissued pool; credits draw
//! from it and debits return to it.
//!
//! Invariants kept by every entry point:
//! - `total_in_circulation <= total_tokens`
//! - the sum of all balances equals `total_in_circulation`

mod error;
mod events;
mod storage;

pub use error::Error;

use events::{CreditEvent, DebitEvent, MintEvent, TransferEvent};

use soroban_sdk::{contract, contractimpl, log, Address, Env, Symbol, Vec};

#[contract]
pub struct TokenLedger;

#[contractimpl]
impl TokenLedger {
    /// Initialize the ledger with its founding super-admin
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

        log!(&env, "ledger initialized", owner);
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
    // SUPPLY
    // ============================================

    /// Add `amount` to the unissued pool (super-admin only)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not a super-admin
    /// - `InvalidAmount`: Amount <= 0 or total overflow
    pub fn mint_tokens(env: Env, caller: Address, amount: i128) -> Result<(), Error> {
        Self::check_initialized(&env)?;
        access_control::require_super_admin(&env, &caller)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let total_tokens = storage::total_tokens(&env)
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;
        storage::set_total_tokens(&env, total_tokens);

        env.events().publish(
            (Symbol::new(&env, "mint"),),
            MintEvent {
                amount,
                total_tokens,
            },
        );

        Ok(())
    }

    // ============================================
    // ACCOUNTS (ADMIN)
    // ============================================

    /// Move `amount` from the unissued pool into `account`
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller lacks admin rights
    /// - `InvalidAmount`: Amount <= 0
    /// - `ExceedsUnissuedSupply`: Not enough unissued tokens
    pub fn credit_account(
        env: Env,
        caller: Address,
        account: Address,
        amount: i128,
    ) -> Result<(), Error> {
        Self::check_initialized(&env)?;
        access_control::require_admin(&env, &caller)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let circulation = storage::total_in_circulation(&env)
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;
        if circulation > storage::total_tokens(&env) {
            return Err(Error::ExceedsUnissuedSupply);
        }

        let new_balance = storage::balance(&env, &account)
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;

        storage::set_balance(&env, &account, new_balance);
        storage::set_total_in_circulation(&env, circulation);

        env.events().publish(
            (Symbol::new(&env, "credit"), account.clone()),
            CreditEvent { account, amount },
        );

        Ok(())
    }

    /// Return `amount` from `account` to the unissued pool
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller lacks admin rights
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientBalance`: Not enough balance
    pub fn debit_account(
        env: Env,
        caller: Address,
        account: Address,
        amount: i128,
    ) -> Result<(), Error> {
        Self::check_initialized(&env)?;
        access_control::require_admin(&env, &caller)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let current_balance = storage::balance(&env, &account);
        if current_balance < amount {
            return Err(Error::InsufficientBalance);
        }

        storage::set_balance(&env, &account, current_balance - amount);
        storage::set_total_in_circulation(&env, storage::total_in_circulation(&env) - amount);

        env.events().publish(
            (Symbol::new(&env, "debit"), account.clone()),
            DebitEvent { account, amount },
        );

        Ok(())
    }

    /// Move `amount` between accounts in one step; circulation is unchanged
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller lacks admin rights
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientBalance`: Not enough balance
    pub fn transfer(
        env: Env,
        caller: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        Self::check_initialized(&env)?;
        access_control::require_admin(&env, &caller)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let from_balance = storage::balance(&env, &from);
        if from_balance < amount {
            return Err(Error::InsufficientBalance);
        }

        if from != to {
            let new_to_balance = storage::balance(&env, &to)
                .checked_add(amount)
                .ok_or(Error::InvalidAmount)?;

            storage::set_balance(&env, &from, from_balance - amount);
            storage::set_balance(&env, &to, new_to_balance);
        }

        env.events().publish(
            (Symbol::new(&env, "transfer"), from.clone(), to.clone()),
            TransferEvent { from, to, amount },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn balance_of(env: Env, account: Address) -> i128 {
        storage::balance(&env, &account)
    }

    pub fn total_tokens(env: Env) -> i128 {
        storage::total_tokens(&env)
    }

    pub fn total_in_circulation(env: Env) -> i128 {
        storage::total_in_circulation(&env)
    }

    /// Tokens minted but not held by any account
    pub fn unissued(env: Env) -> i128 {
        storage::total_tokens(&env) - storage::total_in_circulation(&env)
    }

    /// Number of accounts that have ever held a balance
    pub fn ledger_count(env: Env) -> u32 {
        storage::account_count(&env)
    }

    pub fn account_for_index(env: Env, index: u32) -> Option<Address> {
        storage::account_at(&env, index)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn check_initialized(env: &Env) -> Result<(), Error> {
        if !storage::is_initialized(env) {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test;
