#![no_std]

//! # Upgradeable Token
//!
//! Token logic that keeps none of the holder-facing state itself. Balances and
//! supply live in a `token_ledger` instance; configuration, buyer lists,
//! frozen accounts and allowances live in an `external_storage` instance. Both
//! are resolved by name through a `name_registry` at initialization.
//!
//! Upgrading means deploying a new instance, enrolling it as admin of the same
//! ledger and storage, and running the handshake: `upgrade_to` on the old
//! instance, `upgraded_from` on the new one. The old instance is then
//! `Deprecated` for good; only `foundation_withdraw` and chain/role queries
//! still work on it.
//!
//! ## Payments
//! Value moves in the payment asset fixed at initialization. `buy` and
//! `foundation_deposit` pull from the caller, `sell` and `foundation_withdraw`
//! push from this contract. Internal accounting always happens before the
//! asset transfer.

mod error;
mod events;
mod interfaces;
mod pricing;
mod records;
mod storage;

pub use error::Error;
pub use records::TokenConfig;
pub use storage::Lifecycle;

use events::{
    AccountFlagEvent, ApprovalEvent, BackendUpdatedEvent, BuyEvent, ConfiguredEvent,
    CustomBuyerEvent, FlagChangedEvent, FoundationFundsEvent, GrantEvent, MintEvent, SellEvent,
    TransferEvent, UpgradedEvent, UpgradedFromEvent,
};
use interfaces::{LedgerClient, RegistryClient};
use records::Records;
use storage::DataKey;

use soroban_sdk::{
    contract, contractimpl, log, token, Address, Bytes, BytesN, Env, Symbol, Vec,
};

#[contract]
pub struct UpgradeableToken;

#[contractimpl]
impl UpgradeableToken {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Initialize the token instance
    ///
    /// # Arguments
    /// * `owner` - Founding super-admin
    /// * `registry` - Name registry used to resolve the backends
    /// * `storage_name` - Registry name of the external storage
    /// * `ledger_name` - Registry name of the ledger
    /// * `payment_asset` - Asset contract that buyers pay in
    ///
    /// The instance must separately be enrolled as admin of both backends
    /// (super-admin of the ledger to use `mint_tokens`) before any mutation.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `StorageNotResolved`: A backend name is not registered
    pub fn initialize(
        env: Env,
        owner: Address,
        registry: Address,
        storage_name: Bytes,
        ledger_name: Bytes,
        payment_asset: Address,
    ) -> Result<(), Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        owner.require_auth();

        let storage_address = Self::resolve_storage(&env, &registry, &storage_name)?;
        let ledger_address = Self::resolve_storage(&env, &registry, &ledger_name)?;

        storage::set_address(&env, &DataKey::Registry, &registry);
        storage::set_name(&env, &DataKey::StorageName, &storage_name);
        storage::set_name(&env, &DataKey::LedgerName, &ledger_name);
        storage::set_address(&env, &DataKey::StorageAddress, &storage_address);
        storage::set_address(&env, &DataKey::LedgerAddress, &ledger_address);
        storage::set_address(&env, &DataKey::PaymentAsset, &payment_asset);
        storage::set_lifecycle(&env, &Lifecycle::Active);
        storage::set_flag(&env, &DataKey::BuyerGating, true);
        storage::set_initialized(&env);

        access_control::enroll_founder(&env, &owner);

        log!(&env, "token initialized", owner, storage_address, ledger_address);
        Ok(())
    }

    // ============================================
    // ROLES
    // ============================================

    pub fn add_super_admin(env: Env, caller: Address, account: Address) -> Result<(), Error> {
        Self::require_active(&env)?;
        Ok(access_control::add_super_admin(&env, &caller, &account)?)
    }

    pub fn remove_super_admin(env: Env, caller: Address, account: Address) -> Result<(), Error> {
        Self::require_active(&env)?;
        Ok(access_control::remove_super_admin(&env, &caller, &account)?)
    }

    pub fn add_admin(env: Env, caller: Address, account: Address) -> Result<(), Error> {
        Self::require_active(&env)?;
        Ok(access_control::add_admin(&env, &caller, &account)?)
    }

    pub fn remove_admin(env: Env, caller: Address, account: Address) -> Result<(), Error> {
        Self::require_active(&env)?;
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
    // CONFIGURATION (SUPER-ADMIN)
    // ============================================

    /// Replace the business configuration wholesale and open a new sell cap
    /// window
    ///
    /// # Errors
    /// - `ContractDeprecated`: Instance has been upgraded
    /// - `Unauthorized`: Caller is not a super-admin
    /// - `InvalidAmount`: A price, cap or minimum balance is negative
    pub fn configure(env: Env, caller: Address, config: TokenConfig) -> Result<(), Error> {
        Self::require_active(&env)?;
        access_control::require_super_admin(&env, &caller)?;

        if config.buy_price < 0
            || config.sell_price < 0
            || config.sell_cap < 0
            || config.minimum_balance < 0
        {
            return Err(Error::InvalidAmount);
        }

        let records = Records::open(&env)?;
        records.set_config(&config);
        records.set_cap_sold(0);

        log!(&env, "token configured", config.buy_price, config.sell_cap);
        env.events().publish(
            (Symbol::new(&env, "configured"),),
            ConfiguredEvent {
                name: config.name,
                symbol: config.symbol,
                buy_price: config.buy_price,
                sell_price: config.sell_price,
                sell_cap: config.sell_cap,
                minimum_balance: config.minimum_balance,
                foundation: config.foundation,
            },
        );

        Ok(())
    }

    /// Repoint the ledger to whatever the registry now holds under
    /// `ledger_name`
    ///
    /// # Errors
    /// - `ContractDeprecated`: Instance has been upgraded
    /// - `Unauthorized`: Caller is not a super-admin
    /// - `StorageNotResolved`: Name is not registered
    pub fn update_ledger_storage(
        env: Env,
        caller: Address,
        ledger_name: Bytes,
    ) -> Result<Address, Error> {
        Self::require_active(&env)?;
        access_control::require_super_admin(&env, &caller)?;

        let registry = Self::registry_address(&env)?;
        let address = Self::resolve_storage(&env, &registry, &ledger_name)?;

        storage::set_name(&env, &DataKey::LedgerName, &ledger_name);
        storage::set_address(&env, &DataKey::LedgerAddress, &address);

        log!(&env, "ledger storage updated", address);
        env.events().publish(
            (Symbol::new(&env, "ledger_updated"),),
            BackendUpdatedEvent {
                address: address.clone(),
            },
        );

        Ok(address)
    }

    /// Repoint the external storage to whatever the registry now holds under
    /// `storage_name`
    ///
    /// # Errors
    /// - `ContractDeprecated`: Instance has been upgraded
    /// - `Unauthorized`: Caller is not a super-admin
    /// - `StorageNotResolved`: Name is not registered
    pub fn update_external_storage(
        env: Env,
        caller: Address,
        storage_name: Bytes,
    ) -> Result<Address, Error> {
        Self::require_active(&env)?;
        access_control::require_super_admin(&env, &caller)?;

        let registry = Self::registry_address(&env)?;
        let address = Self::resolve_storage(&env, &registry, &storage_name)?;

        storage::set_name(&env, &DataKey::StorageName, &storage_name);
        storage::set_address(&env, &DataKey::StorageAddress, &address);

        log!(&env, "external storage updated", address);
        env.events().publish(
            (Symbol::new(&env, "storage_updated"),),
            BackendUpdatedEvent {
                address: address.clone(),
            },
        );

        Ok(address)
    }

    // ============================================
    // BUY / SELL
    // ============================================

    /// Buy tokens by paying `value` of the payment asset
    ///
    /// The applicable price is the buyer's custom price if one is set, else
    /// the configured buy price. `value` must be an exact multiple of it;
    /// anything else is rejected whole.
    ///
    /// Returns the number of units credited.
    ///
    /// # Errors
    /// - `ContractDeprecated`: Instance has been upgraded
    /// - `TokenFrozen` / `PurchasesHalted` / `AccountFrozen`: Halted
    /// - `BuyerNotApproved`: Gating is on and the buyer is not approved
    /// - `InvalidAmount`: No price set, or value is not a whole number of units
    /// - `ExceedsSellCap`: Purchase exceeds what is left in the cap window
    /// - `ExceedsUnissuedSupply`: Not enough unissued tokens
    pub fn buy(env: Env, buyer: Address, value: i128) -> Result<i128, Error> {
        Self::require_active(&env)?;
        buyer.require_auth();

        if storage::get_flag(&env, &DataKey::FrozenToken) {
            return Err(Error::TokenFrozen);
        }
        if storage::get_flag(&env, &DataKey::HaltPurchase) {
            return Err(Error::PurchasesHalted);
        }

        let records = Records::open(&env)?;
        if records.is_frozen(&buyer) {
            return Err(Error::AccountFrozen);
        }
        if storage::get_flag(&env, &DataKey::BuyerGating) && !records.is_approved_buyer(&buyer) {
            return Err(Error::BuyerNotApproved);
        }

        let config = records.config();
        let price = records
            .custom_price(&buyer)?
            .unwrap_or(config.buy_price);
        let units = pricing::purchase_units(value, price).ok_or(Error::InvalidAmount)?;

        let sold = records.cap_sold();
        if units > pricing::cap_remaining(config.sell_cap, sold) {
            return Err(Error::ExceedsSellCap);
        }

        let ledger = Self::ledger(&env)?;
        if units > ledger.total_tokens() - ledger.total_in_circulation() {
            return Err(Error::ExceedsUnissuedSupply);
        }

        // Effects
        records.set_cap_sold(sold + units);
        ledger.credit_account(&env.current_contract_address(), &buyer, &units);

        // Interaction
        Self::payment(&env)?.transfer(&buyer, &env.current_contract_address(), &value);

        env.events().publish(
            (Symbol::new(&env, "buy"), buyer.clone()),
            BuyEvent {
                buyer,
                value,
                units,
                price,
            },
        );

        Ok(units)
    }

    /// Return `amount` units to the unissued pool for `amount * sell_price`
    ///
    /// Returns the payout.
    ///
    /// # Errors
    /// - `ContractDeprecated`: Instance has been upgraded
    /// - `TokenFrozen` / `AccountFrozen`: Halted
    /// - `InvalidAmount`: Amount <= 0, no sell price set, or payout overflow
    /// - `InsufficientBalance`: Seller holds fewer than `amount` units
    /// - `InsufficientReserve`: Payout would leave less than the minimum balance
    pub fn sell(env: Env, seller: Address, amount: i128) -> Result<i128, Error> {
        Self::require_active(&env)?;
        seller.require_auth();

        if storage::get_flag(&env, &DataKey::FrozenToken) {
            return Err(Error::TokenFrozen);
        }

        let records = Records::open(&env)?;
        if records.is_frozen(&seller) {
            return Err(Error::AccountFrozen);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let ledger = Self::ledger(&env)?;
        if ledger.balance_of(&seller) < amount {
            return Err(Error::InsufficientBalance);
        }

        let config = records.config();
        let payout = pricing::sale_payout(amount, config.sell_price).ok_or(Error::InvalidAmount)?;

        let payment = Self::payment(&env)?;
        let reserve = payment.balance(&env.current_contract_address());
        let remaining = reserve
            .checked_sub(payout)
            .ok_or(Error::InsufficientReserve)?;
        if remaining < config.minimum_balance {
            return Err(Error::InsufficientReserve);
        }

        // Effects
        ledger.debit_account(&env.current_contract_address(), &seller, &amount);

        // Interaction
        payment.transfer(&env.current_contract_address(), &seller, &payout);

        env.events().publish(
            (Symbol::new(&env, "sell"), seller.clone()),
            SellEvent {
                seller,
                units: amount,
                payout,
            },
        );

        Ok(payout)
    }

    // ============================================
    // TRANSFERS & ALLOWANCES
    // ============================================

    /// Move `amount` units from `from` to `to`
    ///
    /// # Errors
    /// - `ContractDeprecated`: Instance has been upgraded
    /// - `TokenFrozen` / `AccountFrozen`: Halted
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientBalance`: Not enough balance
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), Error> {
        Self::require_active(&env)?;
        from.require_auth();

        let records = Records::open(&env)?;
        Self::move_tokens(&env, &records, &from, &to, amount)
    }

    /// Move `amount` units from `from` to `to` on behalf of `spender`,
    /// consuming exactly `amount` of its allowance
    ///
    /// # Errors
    /// - `ContractDeprecated`: Instance has been upgraded
    /// - `TokenFrozen` / `AccountFrozen`: Halted
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientAllowance`: Allowance below `amount`
    /// - `InsufficientBalance`: Not enough balance
    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        Self::require_active(&env)?;
        spender.require_auth();

        let records = Records::open(&env)?;
        let allowance = records.allowance(&from, &spender);
        if amount > 0 && allowance < amount {
            return Err(Error::InsufficientAllowance);
        }

        Self::move_tokens(&env, &records, &from, &to, amount)?;
        records.set_allowance(&from, &spender, allowance - amount);

        Ok(())
    }

    /// Set the allowance of `spender` over `owner`'s tokens to exactly `amount`
    ///
    /// Overwrites any previous allowance, so a spender watching for the change
    /// can spend the old allowance first. Set to zero before changing it if
    /// that matters.
    ///
    /// # Errors
    /// - `ContractDeprecated`: Instance has been upgraded
    /// - `InvalidAmount`: Amount < 0
    pub fn approve(env: Env, owner: Address, spender: Address, amount: i128) -> Result<(), Error> {
        Self::require_active(&env)?;
        owner.require_auth();

        if amount < 0 {
            return Err(Error::InvalidAmount);
        }

        Records::open(&env)?.set_allowance(&owner, &spender, amount);

        env.events().publish(
            (Symbol::new(&env, "approval"), owner.clone(), spender.clone()),
            ApprovalEvent {
                owner,
                spender,
                amount,
            },
        );

        Ok(())
    }

    // ============================================
    // SUPPLY (ADMIN)
    // ============================================

    /// Give `amount` unissued units to `to` without payment
    ///
    /// # Errors
    /// - `ContractDeprecated`: Instance has been upgraded
    /// - `Unauthorized`: Caller lacks admin rights
    /// - `InvalidAmount`: Amount <= 0
    /// - `ExceedsUnissuedSupply`: Not enough unissued tokens
    pub fn grant_tokens(env: Env, caller: Address, to: Address, amount: i128) -> Result<(), Error> {
        Self::require_active(&env)?;
        access_control::require_admin(&env, &caller)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let ledger = Self::ledger(&env)?;
        if amount > ledger.total_tokens() - ledger.total_in_circulation() {
            return Err(Error::ExceedsUnissuedSupply);
        }

        ledger.credit_account(&env.current_contract_address(), &to, &amount);

        env.events().publish(
            (Symbol::new(&env, "grant"), to.clone()),
            GrantEvent { to, amount },
        );

        Ok(())
    }

    /// Mint `amount` into the ledger's unissued pool
    ///
    /// # Errors
    /// - `ContractDeprecated`: Instance has been upgraded
    /// - `Unauthorized`: Caller is not a super-admin
    /// - `InvalidAmount`: Amount <= 0 or total supply overflow
    pub fn mint_tokens(env: Env, caller: Address, amount: i128) -> Result<(), Error> {
        Self::require_active(&env)?;
        access_control::require_super_admin(&env, &caller)?;

        let ledger = Self::ledger(&env)?;
        if amount <= 0 || ledger.total_tokens().checked_add(amount).is_none() {
            return Err(Error::InvalidAmount);
        }

        ledger.mint_tokens(&env.current_contract_address(), &amount);

        env.events().publish(
            (Symbol::new(&env, "mint"),),
            MintEvent {
                amount,
                total_supply: ledger.total_tokens(),
            },
        );

        Ok(())
    }

    // ============================================
    // FREEZING & BUYER MANAGEMENT (ADMIN)
    // ============================================

    /// Halt or resume all transfers, purchases and sales
    pub fn freeze_token(env: Env, caller: Address, frozen: bool) -> Result<(), Error> {
        Self::set_instance_flag(&env, &caller, DataKey::FrozenToken, "token_frozen", frozen)
    }

    /// Halt or resume purchases only
    pub fn set_halt_purchase(env: Env, caller: Address, halted: bool) -> Result<(), Error> {
        Self::set_instance_flag(&env, &caller, DataKey::HaltPurchase, "purchase_halted", halted)
    }

    /// Require (`true`) or waive (`false`) buyer approval for purchases
    pub fn set_buyer_gating(env: Env, caller: Address, enabled: bool) -> Result<(), Error> {
        Self::set_instance_flag(&env, &caller, DataKey::BuyerGating, "buyer_gating", enabled)
    }

    pub fn freeze_account(
        env: Env,
        caller: Address,
        account: Address,
        frozen: bool,
    ) -> Result<(), Error> {
        Self::require_active(&env)?;
        access_control::require_admin(&env, &caller)?;

        Records::open(&env)?.set_frozen(&account, frozen)?;

        env.events().publish(
            (Symbol::new(&env, "account_frozen"), account.clone()),
            AccountFlagEvent {
                account,
                enabled: frozen,
            },
        );

        Ok(())
    }

    pub fn add_buyer(env: Env, caller: Address, buyer: Address) -> Result<(), Error> {
        Self::set_approved_buyer(&env, &caller, buyer, true)
    }

    pub fn remove_buyer(env: Env, caller: Address, buyer: Address) -> Result<(), Error> {
        Self::set_approved_buyer(&env, &caller, buyer, false)
    }

    /// Install or overwrite a per-buyer price override
    ///
    /// # Errors
    /// - `ContractDeprecated`: Instance has been upgraded
    /// - `Unauthorized`: Caller lacks admin rights
    /// - `InvalidAmount`: Price <= 0
    pub fn set_custom_buyer(
        env: Env,
        caller: Address,
        buyer: Address,
        price: i128,
    ) -> Result<(), Error> {
        Self::require_active(&env)?;
        access_control::require_admin(&env, &caller)?;

        if price <= 0 {
            return Err(Error::InvalidAmount);
        }

        Records::open(&env)?.set_custom_price(&buyer, price)?;

        env.events().publish(
            (Symbol::new(&env, "custom_buyer"), buyer.clone()),
            CustomBuyerEvent {
                buyer,
                price: Some(price),
            },
        );

        Ok(())
    }

    /// Drop a per-buyer price override. No-op if none is set.
    pub fn remove_custom_buyer(env: Env, caller: Address, buyer: Address) -> Result<(), Error> {
        Self::require_active(&env)?;
        access_control::require_admin(&env, &caller)?;

        if Records::open(&env)?.remove_custom_price(&buyer)? {
            env.events().publish(
                (Symbol::new(&env, "custom_buyer"), buyer.clone()),
                CustomBuyerEvent { buyer, price: None },
            );
        }

        Ok(())
    }

    // ============================================
    // FOUNDATION
    // ============================================

    /// Pay `amount` of the payment asset into this contract
    ///
    /// # Errors
    /// - `ContractDeprecated`: Instance has been upgraded
    /// - `Unauthorized`: Caller is not the configured foundation
    /// - `InvalidAmount`: Amount <= 0
    pub fn foundation_deposit(env: Env, caller: Address, amount: i128) -> Result<(), Error> {
        Self::require_active(&env)?;
        let foundation = Self::require_foundation(&env, &caller)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        Self::payment(&env)?.transfer(&foundation, &env.current_contract_address(), &amount);

        env.events().publish(
            (Symbol::new(&env, "foundation_deposit"),),
            FoundationFundsEvent { foundation, amount },
        );

        Ok(())
    }

    /// Withdraw `amount` of the payment asset to the foundation. Stays
    /// available after deprecation so a retired instance can be drained.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not the configured foundation
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientBalance`: Contract holds less than `amount`
    pub fn foundation_withdraw(env: Env, caller: Address, amount: i128) -> Result<(), Error> {
        Self::check_initialized(&env)?;
        let foundation = Self::require_foundation(&env, &caller)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let payment = Self::payment(&env)?;
        if payment.balance(&env.current_contract_address()) < amount {
            return Err(Error::InsufficientBalance);
        }

        payment.transfer(&env.current_contract_address(), &foundation, &amount);

        log!(&env, "foundation withdrawal", amount);
        env.events().publish(
            (Symbol::new(&env, "foundation_withdraw"),),
            FoundationFundsEvent { foundation, amount },
        );

        Ok(())
    }

    // ============================================
    // UPGRADE
    // ============================================

    /// Retire this instance in favour of `successor`. One-way and one-shot.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller lacks admin rights on this instance
    /// - `AlreadyUpgraded`: A successor is already recorded
    /// - `InvalidSuccessor`: `successor` is this instance
    pub fn upgrade_to(env: Env, caller: Address, successor: Address) -> Result<(), Error> {
        Self::check_initialized(&env)?;
        access_control::require_admin(&env, &caller)?;

        if let Lifecycle::Deprecated(_) = storage::lifecycle(&env) {
            return Err(Error::AlreadyUpgraded);
        }
        if successor == env.current_contract_address() {
            return Err(Error::InvalidSuccessor);
        }

        storage::set_lifecycle(&env, &Lifecycle::Deprecated(successor.clone()));

        log!(&env, "token deprecated", successor);
        env.events().publish(
            (Symbol::new(&env, "upgraded"),),
            UpgradedEvent { successor },
        );

        Ok(())
    }

    /// Record the instance this one replaces. One-shot.
    ///
    /// # Errors
    /// - `ContractDeprecated`: Instance has itself been upgraded
    /// - `Unauthorized`: Caller lacks admin rights on this instance
    /// - `AlreadyUpgraded`: A predecessor is already recorded
    /// - `InvalidSuccessor`: `predecessor` is this instance
    pub fn upgraded_from(env: Env, caller: Address, predecessor: Address) -> Result<(), Error> {
        Self::require_active(&env)?;
        access_control::require_admin(&env, &caller)?;

        if storage::get_address(&env, &DataKey::Predecessor).is_some() {
            return Err(Error::AlreadyUpgraded);
        }
        if predecessor == env.current_contract_address() {
            return Err(Error::InvalidSuccessor);
        }

        storage::set_address(&env, &DataKey::Predecessor, &predecessor);

        log!(&env, "token upgraded from", predecessor);
        env.events().publish(
            (Symbol::new(&env, "upgraded_from"),),
            UpgradedFromEvent { predecessor },
        );

        Ok(())
    }

    pub fn predecessor(env: Env) -> Option<Address> {
        storage::get_address(&env, &DataKey::Predecessor)
    }

    pub fn successor(env: Env) -> Option<Address> {
        match storage::lifecycle(&env) {
            Lifecycle::Active => None,
            Lifecycle::Deprecated(successor) => Some(successor),
        }
    }

    pub fn is_deprecated(env: Env) -> bool {
        matches!(storage::lifecycle(&env), Lifecycle::Deprecated(_))
    }

    pub fn lifecycle(env: Env) -> Lifecycle {
        storage::lifecycle(&env)
    }

    // ============================================
    // VIEW FUNCTIONS (ACTIVE ONLY)
    // ============================================

    pub fn config(env: Env) -> Result<TokenConfig, Error> {
        Self::require_active(&env)?;
        Ok(Records::open(&env)?.config())
    }

    pub fn name(env: Env) -> Result<Bytes, Error> {
        Ok(Self::config(env)?.name)
    }

    pub fn symbol(env: Env) -> Result<Bytes, Error> {
        Ok(Self::config(env)?.symbol)
    }

    pub fn buy_price(env: Env) -> Result<i128, Error> {
        Ok(Self::config(env)?.buy_price)
    }

    pub fn sell_price(env: Env) -> Result<i128, Error> {
        Ok(Self::config(env)?.sell_price)
    }

    pub fn sell_cap(env: Env) -> Result<i128, Error> {
        Ok(Self::config(env)?.sell_cap)
    }

    pub fn minimum_balance(env: Env) -> Result<i128, Error> {
        Ok(Self::config(env)?.minimum_balance)
    }

    pub fn foundation(env: Env) -> Result<Option<Address>, Error> {
        Self::require_active(&env)?;
        Ok(Records::open(&env)?.foundation())
    }

    /// Units still purchasable in the current cap window
    pub fn cap_remaining(env: Env) -> Result<i128, Error> {
        Self::require_active(&env)?;
        let records = Records::open(&env)?;
        Ok(pricing::cap_remaining(
            records.config().sell_cap,
            records.cap_sold(),
        ))
    }

    /// Total minted supply, issued or not
    pub fn total_supply(env: Env) -> Result<i128, Error> {
        Self::require_active(&env)?;
        Ok(Self::ledger(&env)?.total_tokens())
    }

    pub fn total_in_circulation(env: Env) -> Result<i128, Error> {
        Self::require_active(&env)?;
        Ok(Self::ledger(&env)?.total_in_circulation())
    }

    pub fn balance_of(env: Env, account: Address) -> Result<i128, Error> {
        Self::require_active(&env)?;
        Ok(Self::ledger(&env)?.balance_of(&account))
    }

    pub fn allowance(env: Env, owner: Address, spender: Address) -> Result<i128, Error> {
        Self::require_active(&env)?;
        Ok(Records::open(&env)?.allowance(&owner, &spender))
    }

    /// Payment asset held by this instance
    pub fn payment_balance(env: Env) -> Result<i128, Error> {
        Self::require_active(&env)?;
        Ok(Self::payment(&env)?.balance(&env.current_contract_address()))
    }

    pub fn registry(env: Env) -> Result<Address, Error> {
        Self::require_active(&env)?;
        Self::registry_address(&env)
    }

    pub fn storage_name(env: Env) -> Result<Bytes, Error> {
        Self::require_active(&env)?;
        Ok(storage::get_name(&env, &DataKey::StorageName))
    }

    pub fn ledger_name(env: Env) -> Result<Bytes, Error> {
        Self::require_active(&env)?;
        Ok(storage::get_name(&env, &DataKey::LedgerName))
    }

    pub fn storage_address(env: Env) -> Result<Address, Error> {
        Self::require_active(&env)?;
        storage::get_address(&env, &DataKey::StorageAddress).ok_or(Error::NotInitialized)
    }

    pub fn ledger_address(env: Env) -> Result<Address, Error> {
        Self::require_active(&env)?;
        storage::get_address(&env, &DataKey::LedgerAddress).ok_or(Error::NotInitialized)
    }

    // ============================================
    // VIEW FUNCTIONS (ALWAYS AVAILABLE)
    // ============================================

    pub fn is_approved_buyer(env: Env, account: Address) -> Result<bool, Error> {
        Ok(Records::open(&env)?.is_approved_buyer(&account))
    }

    /// Price override for `buyer`, `None` if the configured price applies
    pub fn custom_buyer_price(env: Env, buyer: Address) -> Result<Option<i128>, Error> {
        Records::open(&env)?.custom_price(&buyer)
    }

    pub fn total_custom_buyers(env: Env) -> Result<u32, Error> {
        Records::open(&env)?.total_custom_buyers()
    }

    pub fn custom_buyer_for_index(env: Env, index: u32) -> Result<Option<Address>, Error> {
        Records::open(&env)?.custom_buyer_for_index(index)
    }

    pub fn is_frozen_account(env: Env, account: Address) -> Result<bool, Error> {
        Ok(Records::open(&env)?.is_frozen(&account))
    }

    /// Accounts ever frozen, including ones since thawed
    pub fn total_frozen_accounts(env: Env) -> Result<u32, Error> {
        Records::open(&env)?.total_frozen_accounts()
    }

    pub fn frozen_account_for_index(env: Env, index: u32) -> Result<Option<Address>, Error> {
        Records::open(&env)?.frozen_account_for_index(index)
    }

    pub fn is_token_frozen(env: Env) -> bool {
        storage::get_flag(&env, &DataKey::FrozenToken)
    }

    pub fn is_purchase_halted(env: Env) -> bool {
        storage::get_flag(&env, &DataKey::HaltPurchase)
    }

    pub fn is_buyer_gating(env: Env) -> bool {
        storage::get_flag(&env, &DataKey::BuyerGating)
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

    fn require_active(env: &Env) -> Result<(), Error> {
        Self::check_initialized(env)?;
        match storage::lifecycle(env) {
            Lifecycle::Active => Ok(()),
            Lifecycle::Deprecated(_) => Err(Error::ContractDeprecated),
        }
    }

    fn require_foundation(env: &Env, caller: &Address) -> Result<Address, Error> {
        caller.require_auth();

        match Records::open(env)?.foundation() {
            Some(foundation) if foundation == *caller => Ok(foundation),
            _ => Err(Error::Unauthorized),
        }
    }

    fn registry_address(env: &Env) -> Result<Address, Error> {
        storage::get_address(env, &DataKey::Registry).ok_or(Error::NotInitialized)
    }

    fn resolve_storage(env: &Env, registry: &Address, name: &Bytes) -> Result<Address, Error> {
        let hash: BytesN<32> = env.crypto().keccak256(name).to_bytes();
        RegistryClient::new(env, registry)
            .storage_for_hash(&hash)
            .ok_or(Error::StorageNotResolved)
    }

    fn ledger(env: &Env) -> Result<LedgerClient<'_>, Error> {
        let address =
            storage::get_address(env, &DataKey::LedgerAddress).ok_or(Error::NotInitialized)?;
        Ok(LedgerClient::new(env, &address))
    }

    fn payment(env: &Env) -> Result<token::Client<'_>, Error> {
        let address =
            storage::get_address(env, &DataKey::PaymentAsset).ok_or(Error::NotInitialized)?;
        Ok(token::Client::new(env, &address))
    }

    /// Shared checks and bookkeeping for `transfer` and `transfer_from`
    fn move_tokens(
        env: &Env,
        records: &Records,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), Error> {
        if storage::get_flag(env, &DataKey::FrozenToken) {
            return Err(Error::TokenFrozen);
        }
        if records.is_frozen(from) || records.is_frozen(to) {
            return Err(Error::AccountFrozen);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let ledger = Self::ledger(env)?;
        if ledger.balance_of(from) < amount {
            return Err(Error::InsufficientBalance);
        }

        ledger.transfer(&env.current_contract_address(), from, to, &amount);

        env.events().publish(
            (Symbol::new(env, "transfer"), from.clone(), to.clone()),
            TransferEvent {
                from: from.clone(),
                to: to.clone(),
                amount,
            },
        );

        Ok(())
    }

    fn set_instance_flag(
        env: &Env,
        caller: &Address,
        key: DataKey,
        topic: &str,
        enabled: bool,
    ) -> Result<(), Error> {
        Self::require_active(env)?;
        access_control::require_admin(env, caller)?;

        storage::set_flag(env, &key, enabled);

        env.events().publish(
            (Symbol::new(env, topic),),
            FlagChangedEvent { enabled },
        );

        Ok(())
    }

    fn set_approved_buyer(
        env: &Env,
        caller: &Address,
        buyer: Address,
        approved: bool,
    ) -> Result<(), Error> {
        Self::require_active(env)?;
        access_control::require_admin(env, caller)?;

        Records::open(env)?.set_approved_buyer(&buyer, approved);

        env.events().publish(
            (Symbol::new(env, "buyer_approved"), buyer.clone()),
            AccountFlagEvent {
                account: buyer,
                enabled: approved,
            },
        );

        Ok(())
    }
}
