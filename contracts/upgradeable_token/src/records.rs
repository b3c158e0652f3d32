//! Token state kept in external storage.
//!
//! Everything here is shared by every logic instance linked to the same
//! storage, which is what lets a successor pick up configuration, buyer lists,
//! frozen accounts and allowances without migration. Keys are
//! `keccak256(label [|| xdr(address)...] [|| be_u32(index)])`.

use soroban_sdk::{contracttype, xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::error::Error;
use crate::interfaces::ExternalStorageClient;
use crate::storage::{self, DataKey};

const NAME: &str = "token.name";
const SYMBOL: &str = "token.symbol";
const BUY_PRICE: &str = "token.buyPrice";
const SELL_PRICE: &str = "token.sellPrice";
const SELL_CAP: &str = "token.sellCap";
const MINIMUM_BALANCE: &str = "token.minimumBalance";
const FOUNDATION: &str = "token.foundation";
const HAS_FOUNDATION: &str = "token.hasFoundation";
const CAP_SOLD: &str = "token.capSold";

const ALLOWANCE: &str = "allowance";
const APPROVED_BUYER: &str = "buyer.approved";

const CUSTOM_PRICE: &str = "customBuyer.price";
const CUSTOM_POSITION: &str = "customBuyer.position";
const CUSTOM_COUNT: &str = "customBuyer.count";
const CUSTOM_INDEX: &str = "customBuyer.index";

const FROZEN: &str = "frozen.account";
const FROZEN_INDEXED: &str = "frozen.indexed";
const FROZEN_COUNT: &str = "frozen.count";
const FROZEN_INDEX: &str = "frozen.index";

/// Business configuration, replaced wholesale by `configure`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenConfig {
    pub name: Bytes,
    pub symbol: Bytes,
    /// Price per unit when buying
    pub buy_price: i128,
    /// Price per unit paid out when selling
    pub sell_price: i128,
    /// Units sellable in the current cap window
    pub sell_cap: i128,
    /// Value the contract must keep after a sale payout
    pub minimum_balance: i128,
    /// Sink for deposits and withdrawals
    pub foundation: Option<Address>,
}

pub struct Records<'a> {
    env: &'a Env,
    store: ExternalStorageClient<'a>,
    writer: Address,
}

impl<'a> Records<'a> {
    /// Bind to the external storage this instance currently points at
    pub fn open(env: &'a Env) -> Result<Self, Error> {
        let address =
            storage::get_address(env, &DataKey::StorageAddress).ok_or(Error::NotInitialized)?;
        Ok(Self {
            env,
            store: ExternalStorageClient::new(env, &address),
            writer: env.current_contract_address(),
        })
    }

    // ============================================
    // KEYS
    // ============================================

    fn hash(&self, data: &Bytes) -> BytesN<32> {
        self.env.crypto().keccak256(data).to_bytes()
    }

    fn key(&self, label: &str) -> BytesN<32> {
        self.hash(&Bytes::from_slice(self.env, label.as_bytes()))
    }

    fn account_key(&self, label: &str, account: &Address) -> BytesN<32> {
        let mut data = Bytes::from_slice(self.env, label.as_bytes());
        data.append(&account.clone().to_xdr(self.env));
        self.hash(&data)
    }

    fn pair_key(&self, label: &str, first: &Address, second: &Address) -> BytesN<32> {
        let mut data = Bytes::from_slice(self.env, label.as_bytes());
        data.append(&first.clone().to_xdr(self.env));
        data.append(&second.clone().to_xdr(self.env));
        self.hash(&data)
    }

    fn index_key(&self, label: &str, index: u32) -> BytesN<32> {
        let mut data = Bytes::from_slice(self.env, label.as_bytes());
        data.extend_from_array(&index.to_be_bytes());
        self.hash(&data)
    }

    /// Counts are stored as `Uint`; a value outside `u32` means the cell was
    /// written by something other than this contract.
    fn get_count(&self, label: &str) -> Result<u32, Error> {
        u32::try_from(self.store.get_uint(&self.key(label))).map_err(|_| Error::InvalidAmount)
    }

    fn set_count(&self, label: &str, count: u32) {
        self.store
            .set_uint(&self.writer, &self.key(label), &u128::from(count));
    }

    // ============================================
    // CONFIGURATION
    // ============================================

    pub fn config(&self) -> TokenConfig {
        let foundation = if self.store.get_bool(&self.key(HAS_FOUNDATION)) {
            self.store.get_address(&self.key(FOUNDATION))
        } else {
            None
        };

        TokenConfig {
            name: self.store.get_bytes(&self.key(NAME)),
            symbol: self.store.get_bytes(&self.key(SYMBOL)),
            buy_price: self.store.get_int(&self.key(BUY_PRICE)),
            sell_price: self.store.get_int(&self.key(SELL_PRICE)),
            sell_cap: self.store.get_int(&self.key(SELL_CAP)),
            minimum_balance: self.store.get_int(&self.key(MINIMUM_BALANCE)),
            foundation,
        }
    }

    pub fn set_config(&self, config: &TokenConfig) {
        let w = &self.writer;
        self.store.set_bytes(w, &self.key(NAME), &config.name);
        self.store.set_bytes(w, &self.key(SYMBOL), &config.symbol);
        self.store.set_int(w, &self.key(BUY_PRICE), &config.buy_price);
        self.store.set_int(w, &self.key(SELL_PRICE), &config.sell_price);
        self.store.set_int(w, &self.key(SELL_CAP), &config.sell_cap);
        self.store
            .set_int(w, &self.key(MINIMUM_BALANCE), &config.minimum_balance);

        match &config.foundation {
            Some(foundation) => {
                self.store.set_address(w, &self.key(FOUNDATION), foundation);
                self.store.set_bool(w, &self.key(HAS_FOUNDATION), &true);
            }
            None => self.store.set_bool(w, &self.key(HAS_FOUNDATION), &false),
        }
    }

    pub fn foundation(&self) -> Option<Address> {
        if self.store.get_bool(&self.key(HAS_FOUNDATION)) {
            self.store.get_address(&self.key(FOUNDATION))
        } else {
            None
        }
    }

    /// Units sold in the current cap window
    pub fn cap_sold(&self) -> i128 {
        self.store.get_int(&self.key(CAP_SOLD))
    }

    pub fn set_cap_sold(&self, sold: i128) {
        self.store.set_int(&self.writer, &self.key(CAP_SOLD), &sold);
    }

    // ============================================
    // ALLOWANCES
    // ============================================

    pub fn allowance(&self, owner: &Address, spender: &Address) -> i128 {
        self.store.get_int(&self.pair_key(ALLOWANCE, owner, spender))
    }

    pub fn set_allowance(&self, owner: &Address, spender: &Address, amount: i128) {
        self.store
            .set_int(&self.writer, &self.pair_key(ALLOWANCE, owner, spender), &amount);
    }

    // ============================================
    // APPROVED BUYERS
    // ============================================

    pub fn is_approved_buyer(&self, account: &Address) -> bool {
        self.store
            .get_bool(&self.account_key(APPROVED_BUYER, account))
    }

    pub fn set_approved_buyer(&self, account: &Address, approved: bool) {
        self.store.set_bool(
            &self.writer,
            &self.account_key(APPROVED_BUYER, account),
            &approved,
        );
    }

    // ============================================
    // CUSTOM BUYER PRICES
    // ============================================

    /// 1-based slot in the custom buyer index, 0 when absent
    fn custom_position(&self, account: &Address) -> Result<u32, Error> {
        u32::try_from(
            self.store
                .get_uint(&self.account_key(CUSTOM_POSITION, account)),
        )
        .map_err(|_| Error::InvalidAmount)
    }

    fn set_custom_position(&self, account: &Address, position: u32) {
        self.store.set_uint(
            &self.writer,
            &self.account_key(CUSTOM_POSITION, account),
            &u128::from(position),
        );
    }

    pub fn custom_price(&self, account: &Address) -> Result<Option<i128>, Error> {
        if self.custom_position(account)? == 0 {
            return Ok(None);
        }
        Ok(Some(
            self.store
                .get_int(&self.account_key(CUSTOM_PRICE, account)),
        ))
    }

    /// Install or overwrite a price override. Overwriting keeps the slot.
    pub fn set_custom_price(&self, account: &Address, price: i128) -> Result<(), Error> {
        if self.custom_position(account)? == 0 {
            let count = self.get_count(CUSTOM_COUNT)?;
            let next = count.checked_add(1).ok_or(Error::InvalidAmount)?;
            self.store.set_address(
                &self.writer,
                &self.index_key(CUSTOM_INDEX, count),
                account,
            );
            self.set_custom_position(account, next);
            self.set_count(CUSTOM_COUNT, next);
        }

        self.store
            .set_int(&self.writer, &self.account_key(CUSTOM_PRICE, account), &price);
        Ok(())
    }

    /// Drop an override, moving the last entry into the freed slot so the
    /// index stays dense. Returns `false` if there was no override.
    pub fn remove_custom_price(&self, account: &Address) -> Result<bool, Error> {
        let position = self.custom_position(account)?;
        if position == 0 {
            return Ok(false);
        }

        let count = self.get_count(CUSTOM_COUNT)?;
        let last = count.checked_sub(1).ok_or(Error::InvalidAmount)?;
        let slot = position - 1;

        if slot != last {
            if let Some(moved) = self.store.get_address(&self.index_key(CUSTOM_INDEX, last)) {
                self.store
                    .set_address(&self.writer, &self.index_key(CUSTOM_INDEX, slot), &moved);
                self.set_custom_position(&moved, position);
            }
        }

        self.set_custom_position(account, 0);
        self.store
            .set_int(&self.writer, &self.account_key(CUSTOM_PRICE, account), &0);
        self.set_count(CUSTOM_COUNT, last);
        Ok(true)
    }

    pub fn total_custom_buyers(&self) -> Result<u32, Error> {
        self.get_count(CUSTOM_COUNT)
    }

    pub fn custom_buyer_for_index(&self, index: u32) -> Result<Option<Address>, Error> {
        if index >= self.get_count(CUSTOM_COUNT)? {
            return Ok(None);
        }
        Ok(self.store.get_address(&self.index_key(CUSTOM_INDEX, index)))
    }

    // ============================================
    // FROZEN ACCOUNTS
    // ============================================

    pub fn is_frozen(&self, account: &Address) -> bool {
        self.store.get_bool(&self.account_key(FROZEN, account))
    }

    /// Toggle the freeze flag. The index only grows; thawed accounts stay
    /// listed with their flag cleared.
    pub fn set_frozen(&self, account: &Address, frozen: bool) -> Result<(), Error> {
        let indexed_key = self.account_key(FROZEN_INDEXED, account);
        if frozen && !self.store.get_bool(&indexed_key) {
            let count = self.get_count(FROZEN_COUNT)?;
            let next = count.checked_add(1).ok_or(Error::InvalidAmount)?;
            self.store.set_address(
                &self.writer,
                &self.index_key(FROZEN_INDEX, count),
                account,
            );
            self.store.set_bool(&self.writer, &indexed_key, &true);
            self.set_count(FROZEN_COUNT, next);
        }

        self.store
            .set_bool(&self.writer, &self.account_key(FROZEN, account), &frozen);
        Ok(())
    }

    pub fn total_frozen_accounts(&self) -> Result<u32, Error> {
        self.get_count(FROZEN_COUNT)
    }

    pub fn frozen_account_for_index(&self, index: u32) -> Result<Option<Address>, Error> {
        if index >= self.get_count(FROZEN_COUNT)? {
            return Ok(None);
        }
        Ok(self.store.get_address(&self.index_key(FROZEN_INDEX, index)))
    }
}
