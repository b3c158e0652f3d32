use soroban_sdk::{contracttype, Address, Bytes, Env};

/// Upgrade state of one logic instance. `Deprecated` is terminal and carries
/// the successor, so the link and the flag can never disagree.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Lifecycle {
    Active,
    Deprecated(Address),
}

/// Per-instance state. Everything that must survive an upgrade lives in
/// external storage instead (see `records`).
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Registry,
    StorageName,
    LedgerName,
    StorageAddress,
    LedgerAddress,
    PaymentAsset,
    Lifecycle,
    Predecessor,
    FrozenToken,
    HaltPurchase,
    BuyerGating,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Initialized)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
}

pub fn get_address(env: &Env, key: &DataKey) -> Option<Address> {
    env.storage().instance().get(key)
}

pub fn set_address(env: &Env, key: &DataKey, address: &Address) {
    env.storage().instance().set(key, address);
}

pub fn get_name(env: &Env, key: &DataKey) -> Bytes {
    env.storage()
        .instance()
        .get(key)
        .unwrap_or_else(|| Bytes::new(env))
}

pub fn set_name(env: &Env, key: &DataKey, name: &Bytes) {
    env.storage().instance().set(key, name);
}

pub fn get_flag(env: &Env, key: &DataKey) -> bool {
    env.storage().instance().get(key).unwrap_or(false)
}

pub fn set_flag(env: &Env, key: &DataKey, value: bool) {
    env.storage().instance().set(key, &value);
}

pub fn lifecycle(env: &Env) -> Lifecycle {
    env.storage()
        .instance()
        .get(&DataKey::Lifecycle)
        .unwrap_or(Lifecycle::Active)
}

pub fn set_lifecycle(env: &Env, lifecycle: &Lifecycle) {
    env.storage().instance().set(&DataKey::Lifecycle, lifecycle);
}
