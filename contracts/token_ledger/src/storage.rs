use soroban_sdk::{contracttype, Address, Env};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    TotalTokens,
    TotalInCirculation,
    Balance(Address),
    /// Number of accounts that have ever held a balance
    AccountCount,
    /// Holder index, one entry per slot
    AccountAt(u32),
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Initialized)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
}

pub fn total_tokens(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalTokens)
        .unwrap_or(0)
}

pub fn set_total_tokens(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TotalTokens, &amount);
}

pub fn total_in_circulation(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalInCirculation)
        .unwrap_or(0)
}

pub fn set_total_in_circulation(env: &Env, amount: i128) {
    env.storage()
        .instance()
        .set(&DataKey::TotalInCirculation, &amount);
}

pub fn balance(env: &Env, account: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(account.clone()))
        .unwrap_or(0)
}

/// Balance entries are kept at zero rather than removed; the first write
/// appends the account to the enumeration index.
pub fn set_balance(env: &Env, account: &Address, amount: i128) {
    let key = DataKey::Balance(account.clone());
    if !env.storage().persistent().has(&key) {
        let count = account_count(env);
        env.storage()
            .persistent()
            .set(&DataKey::AccountAt(count), account);
        env.storage()
            .persistent()
            .set(&DataKey::AccountCount, &(count + 1));
    }
    env.storage().persistent().set(&key, &amount);
}

pub fn account_count(env: &Env) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::AccountCount)
        .unwrap_or(0)
}

pub fn account_at(env: &Env, index: u32) -> Option<Address> {
    env.storage().persistent().get(&DataKey::AccountAt(index))
}
