use soroban_sdk::{contracttype, Address, Bytes, BytesN, Env, Vec};

/// A resolved name. `hash` is always `keccak256(name)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryEntry {
    pub name: Bytes,
    pub hash: BytesN<32>,
    pub address: Address,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    Contract = 0,
    Storage = 1,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Entry(EntryKind, BytesN<32>),
    EntryHashes(EntryKind),
}

pub fn hash_name(env: &Env, name: &Bytes) -> BytesN<32> {
    env.crypto().keccak256(name).to_bytes()
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Initialized)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
}

pub fn get_entry(env: &Env, kind: EntryKind, hash: &BytesN<32>) -> Option<RegistryEntry> {
    env.storage()
        .persistent()
        .get(&DataKey::Entry(kind, hash.clone()))
}

/// Insert or overwrite an entry. New hashes are appended to the kind's index.
pub fn put_entry(env: &Env, kind: EntryKind, entry: &RegistryEntry) {
    let key = DataKey::Entry(kind, entry.hash.clone());
    if !env.storage().persistent().has(&key) {
        let mut hashes = entry_hashes(env, kind);
        hashes.push_back(entry.hash.clone());
        env.storage()
            .persistent()
            .set(&DataKey::EntryHashes(kind), &hashes);
    }
    env.storage().persistent().set(&key, entry);
}

pub fn entry_hashes(env: &Env, kind: EntryKind) -> Vec<BytesN<32>> {
    env.storage()
        .persistent()
        .get(&DataKey::EntryHashes(kind))
        .unwrap_or_else(|| Vec::new(env))
}
