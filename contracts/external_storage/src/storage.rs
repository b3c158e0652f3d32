use soroban_sdk::{contracttype, Address, Bytes, BytesN, Env};

/// A typed value. A key keeps the type of its first write for its lifetime.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Cell {
    Uint(u128),
    Int(i128),
    Address(Address),
    Bytes32(BytesN<32>),
    Bytes(Bytes),
    Bool(bool),
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CellKind {
    Uint = 0,
    Int = 1,
    Address = 2,
    Bytes32 = 3,
    Bytes = 4,
    Bool = 5,
}

impl Cell {
    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Uint(_) => CellKind::Uint,
            Cell::Int(_) => CellKind::Int,
            Cell::Address(_) => CellKind::Address,
            Cell::Bytes32(_) => CellKind::Bytes32,
            Cell::Bytes(_) => CellKind::Bytes,
            Cell::Bool(_) => CellKind::Bool,
        }
    }
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Cell(BytesN<32>),
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Initialized)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
}

pub fn get_cell(env: &Env, key: &BytesN<32>) -> Option<Cell> {
    env.storage().persistent().get(&DataKey::Cell(key.clone()))
}

pub fn set_cell(env: &Env, key: &BytesN<32>, cell: &Cell) {
    env.storage()
        .persistent()
        .set(&DataKey::Cell(key.clone()), cell);
}
