use soroban_sdk::{contracttype, Address, BytesN};

use crate::storage::CellKind;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CellWrittenEvent {
    pub key: BytesN<32>,
    pub kind: CellKind,
    pub writer: Address,
}
