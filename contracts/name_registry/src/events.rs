use soroban_sdk::{contracttype, Address, Bytes, BytesN};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntryRegisteredEvent {
    pub name: Bytes,
    pub hash: BytesN<32>,
    pub address: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractUpgradedEvent {
    pub name: Bytes,
    pub predecessor: Address,
    pub successor: Address,
}
