use soroban_sdk::{contractclient, Address, Env};

/// The upgrade handshake every registered token logic contract exposes.
#[allow(dead_code)]
#[contractclient(name = "UpgradeableClient")]
pub trait Upgradeable {
    fn upgrade_to(env: Env, caller: Address, successor: Address);
    fn upgraded_from(env: Env, caller: Address, predecessor: Address);
}
