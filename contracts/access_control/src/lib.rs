#![no_std]

//! # Access Control
//!
//! Two-tier role sets (super-admins and admins) shared by every contract in the
//! workspace. The sets live in the embedding contract's own persistent storage,
//! so each registry, storage, ledger and token instance administers itself.
//!
//! - Super-admins may add and remove members of either tier.
//! - Admins may run admin-gated business operations but cannot touch either set.
//! - Every super-admin also passes admin-gated checks.
//!
//! Membership is an insertion-ordered index plus a per-address flag. Removal
//! clears the flag and leaves the index entry in place, so enumeration callers
//! must check the flag (or use [`super_admins`]/[`admins`], which do).

use soroban_sdk::{contracttype, Address, Env, Symbol, Vec};

mod error;
mod events;

pub use error::AccessError;
pub use events::RoleChangedEvent;

/// Storage keys owned by the role sets. Variant names are distinct from any
/// contract `DataKey` so both can share one storage namespace.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RoleKey {
    /// `true` while active, `false` once removed, absent if never enrolled
    SuperAdminFlag(Address),
    AdminFlag(Address),
    SuperAdminList,
    AdminList,
    ActiveSuperAdminCount,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Tier {
    SuperAdmin,
    Admin,
}

impl Tier {
    fn flag_key(self, account: &Address) -> RoleKey {
        match self {
            Tier::SuperAdmin => RoleKey::SuperAdminFlag(account.clone()),
            Tier::Admin => RoleKey::AdminFlag(account.clone()),
        }
    }

    fn list_key(self) -> RoleKey {
        match self {
            Tier::SuperAdmin => RoleKey::SuperAdminList,
            Tier::Admin => RoleKey::AdminList,
        }
    }

    fn event_name(self, added: bool) -> &'static str {
        match (self, added) {
            (Tier::SuperAdmin, true) => "super_admin_added",
            (Tier::SuperAdmin, false) => "super_admin_removed",
            (Tier::Admin, true) => "admin_added",
            (Tier::Admin, false) => "admin_removed",
        }
    }
}

// ============================================
// STORAGE HELPERS
// ============================================

fn flag(env: &Env, tier: Tier, account: &Address) -> Option<bool> {
    env.storage().persistent().get(&tier.flag_key(account))
}

fn list(env: &Env, tier: Tier) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&tier.list_key())
        .unwrap_or_else(|| Vec::new(env))
}

fn active_super_admin_count(env: &Env) -> u32 {
    env.storage()
        .persistent()
        .get(&RoleKey::ActiveSuperAdminCount)
        .unwrap_or(0)
}

fn set_active_super_admin_count(env: &Env, count: u32) {
    env.storage()
        .persistent()
        .set(&RoleKey::ActiveSuperAdminCount, &count);
}

/// Mark `account` active in `tier`. Returns `false` if it already was.
fn enroll(env: &Env, tier: Tier, account: &Address) -> bool {
    match flag(env, tier, account) {
        Some(true) => return false,
        Some(false) => {}
        None => {
            let mut members = list(env, tier);
            members.push_back(account.clone());
            env.storage().persistent().set(&tier.list_key(), &members);
        }
    }

    env.storage()
        .persistent()
        .set(&tier.flag_key(account), &true);

    if tier == Tier::SuperAdmin {
        set_active_super_admin_count(env, active_super_admin_count(env) + 1);
    }
    true
}

/// Clear `account` from `tier`. Returns `false` if it was not active.
fn revoke(env: &Env, tier: Tier, account: &Address) -> Result<bool, AccessError> {
    if flag(env, tier, account) != Some(true) {
        return Ok(false);
    }

    if tier == Tier::SuperAdmin {
        let active = active_super_admin_count(env);
        if active <= 1 {
            return Err(AccessError::LastSuperAdmin);
        }
        set_active_super_admin_count(env, active - 1);
    }

    env.storage()
        .persistent()
        .set(&tier.flag_key(account), &false);
    Ok(true)
}

fn publish_change(env: &Env, tier: Tier, added: bool, account: &Address, by: &Address) {
    env.events().publish(
        (Symbol::new(env, tier.event_name(added)), account.clone()),
        RoleChangedEvent {
            account: account.clone(),
            changed_by: by.clone(),
        },
    );
}

// ============================================
// INITIALIZATION
// ============================================

/// Enroll the deploying account as the first super-admin.
///
/// Performs no authorization of its own; the caller's `initialize` is
/// responsible for `require_auth` and the one-shot guard.
pub fn enroll_founder(env: &Env, founder: &Address) {
    if enroll(env, Tier::SuperAdmin, founder) {
        publish_change(env, Tier::SuperAdmin, true, founder, founder);
    }
}

// ============================================
// CHECKS
// ============================================

pub fn is_super_admin(env: &Env, account: &Address) -> bool {
    flag(env, Tier::SuperAdmin, account).unwrap_or(false)
}

/// Membership of the admin tier only. Use [`has_admin_rights`] for gating.
pub fn is_admin(env: &Env, account: &Address) -> bool {
    flag(env, Tier::Admin, account).unwrap_or(false)
}

/// Admins and super-admins both pass admin-gated operations.
pub fn has_admin_rights(env: &Env, account: &Address) -> bool {
    is_admin(env, account) || is_super_admin(env, account)
}

/// Authenticate `caller` and require the super-admin tier.
pub fn require_super_admin(env: &Env, caller: &Address) -> Result<(), AccessError> {
    caller.require_auth();
    if !is_super_admin(env, caller) {
        return Err(AccessError::Unauthorized);
    }
    Ok(())
}

/// Authenticate `caller` and require admin rights (admin or super-admin).
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), AccessError> {
    caller.require_auth();
    if !has_admin_rights(env, caller) {
        return Err(AccessError::Unauthorized);
    }
    Ok(())
}

// ============================================
// MUTATION (SUPER-ADMIN ONLY)
// ============================================

pub fn add_super_admin(env: &Env, caller: &Address, account: &Address) -> Result<(), AccessError> {
    require_super_admin(env, caller)?;
    if enroll(env, Tier::SuperAdmin, account) {
        publish_change(env, Tier::SuperAdmin, true, account, caller);
    }
    Ok(())
}

pub fn remove_super_admin(
    env: &Env,
    caller: &Address,
    account: &Address,
) -> Result<(), AccessError> {
    require_super_admin(env, caller)?;
    if revoke(env, Tier::SuperAdmin, account)? {
        publish_change(env, Tier::SuperAdmin, false, account, caller);
    }
    Ok(())
}

pub fn add_admin(env: &Env, caller: &Address, account: &Address) -> Result<(), AccessError> {
    require_super_admin(env, caller)?;
    if enroll(env, Tier::Admin, account) {
        publish_change(env, Tier::Admin, true, account, caller);
    }
    Ok(())
}

pub fn remove_admin(env: &Env, caller: &Address, account: &Address) -> Result<(), AccessError> {
    require_super_admin(env, caller)?;
    if revoke(env, Tier::Admin, account)? {
        publish_change(env, Tier::Admin, false, account, caller);
    }
    Ok(())
}

// ============================================
// ENUMERATION
// ============================================

/// Number of index entries, including members that were later removed.
pub fn total_super_admins(env: &Env) -> u32 {
    list(env, Tier::SuperAdmin).len()
}

pub fn total_admins(env: &Env) -> u32 {
    list(env, Tier::Admin).len()
}

/// Raw index entry; check [`is_super_admin`] before trusting it.
pub fn super_admin_for_index(env: &Env, index: u32) -> Option<Address> {
    list(env, Tier::SuperAdmin).get(index)
}

pub fn admin_for_index(env: &Env, index: u32) -> Option<Address> {
    list(env, Tier::Admin).get(index)
}

fn active_members(env: &Env, tier: Tier) -> Vec<Address> {
    let mut active = Vec::new(env);
    for account in list(env, tier).iter() {
        if flag(env, tier, &account) == Some(true) {
            active.push_back(account);
        }
    }
    active
}

/// Currently active super-admins in insertion order.
pub fn super_admins(env: &Env) -> Vec<Address> {
    active_members(env, Tier::SuperAdmin)
}

/// Currently active admins in insertion order.
pub fn admins(env: &Env) -> Vec<Address> {
    active_members(env, Tier::Admin)
}

#[cfg(test)]
mod test;
