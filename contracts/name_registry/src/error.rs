use access_control::AccessError;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // AUTHORIZATION ERRORS (10-15)
    // ============================================
    /// Caller lacks the required role tier
    Unauthorized = 10,
    /// Removal would leave no active super-admin
    LastSuperAdmin = 11,

    // ============================================
    // LOOKUP ERRORS (20-29)
    // ============================================
    /// No contract registered under this name
    ContractNotFound = 20,
    /// Successor is the instance already registered
    InvalidSuccessor = 21,
}

impl From<AccessError> for Error {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthorized => Error::Unauthorized,
            AccessError::LastSuperAdmin => Error::LastSuperAdmin,
        }
    }
}
