use access_control::AccessError;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Initialization errors
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // Authorization errors
    Unauthorized = 3,
    LastSuperAdmin = 7,

    // Balance errors
    InsufficientBalance = 4,
    InvalidAmount = 5,
    ExceedsUnissuedSupply = 6,
}

impl From<AccessError> for Error {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthorized => Error::Unauthorized,
            AccessError::LastSuperAdmin => Error::LastSuperAdmin,
        }
    }
}
