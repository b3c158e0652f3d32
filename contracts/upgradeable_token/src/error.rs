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
    /// Registry has no storage under the given name
    StorageNotResolved = 3,

    // ============================================
    // AUTHORIZATION ERRORS (10-15)
    // ============================================
    /// Caller lacks the required role tier
    Unauthorized = 10,
    /// Removal would leave no active super-admin
    LastSuperAdmin = 11,
    /// Buyer gating is on and the caller is not an approved buyer
    BuyerNotApproved = 12,

    // ============================================
    // LIFECYCLE ERRORS (20-29)
    // ============================================
    /// Instance has been upgraded and is read/write disabled
    ContractDeprecated = 20,
    /// Upgrade link already recorded
    AlreadyUpgraded = 21,
    /// Upgrade link points at this instance
    InvalidSuccessor = 22,

    // ============================================
    // AMOUNT/BALANCE ERRORS (30-39)
    // ============================================
    /// Amount is not positive, overflows, or payment is not a whole number of units
    InvalidAmount = 30,
    /// Holder does not have enough tokens (or the contract not enough value)
    InsufficientBalance = 31,
    /// Spender allowance too small
    InsufficientAllowance = 32,
    /// Payout would leave the contract below its minimum balance
    InsufficientReserve = 33,

    // ============================================
    // SUPPLY ERRORS (40-49)
    // ============================================
    /// Purchase exceeds what is left in the current sell cap window
    ExceedsSellCap = 40,
    /// Not enough minted-but-unissued tokens
    ExceedsUnissuedSupply = 41,

    // ============================================
    // OPERATIONAL ERRORS (50-59)
    // ============================================
    /// All transfers and purchases are halted
    TokenFrozen = 50,
    /// Sender or recipient account is frozen
    AccountFrozen = 51,
    /// Purchases are halted
    PurchasesHalted = 52,
}

impl From<AccessError> for Error {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthorized => Error::Unauthorized,
            AccessError::LastSuperAdmin => Error::LastSuperAdmin,
        }
    }
}
