/// Failures raised by role checks.
///
/// Contracts embedding the role sets convert this into their own
/// `#[contracterror]` enum so clients always see one error type per contract.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AccessError {
    /// Caller does not hold the tier the operation requires
    Unauthorized,
    /// Removal would leave no active super-admin
    LastSuperAdmin,
}
