use derive_builder::UninitializedFieldError;
use thiserror::Error;

use crate::accounts::AccountNumber;

/// Every way a ledger operation can be refused.
///
/// These are precondition failures: when one is returned, no balance and no
/// sequence id has been touched. A declined deposit or withdrawal is not an
/// error, it is reported through an `X` confirmation code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid account number: {0}")]
    InvalidAccountNumber(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid confirmation code: {0}")]
    InvalidConfirmationCode(String),

    #[error("Malformed timestamp '{0}': expected YYYYMMDDHHMMSS")]
    MalformedTimestamp(String),

    #[error("Invalid interest rate: {0}")]
    InvalidInterestRate(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Unknown account: {0}")]
    UnknownAccount(AccountNumber),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Could not read vault: {0}")]
    Vault(String),
}

impl From<UninitializedFieldError> for LedgerError {
    fn from(error: UninitializedFieldError) -> Self {
        LedgerError::MissingField(error.field_name().to_string())
    }
}
