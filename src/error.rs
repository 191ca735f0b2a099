//! Error handling module
//!
//! Centralized error types for every ledger operation. All failures are
//! surfaced synchronously to the caller; the ledger never retries and
//! never partially applies a compound operation.

use rust_decimal::Decimal;

use crate::domain::account::{AccountId, Currency};
use crate::domain::amount::AmountError;

/// Ledger-wide Result type
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    /// Lookup failed; no state mutated
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Amount was zero, negative, or unparseable; no state mutated
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    /// Withdrawal or transfer exceeds the available balance; no state
    /// mutated, including when raised mid-transfer
    #[error("Insufficient funds on account {account_id}: requested {requested}, available {available}")]
    InsufficientFunds {
        account_id: AccountId,
        requested: Decimal,
        available: Decimal,
    },

    #[error("Owner name must not be blank")]
    BlankOwnerName,

    #[error("Initial deposit cannot be negative (got {0})")]
    NegativeInitialDeposit(Decimal),

    #[error("Currency code must not be blank")]
    EmptyCurrency,

    #[error("Cannot transfer to the same account")]
    SameAccountTransfer,

    /// Transfers require an equal currency code on both sides
    #[error("Invalid currency transfer requested (from={from}, to={to})")]
    CurrencyMismatch { from: Currency, to: Currency },
}
