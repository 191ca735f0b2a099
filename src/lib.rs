//! bank_ledger Library
//!
//! Concurrent in-memory bank ledger: account creation, deposits,
//! withdrawals, and atomic two-account transfers that stay exact under
//! arbitrary interleavings. One mutex per account serializes balance
//! mutations; transfers take both participant locks in ascending
//! account-id order, which rules out deadlock between overlapping pairs.

pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;

pub use config::Config;
pub use domain::{Account, AccountId, Amount, AmountError, Balance, Currency};
pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
