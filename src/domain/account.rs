//! Account model
//!
//! An account is one owner's balance cell plus immutable metadata. The
//! metadata (id, owner, currency) lives outside the balance mutex so
//! request validation never has to take a lock.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::amount::Balance;
use crate::error::LedgerError;

/// Process-unique account identifier.
///
/// The derived ordering (UUID byte order) is the canonical lock-acquisition
/// order for two-account transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a fresh identifier.
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque currency code. Both sides of a transfer must carry an equal code;
/// no conversion is ever performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
    /// Create a currency code. The only rule is non-blank.
    pub fn new(code: &str) -> Result<Self, LedgerError> {
        if code.trim().is_empty() {
            return Err(LedgerError::EmptyCurrency);
        }

        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single account: immutable metadata and a mutex-guarded balance.
///
/// The mutex is the per-account lock: every read-modify-write of the
/// balance goes through it, driven by the [`Ledger`](crate::Ledger). The
/// account itself never reasons about other accounts.
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    owner_name: String,
    currency: Currency,
    created_at: DateTime<Utc>,
    balance: Mutex<Balance>,
}

impl Account {
    /// Open an account with a fresh id and a validated opening balance.
    pub(crate) fn open(
        owner_name: &str,
        currency: Currency,
        initial_deposit: Decimal,
    ) -> Result<Self, LedgerError> {
        if owner_name.trim().is_empty() {
            return Err(LedgerError::BlankOwnerName);
        }
        if initial_deposit < Decimal::ZERO {
            return Err(LedgerError::NegativeInitialDeposit(initial_deposit));
        }

        let balance = Balance::new(initial_deposit)?;

        Ok(Self {
            id: AccountId::generate(),
            owner_name: owner_name.to_string(),
            currency,
            created_at: Utc::now(),
            balance: Mutex::new(balance),
        })
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Consistent snapshot of the current balance. Takes the account lock,
    /// so a concurrently running mutation is either fully visible or not
    /// at all.
    pub fn balance(&self) -> Balance {
        self.balance.lock().clone()
    }

    /// The per-account lock. The ledger serializes every balance mutation
    /// through this cell.
    pub(crate) fn balance_cell(&self) -> &Mutex<Balance> {
        &self.balance
    }
}
