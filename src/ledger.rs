//! Ledger service
//!
//! Owns the account namespace and implements the locking protocol that
//! makes concurrent deposits, withdrawals, and transfers safe: one mutex
//! per account, and for transfers both participant locks taken in
//! ascending account-id order.

use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::domain::{Account, AccountId, Amount, Balance, Currency};
use crate::error::{LedgerError, LedgerResult};

/// In-memory account ledger.
///
/// The account map is insert-only: entries are never removed or replaced,
/// so the map only needs to synchronize insertion and lookup. Balance
/// mutation happens under the per-account mutex, never under a map shard
/// lock.
#[derive(Default)]
pub struct Ledger {
    accounts: DashMap<AccountId, Arc<Account>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Create a new account and return its handle.
    ///
    /// Validation happens before the account exists: the owner name must
    /// not be blank, the currency code must not be blank, and the initial
    /// deposit must be zero or positive (it is rounded to cents).
    pub fn create_account(
        &self,
        owner_name: &str,
        initial_deposit: Decimal,
        currency: &str,
    ) -> LedgerResult<Arc<Account>> {
        let currency = Currency::new(currency)?;
        let account = Arc::new(Account::open(owner_name, currency, initial_deposit)?);
        let account_id = account.id();

        // Freshly generated v4 ids do not collide, so this is a pure insert.
        self.accounts.insert(account_id, Arc::clone(&account));

        tracing::debug!(%account_id, owner = account.owner_name(), "account created");
        Ok(account)
    }

    /// Deposit `amount` into the account and return the new balance.
    pub fn deposit(&self, account_id: AccountId, amount: Decimal) -> LedgerResult<Balance> {
        let account = self.resolve(account_id)?;
        let amount = Amount::new(amount)?;

        let mut balance = account.balance_cell().lock();
        let next = balance.credit(&amount);
        *balance = next.clone();
        Ok(next)
    }

    /// Withdraw `amount` from the account and return the new balance.
    pub fn withdraw(&self, account_id: AccountId, amount: Decimal) -> LedgerResult<Balance> {
        let account = self.resolve(account_id)?;
        let amount = Amount::new(amount)?;

        let mut balance = account.balance_cell().lock();
        match balance.debit(&amount) {
            Some(next) => {
                *balance = next.clone();
                Ok(next)
            }
            None => Err(LedgerError::InsufficientFunds {
                account_id,
                requested: amount.value(),
                available: balance.value(),
            }),
        }
    }

    /// Atomically move `amount` from one account to another.
    ///
    /// All request validation (self-transfer, unknown ids, amount,
    /// currency mismatch) happens before any lock is taken. Both balance
    /// locks are then acquired in ascending account-id order regardless of
    /// which side is the source: two concurrent transfers over the same
    /// pair always request the locks in the same relative order, so no
    /// wait cycle can form. While both locks are held the debit and credit
    /// are applied, making the transfer all-or-nothing with respect to any
    /// other operation touching either account.
    pub fn transfer(
        &self,
        from_id: AccountId,
        to_id: AccountId,
        amount: Decimal,
    ) -> LedgerResult<()> {
        if from_id == to_id {
            return Err(LedgerError::SameAccountTransfer);
        }

        let from = self.resolve(from_id)?;
        let to = self.resolve(to_id)?;
        let amount = Amount::new(amount)?;

        if from.currency() != to.currency() {
            return Err(LedgerError::CurrencyMismatch {
                from: from.currency().clone(),
                to: to.currency().clone(),
            });
        }

        let (mut from_balance, mut to_balance) = if from.id() < to.id() {
            let f = from.balance_cell().lock();
            let t = to.balance_cell().lock();
            (f, t)
        } else {
            let t = to.balance_cell().lock();
            let f = from.balance_cell().lock();
            (f, t)
        };

        // Debit first: if the source cannot cover the amount, the
        // destination has not been touched and both guards unwind.
        let debited = match from_balance.debit(&amount) {
            Some(next) => next,
            None => {
                return Err(LedgerError::InsufficientFunds {
                    account_id: from_id,
                    requested: amount.value(),
                    available: from_balance.value(),
                })
            }
        };
        *from_balance = debited;
        let credited = to_balance.credit(&amount);
        *to_balance = credited;

        tracing::trace!(%from_id, %to_id, %amount, "transfer completed");
        Ok(())
    }

    /// Current balance of the account. Takes the account lock, so the
    /// returned value is never a partially applied mutation.
    pub fn balance_of(&self, account_id: AccountId) -> LedgerResult<Balance> {
        let account = self.resolve(account_id)?;
        Ok(account.balance())
    }

    /// Sum of all account balances.
    ///
    /// Locks one account at a time, so this is a diagnostic sum rather
    /// than a linearizable global snapshot; it is exact whenever the
    /// ledger is quiescent. Transfers never change it either way.
    pub fn total_balance(&self) -> Decimal {
        self.accounts
            .iter()
            .map(|entry| entry.value().balance().value())
            .sum()
    }

    /// Number of accounts in the ledger.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Look up an account handle. The map shard guard is dropped when the
    /// cloned Arc is returned, before any balance lock is taken.
    fn resolve(&self, account_id: AccountId) -> LedgerResult<Arc<Account>> {
        self.accounts
            .get(&account_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(LedgerError::AccountNotFound(account_id))
    }
}
