//! Property-based tests for ledger invariants
//!
//! These tests use proptest to verify critical invariants:
//! - Half-up rounding to cents matches integer cents arithmetic
//! - Rounding is idempotent for values already at 2 decimal places
//! - Deposit then withdraw of the same amount restores the balance
//! - Transfers conserve the pair sum for arbitrary amount sequences
//! - Balances never go negative under arbitrary operation sequences

use proptest::prelude::*;
use rust_decimal::Decimal;

use bank_ledger::{Amount, Ledger};

/// Strategy for generating valid amounts (positive, whole cents)
fn cents_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_00).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: a value already at 2 decimal places is unchanged
    #[test]
    fn prop_two_decimal_amounts_unchanged(value in cents_strategy()) {
        let amount = Amount::new(value).unwrap();
        prop_assert_eq!(amount.value(), value);
    }

    /// Property: half-up rounding of a 4-decimal value agrees with
    /// integer cents arithmetic ((raw + 50) / 100 for non-negative raw)
    #[test]
    fn prop_half_up_matches_integer_cents(raw in 1i64..10_000_000_000) {
        let value = Decimal::new(raw, 4);
        let amount = Amount::new(value).unwrap();
        let expected = Decimal::new((raw + 50) / 100, 2);
        prop_assert_eq!(amount.value(), expected);
    }

    /// Property: depositing then withdrawing the same amount restores the
    /// opening balance exactly
    #[test]
    fn prop_deposit_withdraw_round_trips(
        opening in cents_strategy(),
        amount in cents_strategy(),
    ) {
        let ledger = Ledger::new();
        let account = ledger.create_account("Prop", opening, "EUR").unwrap();

        ledger.deposit(account.id(), amount).unwrap();
        ledger.withdraw(account.id(), amount).unwrap();

        prop_assert_eq!(ledger.balance_of(account.id()).unwrap().value(), opening);
    }

    /// Property: any sequence of transfers between two accounts leaves
    /// the pair sum unchanged, whether individual transfers succeed or
    /// fail on insufficient funds
    #[test]
    fn prop_transfers_conserve_pair_sum(
        amounts in prop::collection::vec(cents_strategy(), 1..32),
    ) {
        let ledger = Ledger::new();
        let opening = Decimal::new(100_000_00, 2);
        let a = ledger.create_account("PairA", opening, "EUR").unwrap();
        let b = ledger.create_account("PairB", opening, "EUR").unwrap();

        for (i, amount) in amounts.iter().enumerate() {
            let (from, to) = if i % 2 == 0 {
                (a.id(), b.id())
            } else {
                (b.id(), a.id())
            };
            let _ = ledger.transfer(from, to, *amount);
        }

        let total = ledger.balance_of(a.id()).unwrap().value()
            + ledger.balance_of(b.id()).unwrap().value();
        prop_assert_eq!(total, opening + opening);
    }

    /// Property: a balance never goes negative, whatever mix of deposits
    /// and withdrawals is attempted
    #[test]
    fn prop_balance_never_negative(
        ops in prop::collection::vec((0u8..2, 1i64..10_000_00), 1..64),
    ) {
        let ledger = Ledger::new();
        let account = ledger.create_account("Prop", Decimal::new(50_00, 2), "EUR").unwrap();

        for (kind, cents) in ops {
            let amount = Decimal::new(cents, 2);
            match kind {
                0 => {
                    ledger.deposit(account.id(), amount).unwrap();
                }
                _ => {
                    // Insufficient withdrawals are rejected without mutation
                    let _ = ledger.withdraw(account.id(), amount);
                }
            }
            prop_assert!(ledger.balance_of(account.id()).unwrap().value() >= Decimal::ZERO);
        }
    }
}
