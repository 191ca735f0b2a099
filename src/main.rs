//! bank_ledger demonstration driver
//!
//! Exercises the ledger end to end: the account lifecycle, the error
//! paths, and two concurrent storms showing that balances land on exactly
//! the totals the arithmetic predicts.

use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Instant;

use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bank_ledger::{Config, Ledger};

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bank_ledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    let config = Config::from_env()?;
    tracing::info!(
        threads = config.demo_threads,
        ops_per_thread = config.demo_ops_per_thread,
        "starting bank ledger demo"
    );

    let ledger = Ledger::new();
    let currency = config.demo_currency.as_str();

    println!("========== BANK LEDGER DEMO ==========");

    // Create two accounts
    let alice = ledger.create_account("Alice", Decimal::from_str("1000.00")?, currency)?;
    let bob = ledger.create_account("Bob", Decimal::from_str("200.00")?, currency)?;

    println!("\n-- After account creation --");
    println!(
        "Alice [{}]: {} {}",
        alice.id(),
        ledger.balance_of(alice.id())?,
        alice.currency()
    );
    println!(
        "Bob   [{}]: {} {}",
        bob.id(),
        ledger.balance_of(bob.id())?,
        bob.currency()
    );

    // Deposit into Alice
    println!("\n-- Deposit 250.50 to Alice --");
    ledger.deposit(alice.id(), Decimal::from_str("250.50")?)?;
    println!("Alice balance: {}", ledger.balance_of(alice.id())?);

    // Withdraw from Bob
    println!("\n-- Withdraw 50.00 from Bob --");
    ledger.withdraw(bob.id(), Decimal::from_str("50.00")?)?;
    println!("Bob balance: {}", ledger.balance_of(bob.id())?);

    // Transfer from Alice to Bob
    println!("\n-- Transfer 300.00 from Alice to Bob --");
    ledger.transfer(alice.id(), bob.id(), Decimal::from_str("300.00")?)?;
    println!("Alice balance: {}", ledger.balance_of(alice.id())?);
    println!("Bob balance:   {}", ledger.balance_of(bob.id())?);

    // Error scenarios
    println!("\n-- Try invalid operations (expected errors) --");

    println!("Trying to withdraw 10000.00 from Bob");
    match ledger.withdraw(bob.id(), Decimal::from_str("10000.00")?) {
        Err(err) => println!("Rejected: {err}"),
        Ok(balance) => println!("Unexpectedly succeeded, balance: {balance}"),
    }

    println!("Trying to deposit 0.00 to Alice");
    match ledger.deposit(alice.id(), Decimal::ZERO) {
        Err(err) => println!("Rejected: {err}"),
        Ok(balance) => println!("Unexpectedly succeeded, balance: {balance}"),
    }

    // Concurrent deposits into a single account
    let storm = ledger.create_account("Concurrent", Decimal::ZERO, currency)?;
    let deposit_amount = Decimal::from_str("10.00")?;
    let total_ops = (config.demo_threads * config.demo_ops_per_thread) as u64;

    println!(
        "\n-- {} threads x {} deposits of {} --",
        config.demo_threads, config.demo_ops_per_thread, deposit_amount
    );

    let failures = AtomicU64::new(0);
    let started = Instant::now();
    thread::scope(|scope| {
        for _ in 0..config.demo_threads {
            scope.spawn(|| {
                for _ in 0..config.demo_ops_per_thread {
                    if ledger.deposit(storm.id(), deposit_amount).is_err() {
                        failures.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        }
    });
    let elapsed = started.elapsed();

    let expected = deposit_amount * Decimal::from(total_ops);
    println!("Expected balance after concurrent deposits: {expected}");
    println!("Actual balance: {}", ledger.balance_of(storm.id())?);
    println!(
        "{} deposits in {:.2}s ({:.0} ops/sec, {} failed)",
        total_ops,
        elapsed.as_secs_f64(),
        total_ops as f64 / elapsed.as_secs_f64(),
        failures.load(Ordering::Relaxed)
    );

    // Concurrent transfers between two accounts
    let from = ledger.create_account("FromUser", Decimal::from_str("5000.00")?, currency)?;
    let to = ledger.create_account("ToUser", Decimal::ZERO, currency)?;
    let transfer_amount = Decimal::from_str("1.00")?;

    println!(
        "\n-- {} threads x {} transfers of {} --",
        config.demo_threads, config.demo_ops_per_thread, transfer_amount
    );

    let failures = AtomicU64::new(0);
    let started = Instant::now();
    thread::scope(|scope| {
        for _ in 0..config.demo_threads {
            scope.spawn(|| {
                for _ in 0..config.demo_ops_per_thread {
                    if ledger
                        .transfer(from.id(), to.id(), transfer_amount)
                        .is_err()
                    {
                        failures.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        }
    });
    let elapsed = started.elapsed();

    println!("From balance: {}", ledger.balance_of(from.id())?);
    println!("To balance:   {}", ledger.balance_of(to.id())?);
    println!("Total system money: {}", ledger.total_balance());
    println!(
        "{} transfers in {:.2}s ({:.0} ops/sec, {} failed)",
        total_ops,
        elapsed.as_secs_f64(),
        total_ops as f64 / elapsed.as_secs_f64(),
        failures.load(Ordering::Relaxed)
    );

    println!("\n========== DEMO FINISHED ==========");

    Ok(())
}
