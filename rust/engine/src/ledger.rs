//! Account ledger consumed by the tables for bets and payouts.
//!
//! Tables only see the [`Ledger`] trait. [`Account`] is the in-memory
//! implementation used by the CLI and the tests; it keeps a transaction
//! history so a caller can audit every credit movement of a session.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Starting balance of a fresh [`Account`], in credits (cents).
pub const STARTING_CREDITS: u64 = 10_000;

/// Credits added by one insert when no amount is given.
pub const INSERT_CREDITS: u64 = 2_000;

/// Transactions kept by an [`Account`]; older entries are dropped first.
pub const HISTORY_LIMIT: usize = 1_000;

pub trait Ledger {
    fn balance(&self) -> u64;

    /// Removes `amount` for a wager. Returns `false` on insufficient funds
    /// or a zero amount, leaving the balance untouched.
    fn try_debit(&mut self, amount: u64) -> bool;

    /// Adds `amount`. `is_external` marks money inserted from outside the
    /// games rather than won in them.
    fn credit(&mut self, amount: u64, is_external: bool);
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Inserted,
    Earned,
    Spent,
    Withdrew,
    AttemptedOverdraft,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: u64,
    pub kind: TransactionKind,
    /// Balance after the transaction was applied (or refused)
    pub balance_after: u64,
    /// RFC3339 timestamp
    pub ts: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    credits: u64,
    credits_spent: u64,
    credits_earned: u64,
    history: VecDeque<Transaction>,
}

impl Default for Account {
    fn default() -> Self {
        Self::new(STARTING_CREDITS)
    }
}

impl Account {
    pub fn new(credits: u64) -> Self {
        Self {
            credits,
            credits_spent: 0,
            credits_earned: 0,
            history: VecDeque::new(),
        }
    }

    pub fn credits_spent(&self) -> u64 {
        self.credits_spent
    }

    pub fn credits_earned(&self) -> u64 {
        self.credits_earned
    }

    /// The most recent transactions, oldest first, at most [`HISTORY_LIMIT`].
    pub fn history(&self) -> std::collections::vec_deque::Iter<'_, Transaction> {
        self.history.iter()
    }

    /// Inserts external credits. Zero amounts are ignored.
    pub fn insert(&mut self, amount: u64) -> bool {
        if amount == 0 {
            return false;
        }
        self.credit(amount, true);
        true
    }

    /// Withdraws the whole balance, returning the amount paid out.
    pub fn withdraw_all(&mut self) -> u64 {
        let amount = self.credits;
        if self.remove(amount, true) {
            amount
        } else {
            0
        }
    }

    fn remove(&mut self, amount: u64, is_external: bool) -> bool {
        if amount == 0 {
            return false;
        }
        if amount > self.credits {
            self.record(amount, TransactionKind::AttemptedOverdraft);
            return false;
        }
        self.credits -= amount;
        if is_external {
            self.record(amount, TransactionKind::Withdrew);
        } else {
            self.credits_spent += amount;
            self.record(amount, TransactionKind::Spent);
        }
        true
    }

    fn record(&mut self, amount: u64, kind: TransactionKind) {
        tracing::debug!(amount, ?kind, balance = self.credits, "ledger transaction");
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(Transaction {
            amount,
            kind,
            balance_after: self.credits,
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        });
    }
}

impl Ledger for Account {
    fn balance(&self) -> u64 {
        self.credits
    }

    fn try_debit(&mut self, amount: u64) -> bool {
        self.remove(amount, false)
    }

    fn credit(&mut self, amount: u64, is_external: bool) {
        if amount == 0 {
            return;
        }
        self.credits = self.credits.saturating_add(amount);
        if is_external {
            self.record(amount, TransactionKind::Inserted);
        } else {
            self.credits_earned += amount;
            self.record(amount, TransactionKind::Earned);
        }
    }
}
