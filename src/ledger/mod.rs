pub(crate) mod aggregate;

use anyhow::Result;
use rust_decimal::Decimal;

use crate::models::{Transaction, TransactionInput, TransactionType};
use crate::store::Store;

pub(crate) use aggregate::MonthSummary;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub(crate) enum LedgerError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

/// Largest transaction amount or budget accepted: 999,999,999,999.99.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Digits an `f64` carries without loss.
const MAX_SIGNIFICANT_DIGITS: u32 = 15;

/// Something the user should be told about. Drained by the UI after each action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LedgerEvent {
    TransactionAdded { kind: TransactionType, amount: Decimal },
    TransactionDeleted { category: String, amount: Decimal },
    BudgetUpdated { amount: Decimal },
    StoreWarning(String),
}

impl std::fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TransactionAdded { kind, amount } => {
                write!(f, "{kind} of {} added", amount.normalize())
            }
            Self::TransactionDeleted { category, amount } => {
                write!(f, "{category} transaction of {} deleted", amount.normalize())
            }
            Self::BudgetUpdated { amount } => {
                write!(f, "monthly budget set to {}", amount.normalize())
            }
            Self::StoreWarning(msg) => write!(f, "Warning: {msg}"),
        }
    }
}

/// The one ledger of the process: transactions (newest first), the monthly
/// budget, and the store every mutation is written back to.
pub(crate) struct Ledger {
    store: Store,
    transactions: Vec<Transaction>,
    monthly_budget: Decimal,
    events: Vec<LedgerEvent>,
}

impl Ledger {
    pub(crate) fn load(store: Store) -> Result<Self> {
        let loaded = store.load()?;
        Ok(Self {
            store,
            transactions: loaded.transactions,
            monthly_budget: loaded.monthly_budget,
            events: loaded
                .warnings
                .into_iter()
                .map(LedgerEvent::StoreWarning)
                .collect(),
        })
    }

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn monthly_budget(&self) -> Decimal {
        self.monthly_budget
    }

    pub(crate) fn find(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub(crate) fn summary(&self, month: u32, year: i32) -> MonthSummary {
        MonthSummary::compute(&self.transactions, self.monthly_budget, month, year)
    }

    pub(crate) fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Mutations ─────────────────────────────────────────────

    pub(crate) fn add_transaction(&mut self, input: TransactionInput) -> Result<Transaction> {
        if input.amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidInput("amount must be greater than zero").into());
        }
        check_storable(input.amount)?;
        if input.category.trim().is_empty() {
            return Err(LedgerError::InvalidInput("category must not be empty").into());
        }

        let txn = input.into_transaction(uuid::Uuid::new_v4().to_string());
        let mut next = Vec::with_capacity(self.transactions.len() + 1);
        next.push(txn.clone());
        next.extend(self.transactions.iter().cloned());
        self.store.save_transactions(&next)?;
        self.transactions = next;

        log::info!(
            "added {} {} in '{}' on {} (id {})",
            txn.kind,
            txn.amount,
            txn.category,
            txn.date,
            txn.id
        );
        self.events.push(LedgerEvent::TransactionAdded {
            kind: txn.kind,
            amount: txn.amount,
        });
        Ok(txn)
    }

    /// Unknown ids are ignored.
    pub(crate) fn delete_transaction(&mut self, id: &str) -> Result<()> {
        let mut next = self.transactions.clone();
        let removed = next
            .iter()
            .position(|t| t.id == id)
            .map(|i| next.remove(i));
        self.store.save_transactions(&next)?;
        self.transactions = next;

        match removed {
            Some(txn) => {
                log::info!("deleted transaction {id}");
                self.events.push(LedgerEvent::TransactionDeleted {
                    category: txn.category,
                    amount: txn.amount,
                });
            }
            None => log::debug!("delete of unknown transaction {id} ignored"),
        }
        Ok(())
    }

    pub(crate) fn set_monthly_budget(&mut self, value: Decimal) -> Result<()> {
        if value < Decimal::ZERO {
            return Err(LedgerError::InvalidInput("budget must not be negative").into());
        }
        check_storable(value)?;
        self.store.save_monthly_budget(value)?;
        self.monthly_budget = value;

        log::info!("monthly budget set to {value}");
        self.events.push(LedgerEvent::BudgetUpdated { amount: value });
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &Store {
        &self.store
    }
}

/// Amounts are persisted as JSON numbers, so they have to come back out of
/// an `f64` unchanged.
fn check_storable(value: Decimal) -> Result<(), LedgerError> {
    if value > MAX_AMOUNT {
        return Err(LedgerError::InvalidInput("amount is too large"));
    }
    if significant_digits(value) > MAX_SIGNIFICANT_DIGITS {
        return Err(LedgerError::InvalidInput("amount has too many digits"));
    }
    Ok(())
}

fn significant_digits(value: Decimal) -> u32 {
    match value.normalize().mantissa().unsigned_abs() {
        0 => 0,
        m => m.ilog10() + 1,
    }
}

#[cfg(test)]
mod tests;
