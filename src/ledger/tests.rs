#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::store::{KEY_MONTHLY_BUDGET, KEY_TRANSACTIONS};

fn empty_ledger() -> Ledger {
    Ledger::load(Store::open_in_memory().unwrap()).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn expense(amount: Decimal, category: &str, on: &str) -> TransactionInput {
    TransactionInput::new(TransactionType::Expense, amount, category, date(on))
}

fn income(amount: Decimal, on: &str) -> TransactionInput {
    TransactionInput::new(TransactionType::Income, amount, "Salary", date(on))
}

// ── Loading ───────────────────────────────────────────────────

#[test]
fn test_new_ledger_is_empty() {
    let mut ledger = empty_ledger();
    assert!(ledger.transactions().is_empty());
    assert_eq!(ledger.monthly_budget(), Decimal::ZERO);
    assert!(ledger.take_events().is_empty());
}

#[test]
fn test_load_surfaces_store_warning_once() {
    let store = Store::open_in_memory().unwrap();
    store.set(KEY_TRANSACTIONS, "[{]").unwrap();
    let mut ledger = Ledger::load(store).unwrap();

    assert!(ledger.transactions().is_empty());
    let events = ledger.take_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], LedgerEvent::StoreWarning(_)));
    assert!(ledger.take_events().is_empty());
}

// ── add_transaction ───────────────────────────────────────────

#[test]
fn test_add_prepends_newest_first() {
    let mut ledger = empty_ledger();
    let first = ledger.add_transaction(income(dec!(100), "2024-06-01")).unwrap();
    let second = ledger
        .add_transaction(expense(dec!(5), "Food", "2024-06-02"))
        .unwrap();

    let ids: Vec<&str> = ledger.transactions().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
}

#[test]
fn test_add_assigns_unique_ids() {
    let mut ledger = empty_ledger();
    let a = ledger.add_transaction(income(dec!(1), "2024-06-01")).unwrap();
    let b = ledger.add_transaction(income(dec!(1), "2024-06-01")).unwrap();
    assert!(!a.id.is_empty());
    assert_ne!(a.id, b.id);
}

#[test]
fn test_add_persists_immediately() {
    let mut ledger = empty_ledger();
    ledger
        .add_transaction(expense(dec!(40000), "Food", "2024-06-02"))
        .unwrap();
    let reloaded = ledger.store().load().unwrap();
    assert_eq!(reloaded.transactions, ledger.transactions());
}

#[test]
fn test_add_emits_confirmation() {
    let mut ledger = empty_ledger();
    ledger
        .add_transaction(expense(dec!(50000), "Food", "2024-06-02"))
        .unwrap();
    let events = ledger.take_events();
    assert_eq!(
        events,
        vec![LedgerEvent::TransactionAdded {
            kind: TransactionType::Expense,
            amount: dec!(50000),
        }]
    );
    assert_eq!(events[0].to_string(), "expense of 50000 added");
}

#[test]
fn test_add_rejects_non_positive_amount() {
    let mut ledger = empty_ledger();
    for amount in [Decimal::ZERO, dec!(-5)] {
        let err = ledger
            .add_transaction(expense(amount, "Food", "2024-06-02"))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LedgerError>(),
            Some(LedgerError::InvalidInput(_))
        ));
    }
    assert!(ledger.transactions().is_empty());
    assert!(ledger.take_events().is_empty());
    assert!(ledger.store().get(KEY_TRANSACTIONS).unwrap().is_none());
}

#[test]
fn test_add_rejects_blank_category() {
    let mut ledger = empty_ledger();
    let err = ledger
        .add_transaction(expense(dec!(5), "  ", "2024-06-02"))
        .unwrap_err();
    assert!(err.downcast_ref::<LedgerError>().is_some());
    assert!(ledger.transactions().is_empty());
}

#[test]
fn test_add_rejects_amounts_json_cannot_hold() {
    let mut ledger = empty_ledger();
    for amount in [
        MAX_AMOUNT + dec!(0.01),
        Decimal::MAX,
        dec!(0.1234567890123456),
        dec!(12345678901.23456),
    ] {
        let err = ledger
            .add_transaction(expense(amount, "Food", "2024-06-02"))
            .unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<LedgerError>(),
                Some(LedgerError::InvalidInput(_))
            ),
            "{amount} was accepted"
        );
    }
    assert!(ledger.transactions().is_empty());
    assert!(ledger.take_events().is_empty());
}

#[test]
fn test_add_largest_amount_survives_reload() {
    let mut ledger = empty_ledger();
    let big = ledger
        .add_transaction(expense(MAX_AMOUNT, "House", "2024-06-02"))
        .unwrap();
    let fine = ledger
        .add_transaction(expense(dec!(1234.56789012345), "Fees", "2024-06-03"))
        .unwrap();

    let stored = ledger.store().load().unwrap().transactions;
    assert_eq!(stored, vec![fine, big]);
    assert_eq!(stored[1].amount, dec!(999999999999.99));
}

// ── delete_transaction ────────────────────────────────────────

#[test]
fn test_delete_removes_and_persists() {
    let mut ledger = empty_ledger();
    let keep = ledger.add_transaction(income(dec!(10), "2024-06-01")).unwrap();
    let gone = ledger
        .add_transaction(expense(dec!(3), "Food", "2024-06-01"))
        .unwrap();
    ledger.take_events();

    ledger.delete_transaction(&gone.id).unwrap();
    assert_eq!(ledger.transactions(), &[keep.clone()]);
    assert!(ledger.find(&gone.id).is_none());
    assert_eq!(ledger.store().load().unwrap().transactions, vec![keep]);
    assert_eq!(ledger.take_events().len(), 1);
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let mut ledger = empty_ledger();
    ledger.add_transaction(income(dec!(10), "2024-06-01")).unwrap();
    ledger
        .add_transaction(expense(dec!(3), "Food", "2024-06-01"))
        .unwrap();
    ledger.take_events();
    let before = ledger.transactions().to_vec();

    ledger.delete_transaction("does-not-exist").unwrap();
    assert_eq!(ledger.transactions(), before.as_slice());
    assert!(ledger.take_events().is_empty());
}

// ── set_monthly_budget ────────────────────────────────────────

#[test]
fn test_set_budget_roundtrips_through_store() {
    let mut ledger = empty_ledger();
    ledger.set_monthly_budget(dec!(5000)).unwrap();
    assert_eq!(ledger.monthly_budget(), dec!(5000));
    assert_eq!(
        ledger.store().get(KEY_MONTHLY_BUDGET).unwrap().as_deref(),
        Some("5000")
    );
    assert_eq!(ledger.store().load().unwrap().monthly_budget, dec!(5000));
    assert_eq!(
        ledger.take_events(),
        vec![LedgerEvent::BudgetUpdated { amount: dec!(5000) }]
    );
}

#[test]
fn test_set_budget_zero_means_unset() {
    let mut ledger = empty_ledger();
    ledger.set_monthly_budget(dec!(100)).unwrap();
    ledger.set_monthly_budget(Decimal::ZERO).unwrap();
    assert_eq!(ledger.summary(6, 2024).progress.used_percentage, Decimal::ZERO);
}

#[test]
fn test_set_budget_rejects_negative() {
    let mut ledger = empty_ledger();
    ledger.set_monthly_budget(dec!(100)).unwrap();
    assert!(ledger.set_monthly_budget(dec!(-1)).is_err());
    assert_eq!(ledger.monthly_budget(), dec!(100));
}

#[test]
fn test_set_budget_rejects_oversized() {
    let mut ledger = empty_ledger();
    ledger.set_monthly_budget(dec!(100)).unwrap();
    ledger.take_events();
    assert!(ledger.set_monthly_budget(MAX_AMOUNT * dec!(10)).is_err());
    assert!(ledger.set_monthly_budget(dec!(100.0000000000000001)).is_err());
    assert_eq!(ledger.monthly_budget(), dec!(100));
    assert!(ledger.take_events().is_empty());

    ledger.set_monthly_budget(MAX_AMOUNT).unwrap();
    assert_eq!(ledger.store().load().unwrap().monthly_budget, MAX_AMOUNT);
}

// ── Failed writes ─────────────────────────────────────────────

fn ledger_with_broken_store() -> (Ledger, Transaction) {
    let mut ledger = empty_ledger();
    let kept = ledger.add_transaction(income(dec!(10), "2024-06-01")).unwrap();
    ledger.set_monthly_budget(dec!(500)).unwrap();
    ledger.take_events();
    ledger.store().execute_batch("DROP TABLE kv").unwrap();
    (ledger, kept)
}

#[test]
fn test_failed_add_leaves_ledger_untouched() {
    let (mut ledger, kept) = ledger_with_broken_store();

    assert!(ledger
        .add_transaction(expense(dec!(5), "Food", "2024-06-02"))
        .is_err());
    assert_eq!(ledger.transactions(), &[kept]);
    assert_eq!(ledger.summary(6, 2024).totals.expense, Decimal::ZERO);
    assert!(ledger.take_events().is_empty());
}

#[test]
fn test_failed_delete_leaves_ledger_untouched() {
    let (mut ledger, kept) = ledger_with_broken_store();

    assert!(ledger.delete_transaction(&kept.id).is_err());
    assert_eq!(ledger.find(&kept.id), Some(&kept));
    assert!(ledger.take_events().is_empty());
}

#[test]
fn test_failed_budget_write_keeps_old_budget() {
    let (mut ledger, _) = ledger_with_broken_store();

    assert!(ledger.set_monthly_budget(dec!(900)).is_err());
    assert_eq!(ledger.monthly_budget(), dec!(500));
    assert_eq!(ledger.summary(6, 2024).progress.remaining, dec!(500));
    assert!(ledger.take_events().is_empty());
}

// ── Summaries ─────────────────────────────────────────────────

#[test]
fn test_summary_reflects_mutations() {
    let mut ledger = empty_ledger();
    ledger.add_transaction(income(dec!(100000), "2024-06-01")).unwrap();
    let food = ledger
        .add_transaction(expense(dec!(40000), "Food", "2024-06-02"))
        .unwrap();
    ledger.set_monthly_budget(dec!(50000)).unwrap();

    let summary = ledger.summary(6, 2024);
    assert_eq!(summary.totals.balance, dec!(60000));
    assert_eq!(summary.progress.remaining, dec!(10000));
    assert_eq!(summary.progress.used_percentage, dec!(80));

    ledger.delete_transaction(&food.id).unwrap();
    let summary = ledger.summary(6, 2024);
    assert_eq!(summary.totals.expense, Decimal::ZERO);
    assert_eq!(summary.progress.remaining, dec!(50000));
}
